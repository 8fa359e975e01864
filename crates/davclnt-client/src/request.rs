//! Authenticated request construction and execution.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Body, Client, Method, StatusCode};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const APPLICATION_XML: &str = "application/xml";

/// Status, headers and fully read body of one response.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A status is acceptable if it lies in `[200, 400)`.
#[must_use]
pub fn status_is_valid(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

/// ## Summary
/// Returns `Ok` for statuses in `[200, 400)`.
///
/// ## Errors
/// Returns [`ClientError::Status`] for anything else.
pub fn ensure_valid_status(status: StatusCode) -> ClientResult<()> {
    if status_is_valid(status) {
        Ok(())
    } else {
        Err(ClientError::Status(status))
    }
}

/// ## Summary
/// Parses a method name such as `PROPFIND` or `MKCOL`.
///
/// ## Errors
/// Returns [`ClientError::InvalidRequest`] if the name is not a valid token.
pub fn dav_method(name: &str) -> ClientResult<Method> {
    Method::from_bytes(name.as_bytes())
        .map_err(|err| ClientError::InvalidRequest(format!("method {name}: {err}")))
}

/// Builds requests scoped to `host[:port][root_folder]`.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
    http: &'a Client,
}

impl<'a> RequestBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a ClientConfig, http: &'a Client) -> Self {
        Self { config, http }
    }

    /// ## Summary
    /// Resolves a client path to an absolute URL by plain concatenation:
    /// connection string, root folder, then `path`.
    ///
    /// ## Errors
    /// Returns [`ClientError::InvalidUrl`] if the result does not parse.
    pub fn url_for(&self, path: &str) -> ClientResult<Url> {
        let raw = format!(
            "{}{}{}",
            self.config.connection_string(),
            self.config.root_folder(),
            path
        );
        Url::parse(&raw).map_err(|source| ClientError::InvalidUrl { url: raw, source })
    }

    /// ## Summary
    /// Builds an authenticated request for `method` on `path` with an
    /// `application/octet-stream` content type.
    ///
    /// ## Errors
    /// Returns an error if the target URL is invalid.
    pub fn build(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> ClientResult<reqwest::RequestBuilder> {
        self.build_with_content_type(method, path, body, OCTET_STREAM)
    }

    /// ## Summary
    /// Like [`RequestBuilder::build`] with an explicit content type.
    ///
    /// ## Errors
    /// Returns an error if the target URL is invalid.
    pub fn build_with_content_type(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
        content_type: &'static str,
    ) -> ClientResult<reqwest::RequestBuilder> {
        let url = self.url_for(path)?;
        tracing::trace!(%method, %url, "Building request");

        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(content_type));

        if let Some(creds) = self.config.credentials() {
            request = request.basic_auth(&creds.login, Some(&creds.password));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        Ok(request)
    }
}

/// ## Summary
/// Sends a request once and reads the whole body.
///
/// ## Errors
/// Returns [`ClientError::Transport`] if sending or reading fails.
pub async fn execute(request: reqwest::RequestBuilder) -> ClientResult<RawResponse> {
    let response = request.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    tracing::debug!(status = status.as_u16(), body_len = body.len(), "Response received");

    Ok(RawResponse {
        status,
        headers,
        body,
    })
}
