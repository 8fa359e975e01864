//! The `WebDAV` client.

use davclnt_rfc::rfc::dav::build::serialize_propfind;
use davclnt_rfc::rfc::dav::core::{Multistatus, PropfindRequest};
use davclnt_rfc::rfc::dav::parse::parse_multistatus;
use reqwest::{Body, Client, Method, StatusCode};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::normalize::{PropertyMap, PropertyNameMap, properties_by_path, property_names_by_path};
use crate::request::{self, APPLICATION_XML, RawResponse, RequestBuilder, dav_method};

const USER_AGENT: &str = concat!("davclnt/", env!("CARGO_PKG_VERSION"));

const DEPTH: &str = "Depth";
const DESTINATION: &str = "Destination";

/// A `WebDAV` client bound to one server and root folder.
///
/// Every operation is exactly one HTTP round trip. Nothing is retried and
/// no state is kept between calls, so a client can be cloned or shared
/// across tasks.
#[derive(Debug, Clone)]
pub struct DavClient {
    config: ClientConfig,
    http: Client,
}

impl DavClient {
    /// ## Summary
    /// Creates a client with its own connection pool.
    ///
    /// ## Errors
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// The configured timeout is not applied; the given client's own
    /// settings are used as is.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: Client) -> Self {
        Self { config, http }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn requests(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.config, &self.http)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Body>) -> ClientResult<RawResponse> {
        let request = self.requests().build(method, path, body)?;
        request::execute(request).await
    }

    /// ## Summary
    /// Runs a PROPFIND and decodes the multistatus body as returned by the
    /// server, with hrefs untouched.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)`,
    /// [`ClientError::Schema`] if the body is not a usable multistatus
    /// document, and [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self, request), fields(depth = %request.depth))]
    pub async fn query(&self, path: &str, request: &PropfindRequest) -> ClientResult<Multistatus> {
        let body = serialize_propfind(request)
            .map_err(|err| ClientError::InvalidRequest(format!("PROPFIND body: {err}")))?;

        let http_request = self
            .requests()
            .build_with_content_type(
                dav_method("PROPFIND")?,
                path,
                Some(Body::from(body)),
                APPLICATION_XML,
            )?
            .header(DEPTH, request.depth.as_str());

        let response = request::execute(http_request).await?;
        request::ensure_valid_status(response.status).inspect_err(|_| {
            tracing::warn!(status = %response.status, "PROPFIND rejected");
        })?;

        Ok(parse_multistatus(&response.body)?)
    }

    /// ## Summary
    /// Fetches the named properties of `path` and its immediate children.
    ///
    /// Keys of the result are hrefs with the root folder stripped.
    ///
    /// ## Errors
    /// See [`DavClient::query`].
    #[tracing::instrument(skip(self, names))]
    pub async fn prop_find<I, S>(&self, path: &str, names: I) -> ClientResult<PropertyMap>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let multistatus = self.query(path, &PropfindRequest::prop(names)).await?;
        Ok(properties_by_path(multistatus, self.config.root_folder()))
    }

    /// ## Summary
    /// Fetches every property the server reports for `path` and its
    /// immediate children.
    ///
    /// ## Errors
    /// See [`DavClient::query`].
    #[tracing::instrument(skip(self))]
    pub async fn all_prop_find(&self, path: &str) -> ClientResult<PropertyMap> {
        let multistatus = self.query(path, &PropfindRequest::allprop()).await?;
        Ok(properties_by_path(multistatus, self.config.root_folder()))
    }

    /// ## Summary
    /// Lists the property names defined on `path` and its immediate children.
    ///
    /// ## Errors
    /// See [`DavClient::query`].
    #[tracing::instrument(skip(self))]
    pub async fn prop_name_find(&self, path: &str) -> ClientResult<PropertyNameMap> {
        let multistatus = self.query(path, &PropfindRequest::propname()).await?;
        Ok(property_names_by_path(multistatus, self.config.root_folder()))
    }

    /// ## Summary
    /// Checks for a resource with a HEAD request. Only `200 OK` counts as
    /// existing; every other status yields `false`.
    ///
    /// ## Errors
    /// Returns [`ClientError::Transport`] if the request cannot be sent.
    #[tracing::instrument(skip(self))]
    pub async fn exists(&self, path: &str) -> ClientResult<bool> {
        let response = self.send(Method::HEAD, path, None).await?;
        Ok(response.status == StatusCode::OK)
    }

    /// ## Summary
    /// Downloads a resource.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.send(Method::GET, path, None).await?;
        request::ensure_valid_status(response.status)?;
        Ok(response.body)
    }

    /// ## Summary
    /// Uploads `body` to `path`, replacing any existing resource.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: impl Into<Body>) -> ClientResult<()> {
        let response = self.send(Method::PUT, path, Some(body.into())).await?;
        request::ensure_valid_status(response.status)
    }

    /// ## Summary
    /// Deletes a resource or collection.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.send(Method::DELETE, path, None).await?;
        request::ensure_valid_status(response.status)
    }

    /// ## Summary
    /// Creates a collection.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self))]
    pub async fn mkcol(&self, path: &str) -> ClientResult<()> {
        let response = self.send(dav_method("MKCOL")?, path, None).await?;
        request::ensure_valid_status(response.status)
    }

    /// ## Summary
    /// Copies `path` to `destination`; both are resolved under the root folder.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self))]
    pub async fn copy(&self, path: &str, destination: &str) -> ClientResult<()> {
        self.transfer("COPY", path, destination).await
    }

    /// ## Summary
    /// Moves `path` to `destination`; both are resolved under the root folder.
    ///
    /// ## Errors
    /// Returns [`ClientError::Status`] for a status outside `[200, 400)` and
    /// [`ClientError::Transport`] on network failure.
    #[tracing::instrument(skip(self))]
    pub async fn move_to(&self, path: &str, destination: &str) -> ClientResult<()> {
        self.transfer("MOVE", path, destination).await
    }

    async fn transfer(&self, method: &str, path: &str, destination: &str) -> ClientResult<()> {
        let requests = self.requests();
        let destination = requests.url_for(destination)?;

        let http_request = requests
            .build(dav_method(method)?, path, None)?
            .header(DESTINATION, destination.as_str());

        let response = request::execute(http_request).await?;
        request::ensure_valid_status(response.status)
    }
}
