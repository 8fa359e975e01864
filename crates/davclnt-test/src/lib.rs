//! davclnt integration test support.
//!
//! Builders for multistatus documents and a client wired to a mock server.

use davclnt_client::{ClientConfig, DavClient};
use wiremock::MockServer;

/// One `<D:response>` of a synthetic multistatus body.
#[derive(Debug, Clone, Default)]
pub struct ResponseFixture {
    href: String,
    props: Vec<(String, String)>,
    without_propstat: bool,
}

impl ResponseFixture {
    #[must_use]
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_owned(),
            ..Self::default()
        }
    }

    /// Adds a `DAV:` property with a text value; an empty value renders as
    /// an empty element.
    #[must_use]
    pub fn prop(mut self, name: &str, value: &str) -> Self {
        self.props.push((format!("D:{name}"), value.to_owned()));
        self
    }

    /// Adds a property in another namespace, bound to the `x` prefix.
    #[must_use]
    pub fn foreign_prop(mut self, name: &str, value: &str) -> Self {
        self.props.push((format!("x:{name}"), value.to_owned()));
        self
    }

    /// Renders the response with a bare status instead of a propstat block.
    #[must_use]
    pub fn without_propstat(mut self) -> Self {
        self.without_propstat = true;
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str("  <D:response>\n");
        out.push_str(&format!("    <D:href>{}</D:href>\n", self.href));
        if self.without_propstat {
            out.push_str("    <D:status>HTTP/1.1 404 Not Found</D:status>\n");
        } else {
            out.push_str("    <D:propstat>\n      <D:prop>\n");
            for (name, value) in &self.props {
                if value.is_empty() {
                    out.push_str(&format!("        <{name}/>\n"));
                } else {
                    out.push_str(&format!("        <{name}>{value}</{name}>\n"));
                }
            }
            out.push_str("      </D:prop>\n      <D:status>HTTP/1.1 200 OK</D:status>\n");
            out.push_str("    </D:propstat>\n");
        }
        out.push_str("  </D:response>\n");
    }
}

/// Renders a multistatus document containing `responses` in order.
#[must_use]
pub fn multistatus(responses: &[ResponseFixture]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<D:multistatus xmlns:D=\"DAV:\" xmlns:x=\"urn:example:custom\">\n",
    );
    for response in responses {
        response.render(&mut out);
    }
    out.push_str("</D:multistatus>\n");
    out
}

/// Client pointed at `server` with the given root folder and no credentials.
///
/// ## Panics
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn client_for(server: &MockServer, root_folder: &str) -> DavClient {
    client_with(ClientConfig::builder(server.uri()).root_folder(root_folder).build())
}

/// ## Panics
/// Panics if the HTTP client cannot be built.
#[must_use]
#[expect(clippy::expect_used, reason = "A client that cannot be built makes the test meaningless")]
pub fn client_with(config: ClientConfig) -> DavClient {
    DavClient::new(config).expect("Failed to build client")
}
