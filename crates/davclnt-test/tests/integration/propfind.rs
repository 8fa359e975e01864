#![allow(clippy::unwrap_used)]
//! Tests for the three property-discovery queries.

use davclnt_client::{ClientConfig, ClientError, Depth, PropfindRequest};
use davclnt_test::{ResponseFixture, client_for, client_with, multistatus};
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Named properties
// ============================================================================

/// ## Summary
/// Test that requested names are sent and come back as a name/value map.
#[test_log::test(tokio::test)]
async fn prop_find_returns_requested_values() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs/a.txt"))
        .and(header("Depth", "1"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string_contains(
            "<prop><displayname/><getlastmodified/></prop>",
        ))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/dav/docs/a.txt")
                .prop("displayname", "x")
                .prop("getlastmodified", "y"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "/dav/");
    let result = client
        .prop_find("docs/a.txt", ["displayname", "getlastmodified"])
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    let props = &result["docs/a.txt"];
    assert_eq!(props.len(), 2);
    assert_eq!(props["displayname"], "x");
    assert_eq!(props["getlastmodified"], "y");
}

/// ## Summary
/// Test that hrefs outside the root folder keep their full path.
#[test_log::test(tokio::test)]
async fn prop_find_strips_root_folder_only_when_prefixed() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/docs/"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/dav/docs/").prop("displayname", "docs"),
            ResponseFixture::new("/dav/docs/a.txt").prop("displayname", "a"),
            ResponseFixture::new("/other/a.txt").prop("displayname", "elsewhere"),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, "/dav/");
    let result = client.prop_find("docs/", ["displayname"]).await.unwrap();

    let keys: Vec<_> = result.keys().map(String::as_str).collect();
    assert_eq!(keys, ["/other/a.txt", "docs/", "docs/a.txt"]);
    assert_eq!(result["/other/a.txt"]["displayname"], "elsewhere");
}

/// ## Summary
/// Test that properties from other namespaces are keyed by local name.
#[test_log::test(tokio::test)]
async fn prop_find_ignores_property_namespaces() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/a")
                .prop("getetag", "\"abc\"")
                .foreign_prop("color", "blue"),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client.prop_find("/a", ["getetag", "color"]).await.unwrap();

    let props = &result["/a"];
    assert_eq!(props["getetag"], "\"abc\"");
    assert_eq!(props["color"], "blue");
    assert!(!props.contains_key("x:color"));
}

/// ## Summary
/// Test that configured credentials are sent as basic auth.
#[test_log::test(tokio::test)]
async fn prop_find_sends_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(basic_auth("alice", "secret"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/a").prop("displayname", "a"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        ClientConfig::builder(server.uri())
            .login("alice")
            .password("secret")
            .build(),
    );

    let result = client.prop_find("/a", ["displayname"]).await.unwrap();
    assert_eq!(result["/a"]["displayname"], "a");
}

// ============================================================================
// All properties and property names
// ============================================================================

/// ## Summary
/// Test that an allprop query returns every reported property.
#[test_log::test(tokio::test)]
async fn all_prop_find_returns_every_property() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(body_string_contains("<allprop/>"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/dav/")
                .prop("displayname", "root")
                .prop("resourcetype", ""),
            ResponseFixture::new("/dav/a.txt")
                .prop("displayname", "a.txt")
                .prop("getcontentlength", "12")
                .prop("getcontenttype", "text/plain"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "/dav/");
    let result = client.all_prop_find("").await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[""]["displayname"], "root");
    assert_eq!(result[""]["resourcetype"], "");
    assert_eq!(result["a.txt"]["getcontentlength"], "12");
    assert_eq!(result["a.txt"]["getcontenttype"], "text/plain");
}

/// ## Summary
/// Test that a propname query yields name sets rather than empty values.
#[test_log::test(tokio::test)]
async fn prop_name_find_returns_name_sets() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(body_string_contains("<propname/>"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/dav/a.txt")
                .prop("displayname", "")
                .prop("getetag", "")
                .foreign_prop("color", ""),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "/dav/");
    let result = client.prop_name_find("a.txt").await.unwrap();

    let names: Vec<_> = result["a.txt"].iter().map(String::as_str).collect();
    assert_eq!(names, ["color", "displayname", "getetag"]);
}

/// ## Summary
/// Test that a raw query keeps server order, hrefs, and the chosen depth.
#[test_log::test(tokio::test)]
async fn query_keeps_server_order_and_depth() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(header("Depth", "0"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/dav/z").prop("displayname", "z"),
            ResponseFixture::new("/dav/a").prop("displayname", "a"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "/dav/");
    let request = PropfindRequest::prop(["displayname"]).with_depth(Depth::Zero);
    let ms = client.query("", &request).await.unwrap();

    let hrefs: Vec<_> = ms.iter().map(|entry| entry.href.as_str()).collect();
    assert_eq!(hrefs, ["/dav/z", "/dav/a"]);
}

// ============================================================================
// Schema failures
// ============================================================================

/// ## Summary
/// Test that an empty multistatus is an error, not an empty map.
#[test_log::test(tokio::test)]
async fn empty_multistatus_is_schema_error() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[])))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.all_prop_find("/").await.unwrap_err();

    assert!(err.is_schema(), "unexpected error: {err}");
    assert!(err.to_string().starts_with("Unknown xml schema"));
}

/// ## Summary
/// Test that one response without propstat fails the whole query.
#[test_log::test(tokio::test)]
async fn missing_propstat_discards_all_entries() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(207).set_body_string(multistatus(&[
            ResponseFixture::new("/good").prop("displayname", "good"),
            ResponseFixture::new("/bad").without_propstat(),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.prop_find("/", ["displayname"]).await.unwrap_err();

    assert!(matches!(err, ClientError::Schema(_)));
}

/// ## Summary
/// Test that a body that is not XML is a schema error.
#[test_log::test(tokio::test)]
async fn non_xml_body_is_schema_error() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Login</body></html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.prop_name_find("/").await.unwrap_err();

    assert!(err.is_schema());
}
