#![allow(clippy::unwrap_used)]
//! Tests for status gating and transport failures.

use davclnt_client::{ClientConfig, ClientError};
use davclnt_test::{ResponseFixture, client_for, client_with, multistatus};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// ## Summary
/// Test that a 404 is a status error even when the body is a valid multistatus.
#[test_log::test(tokio::test)]
async fn not_found_with_valid_body_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(404).set_body_string(multistatus(&[
            ResponseFixture::new("/a").prop("displayname", "a"),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.prop_find("/a", ["displayname"]).await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(err.to_string(), "Error: 404 Not Found");
}

/// ## Summary
/// Test that a server error is reported once and never retried.
#[test_log::test(tokio::test)]
async fn server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let err = client.all_prop_find("/").await.unwrap_err();

    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 503));
}

/// ## Summary
/// Test that a 2xx status other than 207 is accepted.
#[test_log::test(tokio::test)]
async fn plain_ok_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(200).set_body_string(multistatus(&[
            ResponseFixture::new("/a").prop("displayname", "a"),
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server, "");
    let result = client.all_prop_find("/a").await.unwrap();
    assert_eq!(result["/a"]["displayname"], "a");
}

/// ## Summary
/// Test that an unreachable server surfaces as a transport error.
#[test_log::test(tokio::test)]
async fn unreachable_server_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = client_with(ClientConfig::builder(format!("http://127.0.0.1:{port}")).build());
    let err = client.all_prop_find("/").await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)), "unexpected error: {err}");
}

/// ## Summary
/// Test that an unusable host is rejected before any request is sent.
#[test_log::test(tokio::test)]
async fn invalid_host_is_url_error() {
    let client = client_with(ClientConfig::builder("http://bad host").build());
    let err = client.exists("/a").await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidUrl { .. }));
}
