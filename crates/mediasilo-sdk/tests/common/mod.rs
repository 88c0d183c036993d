/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mediasilo-sdk tests

#![allow(dead_code)]

use std::time::Duration;

use mediasilo_sdk::{ClientConfig, Credentials, MediaSiloClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "editor";
pub const PASSWORD: &str = "hunter2";
pub const HOSTNAME: &str = "studio";
pub const SESSION_TOKEN: &str = "session-token-1";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Base URL of the mock server, as the SDK expects it
pub fn base_url(server: &MockServer) -> String {
    format!("{}/v3/", server.uri())
}

/// Password-grant client pointed at the mock server
pub fn password_client(server: &MockServer) -> MediaSiloClient {
    let credentials =
        Credentials::password_with_base_url(USERNAME, PASSWORD, HOSTNAME, base_url(server))
            .unwrap();
    MediaSiloClient::new(credentials).unwrap()
}

/// Signed-request client pointed at the mock server
pub fn signed_client(server: &MockServer, key: &str, secret: &str) -> MediaSiloClient {
    let credentials = Credentials::signed(key, secret).unwrap();
    MediaSiloClient::with_config(credentials, ClientConfig::default().with_base_url(base_url(server)))
        .unwrap()
}

pub fn login_body(token: &str) -> serde_json::Value {
    serde_json::json!({
        "session": token,
        "user": {"id": "U1", "accountId": "A1", "userName": USERNAME}
    })
}

/// Expect exactly `times` login exchanges, each answered with `token`
pub async fn mount_login(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v3/session"))
        .and(body_json(serde_json::json!({
            "username": USERNAME,
            "password": PASSWORD,
            "hostname": HOSTNAME,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(token)))
        .expect(times)
        .mount(server)
        .await;
}

/// Same as [`mount_login`] but the response is held back for `delay`
pub async fn mount_slow_login(server: &MockServer, token: &str, delay: Duration, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v3/session"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_body(token))
                .set_delay(delay),
        )
        .expect(times)
        .mount(server)
        .await;
}

pub fn project_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "numericId": 987654321,
        "name": "My New Project",
        "description": "This project will hold the best assets we have",
        "dateCreated": 1224190488000_i64,
        "ownerId": "1234ABCD-12AB-1234-1234ABCD1234ABCD",
        "favorite": false
    })
}
