//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing of the Sunlight API.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server.expect_get("/committees.get.json")
//!         .with_query("apikey", "test-api-key")
//!         .respond_with_json(json!({"response": {"committee": {}}}))
//!         .mount()
//!         .await;
//!
//!     // Point HttpTransport at server.url()
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`

use std::time::Duration;

use serde_json::Value;
pub use wiremock::matchers::{method, path, query_param};
pub use wiremock::MockServer as WiremockServer;
use wiremock::MockBuilder;
pub use wiremock::{Mock, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Start stubbing a GET request to `request_path`.
    pub fn expect_get(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            matcher: Mock::given(method("GET")).and(path(request_path)),
            status: 200,
            json: None,
            text: None,
            delay: None,
            times: None,
        }
    }

    /// Panic if any mounted `expect_times` expectation was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}

/// Builder for one stubbed route.
pub struct StubBuilder<'a> {
    server: &'a WiremockServer,
    matcher: MockBuilder,
    status: u16,
    json: Option<Value>,
    text: Option<String>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying `key=value` in the query string.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.matcher = self.matcher.and(query_param(key, value));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.text = Some(body.to_string());
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        if let Some(json) = self.json {
            template = template.set_body_json(json);
        }
        if let Some(text) = self.text {
            template = template.set_body_string(text);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = self.matcher.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
