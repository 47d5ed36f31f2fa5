//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! A thin declarative wrapper around `wiremock`.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_get("/postcodes/K1A0A6/")
//!     .respond_with_json(json!({"representatives_centroid": []}))
//!     .expect_times(1)
//!     .mount()
//!     .await;
//!
//! let client = HttpRepresentClient::new(server.url());
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500)`, optionally `.with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` to assert call count on drop

use std::time::Duration;

use serde_json::Value;
pub use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer as WiremockServer, ResponseTemplate};

/// A local HTTP server standing in for an external API.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:54321`.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn expect_get(&self, path: &str) -> StubBuilder<'_> {
        StubBuilder::new(&self.server, "GET", path)
    }

    /// Requests received so far.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// One stubbed route, mounted with [`StubBuilder::mount`].
pub struct StubBuilder<'a> {
    server: &'a WiremockServer,
    method: &'static str,
    path: String,
    headers: Vec<(String, String)>,
    status: u16,
    json: Option<Value>,
    body: Option<String>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> StubBuilder<'a> {
    fn new(server: &'a WiremockServer, method: &'static str, path: &str) -> Self {
        Self {
            server,
            method,
            path: path.to_string(),
            headers: Vec::new(),
            status: 200,
            json: None,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Only match requests carrying this header value.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, value: Value) -> Self {
        self.status = 200;
        self.json = Some(value);
        self
    }

    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// JSON body for a non-200 response; keeps the status.
    pub fn with_json_response(mut self, value: Value) -> Self {
        self.json = Some(value);
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
        let mut builder = Mock::given(method(self.method)).and(path(self.path.as_str()));
        for (name, value) in &self.headers {
            builder = builder.and(header(name.as_str(), value.as_str()));
        }

        let mut response = ResponseTemplate::new(self.status);
        if let Some(json) = self.json {
            response = response.set_body_json(json);
        }
        if let Some(body) = self.body {
            response = response.set_body_string(body);
        }
        if let Some(delay) = self.delay {
            response = response.set_delay(delay);
        }

        let mut mock = builder.respond_with(response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
