//! Represent API client for fetching representatives by postal code.
//!
//! The trait abstraction lets the lookup service run against the real API,
//! a `MockHttpServer` in integration tests, or [`mock::MockDirectory`] in
//! unit tests.
//!
//! # Example
//!
//! ```ignore
//! use voices_api::represent::{HttpRepresentClient, RepresentativeDirectory};
//!
//! let client = HttpRepresentClient::new("https://represent.opennorth.ca");
//! let records = client.fetch_postcode("K1A0A6").await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use super::types::{PostcodeResponse, RawRepresentative};
use crate::config::RepresentConfig;

/// Errors that can occur when calling the directory.
///
/// Neither variant is retried; callers surface them as a failed lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Transport, timeout or body decoding failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Directory answered with a non-success status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Source of raw representative records for a postal code.
#[async_trait]
pub trait RepresentativeDirectory: Send + Sync {
    /// Fetch every representative for an already-normalized, valid postal
    /// code. An unknown postal code yields an empty list.
    async fn fetch_postcode(&self, normalized: &str)
        -> Result<Vec<RawRepresentative>, LookupError>;
}

/// HTTP implementation of [`RepresentativeDirectory`] backed by reqwest.
pub struct HttpRepresentClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRepresentClient {
    /// Create a client with reqwest defaults (no timeout).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Request`] if the TLS backend cannot be
    /// initialized.
    pub fn from_config(config: &RepresentConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client, config.base_url.as_str()))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Upper bound on how much of an error body is kept for logging.
pub const MAX_ERROR_BODY_BYTES: usize = 1024;

/// Read at most [`MAX_ERROR_BODY_BYTES`] of a failed response's body.
async fn error_excerpt(mut response: reqwest::Response) -> String {
    let mut bytes = Vec::new();
    while bytes.len() < MAX_ERROR_BODY_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => bytes.extend_from_slice(&chunk),
            Ok(None) | Err(_) => break,
        }
    }
    bytes.truncate(MAX_ERROR_BODY_BYTES);
    String::from_utf8_lossy(&bytes).into_owned()
}

#[async_trait]
impl RepresentativeDirectory for HttpRepresentClient {
    async fn fetch_postcode(
        &self,
        normalized: &str,
    ) -> Result<Vec<RawRepresentative>, LookupError> {
        let url = format!("{}/postcodes/{}/", self.base_url, normalized);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        // Represent answers 404 for postal codes it has no boundaries for.
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::info!(postal_code = normalized, "postal code unknown to directory");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let message = error_excerpt(response).await;
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: PostcodeResponse = response.json().await?;
        Ok(body.into_representatives())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{LookupError, RawRepresentative, RepresentativeDirectory};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of [`RepresentativeDirectory`] for unit tests.
    ///
    /// Configure the response with `set_result` and verify calls with
    /// `calls()`. Without a configured result every lookup returns an
    /// empty list.
    pub struct MockDirectory {
        result: Mutex<Option<Result<Vec<RawRepresentative>, LookupError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockDirectory {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Mock that answers every lookup with `records`.
        pub fn returning(records: Vec<RawRepresentative>) -> Self {
            let mock = Self::new();
            mock.set_result(Ok(records));
            mock
        }

        /// Set the result for the next `fetch_postcode` call.
        pub fn set_result(&self, result: Result<Vec<RawRepresentative>, LookupError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        /// Get all postal codes passed to `fetch_postcode`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockDirectory {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl RepresentativeDirectory for MockDirectory {
        async fn fetch_postcode(
            &self,
            normalized: &str,
        ) -> Result<Vec<RawRepresentative>, LookupError> {
            self.calls.lock().unwrap().push(normalized.to_string());

            let mut result = self.result.lock().unwrap();
            match result.as_ref() {
                // Successful results are sticky so one mock can serve many requests.
                Some(Ok(records)) => Ok(records.clone()),
                Some(Err(_)) => result.take().unwrap_or_else(|| Ok(Vec::new())),
                None => Ok(Vec::new()),
            }
        }
    }
}
