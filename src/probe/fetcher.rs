//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the sweep, including:
//! - Building one pooled HTTP client shared by every task
//! - GET requests for profile pages
//! - Error classification into timeout and network failures
//!
//! Retrying is left to the dispatcher.

use crate::config::{DispatchConfig, HttpConfig};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Why a fetch produced no body
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response completed within the deadline
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection-level failure (DNS, refused, TLS, reset, body read)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Retrieves page bodies for profile links
///
/// The dispatcher is generic over this trait so that fetch timing can be
/// controlled in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs exactly one retrieval of `url` and returns the body text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// The client's own timeout is the request deadline and covers connecting
/// too, so a stalled connection surfaces as [`FetchError::Timeout`] only once
/// the whole deadline has passed. Redirects follow the
/// reqwest default policy.
///
/// # Arguments
///
/// * `http` - User agent configuration
/// * `dispatch` - Supplies the request deadline
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    http: &HttpConfig,
    dispatch: &DispatchConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(dispatch.request_timeout())
        .gzip(true)
        .brotli(true);

    if let Some(user_agent) = &http.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build()
}

/// [`PageFetcher`] backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(http: &HttpConfig, dispatch: &DispatchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(http, dispatch)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a profile page
    ///
    /// The body is returned for any HTTP status: the profile service answers
    /// unknown identifiers with a regular page carrying the not-found marker.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered HTTP {}", url, status.as_u16());
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }
}

/// Classifies a reqwest error
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error_chain(&e),
        }
    }
}

/// Joins an error with its sources, e.g. `...: tcp connect error: Connection refused`
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
