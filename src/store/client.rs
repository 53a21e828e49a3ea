//! HTTP plumbing shared by all typed store clients.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::info;
use url::Url;

use crate::error::AppError;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// User agent string for all store API requests.
const CLIENT_USER_AGENT: &str = "termdesk/0.1.0";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// StoreConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for connecting to the content store.
///
/// Passed explicitly to client constructors; the crate keeps no ambient
/// connection state.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store (e.g., "http://localhost:5000").
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl StoreConfig {
    /// Creates a configuration with default timeout and user agent.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: CLIENT_USER_AGENT.to_string(),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

/// Error body shape returned by the store.
///
/// Term and audit endpoints report `{"message": ...}`; legislation endpoints
/// report `{"error": ...}`. Both keys are optional so either shape parses.
#[derive(Debug, serde::Deserialize)]
struct WireStoreError {
    message: Option<String>,
    error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// StoreClient
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the remote content store.
///
/// Every operation is a single remote call; no retries are performed at this
/// layer. Retry policy, if any, belongs to callers.
#[derive(Clone)]
pub struct StoreClient {
    /// The underlying HTTP client.
    http: reqwest::Client,
    /// Base URL all request paths are joined against.
    base_url: Url,
}

impl StoreClient {
    /// Creates a new store client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the HTTP client fails to initialize.
    pub fn new(config: StoreConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Builds a full URL by joining the path with the base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the path cannot be joined.
    pub fn build_url(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|_| AppError::Internal(format!("Invalid path: {}", path)))
    }

    /// Executes a single request with timing and logging.
    ///
    /// Transport failures map to `AppError::ConnectionFailed`. Error status
    /// codes are NOT mapped here; use [`expect_success`](Self::expect_success)
    /// or [`request_json`](Self::request_json) for calls where any non-2xx
    /// response is an error.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.build_url(path)?;
        let start = Instant::now();

        let mut request = self.http.request(method.clone(), url);
        if let Some(json) = body {
            request = request.json(&json);
        }

        let result = request.send().await;
        let duration_ms = start.elapsed().as_millis();

        match result {
            Ok(response) => {
                let status = response.status();
                info!(
                    "[STORE] {} {} {} {}ms",
                    method,
                    path,
                    status.as_u16(),
                    duration_ms
                );
                Ok(response)
            }
            Err(_) => {
                info!("[STORE] {} {} FAILED {}ms", method, path, duration_ms);
                Err(AppError::ConnectionFailed(
                    "Connection to the content store failed".to_string(),
                ))
            }
        }
    }

    /// Executes a request and maps any non-success status to an `AppError`.
    pub(crate) async fn expect_success(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, AppError> {
        let response = self.request(method, path, body).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_error_response(response, status).await);
        }
        Ok(response)
    }

    /// Executes a request and deserializes a successful JSON response body.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, AppError> {
        let response = self.expect_success(method, path, body).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse store response: {}", e)))
    }
}

/// Parses an error response body and maps it to the error taxonomy:
/// 404 to `NotFound`, 400 to `Validation`, 409 to `Conflict`, anything else
/// to `StoreError`.
async fn map_error_response(response: reqwest::Response, status: reqwest::StatusCode) -> AppError {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("Unable to read error body"));

    let detail = serde_json::from_str::<WireStoreError>(&body)
        .ok()
        .and_then(|wire| wire.message.or(wire.error))
        .unwrap_or_else(|| {
            format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )
        });

    match status.as_u16() {
        404 => AppError::NotFound(detail),
        400 => AppError::Validation(detail),
        409 => AppError::Conflict(detail),
        _ => AppError::StoreError(detail),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
