//! Shared HTTP plumbing for the external adapters
//!
//! Upstream failures map to `PortError` as follows:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - client timeout -> `PortError::Timeout`
//! - connect failure -> `PortError::Connection`
//! - undecodable body -> `PortError::Transformation`

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

use core_kernel::PortError;

/// Builds a client with a per-request timeout
pub fn build_client(timeout_secs: u64) -> Result<Client, PortError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PortError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
        })
}

/// Maps a transport-level failure
pub fn map_transport_error(service: &str, timeout_secs: u64, error: reqwest::Error) -> PortError {
    if error.is_timeout() {
        PortError::Timeout {
            operation: format!("{} request", service),
            duration_ms: timeout_secs * 1000,
        }
    } else if error.is_decode() {
        PortError::transformation(format!("{} returned an unreadable body: {}", service, error))
    } else {
        PortError::Connection {
            message: format!("{} unreachable: {}", service, error),
            source: Some(Box::new(error)),
        }
    }
}

/// Maps a non-success status to the matching `PortError`
pub fn map_status(service: &str, status: StatusCode, retry_after: Option<u64>, body: &str) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} rejected credentials ({})", service, status),
        },
        StatusCode::NOT_FOUND => PortError::not_found(service, body),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(60),
        },
        s if s.is_server_error() => PortError::service_unavailable(service),
        s => PortError::validation(format!("{} returned {}: {}", service, s, body)),
    }
}

/// Passes successful responses through and converts failures
pub async fn check_status(service: &str, response: Response) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    let body = response.text().await.unwrap_or_default();
    warn!(service, status = %status, "Upstream request failed");
    Err(map_status(service, status, retry_after, &body))
}

/// Reads the body and decodes it as `T`
pub async fn decode_json<T: DeserializeOwned>(service: &str, response: Response) -> Result<T, PortError> {
    let bytes = response.bytes().await.map_err(|e| {
        PortError::transformation(format!("{} body could not be read: {}", service, e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        PortError::transformation(format!("{} returned an unexpected payload: {}", service, e))
    })
}
