use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors that can occur when talking to the Jenkins HTTP API
#[derive(Error, Debug)]
pub enum JenkinsApiError {
    /// Malformed request (HTTP 400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Missing or wrong credentials (HTTP 401)
    #[error("Authentication failed - check user and API token")]
    Unauthorized,

    /// Credentials valid but lacking permission (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Job or build does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side failure (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network, TLS or timeout failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected JSON shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured server URL cannot carry job paths
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Any other unexpected status
    #[error("Unexpected response ({0}): {1}")]
    Unexpected(StatusCode, String),
}

impl JenkinsApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(path.to_string()),
            StatusCode::NOT_FOUND => Self::NotFound(path.to_string()),
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::Unexpected(status, body),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<JenkinsApiError> for DomainError {
    fn from(err: JenkinsApiError) -> Self {
        match err {
            JenkinsApiError::Unauthorized | JenkinsApiError::Forbidden(_) => {
                Self::Unauthorized(err.to_string())
            }
            JenkinsApiError::Json(_) => Self::InvalidResponse(err.to_string()),
            _ => Self::Transport(err.to_string()),
        }
    }
}
