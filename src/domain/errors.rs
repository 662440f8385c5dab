//! Domain errors for the jobwatch client.

use thiserror::Error;

use crate::domain::models::{BuildNumber, Outcome};

fn build_label(build: &Option<BuildNumber>) -> String {
    build.map_or_else(|| "?".to_string(), |n| n.to_string())
}

/// Domain-level errors that can occur while talking to the CI server.
///
/// Status resolution never produces an error; only the I/O collaborators
/// behind the [`CiServer`](crate::domain::ports::CiServer) port do.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication rejected by CI server: {0}")]
    Unauthorized(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Build not found: {job} #{build}")]
    BuildNotFound { job: String, build: BuildNumber },

    #[error("Invalid response from CI server: {0}")]
    InvalidResponse(String),

    #[error("Watch cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Build {job} #{} finished as {outcome}", build_label(.build))]
    BuildFailed {
        job: String,
        build: Option<BuildNumber>,
        outcome: Outcome,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Returns true for failures of the transport to the CI server.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Unauthorized(_) | Self::InvalidResponse(_)
        )
    }
}
