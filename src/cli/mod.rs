//! Command-line interface
//!
//! clap definitions, command handlers, the terminal live-tail sink and
//! shared output formatting.

pub mod commands;
pub mod display;
pub mod sink;
pub mod types;

pub use commands::CommandContext;
pub use types::{Cli, Commands};

use crate::domain::errors::DomainError;
use crate::domain::models::Outcome;

/// Exit status for a build that finished failing or canceled.
pub const EXIT_BUILD_FAILED: i32 = 1;

/// Exit status for every other failure.
pub const EXIT_ERROR: i32 = 2;

/// Exit status when the user interrupted a watch.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Process exit status for a command error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::BuildFailed { outcome, .. }) if *outcome != Outcome::Unknown => {
            EXIT_BUILD_FAILED
        }
        Some(DomainError::Cancelled) => EXIT_INTERRUPTED,
        _ => EXIT_ERROR,
    }
}

/// Report a command error and terminate the process.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({
                "error": err.to_string(),
                "causes": causes,
            })
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(exit_code(&err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_codes() {
        let failed = anyhow::Error::from(DomainError::BuildFailed {
            job: "api".to_string(),
            build: Some(3),
            outcome: Outcome::Failing,
        });
        assert_eq!(exit_code(&failed), EXIT_BUILD_FAILED);

        let inconclusive = anyhow::Error::from(DomainError::BuildFailed {
            job: "api".to_string(),
            build: None,
            outcome: Outcome::Unknown,
        });
        assert_eq!(exit_code(&inconclusive), EXIT_ERROR);

        let cancelled: anyhow::Result<()> = Err(DomainError::Cancelled).context("Failed to watch api");
        assert_eq!(exit_code(&cancelled.unwrap_err()), EXIT_INTERRUPTED);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), EXIT_ERROR);
    }
}
