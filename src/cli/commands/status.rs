use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::CommandContext;
use crate::cli::display::{
    build_label, colorize_current, colorize_outcome, format_eta, output, property_table,
    CommandOutput,
};
use crate::cli::types::JobArgs;
use crate::domain::models::BuildStatus;

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub job: String,
    #[serde(flatten)]
    pub status: BuildStatus,
    /// Epoch milliseconds; 0 when nothing is queued, null when unknown.
    pub eta_ms: Option<i64>,
}

impl StatusOutput {
    pub fn new(job: String, status: BuildStatus) -> Self {
        Self {
            job,
            eta_ms: status.eta.as_millis(),
            status,
        }
    }
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let status = &self.status;
        let mut table = property_table(["field", "value"]);
        table.add_row(vec!["job".to_string(), self.job.clone()]);
        table.add_row(vec!["status".to_string(), colorize_outcome(status.status).to_string()]);
        table.add_row(vec!["current".to_string(), colorize_current(status.current).to_string()]);
        table.add_row(vec!["running".to_string(), status.running.to_string()]);
        table.add_row(vec!["queued".to_string(), status.queued.to_string()]);
        table.add_row(vec!["last".to_string(), build_label(status.last)]);
        table.add_row(vec!["build".to_string(), build_label(status.build)]);
        if status.queued {
            table.add_row(vec!["eta".to_string(), format_eta(status.eta, Utc::now())]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Handle the status command
pub async fn execute(ctx: &CommandContext, args: JobArgs) -> Result<()> {
    let job = ctx.job(args.job)?;
    let status = ctx
        .service
        .status(&job)
        .await
        .with_context(|| format!("Failed to get status of {job}"))?;
    output(&StatusOutput::new(job, status), ctx.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CurrentOutcome, Eta, Outcome};

    fn finished() -> BuildStatus {
        BuildStatus {
            running: false,
            queued: false,
            current: CurrentOutcome::Passing,
            status: Outcome::Passing,
            last: Some(5),
            build: None,
            eta: Eta::Immediate,
        }
    }

    #[test]
    fn test_status_json_is_flat() {
        let json = StatusOutput::new("api".to_string(), finished()).to_json();
        assert_eq!(json["job"], "api");
        assert_eq!(json["status"], "passing");
        assert_eq!(json["current"], "passing");
        assert_eq!(json["running"], false);
        assert_eq!(json["last"], 5);
        assert_eq!(json["eta_ms"], 0);
    }

    #[test]
    fn test_unknown_eta_is_null() {
        let status = BuildStatus {
            running: true,
            queued: true,
            eta: Eta::Unknown,
            ..finished()
        };
        let json = StatusOutput::new("api".to_string(), status).to_json();
        assert!(json["eta_ms"].is_null());
    }

    #[test]
    fn test_status_table_lists_fields() {
        let human = StatusOutput::new("api".to_string(), finished()).to_human();
        assert!(human.contains("api"));
        assert!(human.contains("#5"));
        assert!(!human.contains("ETA"));
    }
}
