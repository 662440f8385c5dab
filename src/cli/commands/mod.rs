//! Command handlers.
//!
//! Each handler resolves the job it operates on, calls into the service
//! layer and renders a [`CommandOutput`](crate::cli::display::CommandOutput)
//! summary.

pub mod build;
pub mod log;
pub mod status;
pub mod sync;
pub mod watch;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::display::{
    action_failure, action_success, build_label, colorize_current, colorize_outcome,
    CommandOutput,
};
use crate::domain::errors::DomainError;
use crate::domain::models::{BuildNumber, BuildStatus, Config, CurrentOutcome, Outcome};
use crate::domain::ports::{CiServer, Clock};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{BuildService, BuildVerdict, TailSettings};

/// Everything a command handler needs.
pub struct CommandContext {
    pub config: Config,
    pub server: Arc<dyn CiServer>,
    pub service: BuildService,
    pub cancel: CancellationToken,
    pub json: bool,
}

impl CommandContext {
    pub fn new(
        config: Config,
        server: Arc<dyn CiServer>,
        clock: Arc<dyn Clock>,
        cancel: CancellationToken,
        json: bool,
    ) -> Self {
        let settings = TailSettings::from(&config.watch);
        let service = BuildService::new(server.clone(), clock, settings);
        Self {
            config,
            server,
            service,
            cancel,
            json,
        }
    }

    /// Run `command`, abandoning it as soon as the cancellation token fires.
    pub async fn until_cancelled(&self, command: impl Future<Output = Result<()>>) -> Result<()> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(DomainError::Cancelled.into()),
            result = command => result,
        }
    }

    /// The job named on the command line, or the configured default.
    pub fn job(&self, job: Option<String>) -> Result<String> {
        Ok(ConfigLoader::require_job(&self.config, job)?)
    }
}

/// Summary of a finished watch.
#[derive(Debug, Serialize)]
pub struct WatchOutput {
    pub job: String,
    pub build: Option<BuildNumber>,
    pub status: Outcome,
    pub current: CurrentOutcome,
    pub passed: bool,
}

impl WatchOutput {
    pub fn new(job: &str, status: &BuildStatus) -> Self {
        Self {
            job: job.to_string(),
            build: status.build,
            status: status.status,
            current: status.current,
            passed: BuildVerdict::from_status(status).is_success(),
        }
    }
}

impl CommandOutput for WatchOutput {
    fn to_human(&self) -> String {
        let message = format!(
            "{} {} finished: {}",
            self.job,
            build_label(self.build),
            colorize_outcome(self.status)
        );
        if self.passed {
            action_success(&message)
        } else {
            format!(
                "{} (latest: {})",
                action_failure(&message),
                colorize_current(self.current)
            )
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print the summary of a finished watch and turn the verdict into the
/// command's result.
pub(crate) fn finish_watch(ctx: &CommandContext, job: &str, status: &BuildStatus) -> Result<()> {
    crate::cli::display::output(&WatchOutput::new(job, status), ctx.json);
    BuildVerdict::from_status(status).into_result(job, status)?;
    Ok(())
}
