//! Build orchestration on top of the live tail.
//!
//! Owns the policy the tail loop deliberately leaves out: what a terminal
//! status means for the caller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildNumber, BuildStatus, Outcome, TriggerReceipt, WatchMode};
use crate::domain::ports::{CiServer, Clock, StatusSink};
use crate::services::live_tail::{LiveTail, TailSettings};

/// What a finished watch means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVerdict {
    Passed(Option<BuildNumber>),
    Failed(Option<BuildNumber>),
    Canceled(Option<BuildNumber>),
    /// The build ended in a state that cannot be classified.
    Inconclusive(Option<BuildNumber>),
}

impl BuildVerdict {
    pub fn from_status(status: &BuildStatus) -> Self {
        match status.status {
            Outcome::Passing => Self::Passed(status.build),
            Outcome::Failing => Self::Failed(status.build),
            Outcome::Canceled => Self::Canceled(status.build),
            Outcome::Unknown => Self::Inconclusive(status.build),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    /// Turn anything but a pass into [`DomainError::BuildFailed`].
    pub fn into_result(self, job: &str, status: &BuildStatus) -> DomainResult<BuildStatus> {
        match self {
            Self::Passed(_) => Ok(*status),
            Self::Failed(build) | Self::Canceled(build) | Self::Inconclusive(build) => {
                Err(DomainError::BuildFailed {
                    job: job.to_string(),
                    build,
                    outcome: status.status,
                })
            }
        }
    }
}

/// Triggers, watches and inspects builds of a job.
pub struct BuildService {
    server: Arc<dyn CiServer>,
    tail: LiveTail,
}

impl BuildService {
    pub fn new(server: Arc<dyn CiServer>, clock: Arc<dyn Clock>, settings: TailSettings) -> Self {
        let tail = LiveTail::new(server.clone(), clock, settings);
        Self { server, tail }
    }

    /// Request a build without waiting for it.
    pub async fn trigger(&self, job: &str) -> DomainResult<TriggerReceipt> {
        let receipt = self.server.trigger_build(job).await?;
        info!(job, queue_url = ?receipt.queue_url, "build requested");
        Ok(receipt)
    }

    /// Request a build and tail it until it finishes.
    pub async fn build(
        &self,
        job: &str,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<BuildStatus> {
        self.trigger(job).await?;
        self.tail.watch(job, WatchMode::JustTriggered, sink, cancel).await
    }

    /// Attach to the job's active build, if any, and tail it.
    pub async fn watch(
        &self,
        job: &str,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<BuildStatus> {
        self.tail.watch(job, WatchMode::AlreadyRunning, sink, cancel).await
    }

    /// Current status of the job, resolved once.
    pub async fn status(&self, job: &str) -> DomainResult<BuildStatus> {
        self.tail.resolve_status(job, WatchMode::AlreadyRunning).await
    }

    /// Full console log of `build`, or of the most recent build.
    pub async fn log(&self, job: &str, build: Option<BuildNumber>) -> DomainResult<String> {
        let build = match build {
            Some(build) => build,
            None => self
                .status(job)
                .await?
                .last
                .ok_or_else(|| DomainError::JobNotFound(format!("{job} has no builds")))?,
        };
        self.server.get_build_log(job, build).await
    }
}
