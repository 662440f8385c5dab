//! CI server port - interface for the build server transport.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{BuildNumber, JobSnapshot, TriggerReceipt};

/// Request/response operations against the CI server.
///
/// Every call is a single round trip. Implementations must not retry;
/// a failure is returned to the caller as-is.
#[async_trait]
pub trait CiServer: Send + Sync {
    /// Fetch the current snapshot of a job.
    async fn get_job(&self, job: &str) -> DomainResult<JobSnapshot>;

    /// Fetch the full newline-delimited console log of one build.
    ///
    /// The server caps the returned content at
    /// [`LOG_LINE_CAP`](crate::services::live_tail::LOG_LINE_CAP) lines.
    async fn get_build_log(&self, job: &str, build: BuildNumber) -> DomainResult<String>;

    /// Request a new build of a job.
    async fn trigger_build(&self, job: &str) -> DomainResult<TriggerReceipt>;

    /// Fetch the job's configuration document.
    async fn get_config(&self, job: &str) -> DomainResult<String>;

    /// Replace the job's configuration document.
    async fn put_config(&self, job: &str, document: &str) -> DomainResult<()>;
}
