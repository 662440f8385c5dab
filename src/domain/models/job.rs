//! CI job snapshot as reported by the server.

use serde::{Deserialize, Serialize};

/// Sequential number of one build of a job.
pub type BuildNumber = u64;

/// The CI server's current reported state for a job.
///
/// Every build reference is optional; a job that has never been built
/// reports all of them absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub last_completed_build: Option<BuildNumber>,
    pub last_successful_build: Option<BuildNumber>,
    pub last_failed_build: Option<BuildNumber>,
    pub last_unsuccessful_build: Option<BuildNumber>,
    pub last_build: Option<BuildNumber>,
    /// A build is queued but has not been assigned a number yet.
    pub in_queue: bool,
    /// Server estimate (epoch milliseconds) of when the queued build starts.
    pub buildable_start_ms: Option<i64>,
}

/// Acknowledgement of a build request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReceipt {
    /// Queue item URL returned by the server, when it reports one.
    pub queue_url: Option<String>,
}
