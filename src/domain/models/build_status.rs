//! Build status classification derived from a job snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::job::BuildNumber;

/// Outcome of the last *completed* build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Unknown,
    Passing,
    Failing,
    Canceled,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Passing => "passing",
            Self::Failing => "failing",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the most recent build attempt, which may still be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentOutcome {
    Unknown,
    Passing,
    Failing,
    Canceled,
    Running,
}

impl CurrentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Passing => "passing",
            Self::Failing => "failing",
            Self::Canceled => "canceled",
            Self::Running => "running",
        }
    }
}

impl From<Outcome> for CurrentOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unknown => Self::Unknown,
            Outcome::Passing => Self::Passing,
            Outcome::Failing => Self::Failing,
            Outcome::Canceled => Self::Canceled,
        }
    }
}

impl fmt::Display for CurrentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a queued build is expected to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eta {
    /// Nothing is queued.
    Immediate,
    /// Server estimate in epoch milliseconds.
    At(i64),
    /// Queued without an estimate.
    Unknown,
}

impl Eta {
    /// Epoch milliseconds, `Some(0)` when immediate and `None` when unknown.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Self::Immediate => Some(0),
            Self::At(ms) => Some(*ms),
            Self::Unknown => None,
        }
    }
}

/// How the caller came to be watching a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchMode {
    /// Attach to a build that should already be executing or queued.
    AlreadyRunning,
    /// A build was just requested and has not been assigned a number yet.
    JustTriggered,
}

impl WatchMode {
    pub fn must_already_be_running(self) -> bool {
        matches!(self, Self::AlreadyRunning)
    }
}

/// Unambiguous classification of a job's build state at one point in time.
///
/// Recomputed from scratch on every poll; never mutated in place except for
/// the final `build` substitution done when a watch terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildStatus {
    /// A build is executing or queued.
    pub running: bool,
    /// A build is queued and has no number yet.
    pub queued: bool,
    pub current: CurrentOutcome,
    pub status: Outcome,
    /// Most recent known build number.
    pub last: Option<BuildNumber>,
    /// Build believed to be in flight or about to start.
    pub build: Option<BuildNumber>,
    pub eta: Eta,
}
