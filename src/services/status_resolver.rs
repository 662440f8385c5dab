//! Status resolution: job snapshot to build status.
//!
//! The CI server reports a handful of "last X build" references that are
//! individually ambiguous while a build is in flight. Resolution compares
//! them in a fixed order to produce one [`BuildStatus`]:
//!
//! - `status` compares the last *completed* build, so it never reflects an
//!   in-progress build and falls back to `unknown`.
//! - `current` compares the last *started* build and falls back to
//!   `running`, which is the signal that a build is executing.

use crate::domain::models::{
    BuildNumber, BuildStatus, CurrentOutcome, Eta, JobSnapshot, Outcome, WatchMode,
};

/// Ordered outcome lookup; the first reference equal to the target wins.
fn outcome_lookup(snapshot: &JobSnapshot) -> [(Option<BuildNumber>, Outcome); 3] {
    [
        (snapshot.last_successful_build, Outcome::Passing),
        (snapshot.last_failed_build, Outcome::Failing),
        (snapshot.last_unsuccessful_build, Outcome::Canceled),
    ]
}

fn match_outcome(snapshot: &JobSnapshot, target: BuildNumber) -> Option<Outcome> {
    outcome_lookup(snapshot)
        .into_iter()
        .find(|(reference, _)| *reference == Some(target))
        .map(|(_, outcome)| outcome)
}

/// Resolve a snapshot into a build status.
///
/// Pure and total: every snapshot, including one for a job that was never
/// built, maps to a defined status.
pub fn resolve(snapshot: &JobSnapshot, mode: WatchMode) -> BuildStatus {
    let (status, current) = match snapshot.last_completed_build {
        None => (Outcome::Unknown, CurrentOutcome::Unknown),
        Some(completed) => {
            let status = match_outcome(snapshot, completed).unwrap_or(Outcome::Unknown);
            let current = match snapshot.last_build {
                Some(last) => {
                    match_outcome(snapshot, last).map_or(CurrentOutcome::Running, Into::into)
                }
                None => CurrentOutcome::Unknown,
            };
            (status, current)
        }
    };

    let completed = snapshot.last_completed_build.unwrap_or(0);
    let in_flight = snapshot.last_build.is_some_and(|last| completed < last);

    let build = if snapshot.in_queue {
        match mode {
            WatchMode::AlreadyRunning => snapshot.last_build,
            // Best effort: the queued build gets the next sequential number.
            WatchMode::JustTriggered => Some(snapshot.last_build.unwrap_or(0).saturating_add(1)),
        }
    } else if in_flight {
        Some(completed.saturating_add(1))
    } else {
        None
    };

    let eta = if snapshot.in_queue {
        snapshot.buildable_start_ms.map_or(Eta::Unknown, Eta::At)
    } else {
        Eta::Immediate
    };

    BuildStatus {
        running: snapshot.in_queue || in_flight,
        queued: snapshot.in_queue,
        current,
        status,
        last: snapshot.last_build,
        build,
        eta,
    }
}
