//! Wire types of the Jenkins JSON API.

use serde::Deserialize;

use crate::domain::models::{BuildNumber, JobSnapshot};

/// `tree` filter limiting the job API response to the fields we read.
pub const JOB_TREE: &str = "lastBuild[number],lastCompletedBuild[number],\
lastSuccessfulBuild[number],lastFailedBuild[number],lastUnsuccessfulBuild[number],\
inQueue,queueItem[buildableStartMilliseconds]";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BuildRef {
    pub number: BuildNumber,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(default)]
    pub buildable_start_milliseconds: Option<i64>,
}

/// Response of `GET /job/<name>/api/json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(default)]
    pub last_build: Option<BuildRef>,
    #[serde(default)]
    pub last_completed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_successful_build: Option<BuildRef>,
    #[serde(default)]
    pub last_failed_build: Option<BuildRef>,
    #[serde(default)]
    pub last_unsuccessful_build: Option<BuildRef>,
    #[serde(default)]
    pub in_queue: bool,
    #[serde(default)]
    pub queue_item: Option<QueueItem>,
}

impl From<JobResponse> for JobSnapshot {
    fn from(job: JobResponse) -> Self {
        let number = |build: Option<BuildRef>| build.map(|b| b.number);
        Self {
            last_completed_build: number(job.last_completed_build),
            last_successful_build: number(job.last_successful_build),
            last_failed_build: number(job.last_failed_build),
            last_unsuccessful_build: number(job.last_unsuccessful_build),
            last_build: number(job.last_build),
            in_queue: job.in_queue,
            buildable_start_ms: job.queue_item.and_then(|q| q.buildable_start_milliseconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_response() {
        let body = r#"{
            "_class": "hudson.model.FreeStyleProject",
            "lastBuild": {"_class": "hudson.model.FreeStyleBuild", "number": 42},
            "lastCompletedBuild": {"number": 41},
            "lastSuccessfulBuild": {"number": 41},
            "lastFailedBuild": {"number": 39},
            "lastUnsuccessfulBuild": {"number": 40},
            "inQueue": true,
            "queueItem": {"buildableStartMilliseconds": 1700000000000}
        }"#;
        let job: JobResponse = serde_json::from_str(body).expect("should parse");
        let snapshot = JobSnapshot::from(job);
        assert_eq!(snapshot.last_build, Some(42));
        assert_eq!(snapshot.last_completed_build, Some(41));
        assert_eq!(snapshot.last_failed_build, Some(39));
        assert_eq!(snapshot.last_unsuccessful_build, Some(40));
        assert!(snapshot.in_queue);
        assert_eq!(snapshot.buildable_start_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn test_parse_never_built_job() {
        let body = r#"{"lastBuild": null, "lastCompletedBuild": null, "inQueue": false, "queueItem": null}"#;
        let snapshot = JobSnapshot::from(serde_json::from_str::<JobResponse>(body).unwrap());
        assert_eq!(snapshot, JobSnapshot::default());
    }
}
