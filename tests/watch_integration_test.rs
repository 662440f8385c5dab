//! End-to-end watch over HTTP: Jenkins client, status resolution and the
//! live tail wired together against a mockito server.

use std::sync::Arc;

use jobwatch::adapters::{RecordingSink, SinkEvent};
use jobwatch::domain::models::{CurrentOutcome, Eta, Outcome, WatchMode};
use jobwatch::infrastructure::clock::ManualClock;
use jobwatch::infrastructure::jenkins::{JenkinsClient, JenkinsClientConfig};
use jobwatch::services::{BuildService, LiveTail, TailSettings};
use mockito::{Matcher, Server};
use tokio_util::sync::CancellationToken;

fn client_for(server: &Server) -> Arc<JenkinsClient> {
    Arc::new(
        JenkinsClient::new(JenkinsClientConfig {
            base_url: server.url(),
            user: None,
            token: None,
            timeout_secs: 5,
        })
        .expect("client should build"),
    )
}

#[tokio::test]
async fn test_finished_job_resolves_last_build() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            serde_json::json!({
                "lastCompletedBuild": {"number": 5},
                "lastSuccessfulBuild": {"number": 5},
                "lastBuild": {"number": 5},
                "inQueue": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tail = LiveTail::new(
        client_for(&server),
        Arc::new(ManualClock::new()),
        TailSettings::default(),
    );
    let mut sink = RecordingSink::new();
    let status = tail
        .watch("api", WatchMode::AlreadyRunning, &mut sink, &CancellationToken::new())
        .await
        .expect("watch should finish");

    assert!(!status.running);
    assert!(!status.queued);
    assert_eq!(status.current, CurrentOutcome::Passing);
    assert_eq!(status.status, Outcome::Passing);
    assert_eq!(status.last, Some(5));
    assert_eq!(status.build, Some(5));
    assert_eq!(status.eta, Eta::Immediate);
    assert_eq!(
        sink.count(|event| matches!(event, SinkEvent::NoActiveBuild(_))),
        1
    );
}

#[tokio::test]
async fn test_status_of_queued_job() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            serde_json::json!({
                "lastCompletedBuild": {"number": 8},
                "lastFailedBuild": {"number": 8},
                "lastUnsuccessfulBuild": {"number": 8},
                "lastBuild": {"number": 8},
                "inQueue": true,
                "queueItem": {"buildableStartMilliseconds": 1_700_000_000_000_i64}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let service = BuildService::new(
        client_for(&server),
        Arc::new(ManualClock::new()),
        TailSettings::default(),
    );
    let status = service.status("api").await.expect("status should load");

    assert!(status.running);
    assert!(status.queued);
    assert_eq!(status.status, Outcome::Failing);
    assert_eq!(status.build, Some(8));
    assert_eq!(status.eta, Eta::At(1_700_000_000_000));
}
