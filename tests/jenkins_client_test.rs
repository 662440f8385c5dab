//! Integration tests for the Jenkins HTTP client
//!
//! Every test runs against a local mockito server.
//!
//! Test coverage:
//! - Job snapshot fetch and mapping
//! - Console log fetch for folder jobs
//! - Build trigger and queue location
//! - Config document download and upload
//! - Basic authentication
//! - Error classification (401, 404, 5xx, malformed JSON)

use jobwatch::domain::errors::DomainError;
use jobwatch::domain::ports::CiServer;
use jobwatch::infrastructure::jenkins::{JenkinsClient, JenkinsClientConfig};
use mockito::{Matcher, Server};

fn client_for(server: &Server, user: Option<&str>, token: Option<&str>) -> JenkinsClient {
    JenkinsClient::new(JenkinsClientConfig {
        base_url: server.url(),
        user: user.map(str::to_string),
        token: token.map(str::to_string),
        timeout_secs: 5,
    })
    .expect("client should build")
}

fn job_body() -> String {
    serde_json::json!({
        "_class": "hudson.model.FreeStyleProject",
        "lastBuild": {"number": 42},
        "lastCompletedBuild": {"number": 41},
        "lastSuccessfulBuild": {"number": 41},
        "lastFailedBuild": {"number": 38},
        "lastUnsuccessfulBuild": {"number": 38},
        "inQueue": false,
        "queueItem": null
    })
    .to_string()
}

#[tokio::test]
async fn test_get_job_maps_snapshot() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Regex("tree=".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(job_body())
        .create_async()
        .await;

    let snapshot = client_for(&server, None, None)
        .get_job("api")
        .await
        .expect("snapshot should load");

    mock.assert_async().await;
    assert_eq!(snapshot.last_build, Some(42));
    assert_eq!(snapshot.last_completed_build, Some(41));
    assert_eq!(snapshot.last_failed_build, Some(38));
    assert!(!snapshot.in_queue);
    assert_eq!(snapshot.buildable_start_ms, None);
}

#[tokio::test]
async fn test_get_job_sends_basic_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .match_header("authorization", "Basic Y2k6c2VjcmV0")
        .with_status(200)
        .with_body(job_body())
        .create_async()
        .await;

    client_for(&server, Some("ci"), Some("secret"))
        .get_job("api")
        .await
        .expect("authenticated request should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_build_log_for_folder_job() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/job/team/job/api/42/consoleText")
        .with_status(200)
        .with_body("Started by user ci\nBuilding...\n")
        .create_async()
        .await;

    let log = client_for(&server, None, None)
        .get_build_log("team/api", 42)
        .await
        .expect("log should load");

    mock.assert_async().await;
    assert_eq!(log.lines().count(), 2);
}

#[tokio::test]
async fn test_trigger_build_returns_queue_location() {
    let mut server = Server::new_async().await;
    let location = format!("{}/queue/item/17/", server.url());
    let mock = server
        .mock("POST", "/job/api/build")
        .with_status(201)
        .with_header("location", &location)
        .create_async()
        .await;

    let receipt = client_for(&server, None, None)
        .trigger_build("api")
        .await
        .expect("trigger should succeed");

    mock.assert_async().await;
    assert_eq!(receipt.queue_url.as_deref(), Some(location.as_str()));
}

#[tokio::test]
async fn test_config_round_trip_requests() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/job/api/config.xml")
        .with_status(200)
        .with_body("<project/>")
        .create_async()
        .await;
    let post = server
        .mock("POST", "/job/api/config.xml")
        .match_header("content-type", "application/xml")
        .match_body("<project><disabled>true</disabled></project>")
        .with_status(200)
        .create_async()
        .await;

    let client = client_for(&server, None, None);
    assert_eq!(client.get_config("api").await.unwrap(), "<project/>");
    client
        .put_config("api", "<project><disabled>true</disabled></project>")
        .await
        .expect("upload should succeed");

    get.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_missing_job_is_job_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/nope/api/json")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let err = client_for(&server, None, None)
        .get_job("nope")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::JobNotFound(job) if job == "nope"));
}

#[tokio::test]
async fn test_missing_build_is_build_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/7/consoleText")
        .with_status(404)
        .create_async()
        .await;

    let err = client_for(&server, None, None)
        .get_build_log("api", 7)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BuildNotFound { build: 7, .. }));
}

#[tokio::test]
async fn test_rejected_credentials() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let err = client_for(&server, Some("ci"), Some("wrong"))
        .get_job("api")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

#[tokio::test]
async fn test_server_error_is_transport() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("Jenkins is going to shut down")
        .create_async()
        .await;

    let err = client_for(&server, None, None)
        .get_job("api")
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, DomainError::Transport(_)));
}

#[tokio::test]
async fn test_malformed_json_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/job/api/api/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>login</html>")
        .create_async()
        .await;

    let err = client_for(&server, None, None)
        .get_job("api")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidResponse(_)));
}
