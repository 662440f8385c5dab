//! Jenkins HTTP client.
//!
//! Wraps the Jenkins remote access API, providing typed methods for the
//! operations behind the [`CiServer`] port. Job names containing `/` are
//! treated as folder paths (`team/api` becomes `/job/team/job/api`).

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder, Response, Url};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::JenkinsApiError;
use super::types::{JobResponse, JOB_TREE};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildNumber, JobSnapshot, ServerConfig, TriggerReceipt};
use crate::domain::ports::CiServer;

/// Configuration for the Jenkins HTTP client
#[derive(Clone)]
pub struct JenkinsClientConfig {
    /// Base URL of the Jenkins instance
    pub base_url: String,

    /// User for basic authentication
    pub user: Option<String>,

    /// API token for basic authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl From<&ServerConfig> for JenkinsClientConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            base_url: server.url.clone(),
            user: server.user.clone(),
            token: server.token.clone(),
            timeout_secs: server.timeout_secs,
        }
    }
}

/// HTTP client for one Jenkins instance.
///
/// Performs exactly one request per call; there is no retry layer.
pub struct JenkinsClient {
    http_client: ReqwestClient,
    base_url: Url,
    user: Option<String>,
    token: Option<String>,
}

impl JenkinsClient {
    /// Create a client for the configured server.
    pub fn new(config: JenkinsClientConfig) -> Result<Self, JenkinsApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| JenkinsApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(JenkinsApiError::InvalidUrl(config.base_url));
        }

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("jobwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(
            base_url = %base_url,
            authenticated = config.user.is_some(),
            timeout_secs = config.timeout_secs,
            "initialized Jenkins client"
        );

        Ok(Self {
            http_client,
            base_url,
            user: config.user,
            token: config.token,
        })
    }

    /// URL of `job` (folder-aware) followed by `tail` path segments.
    pub fn job_url(&self, job: &str, tail: &[&str]) -> Result<Url, JenkinsApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| JenkinsApiError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            for part in job.split('/').filter(|part| !part.is_empty()) {
                segments.push("job").push(part);
            }
            segments.extend(tail);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match &self.user {
            Some(user) => builder.basic_auth(user, self.token.as_deref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, JenkinsApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(path, %status, "Jenkins response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        warn!(path, %status, "Jenkins API error");
        Err(JenkinsApiError::from_status(status, path, body))
    }

    async fn fetch_job(&self, job: &str) -> Result<JobSnapshot, JenkinsApiError> {
        let mut url = self.job_url(job, &["api", "json"])?;
        url.query_pairs_mut().append_pair("tree", JOB_TREE);
        let path = url.path().to_string();

        let body = self
            .send(self.request(Method::GET, url), &path)
            .await?
            .text()
            .await?;
        let job: JobResponse = serde_json::from_str(&body)?;
        Ok(job.into())
    }

    async fn fetch_text(&self, url: Url) -> Result<String, JenkinsApiError> {
        let path = url.path().to_string();
        Ok(self
            .send(self.request(Method::GET, url), &path)
            .await?
            .text()
            .await?)
    }
}

fn job_error(job: &str, err: JenkinsApiError) -> DomainError {
    if err.is_not_found() {
        DomainError::JobNotFound(job.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl CiServer for JenkinsClient {
    #[instrument(skip(self))]
    async fn get_job(&self, job: &str) -> DomainResult<JobSnapshot> {
        self.fetch_job(job).await.map_err(|e| job_error(job, e))
    }

    #[instrument(skip(self))]
    async fn get_build_log(&self, job: &str, build: BuildNumber) -> DomainResult<String> {
        let number = build.to_string();
        let url = self
            .job_url(job, &[number.as_str(), "consoleText"])
            .map_err(DomainError::from)?;
        self.fetch_text(url).await.map_err(|e| {
            if e.is_not_found() {
                DomainError::BuildNotFound {
                    job: job.to_string(),
                    build,
                }
            } else {
                e.into()
            }
        })
    }

    #[instrument(skip(self))]
    async fn trigger_build(&self, job: &str) -> DomainResult<TriggerReceipt> {
        let url = self.job_url(job, &["build"]).map_err(DomainError::from)?;
        let path = url.path().to_string();
        let response = self
            .send(self.request(Method::POST, url), &path)
            .await
            .map_err(|e| job_error(job, e))?;

        let queue_url = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Ok(TriggerReceipt { queue_url })
    }

    #[instrument(skip(self))]
    async fn get_config(&self, job: &str) -> DomainResult<String> {
        let url = self.job_url(job, &["config.xml"]).map_err(DomainError::from)?;
        self.fetch_text(url).await.map_err(|e| job_error(job, e))
    }

    #[instrument(skip(self, document), fields(bytes = document.len()))]
    async fn put_config(&self, job: &str, document: &str) -> DomainResult<()> {
        let url = self.job_url(job, &["config.xml"]).map_err(DomainError::from)?;
        let path = url.path().to_string();
        let builder = self
            .request(Method::POST, url)
            .header(header::CONTENT_TYPE, "application/xml")
            .body(document.to_string());
        self.send(builder, &path)
            .await
            .map_err(|e| job_error(job, e))?;
        Ok(())
    }
}
