//! Scripted CI server and recording sink for testing.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildNumber, Eta, JobSnapshot, TriggerReceipt};
use crate::domain::ports::{CiServer, StatusSink};

/// One scripted answer to a fetch.
#[derive(Debug, Clone)]
enum Scripted<T> {
    Reply(T),
    Fail(String),
}

impl<T: Clone> Scripted<T> {
    fn answer(&self) -> DomainResult<T> {
        match self {
            Self::Reply(value) => Ok(value.clone()),
            Self::Fail(message) => Err(DomainError::Transport(message.clone())),
        }
    }
}

/// Replays scripted answers in order; the last one repeats once exhausted.
#[derive(Debug)]
struct Script<T> {
    pending: VecDeque<Scripted<T>>,
    last: Option<Scripted<T>>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            last: None,
        }
    }

    fn push(&mut self, entry: Scripted<T>) {
        self.pending.push_back(entry);
    }

    fn next(&mut self) -> Option<DomainResult<T>> {
        if let Some(entry) = self.pending.pop_front() {
            self.last = Some(entry);
        }
        self.last.as_ref().map(Scripted::answer)
    }
}

/// In-memory CI server for a single job.
///
/// Snapshots and build logs are scripted per call; job configuration
/// documents and trigger requests are recorded for inspection.
pub struct MockCiServer {
    snapshots: Mutex<Script<JobSnapshot>>,
    logs: Mutex<HashMap<BuildNumber, Script<String>>>,
    configs: Mutex<HashMap<String, String>>,
    triggers: Mutex<Vec<String>>,
    snapshot_calls: Mutex<usize>,
    log_calls: Mutex<Vec<BuildNumber>>,
}

impl MockCiServer {
    pub fn new() -> Self {
        Self {
            snapshots: Mutex::new(Script::new()),
            logs: Mutex::new(HashMap::new()),
            configs: Mutex::new(HashMap::new()),
            triggers: Mutex::new(Vec::new()),
            snapshot_calls: Mutex::new(0),
            log_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next snapshot returned by `get_job`.
    pub async fn push_snapshot(&self, snapshot: JobSnapshot) {
        self.snapshots.lock().await.push(Scripted::Reply(snapshot));
    }

    /// Queue a transport failure for the next `get_job` call.
    pub async fn push_snapshot_error(&self, message: impl Into<String>) {
        self.snapshots.lock().await.push(Scripted::Fail(message.into()));
    }

    /// Queue the next full log text returned for `build`.
    pub async fn push_log(&self, build: BuildNumber, text: impl Into<String>) {
        self.logs
            .lock()
            .await
            .entry(build)
            .or_insert_with(Script::new)
            .push(Scripted::Reply(text.into()));
    }

    /// Queue a transport failure for the next log fetch of `build`.
    pub async fn push_log_error(&self, build: BuildNumber, message: impl Into<String>) {
        self.logs
            .lock()
            .await
            .entry(build)
            .or_insert_with(Script::new)
            .push(Scripted::Fail(message.into()));
    }

    /// Seed a job configuration document.
    pub async fn set_config(&self, job: &str, document: impl Into<String>) {
        self.configs
            .lock()
            .await
            .insert(job.to_string(), document.into());
    }

    pub async fn config(&self, job: &str) -> Option<String> {
        self.configs.lock().await.get(job).cloned()
    }

    /// Jobs for which a build was requested, in order.
    pub async fn triggered(&self) -> Vec<String> {
        self.triggers.lock().await.clone()
    }

    pub async fn snapshot_calls(&self) -> usize {
        *self.snapshot_calls.lock().await
    }

    /// Build numbers whose log was fetched, one entry per fetch.
    pub async fn log_calls(&self) -> Vec<BuildNumber> {
        self.log_calls.lock().await.clone()
    }
}

impl Default for MockCiServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CiServer for MockCiServer {
    async fn get_job(&self, job: &str) -> DomainResult<JobSnapshot> {
        *self.snapshot_calls.lock().await += 1;
        self.snapshots
            .lock()
            .await
            .next()
            .unwrap_or_else(|| Err(DomainError::JobNotFound(job.to_string())))
    }

    async fn get_build_log(&self, job: &str, build: BuildNumber) -> DomainResult<String> {
        self.log_calls.lock().await.push(build);
        self.logs
            .lock()
            .await
            .get_mut(&build)
            .and_then(Script::next)
            .unwrap_or_else(|| {
                Err(DomainError::BuildNotFound {
                    job: job.to_string(),
                    build,
                })
            })
    }

    async fn trigger_build(&self, job: &str) -> DomainResult<TriggerReceipt> {
        let mut triggers = self.triggers.lock().await;
        triggers.push(job.to_string());
        Ok(TriggerReceipt {
            queue_url: Some(format!("mock://queue/item/{}/", triggers.len())),
        })
    }

    async fn get_config(&self, job: &str) -> DomainResult<String> {
        self.configs
            .lock()
            .await
            .get(job)
            .cloned()
            .ok_or_else(|| DomainError::JobNotFound(job.to_string()))
    }

    async fn put_config(&self, job: &str, document: &str) -> DomainResult<()> {
        self.configs
            .lock()
            .await
            .insert(job.to_string(), document.to_string());
        Ok(())
    }
}

/// Everything a [`RecordingSink`] was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Lines(Vec<String>),
    WaitingForOutput(usize),
    Truncated(BuildNumber, usize),
    WaitingForStart(Eta),
    NoActiveBuild(String),
    Finished,
}

/// Sink that records events instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All printed log lines, flattened in order.
    pub fn printed_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Lines(lines) => Some(lines.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&SinkEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl StatusSink for RecordingSink {
    fn log_lines(&mut self, lines: &[&str]) {
        self.events.push(SinkEvent::Lines(
            lines.iter().map(|line| (*line).to_string()).collect(),
        ));
    }

    fn waiting_for_output(&mut self, frame: usize) {
        self.events.push(SinkEvent::WaitingForOutput(frame));
    }

    fn truncated(&mut self, build: BuildNumber, cap: usize) {
        self.events.push(SinkEvent::Truncated(build, cap));
    }

    fn waiting_for_start(&mut self, eta: Eta) {
        self.events.push(SinkEvent::WaitingForStart(eta));
    }

    fn no_active_build(&mut self, job: &str) {
        self.events.push(SinkEvent::NoActiveBuild(job.to_string()));
    }

    fn finish(&mut self) {
        self.events.push(SinkEvent::Finished);
    }
}
