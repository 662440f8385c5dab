//! Live tail of a running build's console log.
//!
//! A fixed-delay polling loop. Each iteration resolves the job's status and,
//! depending on it, prints the unseen part of the build log, shows the queue
//! ETA, or reports that there is nothing to watch. The loop stops when the
//! job is no longer running, or once a second distinct build number has been
//! observed (the tracked build finished and another one started). A final
//! status pass produces the result.
//!
//! All loop state lives in [`TailState`] and is dropped when `watch` returns.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildNumber, BuildStatus, WatchConfig, WatchMode};
use crate::domain::ports::{CiServer, Clock, StatusSink};
use crate::services::status_resolver::resolve;

/// Line count at which the server stops returning more log content.
pub const LOG_LINE_CAP: usize = 10_000;

/// Number of frames in the waiting-for-output ellipsis animation.
pub const ELLIPSIS_FRAMES: usize = 3;

/// Timing of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailSettings {
    pub poll_interval: Duration,
    pub idle_threshold: Duration,
}

impl Default for TailSettings {
    fn default() -> Self {
        Self::from(&WatchConfig::default())
    }
}

impl From<&WatchConfig> for TailSettings {
    fn from(config: &WatchConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            idle_threshold: Duration::from_millis(config.idle_threshold_ms),
        }
    }
}

/// Loop-local state of one watch.
#[derive(Debug)]
struct TailState {
    printed_line_count: usize,
    poll_count: usize,
    last_output_change: Instant,
    observed_build_ids: Vec<BuildNumber>,
    tailed_build: Option<BuildNumber>,
    idle_reported: bool,
    truncation_reported: bool,
}

impl TailState {
    fn new(now: Instant) -> Self {
        Self {
            printed_line_count: 0,
            poll_count: 0,
            last_output_change: now,
            observed_build_ids: Vec::new(),
            tailed_build: None,
            idle_reported: false,
            truncation_reported: false,
        }
    }

    fn record_poll(&mut self, build: Option<BuildNumber>) {
        self.poll_count += 1;
        if let Some(build) = build {
            if self.observed_build_ids.last() != Some(&build) {
                self.observed_build_ids.push(build);
            }
        }
    }

    /// The tracked build finished and a different one was seen afterwards.
    fn handed_off(&self) -> bool {
        self.observed_build_ids.len() >= 2
    }

    fn should_continue(&self, status: &BuildStatus) -> bool {
        status.running && !self.handed_off()
    }

    fn ellipsis_frame(&self) -> usize {
        self.poll_count % ELLIPSIS_FRAMES
    }

    /// Emit the lines of `log` past the already printed offset.
    ///
    /// Returns the total number of lines in `log`.
    fn print_new_lines(
        &mut self,
        build: BuildNumber,
        log: &str,
        now: Instant,
        sink: &mut dyn StatusSink,
    ) -> usize {
        self.tailed_build = Some(build);
        let lines: Vec<&str> = log.lines().collect();
        let fresh = lines.get(self.printed_line_count..).unwrap_or_default();
        if !fresh.is_empty() {
            sink.log_lines(fresh);
            self.printed_line_count += fresh.len();
            self.last_output_change = now;
            self.idle_reported = false;
        }
        lines.len()
    }

    /// True exactly once per stretch of silence longer than `threshold`.
    fn take_idle_crossing(&mut self, now: Instant, threshold: Duration) -> bool {
        if self.idle_reported || now.saturating_duration_since(self.last_output_change) <= threshold
        {
            return false;
        }
        self.idle_reported = true;
        true
    }
}

/// Await `fetch` unless `cancel` fires first.
pub async fn cancellable<T>(
    cancel: &CancellationToken,
    fetch: impl Future<Output = DomainResult<T>>,
) -> DomainResult<T> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DomainError::Cancelled),
        result = fetch => result,
    }
}

/// Drives the status resolver and log fetches on a fixed timer.
pub struct LiveTail {
    server: Arc<dyn CiServer>,
    clock: Arc<dyn Clock>,
    settings: TailSettings,
}

impl LiveTail {
    pub fn new(server: Arc<dyn CiServer>, clock: Arc<dyn Clock>, settings: TailSettings) -> Self {
        Self {
            server,
            clock,
            settings,
        }
    }

    /// Fetch the job snapshot once and classify it.
    pub async fn resolve_status(&self, job: &str, mode: WatchMode) -> DomainResult<BuildStatus> {
        let snapshot = self.server.get_job(job).await?;
        Ok(resolve(&snapshot, mode))
    }

    /// Tail the job's active build until it stops running or hands off.
    ///
    /// Any fetch failure aborts the watch with that error. Cancelling
    /// `cancel` interrupts both in-flight fetches and the delay between
    /// polls and returns [`DomainError::Cancelled`].
    #[instrument(skip(self, sink, cancel))]
    pub async fn watch(
        &self,
        job: &str,
        mode: WatchMode,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<BuildStatus> {
        let result = self.run(job, mode, sink, cancel).await;
        if matches!(result, Err(DomainError::Cancelled)) {
            sink.finish();
        }
        result
    }

    async fn run(
        &self,
        job: &str,
        mode: WatchMode,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<BuildStatus> {
        let mut state = TailState::new(self.clock.now());

        loop {
            let status = cancellable(cancel, self.resolve_status(job, mode)).await?;
            state.record_poll(status.build);
            debug!(
                poll = state.poll_count,
                running = status.running,
                queued = status.queued,
                build = ?status.build,
                "polled job status"
            );

            if state.handed_off() {
                debug!(observed = ?state.observed_build_ids, "tracked build handed off");
            } else {
                self.present(job, mode, &status, &mut state, sink, cancel)
                    .await?;
            }

            if !state.should_continue(&status) {
                break;
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(DomainError::Cancelled),
                () = self.clock.sleep(self.settings.poll_interval) => {}
            }
        }

        if let Some(build) = state.tailed_build {
            let log = cancellable(cancel, self.server.get_build_log(job, build)).await?;
            state.print_new_lines(build, &log, self.clock.now(), sink);
        }
        sink.finish();

        let mut final_status = cancellable(cancel, self.resolve_status(job, mode)).await?;
        final_status.build = final_status
            .build
            .or_else(|| state.observed_build_ids.last().copied())
            .or(final_status.last);

        info!(
            build = ?final_status.build,
            status = %final_status.status,
            current = %final_status.current,
            lines = state.printed_line_count,
            polls = state.poll_count,
            "watch finished"
        );
        Ok(final_status)
    }

    async fn present(
        &self,
        job: &str,
        mode: WatchMode,
        status: &BuildStatus,
        state: &mut TailState,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<()> {
        if status.running && (mode.must_already_be_running() || !status.queued) {
            if let Some(build) = status.build {
                self.tail(job, build, state, sink, cancel).await?;
            }
        } else if status.queued {
            sink.waiting_for_start(status.eta);
        } else if mode.must_already_be_running() && state.observed_build_ids.is_empty() {
            sink.no_active_build(job);
        }
        Ok(())
    }

    async fn tail(
        &self,
        job: &str,
        build: BuildNumber,
        state: &mut TailState,
        sink: &mut dyn StatusSink,
        cancel: &CancellationToken,
    ) -> DomainResult<()> {
        let log = cancellable(cancel, self.server.get_build_log(job, build)).await?;
        let now = self.clock.now();
        let total = state.print_new_lines(build, &log, now, sink);

        if total == LOG_LINE_CAP {
            if !state.truncation_reported {
                warn!(build, cap = LOG_LINE_CAP, "build log truncated by server");
                sink.truncated(build, LOG_LINE_CAP);
                state.truncation_reported = true;
            }
        } else if state.take_idle_crossing(now, self.settings.idle_threshold) {
            sink.waiting_for_output(state.ellipsis_frame());
        }
        Ok(())
    }
}
