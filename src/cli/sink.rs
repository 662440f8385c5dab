//! Terminal rendering of the live tail.
//!
//! Log lines are printed permanently (stdout, or stderr in JSON mode so the
//! summary document stays alone on stdout). Waiting indicators share one
//! rewritable indicatif line on stderr that is cleared as soon as output
//! arrives.

use chrono::Utc;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::cli::display::format_eta;
use crate::domain::models::{BuildNumber, Eta};
use crate::domain::ports::StatusSink;

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const ELLIPSIS_TEMPLATE: &str = "{msg}{spinner}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const ELLIPSIS_TICKS: [&str; 4] = [".", "..", "...", ""];

/// [`StatusSink`] for an interactive terminal.
pub struct ConsoleSink {
    status_line: Option<ProgressBar>,
    json: bool,
    hidden: bool,
    no_active_build: bool,
}

impl ConsoleSink {
    pub fn new(json: bool) -> Self {
        Self {
            status_line: None,
            json,
            hidden: json,
            no_active_build: false,
        }
    }

    /// A sink that never draws a status line.
    pub fn hidden() -> Self {
        let mut sink = Self::new(false);
        sink.hidden = true;
        sink
    }

    /// The watch ended without finding a build to attach to.
    pub fn reported_no_active_build(&self) -> bool {
        self.no_active_build
    }

    fn status(&mut self, style: ProgressStyle, message: String) -> &ProgressBar {
        let hidden = self.hidden;
        let line = self.status_line.get_or_insert_with(|| {
            let target = if hidden {
                ProgressDrawTarget::hidden()
            } else {
                ProgressDrawTarget::stderr()
            };
            ProgressBar::with_draw_target(None, target)
        });
        line.set_style(style);
        line.set_message(message);
        line
    }

    fn clear_status(&mut self) {
        if let Some(line) = self.status_line.take() {
            line.finish_and_clear();
        }
    }

    fn notice(&mut self, message: String) {
        self.clear_status();
        eprintln!("{message}");
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .map_or_else(|_| ProgressStyle::default_spinner(), |s| s.tick_chars(SPINNER_CHARS))
}

fn ellipsis_style() -> ProgressStyle {
    ProgressStyle::with_template(ELLIPSIS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&ELLIPSIS_TICKS)
}

impl StatusSink for ConsoleSink {
    fn log_lines(&mut self, lines: &[&str]) {
        self.clear_status();
        for line in lines {
            if self.json {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }

    fn waiting_for_output(&mut self, frame: usize) {
        let line = self.status(ellipsis_style(), "Waiting for output".to_string());
        for _ in 0..frame {
            line.tick();
        }
        line.enable_steady_tick(Duration::from_millis(400));
    }

    fn truncated(&mut self, build: BuildNumber, cap: usize) {
        self.notice(format!(
            "{} log of build #{build} reached the server's {cap}-line limit; later output is not shown",
            style("warning:").yellow().bold()
        ));
    }

    fn waiting_for_start(&mut self, eta: Eta) {
        let message = format!("Waiting for build to start (ETA {})", format_eta(eta, Utc::now()));
        self.status(spinner_style(), message)
            .enable_steady_tick(Duration::from_millis(80));
    }

    fn no_active_build(&mut self, job: &str) {
        self.no_active_build = true;
        self.notice(format!("No currently active build for {job}"));
    }

    fn finish(&mut self) {
        self.clear_status();
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        self.clear_status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active_build_is_remembered() {
        let mut sink = ConsoleSink::hidden();
        assert!(!sink.reported_no_active_build());
        sink.no_active_build("api");
        assert!(sink.reported_no_active_build());
    }

    #[test]
    fn test_output_clears_status_line() {
        let mut sink = ConsoleSink::hidden();
        sink.waiting_for_output(2);
        assert!(sink.status_line.is_some());
        sink.log_lines(&["next"]);
        assert!(sink.status_line.is_none());
    }

    #[test]
    fn test_status_line_is_reused_while_queued() {
        let mut sink = ConsoleSink::hidden();
        sink.waiting_for_start(Eta::Unknown);
        sink.waiting_for_start(Eta::Unknown);
        assert!(sink.status_line.is_some());
        sink.finish();
        assert!(sink.status_line.is_none());
    }
}
