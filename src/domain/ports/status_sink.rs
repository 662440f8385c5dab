//! Presentation sink for the live tail.

use crate::domain::models::{BuildNumber, Eta};

/// Receives everything the live tail wants shown to the user.
///
/// Log lines are permanent output; the remaining calls replace a single
/// rewritable status line.
pub trait StatusSink: Send {
    /// New log lines, in order, without trailing newlines.
    fn log_lines(&mut self, lines: &[&str]);

    /// The running build has produced no output for longer than the idle
    /// threshold. `frame` is in `0..3` and picks the ellipsis length.
    fn waiting_for_output(&mut self, frame: usize);

    /// The log reached the server's line cap and is no longer growing.
    fn truncated(&mut self, build: BuildNumber, cap: usize);

    /// A build is queued and waiting for an executor.
    fn waiting_for_start(&mut self, eta: Eta);

    /// Asked to attach to a running build, but none is active.
    fn no_active_build(&mut self, job: &str);

    /// The watch is over; clear any pending status line.
    fn finish(&mut self);
}
