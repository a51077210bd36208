//! Progress indicator for quiet publish runs
//!
//! Uses `linya` for a single step bar (build, push). Engine output is not
//! streamed in quiet mode, so the bar is the only thing on screen.

use crate::core::engine::CommandOutcome;
use crate::core::plan::Operation;
use crate::core::publish::PublishObserver;
use linya::{Bar, Progress};

/// Progress bar advancing once per finished engine operation
pub struct StepProgress {
  progress: Progress,
  bar: Bar,
}

impl StepProgress {
  /// Create a new progress bar for `total` operations
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}

impl PublishObserver for StepProgress {
  fn step_finished(&mut self, _operation: &Operation, _outcome: &CommandOutcome) {
    self.inc();
  }
}
