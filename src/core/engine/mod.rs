//! Container engine abstraction
//!
//! Build and push are opaque operations owned by an external container CLI.
//! This module only defines how they are invoked and what comes back: the
//! exit code and the combined stdout/stderr bytes.

pub mod system_engine;

pub use system_engine::SystemEngine;

use crate::core::error::ReleaseResult;
use crate::core::tag::ImageTag;
use std::path::Path;

/// What a finished engine invocation reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
  /// Process exit code (`128 + signal` when killed by a signal on Unix)
  pub exit_code: i32,
  /// Stdout and stderr, merged in arrival order
  pub combined_output: Vec<u8>,
}

impl CommandOutcome {
  pub fn success(&self) -> bool {
    self.exit_code == 0
  }

  /// Output as text (lossy)
  pub fn output_text(&self) -> String {
    String::from_utf8_lossy(&self.combined_output).into_owned()
  }
}

/// Where engine output goes while the command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  /// Forward to our stdout as it arrives (and capture)
  Stream,
  /// Capture only
  Capture,
}

/// A container CLI able to build and push images
pub trait ContainerEngine {
  /// Engine name for messages
  fn name(&self) -> &str;

  /// Build an image from `context` and tag it
  fn build(&self, tag: &ImageTag, context: &Path, mode: OutputMode) -> ReleaseResult<CommandOutcome>;

  /// Push a tagged image to its registry
  fn push(&self, tag: &ImageTag, mode: OutputMode) -> ReleaseResult<CommandOutcome>;

  /// Ask the engine for its version (used by doctor)
  fn version(&self) -> ReleaseResult<CommandOutcome>;
}
