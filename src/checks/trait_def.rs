//! Check trait abstraction for health checks

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Severity level for check results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
  /// Informational message (not an issue)
  Info,
  /// Warning (non-blocking, but should be addressed)
  Warning,
  /// Error (blocking, must be fixed)
  Error,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Info => write!(f, "INFO"),
      Severity::Warning => write!(f, "WARN"),
      Severity::Error => write!(f, "ERROR"),
    }
  }
}

/// Result of running a check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  /// Whether the check passed
  pub passed: bool,
  /// Severity level (if failed)
  pub severity: Severity,
  /// Human-readable message
  pub message: String,
  /// Optional suggested fix
  pub suggestion: Option<String>,
  /// Additional metadata (for JSON output)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: true,
      severity: Severity::Info,
      message: message.into(),
      suggestion: None,
      details: None,
    }
  }

  /// Create a failing check result with error severity
  pub fn error(check_name: impl Into<String>, message: impl Into<String>, suggestion: Option<impl Into<String>>) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Error,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Create a failing check result with warning severity
  pub fn warning(
    check_name: impl Into<String>,
    message: impl Into<String>,
    suggestion: Option<impl Into<String>>,
  ) -> Self {
    Self {
      check_name: check_name.into(),
      passed: false,
      severity: Severity::Warning,
      message: message.into(),
      suggestion: suggestion.map(|s| s.into()),
      details: None,
    }
  }

  /// Add details to the check result
  pub fn with_details(mut self, details: serde_json::Value) -> Self {
    self.details = Some(details);
    self
  }
}

/// Context passed to checks
#[derive(Debug, Clone)]
pub struct CheckContext {
  /// Working directory
  pub root: PathBuf,
  /// Resolved release context, when configuration loaded cleanly
  pub release: Option<ReleaseContext>,
  /// Why the release context could not be built
  pub config_error: Option<String>,
}

/// Health check trait
pub trait Check: Send + Sync {
  /// Short kebab-case name shown in output
  fn name(&self) -> &str;

  /// One-line description
  fn description(&self) -> &str;

  /// Run the check
  fn run(&self, ctx: &CheckContext) -> ReleaseResult<CheckResult>;

  /// Whether the check needs a valid configuration to say anything useful
  fn requires_config(&self) -> bool {
    true
  }
}
