//! Error types for image-release with contextual messages and exit codes
//!
//! Every error maps to an exit code. Errors that a user can act on carry a
//! help message that is printed below the error itself.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for image-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing version file)
  User,
  /// System error (engine missing, I/O)
  System,
  /// Validation failure (doctor checks)
  Validation,
  /// Exit code forwarded from a failed engine invocation
  Subprocess(i32),
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::User => 1,
      ExitCode::System => 2,
      ExitCode::Validation => 3,
      // A failed command must never turn into a successful exit
      ExitCode::Subprocess(0) => 1,
      ExitCode::Subprocess(code) => code,
    }
  }
}

/// Main error type for image-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Version file errors
  Version(VersionError),

  /// Container engine errors
  Engine(EngineError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Version(_) => ExitCode::User,
      ReleaseError::Engine(EngineError::CommandFailed { exit_code, .. }) => ExitCode::Subprocess(*exit_code),
      ReleaseError::Engine(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Engine(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Engine(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Version(VersionError::Unreadable { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<toml_edit::ser::Error> for ReleaseError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ReleaseError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::Version(err)
  }
}

impl From<EngineError> for ReleaseError {
  fn from(err: EngineError) -> Self {
    ReleaseError::Engine(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// A field holds a value the tool cannot use
  InvalidField { field: String, reason: String },

  /// Refused to overwrite an existing config file
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some("Run `image-release doctor` to check the configuration.".to_string()),
      ConfigError::InvalidField { field, .. } if field == "image_name" => {
        Some("Use the form `namespace/name` without a tag, e.g. `callumjones/traccar`.".to_string())
      }
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}:\n{}", path.display(), reason)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
    }
  }
}

/// Version file errors
#[derive(Debug)]
pub enum VersionError {
  /// Version file does not exist
  NotFound { path: PathBuf },

  /// Version file exists but could not be read as text
  Unreadable { path: PathBuf, source: io::Error },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::NotFound { .. } => Some(
        "Create the file with the release version (e.g. `echo 4.9 > ../VERSION`) or pass --version-file.".to_string(),
      ),
      VersionError::Unreadable { .. } => None,
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::NotFound { path } => write!(f, "Version file not found: {}", path.display()),
      VersionError::Unreadable { path, source } => {
        write!(f, "Failed to read version file {}: {}", path.display(), source)
      }
    }
  }
}

/// Container engine errors
#[derive(Debug)]
pub enum EngineError {
  /// Engine binary could not be started
  NotFound { engine: String, reason: String },

  /// Engine ran and reported failure
  CommandFailed {
    /// Operation name (`build` or `push`)
    operation: &'static str,
    command: String,
    exit_code: i32,
  },
}

impl EngineError {
  fn help_message(&self) -> Option<String> {
    match self {
      EngineError::NotFound { engine, .. } => Some(format!(
        "Install {} or point `engine` in release.toml at another container CLI.",
        engine
      )),
      EngineError::CommandFailed { operation: "push", .. } => {
        Some("Check that you are logged in to the registry (e.g. `docker login`).".to_string())
      }
      EngineError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for EngineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EngineError::NotFound { engine, reason } => {
        write!(f, "Failed to run container engine '{}': {}", engine, reason)
      }
      EngineError::CommandFailed { command, exit_code, .. } => {
        write!(f, "Command failed with exit code {}: {}", exit_code, command)
      }
    }
  }
}

/// Result type alias for image-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
