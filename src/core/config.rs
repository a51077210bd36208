use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Image published when nothing else is configured
pub const DEFAULT_IMAGE_NAME: &str = "callumjones/traccar";

/// Container CLI used when nothing else is configured
pub const DEFAULT_ENGINE: &str = "docker";

/// Version file location, relative to the build context
pub const DEFAULT_VERSION_FILE: &str = "../VERSION";

/// Configuration for image-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so a missing file is not an error.
///
/// # Example
///
/// ```toml
/// image_name = "callumjones/traccar"
/// engine = "docker"
/// version_file = "../VERSION"
/// context = "."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Image name without tag (`namespace/name`)
  #[serde(default = "default_image_name")]
  pub image_name: String,

  /// Container CLI binary (name on PATH or a path)
  #[serde(default = "default_engine")]
  pub engine: String,

  /// Version file, relative to the build context unless absolute
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,

  /// Build context, relative to the working directory unless absolute
  #[serde(default = "default_context")]
  pub context: PathBuf,
}

fn default_image_name() -> String {
  DEFAULT_IMAGE_NAME.to_string()
}

fn default_engine() -> String {
  DEFAULT_ENGINE.to_string()
}

fn default_version_file() -> PathBuf {
  PathBuf::from(DEFAULT_VERSION_FILE)
}

fn default_context() -> PathBuf {
  PathBuf::from(".")
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      image_name: default_image_name(),
      engine: default_engine(),
      version_file: default_version_file(),
      context: default_context(),
    }
  }
}

/// Values given on the command line, applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub image_name: Option<String>,
  pub engine: Option<String>,
  pub version_file: Option<PathBuf>,
  pub context: Option<PathBuf>,
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the working directory, falling back to defaults
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(dir = %path.display(), "no release.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| {
      ReleaseError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  /// Apply command line overrides
  pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
    if let Some(image_name) = overrides.image_name {
      self.image_name = image_name;
    }
    if let Some(engine) = overrides.engine {
      self.engine = engine;
    }
    if let Some(version_file) = overrides.version_file {
      self.version_file = version_file;
    }
    if let Some(context) = overrides.context {
      self.context = context;
    }
    self
  }

  /// Validate configuration
  ///
  /// Only the image name and engine are checked. The version string is
  /// never validated.
  pub fn validate(&self) -> ReleaseResult<()> {
    if self.image_name.is_empty() {
      return Err(invalid("image_name", "must not be empty"));
    }
    if self.image_name.chars().any(char::is_whitespace) {
      return Err(invalid("image_name", "must not contain whitespace"));
    }
    if self.image_name.ends_with(':') {
      return Err(invalid("image_name", "must not end with ':' (the tag separator is added automatically)"));
    }
    if self.engine.trim().is_empty() {
      return Err(invalid("engine", "must not be empty"));
    }
    Ok(())
  }

  /// Save config to release.toml (default location)
  pub fn save(&self, path: &Path) -> ReleaseResult<PathBuf> {
    let config_path = path.join("release.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }
}

fn invalid(field: &str, reason: &str) -> ReleaseError {
  ReleaseError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}
