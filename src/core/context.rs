//! Release context - resolve configuration once, pass everywhere
//!
//! ```text
//! main.rs:
//!   ReleaseContext::build(cwd, overrides) -> &ReleaseContext
//!   |
//!   v
//! commands/publish.rs, tag.rs, doctor.rs:
//!   fn run_*(ctx: &ReleaseContext, ...)
//! ```

use crate::core::config::{ConfigOverrides, ReleaseConfig};
use crate::core::engine::SystemEngine;
use crate::core::error::ReleaseResult;
use crate::core::tag::ImageTag;
use crate::core::version::Version;
use crate::utils::resolve_path;
use std::path::{Path, PathBuf};

/// Configuration and paths for one invocation
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Working directory (absolute path)
  pub root: PathBuf,

  /// Config file the settings came from, if any
  pub config_path: Option<PathBuf>,

  /// Effective configuration (file + command line overrides)
  pub config: ReleaseConfig,
}

impl ReleaseContext {
  /// Load release.toml from `root`, apply overrides and validate
  pub fn build(root: &Path, overrides: ConfigOverrides) -> ReleaseResult<Self> {
    let config = ReleaseConfig::load(root)?.with_overrides(overrides);
    config.validate()?;

    let ctx = Self {
      root: root.to_path_buf(),
      config_path: ReleaseConfig::find_config_path(root),
      config,
    };
    tracing::debug!(
      image_name = %ctx.config.image_name,
      engine = %ctx.config.engine,
      version_file = %ctx.version_file_path().display(),
      "release context ready"
    );
    Ok(ctx)
  }

  /// Build context directory (absolute)
  pub fn context_dir(&self) -> PathBuf {
    resolve_path(&self.root, &self.config.context)
  }

  /// Version file location (absolute)
  pub fn version_file_path(&self) -> PathBuf {
    resolve_path(&self.context_dir(), &self.config.version_file)
  }

  /// Read the version file
  pub fn read_version(&self) -> ReleaseResult<Version> {
    Version::read(&self.version_file_path())
  }

  /// Read the version file and derive the image tag
  pub fn image_tag(&self) -> ReleaseResult<(Version, ImageTag)> {
    let version = self.read_version()?;
    let tag = ImageTag::new(&self.config.image_name, &version);
    Ok((version, tag))
  }

  /// Engine running in the working directory
  pub fn engine(&self) -> SystemEngine {
    SystemEngine::new(self.config.engine.clone(), &self.root)
  }
}
