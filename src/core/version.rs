//! Version file reading
//!
//! The version file is the single source of truth for the tag's version
//! component. Its contents are trimmed and otherwise taken as-is.

use crate::core::error::{ReleaseResult, VersionError};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Release version read from the version file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
  /// Build a version from raw file contents (surrounding whitespace is stripped)
  pub fn from_contents(contents: &str) -> Self {
    Self(contents.trim().to_string())
  }

  /// Read and trim the version file
  pub fn read(path: &Path) -> ReleaseResult<Self> {
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
      io::ErrorKind::NotFound => VersionError::NotFound {
        path: path.to_path_buf(),
      },
      _ => VersionError::Unreadable {
        path: path.to_path_buf(),
        source,
      },
    })?;

    let version = Self::from_contents(&contents);
    tracing::debug!(path = %path.display(), version = %version, "read version file");
    Ok(version)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether the version parses as semver (informational only)
  pub fn is_semver(&self) -> bool {
    semver::Version::parse(&self.0).is_ok()
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
