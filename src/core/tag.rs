use crate::core::version::Version;
use serde::{Serialize, Serializer};
use std::fmt;

/// Fully qualified image tag (`namespace/name:version`)
///
/// Always the image name, a `:` and the trimmed version, concatenated with
/// no escaping or validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag(String);

impl ImageTag {
  pub fn new(image_name: &str, version: &Version) -> Self {
    Self(format!("{}:{}", image_name, version.as_str()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ImageTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl Serialize for ImageTag {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}
