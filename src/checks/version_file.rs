use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{ReleaseError, ReleaseResult};
use serde_json::json;

/// Reads the version file and shows the tag it produces
pub struct VersionFileCheck;

impl Check for VersionFileCheck {
  fn name(&self) -> &str {
    "version-file"
  }

  fn description(&self) -> &str {
    "Version file is readable and yields an image tag"
  }

  fn run(&self, ctx: &CheckContext) -> ReleaseResult<CheckResult> {
    let release = ctx
      .release
      .as_ref()
      .ok_or_else(|| ReleaseError::message("No configuration loaded"))?;
    let path = release.version_file_path();

    let (version, tag) = match release.image_tag() {
      Ok(found) => found,
      Err(err) => {
        return Ok(CheckResult::error(self.name(), err.to_string(), err.help_message()));
      }
    };

    let details = json!({
      "path": path,
      "version": version.as_str(),
      "tag": tag.as_str(),
      "semver": version.is_semver(),
    });

    if version.as_str().is_empty() {
      return Ok(
        CheckResult::warning(
          self.name(),
          format!("{} is empty; the tag would be '{}'", path.display(), tag),
          Some("Write the release version into the file"),
        )
        .with_details(details),
      );
    }

    // Non-semver versions (e.g. `4.9`) are used as-is
    let note = if version.is_semver() { "" } else { " (not semver, used as-is)" };
    Ok(CheckResult::pass(self.name(), format!("{} → {}{}", path.display(), tag, note)).with_details(details))
  }
}
