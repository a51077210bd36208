use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;

/// Validates release.toml (or the defaults when there is none)
pub struct ConfigCheck;

impl Check for ConfigCheck {
  fn name(&self) -> &str {
    "configuration"
  }

  fn description(&self) -> &str {
    "release.toml parses and holds usable values"
  }

  fn requires_config(&self) -> bool {
    false
  }

  fn run(&self, ctx: &CheckContext) -> ReleaseResult<CheckResult> {
    if let Some(err) = &ctx.config_error {
      return Ok(CheckResult::error(
        self.name(),
        err.clone(),
        Some("Edit release.toml or regenerate it with `image-release init --force`"),
      ));
    }

    let Some(release) = &ctx.release else {
      return Ok(CheckResult::error(self.name(), "No configuration loaded", None::<String>));
    };

    let source = match &release.config_path {
      Some(path) => format!("Using {}", path.display()),
      None => "No release.toml found, using defaults".to_string(),
    };

    Ok(
      CheckResult::pass(
        self.name(),
        format!("{} (image: {}, engine: {})", source, release.config.image_name, release.config.engine),
      )
      .with_details(serde_json::to_value(&release.config)?),
    )
  }
}
