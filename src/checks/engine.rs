use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::engine::ContainerEngine;
use crate::core::error::{ReleaseError, ReleaseResult};

/// Runs `<engine> --version`
pub struct EngineCheck;

impl Check for EngineCheck {
  fn name(&self) -> &str {
    "container-engine"
  }

  fn description(&self) -> &str {
    "Container engine binary is installed and runs"
  }

  fn run(&self, ctx: &CheckContext) -> ReleaseResult<CheckResult> {
    let release = ctx
      .release
      .as_ref()
      .ok_or_else(|| ReleaseError::message("No configuration loaded"))?;
    let engine = release.engine();

    let outcome = match engine.version() {
      Ok(outcome) => outcome,
      Err(err) => return Ok(CheckResult::error(self.name(), err.to_string(), err.help_message())),
    };

    let text = outcome.output_text();
    let first_line = text.lines().next().unwrap_or("").trim();
    if outcome.success() {
      Ok(CheckResult::pass(self.name(), format!("{}: {}", engine.name(), first_line)))
    } else {
      Ok(CheckResult::error(
        self.name(),
        format!("`{} --version` exited with code {}: {}", engine.name(), outcome.exit_code, first_line),
        Some("Make sure the engine daemon or machine is running"),
      ))
    }
  }
}
