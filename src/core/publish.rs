//! Plan execution: run each engine operation in order
//!
//! Operations run strictly one after another. The first operation that
//! exits non-zero stops the run, so a failed build is never followed by a
//! push. No retries.

use crate::core::engine::{CommandOutcome, ContainerEngine, OutputMode};
use crate::core::error::{EngineError, ReleaseError, ReleaseResult};
use crate::core::plan::{Operation, PlanId, PublishPlan};
use crate::core::tag::ImageTag;
use crate::utils::display_command;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ffi::OsString;
use std::time::Instant;

/// Hooks for reporting progress while a plan runs
pub trait PublishObserver {
  fn step_started(&mut self, _operation: &Operation) {}
  fn step_finished(&mut self, _operation: &Operation, _outcome: &CommandOutcome) {}
}

impl PublishObserver for () {}

/// Result of one engine operation
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
  pub operation: &'static str,
  pub command: String,
  pub exit_code: i32,
  pub duration_ms: u64,
  #[serde(skip)]
  pub output: Vec<u8>,
}

impl StepReport {
  pub fn success(&self) -> bool {
    self.exit_code == 0
  }
}

/// Result of a publish run
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
  pub plan_id: PlanId,
  pub tag: ImageTag,
  pub started_at: DateTime<Utc>,
  pub steps: Vec<StepReport>,
  /// Operations never started because an earlier one failed
  pub skipped: Vec<&'static str>,
  pub success: bool,
}

impl PublishReport {
  /// The step that stopped the run
  pub fn failed_step(&self) -> Option<&StepReport> {
    self.steps.iter().find(|s| !s.success())
  }

  /// Turn a failed run into the engine error carrying its exit code
  pub fn ensure_success(&self) -> ReleaseResult<()> {
    match self.failed_step() {
      None => Ok(()),
      Some(step) => Err(ReleaseError::Engine(EngineError::CommandFailed {
        operation: step.operation,
        command: step.command.clone(),
        exit_code: step.exit_code,
      })),
    }
  }
}

/// Runs a publish plan against a container engine
pub struct Publisher<'a, E: ContainerEngine> {
  engine: &'a E,
  mode: OutputMode,
}

impl<'a, E: ContainerEngine> Publisher<'a, E> {
  pub fn new(engine: &'a E, mode: OutputMode) -> Self {
    Self { engine, mode }
  }

  /// Execute the plan's operations in order, stopping at the first failure
  ///
  /// Engine failures are recorded in the report, not returned as `Err`.
  /// `Err` means an operation could not be started at all (e.g. the engine
  /// binary is missing).
  pub fn execute(&self, plan: &PublishPlan, observer: &mut dyn PublishObserver) -> ReleaseResult<PublishReport> {
    let started_at = Utc::now();
    let mut steps: Vec<StepReport> = Vec::with_capacity(plan.operations.len());
    let mut skipped = Vec::new();

    for operation in &plan.operations {
      if steps.last().is_some_and(|s| !s.success()) {
        skipped.push(operation.name());
        continue;
      }

      observer.step_started(operation);
      let timer = Instant::now();
      let outcome = match operation {
        Operation::Build { tag, context } => self.engine.build(tag, context, self.mode)?,
        Operation::Push { tag } => self.engine.push(tag, self.mode)?,
      };
      observer.step_finished(operation, &outcome);

      if !outcome.success() {
        tracing::warn!(operation = operation.name(), exit_code = outcome.exit_code, "engine operation failed");
      }

      let args: Vec<OsString> = operation.args().into_iter().map(OsString::from).collect();
      steps.push(StepReport {
        operation: operation.name(),
        command: display_command(self.engine.name(), &args),
        exit_code: outcome.exit_code,
        duration_ms: u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX),
        output: outcome.combined_output,
      });
    }

    let success = steps.iter().all(StepReport::success);
    Ok(PublishReport {
      plan_id: plan.id.clone(),
      tag: plan.tag.clone(),
      started_at,
      steps,
      skipped,
      success,
    })
  }
}
