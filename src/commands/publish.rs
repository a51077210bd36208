//! Publish and plan commands
//!
//! `publish` reads the version, derives the tag, builds, then pushes.
//! `plan` (or `publish --dry-run`) stops after printing what would run.

use crate::core::context::ReleaseContext;
use crate::core::engine::{ContainerEngine, OutputMode};
use crate::core::error::ReleaseResult;
use crate::core::plan::PublishPlan;
use crate::core::publish::{PublishObserver, PublishReport, Publisher};
use crate::ui::{ConsoleObserver, StepProgress};
use std::io::{self, Write};

/// Options for the publish command
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
  /// Print the plan without running anything
  pub dry_run: bool,
  /// Build only
  pub skip_push: bool,
  /// Capture engine output instead of streaming it
  pub quiet: bool,
  /// Machine-readable output
  pub json: bool,
}

/// Build the publish plan from the context (reads the version file)
pub fn build_plan(ctx: &ReleaseContext, skip_push: bool) -> ReleaseResult<PublishPlan> {
  let version = ctx.read_version()?;
  PublishPlan::new(
    &ctx.config.engine,
    &ctx.config.image_name,
    &version,
    ctx.version_file_path(),
    ctx.config.context.clone(),
    skip_push,
  )
}

/// Run the plan command
pub fn run_plan(ctx: &ReleaseContext, skip_push: bool, json: bool) -> ReleaseResult<()> {
  let plan = build_plan(ctx, skip_push)?;
  print_plan(&plan, json)
}

/// Run the publish command
pub fn run_publish(ctx: &ReleaseContext, opts: PublishOptions) -> ReleaseResult<()> {
  // Missing version file aborts here, before any engine call
  let plan = build_plan(ctx, opts.skip_push)?;

  if opts.dry_run {
    print_plan(&plan, opts.json)?;
    if !opts.json {
      println!("\n🔍 Dry-run mode (nothing executed)");
    }
    return Ok(());
  }

  let engine = ctx.engine();
  let report = execute(&engine, &plan, opts)?;

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_summary(&report);
  }

  report.ensure_success()
}

/// Execute a plan with the output style chosen by `opts`
///
/// JSON output implies capture, so stdout carries only the report.
fn execute<E: ContainerEngine>(engine: &E, plan: &PublishPlan, opts: PublishOptions) -> ReleaseResult<PublishReport> {
  let capture = opts.quiet || opts.json;
  let mode = if capture { OutputMode::Capture } else { OutputMode::Stream };

  let mut observer: Box<dyn PublishObserver> = if opts.json {
    Box::new(())
  } else if opts.quiet {
    Box::new(StepProgress::new(plan.operations.len(), format!("Publishing {}", plan.tag)))
  } else {
    println!("📦 Publishing {} (plan {})", plan.tag, plan.id);
    Box::new(ConsoleObserver::new(engine.name()))
  };

  let report = Publisher::new(engine, mode).execute(plan, observer.as_mut())?;

  // Captured output of a failed step is the only clue to what went wrong
  if capture && let Some(step) = report.failed_step() {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "\n--- {} output ---", step.command)?;
    stderr.write_all(&step.output)?;
    writeln!(stderr, "--- end of output ---")?;
  }

  Ok(report)
}

fn print_plan(plan: &PublishPlan, json: bool) -> ReleaseResult<()> {
  if json {
    println!("{}", plan.to_json()?);
  } else {
    print!("{}", plan.to_human_readable());
  }
  Ok(())
}

fn print_summary(report: &PublishReport) {
  println!();
  if report.success {
    let pushed = report.steps.iter().any(|s| s.operation == "push");
    if pushed {
      println!("✅ Published {}", report.tag);
    } else {
      println!("✅ Built {} (push skipped)", report.tag);
    }
  } else if !report.skipped.is_empty() {
    println!("⏭️  Skipped: {}", report.skipped.join(", "));
  }
}
