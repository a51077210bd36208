//! Health check command for diagnosing issues
//!
//! The doctor command runs all health checks and reports any issues found.

use crate::checks::{CheckContext, Severity, create_default_runner};
use crate::core::config::ConfigOverrides;
use crate::core::context::ReleaseContext;
use crate::core::error::{ExitCode, ReleaseResult};
use std::path::Path;

/// Run the doctor command to diagnose issues
///
/// Returns Ok(()) if no check failed with error severity, otherwise exits
/// with the validation exit code.
pub fn run_doctor(root: &Path, overrides: ConfigOverrides, json: bool) -> ReleaseResult<()> {
  // Config problems are reported as a check result, not a fatal error
  let (release, config_error) = match ReleaseContext::build(root, overrides) {
    Ok(ctx) => (Some(ctx), None),
    Err(err) => (None, Some(err.to_string())),
  };

  let ctx = CheckContext {
    root: root.to_path_buf(),
    release,
    config_error,
  };

  let runner = create_default_runner();
  let results = runner.run_all(&ctx);
  let has_errors = results.iter().any(|r| !r.passed && r.severity == Severity::Error);

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    println!("🏥 Running health checks in {}\n", ctx.root.display());

    println!("📋 Registered checks:");
    for check in runner.checks() {
      println!("   • {}: {}", check.name(), check.description());
    }
    println!();

    let mut has_warnings = false;
    for result in &results {
      let icon = if result.passed {
        "✅"
      } else if result.severity == Severity::Warning {
        "⚠️ "
      } else {
        "❌"
      };
      println!("{} {}: {}", icon, result.check_name, result.message);

      if !result.passed {
        if let Some(ref suggestion) = result.suggestion {
          println!("   💡 Fix: {}", suggestion);
        }
        if result.severity == Severity::Warning {
          has_warnings = true;
        }
      }
      println!();
    }

    let passed_count = results.iter().filter(|r| r.passed).count();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary: {}/{} checks passed", passed_count, results.len());

    if has_errors {
      println!("\n⚠️  Critical issues found. Please fix errors before publishing.");
    } else if has_warnings {
      println!("\n⚠️  Some warnings found. Consider addressing them.");
    } else {
      println!("\n✨ All checks passed! Ready to publish.");
    }
  }

  if has_errors {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}
