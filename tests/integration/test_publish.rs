//! Tests for the `publish` and `plan` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_publish_builds_then_pushes() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["publish"])?;

  assert_eq!(
    project.engine_calls()?,
    vec!["build -t callumjones/traccar:4.9 .", "push callumjones/traccar:4.9"]
  );

  // Engine output, stderr included, is forwarded to stdout
  let out = stdout(&output);
  assert!(out.contains("building callumjones/traccar:4.9"));
  assert!(out.contains("build diagnostics"));
  assert!(out.contains("pushing callumjones/traccar:4.9"));
  assert!(out.contains("✅ Published callumjones/traccar:4.9"));

  Ok(())
}

#[test]
fn test_publish_is_the_default_command() -> Result<()> {
  let project = TestProject::new("  4.9  ")?;

  run_image_release(&project.work, &[])?;

  assert_eq!(
    project.engine_calls()?,
    vec!["build -t callumjones/traccar:4.9 .", "push callumjones/traccar:4.9"]
  );
  Ok(())
}

#[test]
fn test_missing_version_file_runs_nothing() -> Result<()> {
  let project = TestProject::new("4.9\n")?;
  std::fs::remove_file(project.path.join("VERSION"))?;

  let output = run_image_release_raw(&project.work, &["publish"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Version file not found"));
  assert!(project.engine_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_failed_build_skips_push_and_forwards_exit_code() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release_raw(&project.work, &["publish"], &[("FAKE_BUILD_EXIT", "7")])?;

  assert_eq!(output.status.code(), Some(7));
  assert_eq!(project.engine_calls()?, vec!["build -t callumjones/traccar:4.9 ."]);
  assert!(stdout(&output).contains("Skipped: push"));
  assert!(stderr(&output).contains("exit code 7"));
  Ok(())
}

#[test]
fn test_failed_push_forwards_exit_code() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release_raw(&project.work, &["publish"], &[("FAKE_PUSH_EXIT", "5")])?;

  assert_eq!(output.status.code(), Some(5));
  assert_eq!(project.engine_calls()?.len(), 2);
  assert!(stderr(&output).contains("docker login"));
  Ok(())
}

#[test]
fn test_missing_engine_is_system_error() -> Result<()> {
  let project = TestProject::new("4.9\n")?;
  project.write_config("engine = \"/nonexistent/container-engine\"\n")?;

  let output = run_image_release_raw(&project.work, &["publish"], &[])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Failed to run container engine"));
  Ok(())
}

#[test]
fn test_skip_push() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["publish", "--skip-push"])?;

  assert_eq!(project.engine_calls()?, vec!["build -t callumjones/traccar:4.9 ."]);
  assert!(stdout(&output).contains("push skipped"));
  Ok(())
}

#[test]
fn test_image_override_from_cli() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  run_image_release(&project.work, &["publish", "--image", "registry.local:5000/traccar"])?;

  assert_eq!(
    project.engine_calls()?,
    vec![
      "build -t registry.local:5000/traccar:4.9 .",
      "push registry.local:5000/traccar:4.9"
    ]
  );
  Ok(())
}

#[test]
fn test_image_name_from_config() -> Result<()> {
  let project = TestProject::new("1.2.3\n")?;
  project.write_config(&format!(
    "image_name = \"acme/server\"\nengine = \"{}\"\n",
    project.engine.display()
  ))?;

  run_image_release(&project.work, &["publish"])?;

  assert_eq!(
    project.engine_calls()?,
    vec!["build -t acme/server:1.2.3 .", "push acme/server:1.2.3"]
  );
  Ok(())
}

#[test]
fn test_dry_run_runs_nothing() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["publish", "--dry-run"])?;

  assert!(project.engine_calls()?.is_empty());
  let out = stdout(&output);
  assert!(out.contains("build -t callumjones/traccar:4.9 ."));
  assert!(out.contains("push callumjones/traccar:4.9"));
  assert!(out.contains("Dry-run"));
  Ok(())
}

#[test]
fn test_plan_json() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["plan", "--json"])?;
  let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert!(project.engine_calls()?.is_empty());
  assert_eq!(plan["tag"], "callumjones/traccar:4.9");
  assert_eq!(plan["operations"][0]["type"], "build");
  assert_eq!(plan["operations"][1]["type"], "push");
  Ok(())
}

#[test]
fn test_publish_json_report() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["publish", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["success"], true);
  assert_eq!(report["steps"][0]["operation"], "build");
  assert_eq!(report["steps"][0]["exit_code"], 0);
  assert_eq!(report["steps"][1]["operation"], "push");
  Ok(())
}

#[test]
fn test_quiet_failure_prints_captured_output() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release_raw(&project.work, &["publish", "--quiet"], &[("FAKE_BUILD_EXIT", "1")])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!stdout(&output).contains("building callumjones/traccar:4.9"));
  let err = stderr(&output);
  assert!(err.contains("building callumjones/traccar:4.9"));
  assert!(err.contains("build diagnostics"));
  Ok(())
}

#[test]
fn test_verbose_diagnostics_go_to_stderr() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["-v", "publish"])?;

  assert!(stderr(&output).contains("release context ready"));
  assert!(stderr(&output).contains("running engine"));
  assert!(!stdout(&output).contains("release context ready"));
  assert!(!stdout(&output).contains("running engine"));
  Ok(())
}

#[test]
fn test_diagnostics_are_quiet_by_default() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["publish"])?;

  assert!(!stderr(&output).contains("release context ready"));
  Ok(())
}

#[test]
fn test_log_env_overrides_default_level() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release_raw(&project.work, &["publish"], &[("IMAGE_RELEASE_LOG", "image_release=debug")])?;

  assert!(output.status.success());
  assert!(stderr(&output).contains("release context ready"));
  assert!(!stdout(&output).contains("release context ready"));
  Ok(())
}
