//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_doctor_passes_with_fake_engine() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["doctor"])?;

  let out = stdout(&output);
  assert!(out.contains("callumjones/traccar:4.9"));
  assert!(out.contains("fake-engine version 1.0"));
  assert!(out.contains("3/3 checks passed"));
  assert_eq!(project.engine_calls()?, vec!["--version"]);
  Ok(())
}

#[test]
fn test_doctor_reports_missing_version_file() -> Result<()> {
  let project = TestProject::new("4.9\n")?;
  std::fs::remove_file(project.path.join("VERSION"))?;

  let output = run_image_release_raw(&project.work, &["doctor", "--json"], &[])?;

  assert_eq!(output.status.code(), Some(3));
  let results: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let version = results
    .as_array()
    .and_then(|r| r.iter().find(|c| c["check_name"] == "version-file"))
    .cloned()
    .unwrap_or_default();
  assert_eq!(version["passed"], false);
  assert_eq!(version["severity"], "Error");
  Ok(())
}

#[test]
fn test_doctor_reports_invalid_config() -> Result<()> {
  let project = TestProject::new("4.9\n")?;
  project.write_config("image_name = [\n")?;

  let output = run_image_release_raw(&project.work, &["doctor"], &[])?;

  assert_eq!(output.status.code(), Some(3));
  let out = stdout(&output);
  assert!(out.contains("❌ configuration"));
  assert!(out.contains("Skipped: configuration is invalid"));
  Ok(())
}
