//! Tests for the `tag` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_tag_strips_trailing_newline() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["tag"])?;

  assert_eq!(stdout(&output), "callumjones/traccar:4.9\n");
  assert!(project.engine_calls()?.is_empty());
  Ok(())
}

#[test]
fn test_tag_strips_surrounding_spaces() -> Result<()> {
  let project = TestProject::new("  4.9  ")?;

  let output = run_image_release(&project.work, &["tag"])?;

  assert_eq!(stdout(&output), "callumjones/traccar:4.9\n");
  Ok(())
}

#[test]
fn test_tag_with_version_file_override() -> Result<()> {
  let project = TestProject::new("4.9\n")?;
  std::fs::write(project.work.join("NEXT_VERSION"), "5.0-rc1\n")?;

  let output = run_image_release(&project.work, &["tag", "--version-file", "NEXT_VERSION"])?;

  assert_eq!(stdout(&output), "callumjones/traccar:5.0-rc1\n");
  Ok(())
}

#[test]
fn test_tag_json() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release(&project.work, &["tag", "--json"])?;
  let tag: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(tag["image_name"], "callumjones/traccar");
  assert_eq!(tag["version"], "4.9");
  assert_eq!(tag["tag"], "callumjones/traccar:4.9");
  Ok(())
}

#[test]
fn test_invalid_image_name_is_rejected() -> Result<()> {
  let project = TestProject::new("4.9\n")?;

  let output = run_image_release_raw(&project.work, &["tag", "--image", "acme/api:"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("image_name"));
  Ok(())
}
