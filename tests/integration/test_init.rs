//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let temp = tempfile::TempDir::new()?;

  run_image_release(temp.path(), &["init", "--image", "acme/api"])?;

  let config = std::fs::read_to_string(temp.path().join("release.toml"))?;
  assert!(config.contains("image_name = \"acme/api\""));
  assert!(config.contains("engine = \"docker\""));
  assert!(config.contains("version_file = \"../VERSION\""));
  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(temp.path().join("release.toml"), "image_name = \"keep/me\"\n")?;

  let output = run_image_release_raw(temp.path(), &["init"], &[])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  let config = std::fs::read_to_string(temp.path().join("release.toml"))?;
  assert!(config.contains("keep/me"));
  Ok(())
}

#[test]
fn test_init_force_overwrites() -> Result<()> {
  let temp = tempfile::TempDir::new()?;
  std::fs::write(temp.path().join("release.toml"), "image_name = \"old/name\"\n")?;

  run_image_release(temp.path(), &["init", "--force"])?;

  let config = std::fs::read_to_string(temp.path().join("release.toml"))?;
  assert!(config.contains("callumjones/traccar"));
  Ok(())
}

#[test]
fn test_init_then_tag_uses_config() -> Result<()> {
  let project = TestProject::new("2.0\n")?;
  std::fs::remove_file(project.work.join("release.toml"))?;

  run_image_release(&project.work, &["init", "--image", "acme/traccar"])?;
  let output = run_image_release(&project.work, &["tag"])?;

  assert_eq!(stdout(&output), "acme/traccar:2.0\n");
  Ok(())
}
