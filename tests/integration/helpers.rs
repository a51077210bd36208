//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A project checkout with a VERSION file and a docker context directory
///
/// ```text
/// <tmp>/
///   VERSION
///   custom_docker/      <- working directory, build context
///     release.toml      <- engine points at the fake engine
///   bin/fake-engine
///   engine.log          <- one line per engine invocation
/// ```
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  pub work: PathBuf,
  pub engine: PathBuf,
  pub log: PathBuf,
}

impl TestProject {
  /// Create a project with `VERSION` containing `version` verbatim
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let work = path.join("custom_docker");
    std::fs::create_dir_all(&work)?;
    std::fs::create_dir_all(path.join("bin"))?;

    std::fs::write(path.join("VERSION"), version)?;
    std::fs::write(work.join("Dockerfile"), "FROM scratch\n")?;

    let log = path.join("engine.log");
    let engine = path.join("bin").join("fake-engine");
    write_fake_engine(&engine, &log)?;

    let project = Self {
      _root: root,
      path,
      work,
      engine,
      log,
    };
    project.write_config(&format!("engine = \"{}\"\n", project.engine.display()))?;
    Ok(project)
  }

  /// Replace release.toml in the working directory
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.work.join("release.toml"), content)?;
    Ok(())
  }

  /// Engine invocations so far, one argv line each
  pub fn engine_calls(&self) -> Result<Vec<String>> {
    if !self.log.exists() {
      return Ok(vec![]);
    }
    Ok(
      std::fs::read_to_string(&self.log)?
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Write a shell script that logs its argv and exits with FAKE_BUILD_EXIT / FAKE_PUSH_EXIT
fn write_fake_engine(path: &Path, log: &Path) -> Result<()> {
  let script = format!(
    r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
  build)
    echo "building $3"
    echo "build diagnostics" 1>&2
    exit "${{FAKE_BUILD_EXIT:-0}}"
    ;;
  push)
    echo "pushing $2"
    exit "${{FAKE_PUSH_EXIT:-0}}"
    ;;
  --version)
    echo "fake-engine version 1.0"
    ;;
esac
"#,
    log = log.display()
  );
  std::fs::write(path, script)?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
  }
  Ok(())
}

/// Run image-release and return its output whatever the exit status
pub fn run_image_release_raw(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_image-release");

  let mut cmd = Command::new(bin);
  cmd.current_dir(cwd).args(args).env_remove("IMAGE_RELEASE_LOG");
  for (key, value) in envs {
    cmd.env(key, value);
  }
  cmd.output().context("Failed to run image-release")
}

/// Run image-release and fail unless it exits successfully
pub fn run_image_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_image_release_raw(cwd, args, &[])?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "image-release command failed: image-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
