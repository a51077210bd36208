//! System engine backend - runs the container CLI as a subprocess
//!
//! The engine binary is resolved through PATH like any other command. Its
//! environment is inherited untouched because docker and podman read
//! registry credentials and daemon sockets from it.

use crate::core::engine::{CommandOutcome, ContainerEngine, OutputMode};
use crate::core::error::{EngineError, ReleaseError, ReleaseResult};
use crate::core::tag::ImageTag;
use crate::utils::display_command;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread;

const READ_CHUNK: usize = 8 * 1024;

/// Container engine backed by a system binary (docker, podman, ...)
pub struct SystemEngine {
  /// Binary name or path
  program: String,

  /// Directory the engine runs in
  work_dir: PathBuf,
}

impl SystemEngine {
  pub fn new(program: impl Into<String>, work_dir: &Path) -> Self {
    Self {
      program: program.into(),
      work_dir: work_dir.to_path_buf(),
    }
  }

  /// Create an engine command rooted at the working directory
  fn engine_cmd(&self) -> Command {
    let mut cmd = Command::new(&self.program);
    cmd.current_dir(&self.work_dir);
    cmd
  }

  /// Run the engine with `args`, merging stdout and stderr
  fn run(&self, args: &[OsString], mode: OutputMode) -> ReleaseResult<CommandOutcome> {
    let command = display_command(&self.program, args);
    tracing::info!(command = %command, dir = %self.work_dir.display(), "running engine");

    let mut child = self
      .engine_cmd()
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|e| {
        ReleaseError::Engine(EngineError::NotFound {
          engine: self.program.clone(),
          reason: e.to_string(),
        })
      })?;

    let buffer = Mutex::new(Vec::new());
    let combined = &buffer;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    thread::scope(|s| -> ReleaseResult<()> {
      let out = stdout.map(|pipe| s.spawn(move || drain(pipe, combined, mode)));
      let err = stderr.map(|pipe| s.spawn(move || drain(pipe, combined, mode)));
      for handle in [out, err].into_iter().flatten() {
        handle
          .join()
          .map_err(|_| ReleaseError::message("Output reader thread panicked"))??;
      }
      Ok(())
    })?;

    let status = child.wait()?;
    let exit_code = exit_code(status);
    tracing::info!(command = %command, exit_code, "engine finished");

    let combined_output = buffer
      .into_inner()
      .map_err(|_| ReleaseError::message("Output buffer poisoned"))?;

    Ok(CommandOutcome {
      exit_code,
      combined_output,
    })
  }
}

impl ContainerEngine for SystemEngine {
  fn name(&self) -> &str {
    &self.program
  }

  fn build(&self, tag: &ImageTag, context: &Path, mode: OutputMode) -> ReleaseResult<CommandOutcome> {
    let args = vec![
      OsString::from("build"),
      OsString::from("-t"),
      OsString::from(tag.as_str()),
      context.as_os_str().to_owned(),
    ];
    self.run(&args, mode)
  }

  fn push(&self, tag: &ImageTag, mode: OutputMode) -> ReleaseResult<CommandOutcome> {
    let args = vec![OsString::from("push"), OsString::from(tag.as_str())];
    self.run(&args, mode)
  }

  fn version(&self) -> ReleaseResult<CommandOutcome> {
    self.run(&[OsString::from("--version")], OutputMode::Capture)
  }
}

/// Copy a pipe into the shared buffer chunk by chunk, echoing when streaming
fn drain(mut pipe: impl Read, combined: &Mutex<Vec<u8>>, mode: OutputMode) -> ReleaseResult<()> {
  let mut buf = [0u8; READ_CHUNK];
  loop {
    let n = match pipe.read(&mut buf) {
      Ok(0) => return Ok(()),
      Ok(n) => n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e.into()),
    };

    // Lock spans the echo so screen and buffer see the same chunk order
    let mut guard = combined
      .lock()
      .map_err(|_| ReleaseError::message("Output buffer poisoned"))?;
    guard.extend_from_slice(&buf[..n]);
    if mode == OutputMode::Stream {
      let mut stdout = io::stdout().lock();
      stdout.write_all(&buf[..n])?;
      stdout.flush()?;
    }
  }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
  use std::os::unix::process::ExitStatusExt;
  match (status.code(), status.signal()) {
    (Some(code), _) => code,
    (None, Some(signal)) => 128 + signal,
    (None, None) => 1,
  }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
  status.code().unwrap_or(1)
}
