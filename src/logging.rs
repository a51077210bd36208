//! Diagnostic logging
//!
//! User-facing progress is printed directly. Diagnostics (resolved paths,
//! engine argv, exit codes) go through `tracing` to stderr so they never mix
//! with engine output on stdout.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "IMAGE_RELEASE_LOG";

/// Install the stderr subscriber
///
/// `IMAGE_RELEASE_LOG` wins when set. Otherwise the level is `warn`, or
/// `debug` with `--verbose`.
pub fn init(verbose: bool) {
  let default_level = if verbose { "image_release=debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

  let is_terminal = std::io::stderr().is_terminal();
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(is_terminal)
    .with_target(false);

  // A second init (tests, embedding) is harmless
  if is_terminal {
    let _ = builder.try_init();
  } else {
    let _ = builder.without_time().try_init();
  }
}
