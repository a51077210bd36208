//! Utility functions for path handling and command display

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute
///
/// `.` and `..` components are folded lexically so that messages show
/// `/work/VERSION` rather than `/work/docker/./../VERSION`. Symlinks are not
/// followed.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
  let joined = if path.is_absolute() {
    path.to_path_buf()
  } else {
    base.join(path)
  };

  let mut resolved = PathBuf::new();
  for component in joined.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match resolved.components().next_back() {
        Some(Component::Normal(_)) => {
          resolved.pop();
        }
        // `/..` is `/`
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => resolved.push(".."),
      },
      other => resolved.push(other.as_os_str()),
    }
  }
  resolved
}

/// Render a command line for logs and error messages
///
/// Arguments containing whitespace are single-quoted. This is for display
/// only and is not a shell-safe escape.
pub fn display_command(program: &str, args: &[OsString]) -> String {
  let mut rendered = program.to_string();
  for arg in args {
    let arg = arg.to_string_lossy();
    rendered.push(' ');
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
      rendered.push('\'');
      rendered.push_str(&arg);
      rendered.push('\'');
    } else {
      rendered.push_str(&arg);
    }
  }
  rendered
}
