use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use std::path::Path;

/// Write a release.toml with default values into `root`
///
/// Refuses to replace an existing configuration unless `force` is set.
pub fn run_init(root: &Path, image_name: Option<String>, force: bool) -> ReleaseResult<()> {
  if let Some(existing) = ReleaseConfig::find_config_path(root)
    && !force
  {
    return Err(ReleaseError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let mut config = ReleaseConfig::default();
  if let Some(image_name) = image_name {
    config.image_name = image_name;
  }
  config.validate()?;

  let path = config.save(root)?;
  println!("✅ Wrote {}", path.display());
  println!();
  println!("  image_name   = {}", config.image_name);
  println!("  engine       = {}", config.engine);
  println!("  version_file = {}", config.version_file.display());
  println!("  context      = {}", config.context.display());
  println!();
  println!("Next steps:");
  println!("  image-release doctor   # check the setup");
  println!("  image-release plan     # see what publish would run");

  Ok(())
}
