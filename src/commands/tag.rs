use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use serde_json::json;

/// Print the image tag derived from the version file
///
/// Plain output is the bare tag so it can be captured by scripts:
/// `TAG=$(image-release tag)`.
pub fn run_tag(ctx: &ReleaseContext, json: bool) -> ReleaseResult<()> {
  let (version, tag) = ctx.image_tag()?;

  if json {
    let out = json!({
      "image_name": ctx.config.image_name,
      "version": version.as_str(),
      "version_file": ctx.version_file_path(),
      "tag": tag.as_str(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
  } else {
    println!("{}", tag);
  }

  Ok(())
}
