//! Publish plans
//!
//! A publish run is planned before anything executes:
//!
//! - **Dry-run mode**: `plan` / `publish --dry-run` print the plan and stop
//! - **Auditability**: plans are JSON-serializable for CI logs
//! - **Identity**: the plan id is a SHA-256 of the plan contents, so two runs
//!   with the same tag, engine and context share an id
//!
//! ```text
//! ReleaseContext -> PublishPlan (build, push) -> Publisher -> PublishReport
//! ```

use crate::core::error::ReleaseResult;
use crate::core::tag::ImageTag;
use crate::core::version::Version;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

impl Serialize for PlanId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

/// Engine operation, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  /// `<engine> build -t <tag> <context>`
  Build { tag: ImageTag, context: PathBuf },

  /// `<engine> push <tag>`
  Push { tag: ImageTag },
}

impl Operation {
  pub fn name(&self) -> &'static str {
    match self {
      Operation::Build { .. } => "build",
      Operation::Push { .. } => "push",
    }
  }

  /// Argument list after the engine binary
  pub fn args(&self) -> Vec<String> {
    match self {
      Operation::Build { tag, context } => vec![
        "build".to_string(),
        "-t".to_string(),
        tag.to_string(),
        context.to_string_lossy().into_owned(),
      ],
      Operation::Push { tag } => vec!["push".to_string(), tag.to_string()],
    }
  }
}

/// Everything a publish run will do
#[derive(Debug, Clone, Serialize)]
pub struct PublishPlan {
  pub id: PlanId,
  pub engine: String,
  pub image_name: String,
  pub version: String,
  pub version_file: PathBuf,
  pub tag: ImageTag,
  pub operations: Vec<Operation>,
}

#[derive(Serialize)]
struct PlanContents<'a> {
  engine: &'a str,
  tag: &'a ImageTag,
  operations: &'a [Operation],
}

impl PublishPlan {
  /// Plan a build followed by a push (unless `skip_push`)
  pub fn new(
    engine: &str,
    image_name: &str,
    version: &Version,
    version_file: PathBuf,
    context: PathBuf,
    skip_push: bool,
  ) -> ReleaseResult<Self> {
    let tag = ImageTag::new(image_name, version);

    let mut operations = vec![Operation::Build {
      tag: tag.clone(),
      context,
    }];
    if !skip_push {
      operations.push(Operation::Push { tag: tag.clone() });
    }

    let contents = serde_json::to_vec(&PlanContents {
      engine,
      tag: &tag,
      operations: &operations,
    })?;

    Ok(Self {
      id: PlanId::from_contents(&contents),
      engine: engine.to_string(),
      image_name: image_name.to_string(),
      version: version.to_string(),
      version_file,
      tag,
      operations,
    })
  }

  /// Render the plan for terminal output
  pub fn to_human_readable(&self) -> String {
    let mut out = String::new();
    out.push_str(&format!("📋 Publish plan {}\n\n", self.id));
    out.push_str(&format!("  Version file: {}\n", self.version_file.display()));
    out.push_str(&format!("  Version:      {}\n", self.version));
    out.push_str(&format!("  Image tag:    {}\n\n", self.tag));
    out.push_str("  Operations:\n");
    for (i, op) in self.operations.iter().enumerate() {
      out.push_str(&format!("    {}. {} {}\n", i + 1, self.engine, op.args().join(" ")));
    }
    out
  }

  pub fn to_json(&self) -> ReleaseResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}
