//! CLI commands for image-release
//!
//! ## Release
//! - **publish**: Build the tagged image, then push it (default command)
//! - **plan**: Show the publish plan without running anything
//! - **tag**: Print the tag derived from the version file
//!
//! ## Setup & Inspection
//! - **doctor**: Run health checks
//! - **init**: Write a default release.toml

pub mod doctor;
pub mod init;
pub mod publish;
pub mod tag;

pub use doctor::run_doctor;
pub use init::run_init;
pub use publish::{PublishOptions, run_plan, run_publish};
pub use tag::run_tag;
