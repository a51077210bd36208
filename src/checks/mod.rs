//! Health checks behind `image-release doctor`
//!
//! All checks implement the `Check` trait and are registered in
//! `create_default_runner()`.
//!
//! # Built-in Checks
//!
//! - **configuration**: release.toml parses and validates
//! - **version-file**: the version file is readable and yields a tag
//! - **container-engine**: the engine binary runs (`<engine> --version`)

mod config;
mod engine;
mod runner;
mod trait_def;
mod version_file;

pub use runner::create_default_runner;
pub use trait_def::{CheckContext, Severity};
