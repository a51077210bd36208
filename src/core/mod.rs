//! Core engine for image-release
//!
//! - **config**: release.toml parsing and validation
//! - **context**: Effective settings and resolved paths for one invocation
//! - **engine**: Container engine abstraction (SystemEngine)
//! - **error**: Error types with contextual help messages and exit codes
//! - **plan**: Publish plans (build, push) and plan ids
//! - **publish**: Sequential plan execution with failure gating
//! - **tag**: Image tag derivation
//! - **version**: Version file reading

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod plan;
pub mod publish;
pub mod tag;
pub mod version;
