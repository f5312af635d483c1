#![forbid(unsafe_code)]
//! bv-core library.
//!
//! Shared vocabulary for the bv workspace: work items and their dependency
//! links, the analysis configuration, and error codes.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for typed failures, `anyhow::Result` at
//!   I/O boundaries.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;

pub use config::{AnalysisConfig, load_analysis_config};
pub use error::{ConfigError, ErrorCode};
pub use model::{Dependency, DependencyKind, Issue, IssueType, Status};
