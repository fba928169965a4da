//! Luo - a minimal parallel build orchestrator for C/C++ projects
//!
//! This crate discovers sources under a source tree, compiles every
//! translation unit in parallel into `<build>/.luo`, links the objects into
//! one executable, and parses compiler diagnostics into structured records.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for luo unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{format_errors, parse_errors, BuildError, BuildResult, DiagnosticRecord};
pub use crate::core::{DirectoryListing, FilesByExtension, Language};
pub use crate::ops::Luo;
pub use crate::util::config::{BuildConfig, PartialConfig};
