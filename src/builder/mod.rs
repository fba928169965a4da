//! C/C++ build pipeline.
//!
//! This module implements the compile and link stages, the compiler
//! invocation seam, and parsing of compiler diagnostics.

pub mod compile;
pub mod diagnostics;
pub mod errors;
pub mod invoker;
pub mod link;

pub use compile::{CompileJob, CompilePlan, OBJECT_DIR};
pub use diagnostics::{
    format_errors, parse_errors, parse_records, DiagnosticRecord, ParsedDiagnostic,
    RawDiagnosticFragment,
};
pub use errors::{BuildError, BuildResult};
pub use invoker::{CompileResult, Invoker, ProcessInvoker};
pub use link::LinkPlan;
