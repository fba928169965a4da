//! Compiler invocation.
//!
//! Stages never spawn processes directly; they go through an [`Invoker`] so
//! the fan-out can be exercised without a real toolchain.

use std::path::{Path, PathBuf};

use crate::builder::errors::BuildResult;
use crate::util::process::ProcessBuilder;

/// Outcome of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileResult {
    /// Exit code 0.
    Success { stdout: String },
    /// Non-zero exit code, or `None` when terminated by a signal.
    Failure { stderr: String, code: Option<i32> },
}

/// Runs a compiler with an argument list and reports its outcome.
///
/// `Err` is reserved for failures to run the program at all; a compiler that
/// ran and rejected its input is an `Ok(CompileResult::Failure)`.
pub trait Invoker: Sync {
    fn exec(&self, program: &str, args: &[String]) -> BuildResult<CompileResult>;
}

/// Invoker that spawns real processes from a fixed working directory.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    cwd: PathBuf,
}

impl ProcessInvoker {
    /// Run compilers with `cwd` as their working directory.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        ProcessInvoker {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }
}

impl Invoker for ProcessInvoker {
    fn exec(&self, program: &str, args: &[String]) -> BuildResult<CompileResult> {
        let cmd = ProcessBuilder::new(program).args(args).cwd(&self.cwd);
        tracing::debug!("{}", cmd.display_command());
        cmd.exec_captured()
    }
}
