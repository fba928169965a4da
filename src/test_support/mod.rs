//! Test utilities for luo unit tests.
//!
//! [`MockInvoker`] stands in for a compiler: it records every invocation,
//! writes the file named after `-o` so later stages find real objects, and
//! fails for any invocation whose arguments contain a configured marker.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;

use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::invoker::{CompileResult, Invoker};

/// A recorded compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Full command line, for assertions.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// The argument following `-o`, if any.
    pub fn output(&self) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == "-o")
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Mock compiler rooted at a project directory.
#[derive(Debug)]
pub struct MockInvoker {
    root: PathBuf,
    failures: Vec<(String, CompileResult)>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockInvoker {
    /// Create a mock that succeeds for every invocation.
    pub fn new(root: impl AsRef<Path>) -> Self {
        MockInvoker {
            root: root.as_ref().to_path_buf(),
            failures: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail any invocation that has `marker` among its arguments.
    pub fn fail_on(mut self, marker: &str, stderr: &str, code: i32) -> Self {
        self.failures.push((
            marker.to_string(),
            CompileResult::Failure {
                stderr: stderr.to_string(),
                code: Some(code),
            },
        ));
        self
    }

    /// All invocations so far, in completion order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Check whether any invocation's command line contains `needle`.
    pub fn was_called_with(&self, needle: &str) -> bool {
        self.calls()
            .iter()
            .any(|call| call.command_line().contains(needle))
    }
}

impl Invoker for MockInvoker {
    fn exec(&self, program: &str, args: &[String]) -> BuildResult<CompileResult> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        self.calls.lock().unwrap().push(invocation.clone());

        for (marker, result) in &self.failures {
            if args.iter().any(|a| a == marker) {
                return Ok(result.clone());
            }
        }

        if let Some(output) = invocation.output() {
            let path = self.root.join(output);
            std::fs::write(&path, format!("mock output of {}\n", invocation.command_line()))
                .map_err(|e| BuildError::io("failed to write", &path, e))?;
        }

        Ok(CompileResult::Success {
            stdout: String::new(),
        })
    }
}

/// Create a project directory with the given files under `src/`.
pub fn source_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        let path = tmp.path().join("src").join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "int placeholder;\n").unwrap();
    }
    tmp
}
