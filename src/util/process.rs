//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::builder::errors::{BuildError, BuildResult};
use crate::builder::invoker::CompileResult;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion, buffering all output.
    pub fn exec(&self) -> BuildResult<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|source| BuildError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        child
            .wait_with_output()
            .map_err(|e| BuildError::io("failed to wait for", &self.program, e))
    }

    /// Execute and classify the outcome by exit status.
    ///
    /// Exit code 0 yields the captured stdout; anything else yields the
    /// captured stderr and the exit code (`None` when killed by a signal).
    pub fn exec_captured(&self) -> BuildResult<CompileResult> {
        let output = self.exec()?;
        if output.status.success() {
            Ok(CompileResult::Success {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        } else {
            Ok(CompileResult::Failure {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                code: output.status.code(),
            })
        }
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("gcc").args(["-c", "src/main.c", "-o", "main.o"]);

        assert_eq!(pb.display_command(), "gcc -c src/main.c -o main.o");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_captured_success() {
        let result = ProcessBuilder::new("sh")
            .args(["-c", "echo hello; echo noise >&2"])
            .exec_captured()
            .unwrap();

        match result {
            CompileResult::Success { stdout } => assert_eq!(stdout.trim(), "hello"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_captured_failure() {
        let result = ProcessBuilder::new("sh")
            .args(["-c", "echo out; echo 'a.c:1:1: error: x' >&2; exit 3"])
            .exec_captured()
            .unwrap();

        assert_eq!(
            result,
            CompileResult::Failure {
                stderr: "a.c:1:1: error: x\n".to_string(),
                code: Some(3),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_respects_cwd() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker.txt"), "here").unwrap();

        let result = ProcessBuilder::new("cat")
            .args(["marker.txt"])
            .cwd(tmp.path())
            .exec_captured()
            .unwrap();

        assert_eq!(
            result,
            CompileResult::Success {
                stdout: "here".to_string()
            }
        );
    }

    #[test]
    fn test_spawn_failure() {
        let err = ProcessBuilder::new("luo-definitely-not-a-compiler")
            .exec()
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
