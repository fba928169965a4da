//! Build pipeline error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Result alias for build pipeline operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Error raised by a scan, staging, compile, or link step.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("path `{}` does not exist", path.display())]
    PathNotFound { path: PathBuf },

    #[error("{action} `{}`: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("compilation failed for `{source_file}`")]
    CompileFailed {
        source_file: String,
        stderr: String,
        code: Option<i32>,
    },

    #[error("linking failed for `{}`", output.display())]
    LinkFailed {
        output: PathBuf,
        stderr: String,
        code: Option<i32>,
    },

    #[error("no object files found under `{}`", dir.display())]
    NoObjects { dir: PathBuf },
}

impl BuildError {
    /// Wrap an I/O error with the operation and path it came from.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Captured compiler stderr, for compile and link failures.
    pub fn compiler_output(&self) -> Option<&str> {
        match self {
            BuildError::CompileFailed { stderr, .. } | BuildError::LinkFailed { stderr, .. } => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }

    /// Compiler exit code, for compile and link failures.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BuildError::CompileFailed { code, .. } | BuildError::LinkFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Convert to a user-friendly message.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            BuildError::PathNotFound { path } => diag
                .with_location(path)
                .with_suggestion(suggestions::NO_SOURCE_ROOT),
            BuildError::Io { path, .. } => diag.with_location(path),
            BuildError::Spawn { .. } => diag.with_suggestion(suggestions::COMPILER_NOT_FOUND),
            BuildError::CompileFailed { code, .. } => diag
                .with_context(exit_context(*code))
                .with_suggestion(suggestions::BUILD_FAILED),
            BuildError::LinkFailed { code, .. } => diag
                .with_context(exit_context(*code))
                .with_suggestion(suggestions::LINK_FAILED),
            BuildError::NoObjects { .. } => diag.with_suggestion(suggestions::NO_OBJECTS),
        }
    }
}

fn exit_context(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("compiler exited with code {}", code),
        None => "compiler was terminated by a signal".to_string(),
    }
}
