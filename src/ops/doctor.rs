//! Compiler availability checks.
//!
//! `luo doctor` verifies that the configured C and C++ compilers can be
//! found on `PATH` before a build is attempted.

use std::fmt::Write;
use std::path::PathBuf;

use crate::core::language::Language;
use crate::util::config::BuildConfig;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::process::find_executable;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Executable that was looked up
    pub program: String,
    /// Resolved path, if found
    pub path: Option<PathBuf>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.path.is_some()
    }

    /// A warning for a failed check; `None` when it passed.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        if self.passed() {
            return None;
        }
        Some(
            Diagnostic::warning(format!("{} `{}` not found on PATH", self.name, self.program))
                .with_suggestion(suggestions::COMPILER_NOT_FOUND),
        )
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Check whether every check passed.
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }
}

/// Look up the compiler for each language.
pub fn doctor(config: &BuildConfig) -> DoctorReport {
    let checks = Language::ALL
        .iter()
        .map(|lang| {
            let program = lang.compiler(config).to_string();
            let path = find_executable(&program);
            tracing::debug!("{} compiler `{}`: {:?}", lang, program, path);
            CheckResult {
                name: format!("{} compiler", lang),
                program,
                path,
            }
        })
        .collect();

    DoctorReport { checks }
}

/// Format a report for terminal output.
pub fn format_report(report: &DoctorReport) -> String {
    let mut output = String::new();

    for check in &report.checks {
        let status = if check.passed() { "[OK]" } else { "[!!]" };
        let _ = write!(output, "  {} {} ({})", status, check.name, check.program);
        if let Some(path) = &check.path {
            let _ = write!(output, ": {}", path.display());
        }
        output.push('\n');
    }

    output
}
