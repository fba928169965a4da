//! Command implementations

pub mod build;
pub mod compile;
pub mod doctor;
pub mod explain;
pub mod link;

use anyhow::Result;

use luo::util::config::load_config;
use luo::{format_errors, BuildError, Luo};

use crate::cli::{BuildArgs, GlobalOpts};

/// Open the project in the current directory with CLI libraries appended.
pub fn open_project(args: BuildArgs, global: &GlobalOpts) -> Result<Luo> {
    let config = load_config(&global.config)?;
    let mut luo = Luo::new(config)?;
    luo.add_libraries(args.libs);
    Ok(luo)
}

/// Print captured compiler output for a failed stage and convert the error.
///
/// Output that parses into diagnostics is shown formatted; anything else is
/// shown verbatim.
pub fn report_failure(err: BuildError, global: &GlobalOpts) -> anyhow::Error {
    if let Some(stderr) = err.compiler_output() {
        let formatted = format_errors(stderr, global.color_for(std::io::stderr()));
        if formatted.is_empty() {
            eprint!("{}", stderr);
        } else {
            eprintln!("{}", formatted);
        }
    }
    err.into()
}
