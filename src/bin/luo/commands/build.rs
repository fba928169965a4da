//! `luo build` command

use anyhow::Result;

use super::{open_project, report_failure};
use crate::cli::{BuildArgs, GlobalOpts};

pub fn execute(args: BuildArgs, global: &GlobalOpts) -> Result<()> {
    let mut luo = open_project(args, global)?;

    let exe = luo.build().map_err(|e| report_failure(e, global))?;
    eprintln!("    Finished {}", exe.display());

    Ok(())
}
