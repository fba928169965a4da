//! `luo link` command

use anyhow::Result;

use super::{open_project, report_failure};
use crate::cli::{BuildArgs, GlobalOpts};

pub fn execute(args: BuildArgs, global: &GlobalOpts) -> Result<()> {
    let luo = open_project(args, global)?;

    let exe = luo.link().map_err(|e| report_failure(e, global))?;
    eprintln!("      Linked {}", exe.display());

    Ok(())
}
