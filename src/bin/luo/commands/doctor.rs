//! `luo doctor` command

use anyhow::{bail, Result};

use luo::ops::{doctor, format_report};
use luo::util::config::load_config;
use luo::util::diagnostic::emit;

use crate::cli::GlobalOpts;

pub fn execute(global: &GlobalOpts) -> Result<()> {
    let config = load_config(&global.config)?;
    let report = doctor(&config);

    print!("{}", format_report(&report));

    let color = global.color_for(std::io::stderr());
    for diagnostic in report.checks.iter().filter_map(|c| c.to_diagnostic()) {
        emit(&diagnostic, color);
    }

    if !report.is_healthy() {
        bail!("one or more compilers are missing");
    }
    Ok(())
}
