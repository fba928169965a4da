//! `luo explain` command

use std::io::Read;

use anyhow::{Context, Result};

use luo::{format_errors, parse_errors};

use crate::cli::{ExplainArgs, GlobalOpts};

pub fn execute(args: ExplainArgs, global: &GlobalOpts) -> Result<()> {
    let stderr = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parse_errors(&stderr))?);
    } else {
        let formatted = format_errors(&stderr, global.color_for(std::io::stdout()));
        if !formatted.is_empty() {
            println!("{}", formatted);
        }
    }

    Ok(())
}
