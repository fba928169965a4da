//! CLI definitions using clap.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use luo::util::config::CONFIG_FILE;

/// luo - a minimal parallel build orchestrator for C/C++
#[derive(Parser)]
#[command(name = "luo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every command.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            config: self.config.clone(),
            color: !self.no_color,
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub config: PathBuf,
    pub color: bool,
}

impl GlobalOpts {
    /// Whether output written to `stream` should be colored.
    ///
    /// `colored` is pinned to the answer, since on its own it only looks at stdout.
    pub fn color_for(&self, stream: impl IsTerminal) -> bool {
        let color = self.color && stream.is_terminal();
        colored::control::set_override(color);
        color
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile every source file, then link the executable
    Build(BuildArgs),

    /// Compile every source file into the build cache
    Compile(BuildArgs),

    /// Link the objects in the build cache into the executable
    Link(BuildArgs),

    /// Format saved compiler output as diagnostics
    Explain(ExplainArgs),

    /// Check that the configured compilers are installed
    Doctor,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Additional library to link (repeatable)
    #[arg(short = 'l', long = "lib")]
    pub libs: Vec<String>,
}

#[derive(Args)]
pub struct ExplainArgs {
    /// File holding compiler stderr (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Print parsed diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}
