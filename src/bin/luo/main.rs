//! luo CLI - parallel C/C++ builds from a source tree

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use luo::util::diagnostic::emit;
use luo::BuildError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = cli.global().color_for(std::io::stderr());

    if let Err(e) = run(cli) {
        match e.downcast_ref::<BuildError>() {
            Some(build_err) => emit(&build_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("luo=debug")
    } else {
        EnvFilter::new("luo=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global = cli.global();
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &global),
        Commands::Compile(args) => commands::compile::execute(args, &global),
        Commands::Link(args) => commands::link::execute(args, &global),
        Commands::Explain(args) => commands::explain::execute(args, &global),
        Commands::Doctor => commands::doctor::execute(&global),
    }
}
