//! nativegen CLI - Zig bindings for native function databases

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nativegen::core::DatabaseError;
use nativegen::util::config::ConfigError;
use nativegen::util::diagnostic::{emit, Diagnostic};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging. stdout is reserved for generated code.
    let filter = if cli.verbose {
        EnvFilter::new("nativegen=debug")
    } else {
        EnvFilter::new("nativegen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, color),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(e: anyhow::Error, color: bool) {
    // Database errors carry source spans; let miette render them.
    let e = match e.downcast::<DatabaseError>() {
        Ok(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            return;
        }
        Err(e) => e,
    };

    match e.downcast_ref::<ConfigError>() {
        Some(err) => emit(&Diagnostic::invalid_config(err), color),
        None => eprintln!("error: {:#}", e),
    }
}
