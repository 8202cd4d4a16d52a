//! ijava-install - IJava kernel installer
//!
//! Installs the Java kernel spec into a Jupyter kernel registry (per-user, active
//! Python environment, or explicit prefix) and patches the installed `kernel.json`
//! with its install location and kernel environment settings.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod error;
mod installer;
mod options;
mod registry;
mod ui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::install::run(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
