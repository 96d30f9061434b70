// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warden - a workload identity agent.
//!
//! This is the binary entry point for the Warden agent.

mod check;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Warden - a workload identity agent.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to the standard lookup paths.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the plugin catalog and run until interrupted.
    Run,
    /// Validate the configuration and show which plugins would be loaded.
    Check,
    /// List the built-in plugins.
    Plugins,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match warden_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            warden_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::run(config).await,
        Commands::Check => check::check(&config),
        Commands::Plugins => check::list_plugins(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
