// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baitban - bans whoever posts in a bait channel.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod serve;

use clap::{Parser, Subcommand};

/// Baitban - bans whoever posts in a bait channel.
#[derive(Parser, Debug)]
#[command(name = "baitban", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to Discord and watch the bait channel (default).
    Serve,
    /// Validate configuration and print the effective settings.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match baitban_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            baitban_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Check => {
            if let Err(e) = check::run_check(&config) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
