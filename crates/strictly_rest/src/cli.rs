//! Command-line interface for strictly_rest.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly REST - tic-tac-toe against a random opponent over HTTP
#[derive(Parser, Debug)]
#[command(name = "strictly_rest")]
#[command(about = "Tic-tac-toe REST server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Public base URL used in Location headers (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Configuration sources
        #[command(flatten)]
        config: ConfigArgs,

        /// Seed for reproducible responder moves
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration sources
        #[command(flatten)]
        config: ConfigArgs,
    },
}
