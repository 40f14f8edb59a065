//! CLI command definitions for the `chatpy` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the university help-desk bot from your terminal.
#[derive(Parser)]
#[command(name = "chatpy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed log output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Base URL of the chat backend (overrides config.toml).
        #[arg(long, env = "CHATPY_BASE_URL")]
        base_url: Option<String>,

        /// Path to a config file (default: ~/.chatpy/config.toml).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Request timeout in seconds (overrides config.toml).
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
