//! CLI command definitions for the `humboldt` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod check;
pub mod topics;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};

use humboldt_infra::config::SETTINGS_FILE;
use humboldt_types::topic::TopicBucket;

/// Humboldt Helper: find research documents, funding opportunities and
/// campus resources from the command line.
#[derive(Parser)]
#[command(name = "humboldt", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (generation parameters, timeout, retry, citations).
    #[arg(long, global = true, env = "HUMBOLDT_CONFIG", default_value = SETTINGS_FILE)]
    pub config: PathBuf,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question and print the answer with its references.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Knowledge base to ask instead of keyword routing
        /// (research, meeting-minutes, peoplesoft).
        #[arg(long, short)]
        topic: Option<TopicBucket>,
    },

    /// Start an interactive chat session.
    Chat {
        /// Pin every question to one knowledge base.
        #[arg(long, short)]
        topic: Option<TopicBucket>,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// List topics with their routing keywords.
    Topics,

    /// Validate environment configuration and settings.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Spinner shown while waiting on the knowledge base.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("searching the knowledge base...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
