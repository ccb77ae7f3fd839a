//! CLI for inspecting `Sec-Session-Registration` headers.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dbsc_core::config;
use std::path::PathBuf;

use commands::{run_config, run_inspect, run_parse};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dbsc")]
#[command(about = "Parse and validate device-bound session registration headers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate header values against a request URL.
    Parse {
        /// URL of the request that produced the response.
        #[arg(long)]
        url: String,

        /// A Sec-Session-Registration field value (repeatable).
        #[arg(long = "header", value_name = "VALUE")]
        headers: Vec<String>,

        /// File with raw response header lines (e.g. `curl -D` output).
        #[arg(long, value_name = "PATH")]
        headers_file: Option<PathBuf>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Fetch a URL and validate the registration headers in its response.
    Inspect {
        /// HTTP/HTTPS URL to fetch.
        url: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where it lives.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Parse {
                url,
                headers,
                headers_file,
                json,
            } => run_parse(&cfg, &url, &headers, headers_file.as_deref(), json)?,
            CliCommand::Inspect { url, json } => run_inspect(&cfg, &url, json).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
