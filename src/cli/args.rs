//! Command line argument parsing for the estoc CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::Result;

/// estoc - seed fixtures and run query cases against a search cluster
#[derive(Parser, Debug, Clone)]
#[command(name = "estoc")]
#[command(about = "Seed fixture collections and run query cases against a search cluster")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct EstocArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Client configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Cluster URL
    #[arg(long, env = "ESTOC_URL", global = true)]
    pub url: Option<String>,

    /// Username for basic authentication
    #[arg(long, env = "ESTOC_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "ESTOC_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl EstocArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the client configuration: defaults, then the config file, then flags.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let base = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let config = base.merge(
            self.url.clone(),
            self.username.clone(),
            self.password.clone(),
            self.timeout,
        );
        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check that the cluster is reachable
    Ping,

    /// Seed the fixture collections; exits non-zero if any step failed
    Load(LoadArgs),

    /// Delete the fixture collections; exits non-zero if any step failed
    Teardown(TeardownArgs),

    /// List the query cases
    Cases,

    /// Run query cases
    Run(RunArgs),

    /// Run an ad-hoc search
    Search(SearchArgs),
}

/// Arguments for seeding fixtures
///
/// Every step is attempted even after a failure. The command exits
/// non-zero when any step failed.
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// Collections to seed (default: all)
    #[arg(value_name = "COLLECTION")]
    pub collections: Vec<String>,

    /// Delete existing collections first
    #[arg(long)]
    pub recreate: bool,

    /// Don't refresh collections after seeding
    #[arg(long)]
    pub no_refresh: bool,
}

/// Arguments for deleting fixtures
///
/// A collection that does not exist is skipped. The command exits non-zero
/// when any other delete failed.
#[derive(Parser, Debug, Clone)]
pub struct TeardownArgs {
    /// Collections to delete (default: all)
    #[arg(value_name = "COLLECTION")]
    pub collections: Vec<String>,
}

/// Arguments for running cases
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Case ids to run (default: all)
    #[arg(value_name = "CASE_ID")]
    pub cases: Vec<String>,
}

/// Arguments for an ad-hoc search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Collection to search
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Query DSL object (JSON); defaults to match_all
    #[arg(long, value_name = "JSON")]
    pub query: Option<String>,

    /// Offset for pagination
    #[arg(long)]
    pub from: Option<usize>,

    /// Maximum number of results to return
    #[arg(long)]
    pub size: Option<usize>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
