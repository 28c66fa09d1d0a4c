//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `taptag`.
#[derive(Debug, Parser)]
#[command(name = "taptag", version, about = "Digital business card server")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where profile data comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct BackendArgs {
    /// Serve from in-memory stores loaded from this YAML fixture instead of
    /// the hosted backend.
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Data source.
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Show which username a public address currently points at.
    Resolve {
        /// Username from the address.
        username: String,
        /// Data source.
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Print the contact card of a profile.
    Vcf {
        /// Username from the address.
        username: String,
        /// Data source.
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// List the social links of a profile.
    Links {
        /// Username from the address.
        username: String,
        /// Data source.
        #[command(flatten)]
        backend: BackendArgs,
    },
}

impl Command {
    /// The data source selected for this command.
    #[must_use]
    pub fn backend(&self) -> &BackendArgs {
        match self {
            Self::Serve { backend }
            | Self::Resolve { backend, .. }
            | Self::Vcf { backend, .. }
            | Self::Links { backend, .. } => backend,
        }
    }
}
