//! Core library for `taptag`, a digital business card service.
//!
//! Users own a profile with a public page at `/{username}`. Usernames can
//! change, and every rename leaves a redirect behind so printed cards and
//! shared links keep working; [`resolver`] follows those redirects.
//!
//! Persistence, sign-in and file storage live in a hosted backend reached
//! through the traits in [`ports`]. [`context::ServiceContext`] bundles one
//! implementation of each, either the hosted backend or in-memory stores
//! loaded from a YAML seed.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod server;
pub mod services;

use clap::{error::ErrorKind, Parser};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command).await
}
