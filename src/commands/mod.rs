//! Command dispatch and handlers.

pub mod links;
pub mod resolve;
pub mod serve;
pub mod vcf;

use crate::adapters::memory::Seed;
use crate::cli::{BackendArgs, Command};
use crate::config::{BackendConfig, Config};
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// With `--seed <FILE>` every port is served from in-memory stores loaded
/// from the fixture; otherwise the hosted backend is configured from the
/// environment.
///
/// # Errors
///
/// Returns an error string if configuration is incomplete or the selected
/// command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = context_for(command.backend())?;

    match command {
        Command::Serve { .. } => serve::run(ctx, load_config()?).await,
        Command::Resolve { username, .. } => resolve::run(&ctx, username).await,
        Command::Vcf { username, .. } => vcf::run(&ctx, &load_config()?, username).await,
        Command::Links { username, .. } => links::run(&ctx, username).await,
    }
}

fn load_config() -> Result<Config, String> {
    Config::load().map_err(|e| e.to_string())
}

/// Builds the service context selected by `backend`.
///
/// # Errors
///
/// Returns an error string if the seed cannot be loaded or the backend
/// environment is incomplete.
pub fn context_for(backend: &BackendArgs) -> Result<ServiceContext, String> {
    match &backend.seed {
        Some(path) => {
            let seed = Seed::load(path)?;
            tracing::info!("Using in-memory stores seeded from {}", path.display());
            Ok(ServiceContext::seeded(seed))
        }
        None => {
            let backend = BackendConfig::load().map_err(|e| e.to_string())?;
            Ok(ServiceContext::live(&backend))
        }
    }
}
