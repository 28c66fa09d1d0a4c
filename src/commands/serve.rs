//! `taptag serve` command.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::server::{start_server, AppState};

/// Execute the `serve` command.
///
/// # Errors
///
/// Returns an error string if the server cannot bind or fails while running.
pub async fn run(ctx: ServiceContext, config: Config) -> Result<(), String> {
    tracing::info!("Public pages link back to {}", config.app_url);
    start_server(AppState::new(ctx, config)).await
}
