//! State shared by the request handlers.

use crate::config::Config;
use crate::context::ServiceContext;

/// Shared state handed to every request handler.
pub struct AppState {
    /// Backend ports.
    pub ctx: ServiceContext,
    /// Server settings.
    pub config: Config,
}

impl AppState {
    /// Bundles a context and its settings.
    #[must_use]
    pub fn new(ctx: ServiceContext, config: Config) -> Self {
        Self { ctx, config }
    }
}
