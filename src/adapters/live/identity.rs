//! Identity adapter for the backend's auth API.

use reqwest::StatusCode;

use super::{ensure_success, read_json, SupabaseClient};
use crate::ports::{AuthUser, IdentityProvider, PortError, PortFuture};

const WHAT: &str = "verify token";

/// Verifies access tokens with `GET /auth/v1/user`.
pub struct LiveIdentityProvider {
    client: SupabaseClient,
}

impl LiveIdentityProvider {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl IdentityProvider for LiveIdentityProvider {
    fn user_for_token(&self, token: &str) -> PortFuture<'_, Option<AuthUser>> {
        let request = self.client.auth("user", token);
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| -> PortError { format!("{WHAT}: request failed: {e}").into() })?;

            // A rejected token is an answer, not a failure.
            if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                return Ok(None);
            }

            let response = ensure_success(response, WHAT).await?;
            read_json(response, WHAT).await.map(Some)
        })
    }
}
