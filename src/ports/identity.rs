//! Identity provider port: maps a session token to the signed-in user.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// The user behind a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user id; also the id of the user's profile.
    pub id: String,
    /// Email address on the account, if any.
    #[serde(default)]
    pub email: Option<String>,
}

/// Verifies access tokens issued by the external identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Returns the user the token belongs to, or `None` if the token is
    /// invalid or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached.
    fn user_for_token(&self, token: &str) -> PortFuture<'_, Option<AuthUser>>;
}
