//! YAML fixtures for running against in-memory stores.
//!
//! ```yaml
//! profiles:
//!   - id: u1
//!     username: alice
//!     full_name: Alice Example
//! links:
//!   - id: l1
//!     user_id: u1
//!     platform: github
//!     url: https://github.com/alice
//!     order_index: 0
//! redirects:
//!   - old_username: alice-old
//!     new_username: alice
//!     owner_id: u1
//!     created_at: 2025-01-01T00:00:00Z
//! sessions:
//!   - token: dev-token
//!     user_id: u1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::{AuthUser, Profile, SocialLink, UsernameRedirect};

/// An access token accepted by the in-memory identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSession {
    /// Bearer token value.
    pub token: String,
    /// User the token signs in as.
    pub user_id: String,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
}

impl SeedSession {
    /// The user this session authenticates.
    #[must_use]
    pub fn user(&self) -> AuthUser {
        AuthUser { id: self.user_id.clone(), email: self.email.clone() }
    }
}

/// Initial contents of the in-memory stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Social links.
    #[serde(default)]
    pub links: Vec<SocialLink>,
    /// Username redirects.
    #[serde(default)]
    pub redirects: Vec<UsernameRedirect>,
    /// Valid access tokens.
    #[serde(default)]
    pub sessions: Vec<SeedSession>,
}

impl Seed {
    /// Parses a seed from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid seed document.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("Failed to parse seed: {e}"))
    }

    /// Reads and parses a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read seed file {}: {e}", path.display()))?;
        Self::from_yaml(&text).map_err(|e| format!("{e} ({})", path.display()))
    }
}
