//! Redirect store port for username rename records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A record mapping a historical username to the one that replaced it.
///
/// Keyed by `old_username`: writing a second record for the same old name
/// overwrites the first. Records are never deleted, so `new_username` may
/// itself be the `old_username` of a later rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameRedirect {
    /// The username that used to point at the profile.
    pub old_username: String,
    /// The username the profile was renamed to.
    pub new_username: String,
    /// Stable id of the profile that was renamed.
    pub owner_id: String,
    /// When the rename happened.
    pub created_at: DateTime<Utc>,
}

/// Reads and writes username redirect records.
pub trait RedirectStore: Send + Sync {
    /// Looks up the redirect whose `old_username` equals `old_username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn lookup(&self, old_username: &str) -> PortFuture<'_, Option<UsernameRedirect>>;

    /// Inserts a redirect, replacing any existing record with the same
    /// `old_username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn upsert(&self, redirect: &UsernameRedirect) -> PortFuture<'_, ()>;
}
