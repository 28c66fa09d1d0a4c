//! `profiles` table adapter.

use reqwest::Method;

use super::{eq, fetch_optional, fetch_written, SupabaseClient};
use crate::ports::{PortFuture, Profile, ProfileChanges, ProfileStore};

const TABLE: &str = "profiles";

/// Profile store backed by the `profiles` table.
pub struct LiveProfileStore {
    client: SupabaseClient,
}

impl LiveProfileStore {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn find_by(&self, column: &str, value: &str) -> PortFuture<'_, Option<Profile>> {
        let request = self
            .client
            .rest(Method::GET, TABLE)
            .query(&[("select", "*".to_string()), (column, eq(value))])
            .query(&[("limit", "1")]);
        Box::pin(async move { fetch_optional(request, "fetch profile").await })
    }
}

impl ProfileStore for LiveProfileStore {
    fn find_by_username(&self, username: &str) -> PortFuture<'_, Option<Profile>> {
        self.find_by("username", username)
    }

    fn find_by_id(&self, id: &str) -> PortFuture<'_, Option<Profile>> {
        self.find_by("id", id)
    }

    fn insert(&self, profile: &Profile) -> PortFuture<'_, Profile> {
        let request = self.client.rest(Method::POST, TABLE).json(profile);
        Box::pin(async move { fetch_written(request, "insert profile").await })
    }

    fn update(&self, id: &str, changes: &ProfileChanges) -> PortFuture<'_, Profile> {
        let request =
            self.client.rest(Method::PATCH, TABLE).query(&[("id", eq(id))]).json(changes);
        Box::pin(async move { fetch_written(request, "update profile").await })
    }
}
