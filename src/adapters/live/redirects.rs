//! `username_redirects` table adapter.

use reqwest::Method;

use super::{eq, fetch_optional, send, SupabaseClient};
use crate::ports::{PortFuture, RedirectStore, UsernameRedirect};

const TABLE: &str = "username_redirects";

/// Redirect store backed by the `username_redirects` table.
pub struct LiveRedirectStore {
    client: SupabaseClient,
}

impl LiveRedirectStore {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl RedirectStore for LiveRedirectStore {
    fn lookup(&self, old_username: &str) -> PortFuture<'_, Option<UsernameRedirect>> {
        let request = self
            .client
            .rest(Method::GET, TABLE)
            .query(&[("select", "*".to_string()), ("old_username", eq(old_username))])
            .query(&[("limit", "1")]);
        Box::pin(async move { fetch_optional(request, "lookup redirect").await })
    }

    fn upsert(&self, redirect: &UsernameRedirect) -> PortFuture<'_, ()> {
        let request = self
            .client
            .rest(Method::POST, TABLE)
            .query(&[("on_conflict", "old_username")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(redirect);
        Box::pin(async move {
            send(request, "upsert redirect").await?;
            Ok(())
        })
    }
}
