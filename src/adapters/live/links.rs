//! `social_links` table adapter.

use reqwest::Method;

use super::{eq, fetch_optional, fetch_written, send, send_json, SupabaseClient};
use crate::ports::{LinkChanges, LinkStore, PortFuture, SocialLink};

const TABLE: &str = "social_links";

/// Link store backed by the `social_links` table.
pub struct LiveLinkStore {
    client: SupabaseClient,
}

impl LiveLinkStore {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl LinkStore for LiveLinkStore {
    fn list_for_owner(&self, user_id: &str) -> PortFuture<'_, Vec<SocialLink>> {
        let request = self.client.rest(Method::GET, TABLE).query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "order_index.asc".to_string()),
        ]);
        Box::pin(async move { send_json(request, "list social links").await })
    }

    fn find(&self, id: &str) -> PortFuture<'_, Option<SocialLink>> {
        let request = self
            .client
            .rest(Method::GET, TABLE)
            .query(&[("select", "*".to_string()), ("id", eq(id))]);
        Box::pin(async move { fetch_optional(request, "fetch social link").await })
    }

    fn insert(&self, link: &SocialLink) -> PortFuture<'_, SocialLink> {
        let request = self.client.rest(Method::POST, TABLE).json(link);
        Box::pin(async move { fetch_written(request, "insert social link").await })
    }

    fn update(&self, id: &str, changes: &LinkChanges) -> PortFuture<'_, SocialLink> {
        let request =
            self.client.rest(Method::PATCH, TABLE).query(&[("id", eq(id))]).json(changes);
        Box::pin(async move { fetch_written(request, "update social link").await })
    }

    fn delete(&self, id: &str) -> PortFuture<'_, ()> {
        let request = self.client.rest(Method::DELETE, TABLE).query(&[("id", eq(id))]);
        Box::pin(async move {
            send(request, "delete social link").await?;
            Ok(())
        })
    }
}
