//! `analytics` table adapter.

use reqwest::Method;

use super::{eq, send, send_json, SupabaseClient};
use crate::ports::{AnalyticsEvent, AnalyticsLog, PortFuture};

const TABLE: &str = "analytics";

/// Analytics log backed by the `analytics` table.
pub struct LiveAnalyticsLog {
    client: SupabaseClient,
}

impl LiveAnalyticsLog {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl AnalyticsLog for LiveAnalyticsLog {
    fn record(&self, event: &AnalyticsEvent) -> PortFuture<'_, ()> {
        let request = self.client.rest(Method::POST, TABLE).json(event);
        Box::pin(async move {
            send(request, "record analytics event").await?;
            Ok(())
        })
    }

    fn recent(&self, profile_id: &str, limit: usize) -> PortFuture<'_, Vec<AnalyticsEvent>> {
        let request = self.client.rest(Method::GET, TABLE).query(&[
            ("select", "*".to_string()),
            ("profile_id", eq(profile_id)),
            ("order", "timestamp.desc".to_string()),
            ("limit", limit.to_string()),
        ]);
        Box::pin(async move { send_json(request, "list analytics events").await })
    }
}
