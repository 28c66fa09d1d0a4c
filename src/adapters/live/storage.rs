//! Object storage adapter for the backend's storage API.

use reqwest::Method;
use serde_json::json;

use super::{send, SupabaseClient};
use crate::ports::{Bucket, ObjectStorage, PortFuture};

/// Object storage backed by `/storage/v1`.
pub struct LiveObjectStorage {
    client: SupabaseClient,
}

impl LiveObjectStorage {
    /// Creates the adapter.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl ObjectStorage for LiveObjectStorage {
    fn remove(&self, bucket: Bucket, path: &str) -> PortFuture<'_, ()> {
        let request = self
            .client
            .storage(Method::DELETE, &format!("object/{bucket}"))
            .json(&json!({ "prefixes": [path] }));
        Box::pin(async move {
            send(request, "remove object").await?;
            Ok(())
        })
    }

    fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> PortFuture<'_, ()> {
        let request = self
            .client
            .storage(Method::POST, &format!("object/{bucket}/{path}"))
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        Box::pin(async move {
            send(request, "upload object").await?;
            Ok(())
        })
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.client.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn public_url_points_at_public_object_route() {
        let client = SupabaseClient::new(&BackendConfig {
            url: "https://project.supabase.co".into(),
            anon_key: "anon".into(),
            service_role_key: None,
        });
        let storage = LiveObjectStorage::new(client);

        assert_eq!(
            storage.public_url(Bucket::Banners, "u1.png"),
            "https://project.supabase.co/storage/v1/object/public/banners/u1.png"
        );
    }
}
