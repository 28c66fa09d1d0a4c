//! In-memory object storage.

use std::collections::HashMap;
use std::sync::Mutex;

use super::lock;
use crate::ports::{Bucket, ObjectStorage, PortFuture};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object contents.
    pub bytes: Vec<u8>,
    /// MIME type given at upload.
    pub content_type: String,
}

/// Objects keyed by `bucket/path`, served from `memory://`.
#[derive(Default)]
pub struct MemoryObjectStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
}

fn key(bucket: Bucket, path: &str) -> String {
    format!("{bucket}/{path}")
}

impl MemoryObjectStorage {
    /// Returns a copy of the object at `path`, if present.
    #[must_use]
    pub fn object(&self, bucket: Bucket, path: &str) -> Option<StoredObject> {
        self.objects.lock().ok().and_then(|objects| objects.get(&key(bucket, path)).cloned())
    }
}

impl ObjectStorage for MemoryObjectStorage {
    fn remove(&self, bucket: Bucket, path: &str) -> PortFuture<'_, ()> {
        let result = lock(&self.objects, "remove object").map(|mut objects| {
            objects.remove(&key(bucket, path));
        });
        Box::pin(async move { result })
    }

    fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> PortFuture<'_, ()> {
        let object = StoredObject { bytes, content_type: content_type.to_string() };
        let result = lock(&self.objects, "upload object").map(|mut objects| {
            objects.insert(key(bucket, path), object);
        });
        Box::pin(async move { result })
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("memory://{}", key(bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_replaces_and_remove_deletes() {
        let storage = MemoryObjectStorage::default();
        storage.upload(Bucket::Banners, "u1.png", vec![1], "image/png").await.unwrap();
        storage.upload(Bucket::Banners, "u1.png", vec![2, 3], "image/png").await.unwrap();

        let stored = storage.object(Bucket::Banners, "u1.png").unwrap();
        assert_eq!(stored.bytes, vec![2, 3]);
        assert!(storage.object(Bucket::ProfileImages, "u1.png").is_none());

        storage.remove(Bucket::Banners, "u1.png").await.unwrap();
        assert!(storage.object(Bucket::Banners, "u1.png").is_none());
        assert_eq!(storage.public_url(Bucket::Banners, "u1.png"), "memory://banners/u1.png");
    }
}
