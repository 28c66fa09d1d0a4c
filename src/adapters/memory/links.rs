//! In-memory link store.

use std::sync::Mutex;

use super::lock;
use crate::ports::{LinkChanges, LinkStore, PortError, PortFuture, SocialLink};

/// Social links in insertion order.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: Mutex<Vec<SocialLink>>,
}

impl MemoryLinkStore {
    /// Creates a store holding `links`.
    #[must_use]
    pub fn with_links(links: impl IntoIterator<Item = SocialLink>) -> Self {
        Self { links: Mutex::new(links.into_iter().collect()) }
    }
}

impl LinkStore for MemoryLinkStore {
    fn list_for_owner(&self, user_id: &str) -> PortFuture<'_, Vec<SocialLink>> {
        let result = lock(&self.links, "list social links").map(|links| {
            let mut owned: Vec<SocialLink> =
                links.iter().filter(|l| l.user_id == user_id).cloned().collect();
            owned.sort_by_key(|l| l.order_index);
            owned
        });
        Box::pin(async move { result })
    }

    fn find(&self, id: &str) -> PortFuture<'_, Option<SocialLink>> {
        let result = lock(&self.links, "fetch social link")
            .map(|links| links.iter().find(|l| l.id == id).cloned());
        Box::pin(async move { result })
    }

    fn insert(&self, link: &SocialLink) -> PortFuture<'_, SocialLink> {
        let result = lock(&self.links, "insert social link").and_then(|mut links| {
            if links.iter().any(|l| l.id == link.id) {
                return Err(PortError::from(format!("social link {} already exists", link.id)));
            }
            links.push(link.clone());
            Ok(link.clone())
        });
        Box::pin(async move { result })
    }

    fn update(&self, id: &str, changes: &LinkChanges) -> PortFuture<'_, SocialLink> {
        let result = lock(&self.links, "update social link").and_then(|mut links| {
            let link = links
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| PortError::from(format!("social link {id} not found")))?;
            changes.apply_to(link);
            Ok(link.clone())
        });
        Box::pin(async move { result })
    }

    fn delete(&self, id: &str) -> PortFuture<'_, ()> {
        let result = lock(&self.links, "delete social link").map(|mut links| {
            links.retain(|l| l.id != id);
        });
        Box::pin(async move { result })
    }
}
