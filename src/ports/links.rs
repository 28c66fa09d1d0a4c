//! Link store port for the social links shown on a profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A social link attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Unique link id.
    pub id: String,
    /// Id of the owning profile.
    pub user_id: String,
    /// Platform label (e.g. "github", "linkedin").
    pub platform: String,
    /// Target URL.
    pub url: String,
    /// Position on the public page, ascending.
    #[serde(default)]
    pub order_index: i32,
    /// When the link was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A partial update of a social link. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChanges {
    /// New platform label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// New target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl LinkChanges {
    /// Applies these changes onto `link` in place.
    pub fn apply_to(&self, link: &mut SocialLink) {
        if let Some(platform) = &self.platform {
            link.platform.clone_from(platform);
        }
        if let Some(url) = &self.url {
            link.url.clone_from(url);
        }
        if let Some(order_index) = self.order_index {
            link.order_index = order_index;
        }
    }
}

/// Reads and writes social links.
pub trait LinkStore: Send + Sync {
    /// Lists the links owned by `user_id`, ordered by `order_index` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn list_for_owner(&self, user_id: &str) -> PortFuture<'_, Vec<SocialLink>>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn find(&self, id: &str) -> PortFuture<'_, Option<SocialLink>>;

    /// Inserts a link and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&self, link: &SocialLink) -> PortFuture<'_, SocialLink>;

    /// Applies `changes` to the link with `id` and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the link does not exist or the write fails.
    fn update(&self, id: &str, changes: &LinkChanges) -> PortFuture<'_, SocialLink>;

    /// Deletes the link with `id`. Deleting a missing link is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, id: &str) -> PortFuture<'_, ()>;
}
