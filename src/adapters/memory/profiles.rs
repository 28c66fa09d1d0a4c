//! In-memory profile store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::lock;
use crate::ports::{PortError, PortFuture, Profile, ProfileChanges, ProfileStore};

/// Profiles keyed by id, with the same uniqueness rules as the hosted table:
/// unique `id` and unique non-null `username`.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, Profile>>,
}

impl MemoryProfileStore {
    /// Creates a store holding `profiles`.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.id.clone(), p)).collect::<HashMap<_, _>>();
        Self { profiles: Mutex::new(profiles) }
    }
}

fn username_taken(profiles: &HashMap<String, Profile>, username: Option<&str>, id: &str) -> bool {
    username.is_some_and(|name| {
        profiles.values().any(|p| p.id != id && p.username.as_deref() == Some(name))
    })
}

impl ProfileStore for MemoryProfileStore {
    fn find_by_username(&self, username: &str) -> PortFuture<'_, Option<Profile>> {
        let result = lock(&self.profiles, "fetch profile").map(|profiles| {
            profiles.values().find(|p| p.username.as_deref() == Some(username)).cloned()
        });
        Box::pin(async move { result })
    }

    fn find_by_id(&self, id: &str) -> PortFuture<'_, Option<Profile>> {
        let result = lock(&self.profiles, "fetch profile").map(|profiles| profiles.get(id).cloned());
        Box::pin(async move { result })
    }

    fn insert(&self, profile: &Profile) -> PortFuture<'_, Profile> {
        let result = lock(&self.profiles, "insert profile").and_then(|mut profiles| {
            if profiles.contains_key(&profile.id) {
                return Err(PortError::from(format!("profile {} already exists", profile.id)));
            }
            if username_taken(&profiles, profile.username.as_deref(), &profile.id) {
                return Err("duplicate key value violates unique constraint on username".into());
            }
            profiles.insert(profile.id.clone(), profile.clone());
            Ok(profile.clone())
        });
        Box::pin(async move { result })
    }

    fn update(&self, id: &str, changes: &ProfileChanges) -> PortFuture<'_, Profile> {
        let result = lock(&self.profiles, "update profile").and_then(|mut profiles| {
            if username_taken(&profiles, changes.username.as_deref(), id) {
                return Err("duplicate key value violates unique constraint on username".into());
            }
            let profile = profiles
                .get_mut(id)
                .ok_or_else(|| PortError::from(format!("profile {id} not found")))?;
            changes.apply_to(profile);
            Ok(profile.clone())
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, username: &str) -> Profile {
        Profile { id: id.into(), username: Some(username.into()), ..Profile::default() }
    }

    #[tokio::test]
    async fn finds_by_username_and_id() {
        let store = MemoryProfileStore::with_profiles([profile("u1", "alice")]);

        assert_eq!(store.find_by_username("alice").await.unwrap().unwrap().id, "u1");
        assert!(store.find_by_id("u1").await.unwrap().is_some());
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_usernames() {
        let store = MemoryProfileStore::with_profiles([profile("u1", "alice")]);

        assert!(store.insert(&profile("u2", "alice")).await.is_err());

        store.insert(&profile("u2", "bob")).await.unwrap();
        let steal = ProfileChanges { username: Some("alice".into()), ..ProfileChanges::default() };
        assert!(store.update("u2", &steal).await.is_err());
    }

    #[tokio::test]
    async fn update_of_missing_profile_fails() {
        let store = MemoryProfileStore::default();
        assert!(store.update("ghost", &ProfileChanges::default()).await.is_err());
    }
}
