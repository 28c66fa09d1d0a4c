//! Profile store port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A public business-card profile.
///
/// `id` is stable and equals the owning user's id; `username` is mutable,
/// which is why renames leave [`super::UsernameRedirect`] records behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Stable profile id (the owner's user id).
    pub id: String,
    /// Username used in the public URL, unset until the owner picks one.
    pub username: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Company or organization.
    pub company: Option<String>,
    /// Free-form bio.
    pub about: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Personal website.
    pub website: Option<String>,
    /// Public URL of the avatar image.
    pub profile_image_url: Option<String>,
    /// Public URL of the banner image.
    pub banner_image_url: Option<String>,
    /// Theme name, see [`crate::services::theme::Theme`].
    pub theme: Option<String>,
    /// When the profile was first saved.
    pub created_at: Option<DateTime<Utc>>,
    /// When the profile was last saved.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A partial update of a profile. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileChanges {
    /// New username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// New bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// New phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// New avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// New banner URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
    /// New theme name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Set by the service layer on every save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileChanges {
    /// Applies these changes onto `profile` in place.
    pub fn apply_to(&self, profile: &mut Profile) {
        fn set(target: &mut Option<String>, value: Option<&String>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }

        set(&mut profile.username, self.username.as_ref());
        set(&mut profile.full_name, self.full_name.as_ref());
        set(&mut profile.company, self.company.as_ref());
        set(&mut profile.about, self.about.as_ref());
        set(&mut profile.phone, self.phone.as_ref());
        set(&mut profile.email, self.email.as_ref());
        set(&mut profile.website, self.website.as_ref());
        set(&mut profile.profile_image_url, self.profile_image_url.as_ref());
        set(&mut profile.banner_image_url, self.banner_image_url.as_ref());
        set(&mut profile.theme, self.theme.as_ref());
        if let Some(updated_at) = self.updated_at {
            profile.updated_at = Some(updated_at);
        }
    }
}

/// Reads and writes profiles.
pub trait ProfileStore: Send + Sync {
    /// Finds the profile currently holding `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn find_by_username(&self, username: &str) -> PortFuture<'_, Option<Profile>>;

    /// Finds a profile by its stable id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn find_by_id(&self, id: &str) -> PortFuture<'_, Option<Profile>>;

    /// Inserts a new profile and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or username is already taken or the
    /// write fails.
    fn insert(&self, profile: &Profile) -> PortFuture<'_, Profile>;

    /// Applies `changes` to the profile with `id` and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist, the new username is
    /// taken, or the write fails.
    fn update(&self, id: &str, changes: &ProfileChanges) -> PortFuture<'_, Profile>;
}
