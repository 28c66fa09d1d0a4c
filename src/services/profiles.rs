//! Profile reads for the public page and dashboard, and profile saves.

use serde::Serialize;
use tracing::{info, warn};

use super::links::links_for_profile;
use super::theme::{Palette, Theme};
use super::username::validate_username;
use crate::context::ServiceContext;
use crate::error::AppError;
use crate::ports::{AuthUser, Profile, ProfileChanges, SocialLink, UsernameRedirect};
use crate::resolver::resolve;

/// Everything the public page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicPage {
    /// The profile.
    pub profile: Profile,
    /// Its social links, in display order.
    pub links: Vec<SocialLink>,
    /// Theme name after falling back to the default.
    pub theme: Theme,
    /// Colors for `theme`.
    pub palette: Palette,
}

/// Result of looking up a public page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    /// The address is current.
    Found(PublicPage),
    /// The address was renamed; visitors belong at `/{0}`.
    Moved(String),
}

/// Loads the public page for `requested`, following username redirects.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no profile holds the resolved
/// username, or [`AppError::Backend`] when the profile lookup fails.
pub async fn load_public_page(
    ctx: &ServiceContext,
    requested: &str,
) -> Result<PageLookup, AppError> {
    let resolution = resolve(ctx.redirects.as_ref(), requested).await;
    if resolution.changed {
        info!(from = requested, to = %resolution.resolved_username, "Redirecting renamed profile");
        return Ok(PageLookup::Moved(resolution.resolved_username));
    }

    let profile = lookup_profile(ctx, &resolution.resolved_username).await?;
    let links = links_for_profile(ctx, &profile.id).await;
    let theme = Theme::from_stored(profile.theme.as_deref());

    Ok(PageLookup::Found(PublicPage { profile, links, theme, palette: theme.palette() }))
}

/// Resolves `requested` and returns the profile currently behind it.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no profile holds the resolved
/// username, or [`AppError::Backend`] when the lookup fails.
pub async fn find_profile(ctx: &ServiceContext, requested: &str) -> Result<Profile, AppError> {
    let resolution = resolve(ctx.redirects.as_ref(), requested).await;
    lookup_profile(ctx, &resolution.resolved_username).await
}

/// Returns the signed-in user's own profile, if they have saved one.
///
/// # Errors
///
/// Returns [`AppError::Backend`] when the lookup fails.
pub async fn profile_for_user(
    ctx: &ServiceContext,
    user: &AuthUser,
) -> Result<Option<Profile>, AppError> {
    Ok(ctx.profiles.find_by_id(&user.id).await?)
}

/// Creates or updates the profile `id` on behalf of `user`.
///
/// A blank `username` leaves the current one in place. Renaming a profile
/// records an `old -> new` redirect so existing links keep working.
///
/// # Errors
///
/// - [`AppError::Forbidden`] when `user` does not own `id`.
/// - [`AppError::BadRequest`] for an invalid username or theme.
/// - [`AppError::Conflict`] when another profile holds the username or
///   renamed away from it.
/// - [`AppError::Backend`] when a read or write fails.
pub async fn save_profile(
    ctx: &ServiceContext,
    user: &AuthUser,
    id: &str,
    mut changes: ProfileChanges,
) -> Result<Profile, AppError> {
    if user.id != id {
        return Err(AppError::Forbidden);
    }

    if changes.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
        changes.username = None;
    }
    if let Some(username) = &changes.username {
        validate_username(username).map_err(AppError::BadRequest)?;
    }
    if let Some(theme) = &changes.theme {
        theme.parse::<Theme>().map_err(AppError::BadRequest)?;
    }

    if let Some(username) = &changes.username {
        if let Some(holder) = ctx.profiles.find_by_username(username).await? {
            if holder.id != id {
                return Err(AppError::Conflict("Username already taken".to_string()));
            }
        }
        // A redirect source still belongs to whoever renamed away from it.
        if let Some(redirect) = ctx.redirects.lookup(username).await? {
            if redirect.owner_id != id {
                return Err(AppError::Conflict("Username already taken".to_string()));
            }
        }
    }

    let now = ctx.clock.now();
    changes.updated_at = Some(now);

    let Some(existing) = ctx.profiles.find_by_id(id).await? else {
        let mut profile = Profile { id: id.to_string(), created_at: Some(now), ..Profile::default() };
        changes.apply_to(&mut profile);
        let created = ctx.profiles.insert(&profile).await?;
        info!(profile_id = id, "Created profile");
        return Ok(created);
    };

    let updated = ctx.profiles.update(id, &changes).await?;

    if let (Some(old), Some(new)) = (existing.username.as_deref(), updated.username.as_deref()) {
        if !old.is_empty() && old != new {
            let redirect = UsernameRedirect {
                old_username: old.to_string(),
                new_username: new.to_string(),
                owner_id: id.to_string(),
                created_at: now,
            };
            match ctx.redirects.upsert(&redirect).await {
                Ok(()) => info!("Recorded username redirect {old} -> {new}"),
                Err(e) => warn!("Failed to record username redirect {old} -> {new}: {e}"),
            }
        }
    }

    Ok(updated)
}

async fn lookup_profile(ctx: &ServiceContext, username: &str) -> Result<Profile, AppError> {
    ctx.profiles
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::{
        FixedClock, MemoryLinkStore, MemoryProfileStore, MemoryRedirectStore,
    };
    use crate::ports::{PortFuture, RedirectStore};

    fn user(id: &str) -> AuthUser {
        AuthUser { id: id.into(), email: None }
    }

    fn profile(id: &str, username: &str) -> Profile {
        Profile { id: id.into(), username: Some(username.into()), ..Profile::default() }
    }

    fn rename(username: &str) -> ProfileChanges {
        ProfileChanges { username: Some(username.into()), ..ProfileChanges::default() }
    }

    fn context_with(profiles: Vec<Profile>) -> ServiceContext {
        let mut ctx = ServiceContext::in_memory();
        ctx.profiles = Box::new(MemoryProfileStore::with_profiles(profiles));
        ctx
    }

    struct BrokenRedirects;

    impl RedirectStore for BrokenRedirects {
        fn lookup(&self, _old_username: &str) -> PortFuture<'_, Option<UsernameRedirect>> {
            Box::pin(async { Ok(None) })
        }

        fn upsert(&self, _redirect: &UsernameRedirect) -> PortFuture<'_, ()> {
            Box::pin(async { Err("table is read-only".into()) })
        }
    }

    #[tokio::test]
    async fn public_page_includes_links_and_theme() {
        let mut ctx = context_with(vec![Profile {
            theme: Some("dark".into()),
            ..profile("u1", "alice")
        }]);
        ctx.links = Box::new(MemoryLinkStore::with_links(vec![SocialLink {
            id: "l1".into(),
            user_id: "u1".into(),
            platform: "github".into(),
            url: "https://github.com/alice".into(),
            order_index: 0,
            created_at: None,
        }]));

        let PageLookup::Found(page) = load_public_page(&ctx, "alice").await.unwrap() else {
            panic!("expected a page");
        };
        assert_eq!(page.profile.id, "u1");
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.theme, Theme::Dark);
        assert_eq!(page.palette, Theme::Dark.palette());
    }

    #[tokio::test]
    async fn renamed_address_is_reported_as_moved() {
        let mut ctx = context_with(vec![profile("u1", "alice")]);
        ctx.redirects = Box::new(MemoryRedirectStore::with_records(vec![UsernameRedirect {
            old_username: "alice-old".into(),
            new_username: "alice".into(),
            owner_id: "u1".into(),
            created_at: Utc::now(),
        }]));

        let lookup = load_public_page(&ctx, "alice-old").await.unwrap();
        assert_eq!(lookup, PageLookup::Moved("alice".into()));

        let found = find_profile(&ctx, "alice-old").await.unwrap();
        assert_eq!(found.id, "u1");
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let ctx = ServiceContext::in_memory();
        let err = load_public_page(&ctx, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn save_creates_missing_profile_with_timestamps() {
        let pinned = Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap();
        let mut ctx = ServiceContext::in_memory();
        ctx.clock = Box::new(FixedClock::new(pinned));

        let saved = save_profile(&ctx, &user("u1"), "u1", rename("alice")).await.unwrap();

        assert_eq!(saved.username.as_deref(), Some("alice"));
        assert_eq!(saved.created_at, Some(pinned));
        assert_eq!(saved.updated_at, Some(pinned));
        assert!(ctx.redirects.lookup("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rename_records_redirect() {
        let ctx = context_with(vec![profile("u1", "alice")]);

        let saved = save_profile(&ctx, &user("u1"), "u1", rename("alice2")).await.unwrap();
        assert_eq!(saved.username.as_deref(), Some("alice2"));

        let redirect = ctx.redirects.lookup("alice").await.unwrap().unwrap();
        assert_eq!(redirect.new_username, "alice2");
        assert_eq!(redirect.owner_id, "u1");
        assert_eq!(
            load_public_page(&ctx, "alice").await.unwrap(),
            PageLookup::Moved("alice2".into())
        );
    }

    #[tokio::test]
    async fn blank_username_keeps_current_one() {
        let ctx = context_with(vec![profile("u1", "alice")]);
        let changes = ProfileChanges {
            username: Some("  ".into()),
            about: Some("hello".into()),
            ..ProfileChanges::default()
        };

        let saved = save_profile(&ctx, &user("u1"), "u1", changes).await.unwrap();

        assert_eq!(saved.username.as_deref(), Some("alice"));
        assert_eq!(saved.about.as_deref(), Some("hello"));
        assert!(ctx.redirects.lookup("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_foreign_invalid_and_taken() {
        let ctx = context_with(vec![profile("u1", "alice"), profile("u2", "bob")]);

        let err = save_profile(&ctx, &user("u2"), "u1", rename("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = save_profile(&ctx, &user("u1"), "u1", rename("no spaces")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let theme = ProfileChanges { theme: Some("neon".into()), ..ProfileChanges::default() };
        let err = save_profile(&ctx, &user("u1"), "u1", theme).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = save_profile(&ctx, &user("u1"), "u1", rename("bob")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn retired_username_stays_reserved_for_its_owner() {
        let ctx = context_with(vec![profile("u1", "alice"), profile("u2", "bob")]);
        save_profile(&ctx, &user("u1"), "u1", rename("alice2")).await.unwrap();

        let err = save_profile(&ctx, &user("u2"), "u2", rename("alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            load_public_page(&ctx, "alice").await.unwrap(),
            PageLookup::Moved("alice2".into())
        );

        let reclaimed = save_profile(&ctx, &user("u1"), "u1", rename("alice")).await.unwrap();
        assert_eq!(reclaimed.username.as_deref(), Some("alice"));
        assert!(matches!(load_public_page(&ctx, "alice").await.unwrap(), PageLookup::Found(_)));
    }

    #[tokio::test]
    async fn failed_redirect_write_does_not_fail_the_save() {
        let mut ctx = context_with(vec![profile("u1", "alice")]);
        ctx.redirects = Box::new(BrokenRedirects);

        let saved = save_profile(&ctx, &user("u1"), "u1", rename("alice2")).await.unwrap();
        assert_eq!(saved.username.as_deref(), Some("alice2"));
    }

    #[tokio::test]
    async fn dashboard_profile_is_looked_up_by_id() {
        let ctx = context_with(vec![profile("u1", "alice")]);
        assert!(profile_for_user(&ctx, &user("u1")).await.unwrap().is_some());
        assert!(profile_for_user(&ctx, &user("u9")).await.unwrap().is_none());
    }
}
