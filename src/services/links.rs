//! Social link listing and owner-only edits.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::ports::{AuthUser, LinkChanges, SocialLink};
use crate::resolver::resolve;

/// Payload for creating a link.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLink {
    /// Owning profile; must be the caller.
    pub user_id: String,
    /// Platform label.
    #[serde(default)]
    pub platform: String,
    /// Target URL.
    #[serde(default)]
    pub url: String,
    /// Position on the page.
    #[serde(default)]
    pub order_index: i32,
}

/// Links of `profile_id` in display order.
///
/// The public page still renders when links cannot be read, so a store
/// failure yields an empty list. Rows owned by another profile are dropped.
pub async fn links_for_profile(ctx: &ServiceContext, profile_id: &str) -> Vec<SocialLink> {
    let links = match ctx.links.list_for_owner(profile_id).await {
        Ok(links) => links,
        Err(e) => {
            warn!("Failed to load links for profile {profile_id}: {e}");
            return Vec::new();
        }
    };

    links
        .into_iter()
        .filter(|link| {
            let owned = link.user_id == profile_id;
            if !owned {
                error!(
                    link_id = %link.id,
                    owner = %link.user_id,
                    "Dropping link listed under profile {profile_id}"
                );
            }
            owned
        })
        .collect()
}

/// Resolves `requested` and lists the links of the profile behind it.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no profile holds the resolved
/// username, or [`AppError::Backend`] when the profile lookup fails.
pub async fn links_for_username(
    ctx: &ServiceContext,
    requested: &str,
) -> Result<Vec<SocialLink>, AppError> {
    let resolution = resolve(ctx.redirects.as_ref(), requested).await;
    let profile = ctx
        .profiles
        .find_by_username(&resolution.resolved_username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(links_for_profile(ctx, &profile.id).await)
}

/// Adds a link to the caller's profile.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] when `new.user_id` is not the caller,
/// [`AppError::BadRequest`] for a blank platform or URL, or
/// [`AppError::Backend`] when the write fails.
pub async fn create_link(
    ctx: &ServiceContext,
    user: &AuthUser,
    new: NewLink,
) -> Result<SocialLink, AppError> {
    if new.user_id != user.id {
        return Err(AppError::Forbidden);
    }
    if new.platform.trim().is_empty() || new.url.trim().is_empty() {
        return Err(AppError::BadRequest("Platform and URL are required".to_string()));
    }

    let link = SocialLink {
        id: ctx.id_gen.generate_id(),
        user_id: new.user_id,
        platform: new.platform,
        url: new.url,
        order_index: new.order_index,
        created_at: Some(ctx.clock.now()),
    };
    let created = ctx.links.insert(&link).await?;
    info!(link_id = %created.id, "Created link");
    Ok(created)
}

/// Edits one of the caller's links.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] when the link is missing or owned by
/// someone else, or [`AppError::Backend`] when the write fails.
pub async fn update_link(
    ctx: &ServiceContext,
    user: &AuthUser,
    id: &str,
    changes: &LinkChanges,
) -> Result<SocialLink, AppError> {
    owned_link(ctx, user, id).await?;
    Ok(ctx.links.update(id, changes).await?)
}

/// Deletes one of the caller's links.
///
/// # Errors
///
/// Returns [`AppError::Forbidden`] when the link is missing or owned by
/// someone else, or [`AppError::Backend`] when the delete fails.
pub async fn delete_link(ctx: &ServiceContext, user: &AuthUser, id: &str) -> Result<(), AppError> {
    owned_link(ctx, user, id).await?;
    ctx.links.delete(id).await?;
    info!(link_id = id, "Deleted link");
    Ok(())
}

async fn owned_link(ctx: &ServiceContext, user: &AuthUser, id: &str) -> Result<SocialLink, AppError> {
    match ctx.links.find(id).await? {
        Some(link) if link.user_id == user.id => Ok(link),
        _ => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::adapters::memory::{
        MemoryLinkStore, MemoryProfileStore, MemoryRedirectStore, SequentialIdGenerator,
    };
    use crate::ports::{LinkStore, PortFuture, Profile, UsernameRedirect};

    fn user(id: &str) -> AuthUser {
        AuthUser { id: id.into(), email: None }
    }

    fn link(id: &str, user_id: &str, order_index: i32) -> SocialLink {
        SocialLink {
            id: id.into(),
            user_id: user_id.into(),
            platform: "github".into(),
            url: format!("https://example.com/{id}"),
            order_index,
            created_at: None,
        }
    }

    fn new_link(user_id: &str) -> NewLink {
        NewLink {
            user_id: user_id.into(),
            platform: "github".into(),
            url: "https://github.com/alice".into(),
            order_index: 2,
        }
    }

    /// Returns every link regardless of owner, or fails outright.
    struct LeakyLinks {
        links: Vec<SocialLink>,
        fail: bool,
    }

    impl LinkStore for LeakyLinks {
        fn list_for_owner(&self, _user_id: &str) -> PortFuture<'_, Vec<SocialLink>> {
            let result = if self.fail { Err("timeout".into()) } else { Ok(self.links.clone()) };
            Box::pin(async move { result })
        }

        fn find(&self, _id: &str) -> PortFuture<'_, Option<SocialLink>> {
            Box::pin(async { Ok(None) })
        }

        fn insert(&self, link: &SocialLink) -> PortFuture<'_, SocialLink> {
            let link = link.clone();
            Box::pin(async move { Ok(link) })
        }

        fn update(&self, _id: &str, _changes: &LinkChanges) -> PortFuture<'_, SocialLink> {
            Box::pin(async { Err("unsupported".into()) })
        }

        fn delete(&self, _id: &str) -> PortFuture<'_, ()> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn drops_links_of_other_owners() {
        let mut ctx = ServiceContext::in_memory();
        ctx.links = Box::new(LeakyLinks {
            links: vec![link("l1", "u1", 0), link("l2", "u2", 1)],
            fail: false,
        });

        let links = links_for_profile(&ctx, "u1").await;
        assert_eq!(links.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["l1"]);
    }

    #[tokio::test]
    async fn store_failure_yields_no_links() {
        let mut ctx = ServiceContext::in_memory();
        ctx.links = Box::new(LeakyLinks { links: Vec::new(), fail: true });

        assert!(links_for_profile(&ctx, "u1").await.is_empty());
    }

    #[tokio::test]
    async fn links_follow_renamed_username() {
        let mut ctx = ServiceContext::in_memory();
        ctx.profiles = Box::new(MemoryProfileStore::with_profiles([Profile {
            id: "u1".into(),
            username: Some("alice".into()),
            ..Profile::default()
        }]));
        ctx.redirects = Box::new(MemoryRedirectStore::with_records([UsernameRedirect {
            old_username: "al".into(),
            new_username: "alice".into(),
            owner_id: "u1".into(),
            created_at: Utc::now(),
        }]));
        ctx.links = Box::new(MemoryLinkStore::with_links([link("l2", "u1", 1), link("l1", "u1", 0)]));

        let links = links_for_username(&ctx, "al").await.unwrap();
        assert_eq!(links.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["l1", "l2"]);

        let err = links_for_username(&ctx, "nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_assigns_id_and_checks_owner() {
        let mut ctx = ServiceContext::in_memory();
        ctx.id_gen = Box::new(SequentialIdGenerator::new("link"));

        let created = create_link(&ctx, &user("u1"), new_link("u1")).await.unwrap();
        assert_eq!(created.id, "link-1");
        assert_eq!(created.order_index, 2);
        assert!(created.created_at.is_some());

        let err = create_link(&ctx, &user("u2"), new_link("u1")).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let blank = NewLink { url: " ".into(), ..new_link("u1") };
        let err = create_link(&ctx, &user("u1"), blank).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn only_owner_may_update_or_delete() {
        let mut ctx = ServiceContext::in_memory();
        ctx.links = Box::new(MemoryLinkStore::with_links([link("l1", "u1", 0)]));
        let changes = LinkChanges { url: Some("https://new.example".into()), ..LinkChanges::default() };

        let err = update_link(&ctx, &user("u2"), "l1", &changes).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        let err = delete_link(&ctx, &user("u2"), "l1").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        let err = delete_link(&ctx, &user("u1"), "missing").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let updated = update_link(&ctx, &user("u1"), "l1", &changes).await.unwrap();
        assert_eq!(updated.url, "https://new.example");

        delete_link(&ctx, &user("u1"), "l1").await.unwrap();
        assert!(ctx.links.find("l1").await.unwrap().is_none());
    }
}
