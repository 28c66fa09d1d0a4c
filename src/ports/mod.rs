//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, IDs, the hosted record store, object storage, the
//! identity provider). Implementations live in `src/adapters/`.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

pub mod analytics;
pub mod clock;
pub mod id_gen;
pub mod identity;
pub mod links;
pub mod profiles;
pub mod redirects;
pub mod storage;

pub use analytics::{AnalyticsEvent, AnalyticsLog, EventKind, Platform};
pub use clock::Clock;
pub use id_gen::IdGenerator;
pub use identity::{AuthUser, IdentityProvider};
pub use links::{LinkChanges, LinkStore, SocialLink};
pub use profiles::{Profile, ProfileChanges, ProfileStore};
pub use redirects::{RedirectStore, UsernameRedirect};
pub use storage::{Bucket, ObjectStorage};

/// Error type returned by every fallible port call.
pub type PortError = Box<dyn Error + Send + Sync>;

/// Boxed future returned by network-bound port methods.
///
/// Boxing keeps the port traits dyn-compatible so they can be held as
/// `Box<dyn Trait>` inside [`crate::context::ServiceContext`].
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
