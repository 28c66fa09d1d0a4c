//! Service context bundling all port trait objects.

use crate::adapters::live::{
    LiveAnalyticsLog, LiveClock, LiveIdGenerator, LiveIdentityProvider, LiveLinkStore,
    LiveObjectStorage, LiveProfileStore, LiveRedirectStore, SupabaseClient,
};
use crate::adapters::memory::{
    MemoryAnalyticsLog, MemoryIdentityProvider, MemoryLinkStore, MemoryObjectStorage,
    MemoryProfileStore, MemoryRedirectStore, Seed,
};
use crate::config::BackendConfig;
use crate::ports::{
    AnalyticsLog, Clock, IdGenerator, IdentityProvider, LinkStore, ObjectStorage, ProfileStore,
    RedirectStore,
};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter sets (hosted backend, in-memory). Tests replace single
/// fields after construction.
pub struct ServiceContext {
    /// Clock for record timestamps.
    pub clock: Box<dyn Clock>,
    /// ID generator for new links and events.
    pub id_gen: Box<dyn IdGenerator>,
    /// Username rename records.
    pub redirects: Box<dyn RedirectStore>,
    /// Profiles.
    pub profiles: Box<dyn ProfileStore>,
    /// Social links.
    pub links: Box<dyn LinkStore>,
    /// Visitor analytics.
    pub analytics: Box<dyn AnalyticsLog>,
    /// Uploaded images.
    pub storage: Box<dyn ObjectStorage>,
    /// Access-token verification.
    pub identity: Box<dyn IdentityProvider>,
}

impl ServiceContext {
    /// Creates a context backed by the hosted backend.
    #[must_use]
    pub fn live(backend: &BackendConfig) -> Self {
        let client = SupabaseClient::new(backend);

        Self {
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator),
            redirects: Box::new(LiveRedirectStore::new(client.clone())),
            profiles: Box::new(LiveProfileStore::new(client.clone())),
            links: Box::new(LiveLinkStore::new(client.clone())),
            analytics: Box::new(LiveAnalyticsLog::new(client.clone())),
            storage: Box::new(LiveObjectStorage::new(client.clone())),
            identity: Box::new(LiveIdentityProvider::new(client)),
        }
    }

    /// Creates a context with empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::seeded(Seed::default())
    }

    /// Creates a context whose in-memory stores start with `seed`.
    #[must_use]
    pub fn seeded(seed: Seed) -> Self {
        let identity = seed
            .sessions
            .iter()
            .fold(MemoryIdentityProvider::default(), |provider, session| {
                provider.with_session(&session.token, session.user())
            });

        Self {
            clock: Box::new(LiveClock),
            id_gen: Box::new(LiveIdGenerator),
            redirects: Box::new(MemoryRedirectStore::with_records(seed.redirects)),
            profiles: Box::new(MemoryProfileStore::with_profiles(seed.profiles)),
            links: Box::new(MemoryLinkStore::with_links(seed.links)),
            analytics: Box::new(MemoryAnalyticsLog::default()),
            storage: Box::new(MemoryObjectStorage::default()),
            identity: Box::new(identity),
        }
    }
}
