//! In-memory adapters.
//!
//! Used by the test suite and by `--seed` mode, where a YAML fixture stands
//! in for the hosted backend. State lives behind `std::sync::Mutex`; no lock
//! is held across an await point.

pub mod analytics;
pub mod clock;
pub mod id_gen;
pub mod identity;
pub mod links;
pub mod profiles;
pub mod redirects;
pub mod seed;
pub mod storage;

pub use analytics::MemoryAnalyticsLog;
pub use clock::FixedClock;
pub use id_gen::SequentialIdGenerator;
pub use identity::MemoryIdentityProvider;
pub use links::MemoryLinkStore;
pub use profiles::MemoryProfileStore;
pub use redirects::MemoryRedirectStore;
pub use seed::{Seed, SeedSession};
pub use storage::MemoryObjectStorage;

use std::sync::{Mutex, MutexGuard};

use crate::ports::PortError;

/// Locks `mutex`, turning poisoning into a port error.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, PortError> {
    mutex.lock().map_err(|_| -> PortError { format!("{what}: lock poisoned").into() })
}
