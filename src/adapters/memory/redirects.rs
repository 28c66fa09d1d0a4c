//! In-memory redirect store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::lock;
use crate::ports::{PortFuture, RedirectStore, UsernameRedirect};

/// Redirect records keyed by `old_username`.
#[derive(Default)]
pub struct MemoryRedirectStore {
    records: Mutex<HashMap<String, UsernameRedirect>>,
}

impl MemoryRedirectStore {
    /// Creates a store holding `redirects`; later duplicates win.
    #[must_use]
    pub fn with_records(redirects: impl IntoIterator<Item = UsernameRedirect>) -> Self {
        let records =
            redirects.into_iter().map(|r| (r.old_username.clone(), r)).collect::<HashMap<_, _>>();
        Self { records: Mutex::new(records) }
    }
}

impl RedirectStore for MemoryRedirectStore {
    fn lookup(&self, old_username: &str) -> PortFuture<'_, Option<UsernameRedirect>> {
        let result = lock(&self.records, "lookup redirect")
            .map(|records| records.get(old_username).cloned());
        Box::pin(async move { result })
    }

    fn upsert(&self, redirect: &UsernameRedirect) -> PortFuture<'_, ()> {
        let result = lock(&self.records, "upsert redirect").map(|mut records| {
            records.insert(redirect.old_username.clone(), redirect.clone());
        });
        Box::pin(async move { result })
    }
}
