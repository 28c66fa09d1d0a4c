//! Username redirect resolution.
//!
//! Profiles keep a stable id but their username can change. Every rename
//! leaves an `old -> new` record behind, and records chain: a link shared
//! three renames ago has to walk three records to reach the live profile.
//!
//! [`resolve`] follows that chain with two guards:
//!
//! - a visited set, so cyclic data (`a -> b -> a`, or `a -> a`) stops on
//!   the first repeat;
//! - a hard bound of [`MAX_REDIRECT_HOPS`] iterations.
//!
//! Resolution never fails. A store error on any hop ends the walk at the
//! last username that was reached, so a visitor still lands on *some*
//! profile (or a plain 404 from the profile lookup) instead of an error page.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ports::RedirectStore;

/// Maximum number of redirect lookups performed for one request.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Why the walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Reached a username with no outgoing redirect.
    Settled,
    /// Reached a username that had already been visited.
    CycleDetected,
    /// Spent every hop without settling.
    HopLimitReached,
    /// The redirect store failed; the last reached username was kept.
    StoreUnavailable,
}

/// Outcome of resolving one requested username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The username that was asked for.
    pub requested_username: String,
    /// The username to use for the profile lookup.
    pub resolved_username: String,
    /// True when `resolved_username` differs from the request; callers answer
    /// with a permanent redirect in that case.
    pub changed: bool,
    /// Every username reached, starting with the request.
    pub chain: Vec<String>,
    /// Why the walk stopped.
    pub termination: Termination,
}

impl Resolution {
    /// The chain rendered as `a -> b -> c`.
    #[must_use]
    pub fn chain_display(&self) -> String {
        self.chain.join(" -> ")
    }
}

/// Resolves `requested` to the username that currently owns it.
///
/// Performs at most [`MAX_REDIRECT_HOPS`] lookups against `store`.
pub async fn resolve(store: &dyn RedirectStore, requested: &str) -> Resolution {
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = requested.to_string();
    let mut chain = vec![current.clone()];
    let mut termination = Termination::HopLimitReached;

    for _ in 0..MAX_REDIRECT_HOPS {
        if !visited.insert(current.clone()) {
            termination = Termination::CycleDetected;
            break;
        }

        match store.lookup(&current).await {
            Ok(Some(redirect)) => {
                current = redirect.new_username;
                chain.push(current.clone());
            }
            Ok(None) => {
                termination = Termination::Settled;
                break;
            }
            Err(e) => {
                warn!("Redirect lookup for {current} failed, keeping it as resolved: {e}");
                termination = Termination::StoreUnavailable;
                break;
            }
        }
    }

    match termination {
        Termination::CycleDetected => {
            warn!("Circular redirect for {requested}: {}", chain.join(" -> "));
        }
        Termination::HopLimitReached => {
            warn!(
                "Redirect chain for {requested} exceeded {MAX_REDIRECT_HOPS} hops, stopping at {current}"
            );
        }
        Termination::Settled | Termination::StoreUnavailable => {}
    }

    if chain.len() > 1 {
        debug!("Username redirect chain: {}", chain.join(" -> "));
    }

    Resolution {
        changed: current != requested,
        requested_username: requested.to_string(),
        resolved_username: current,
        chain,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::ports::{PortFuture, UsernameRedirect};

    /// Redirect store driven by a fixed map, optionally failing for one key.
    #[derive(Default)]
    struct ScriptedRedirects {
        edges: HashMap<String, String>,
        fail_on: Option<String>,
        lookups: Mutex<Vec<String>>,
    }

    impl ScriptedRedirects {
        fn with_edges(edges: &[(&str, &str)]) -> Self {
            Self {
                edges: edges.iter().map(|(a, b)| ((*a).to_string(), (*b).to_string())).collect(),
                ..Self::default()
            }
        }

        fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    impl RedirectStore for ScriptedRedirects {
        fn lookup(&self, old_username: &str) -> PortFuture<'_, Option<UsernameRedirect>> {
            let old = old_username.to_string();
            self.lookups.lock().unwrap().push(old.clone());
            Box::pin(async move {
                if self.fail_on.as_deref() == Some(old.as_str()) {
                    return Err("connection reset".into());
                }
                Ok(self.edges.get(&old).map(|new| UsernameRedirect {
                    old_username: old.clone(),
                    new_username: new.clone(),
                    owner_id: "owner".into(),
                    created_at: Utc::now(),
                }))
            })
        }

        fn upsert(&self, _redirect: &UsernameRedirect) -> PortFuture<'_, ()> {
            Box::pin(async { Err("read-only".into()) })
        }
    }

    #[tokio::test]
    async fn unknown_username_resolves_to_itself() {
        let store = ScriptedRedirects::default();
        let resolution = resolve(&store, "alice").await;

        assert_eq!(resolution.resolved_username, "alice");
        assert!(!resolution.changed);
        assert_eq!(resolution.termination, Termination::Settled);
        assert_eq!(resolution.chain, vec!["alice"]);
    }

    #[tokio::test]
    async fn follows_chain_to_the_end() {
        let store = ScriptedRedirects::with_edges(&[("a", "b"), ("b", "c")]);

        let from_a = resolve(&store, "a").await;
        assert_eq!(from_a.resolved_username, "c");
        assert!(from_a.changed);
        assert_eq!(from_a.chain_display(), "a -> b -> c");

        let from_b = resolve(&store, "b").await;
        assert_eq!(from_b.resolved_username, "c");
        assert!(from_b.changed);

        let from_c = resolve(&store, "c").await;
        assert_eq!(from_c.resolved_username, "c");
        assert!(!from_c.changed);
    }

    #[tokio::test]
    async fn two_cycle_terminates_inside_the_cycle() {
        let store = ScriptedRedirects::with_edges(&[("a", "b"), ("b", "a")]);
        let resolution = resolve(&store, "a").await;

        assert!(["a", "b"].contains(&resolution.resolved_username.as_str()));
        assert_eq!(resolution.termination, Termination::CycleDetected);
        assert_eq!(store.lookup_count(), 2);
    }

    #[tokio::test]
    async fn self_loop_returns_the_same_username() {
        let store = ScriptedRedirects::with_edges(&[("a", "a")]);
        let resolution = resolve(&store, "a").await;

        assert_eq!(resolution.resolved_username, "a");
        assert!(!resolution.changed);
        assert_eq!(resolution.termination, Termination::CycleDetected);
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn long_chain_is_truncated_at_the_hop_limit() {
        let names: Vec<String> = (0..=15).map(|i| format!("u{i}")).collect();
        let edges: Vec<(&str, &str)> =
            names.windows(2).map(|pair| (pair[0].as_str(), pair[1].as_str())).collect();
        let store = ScriptedRedirects::with_edges(&edges);

        let resolution = resolve(&store, "u0").await;

        assert_eq!(resolution.resolved_username, format!("u{MAX_REDIRECT_HOPS}"));
        assert!(resolution.changed);
        assert_eq!(resolution.termination, Termination::HopLimitReached);
        assert_eq!(store.lookup_count(), MAX_REDIRECT_HOPS);
    }

    #[tokio::test]
    async fn store_failure_keeps_last_known_username() {
        let mut store = ScriptedRedirects::with_edges(&[("a", "b"), ("b", "c")]);
        store.fail_on = Some("b".into());

        let resolution = resolve(&store, "a").await;

        assert_eq!(resolution.resolved_username, "b");
        assert!(resolution.changed);
        assert_eq!(resolution.termination, Termination::StoreUnavailable);
    }

    #[tokio::test]
    async fn failure_on_first_hop_returns_request() {
        let mut store = ScriptedRedirects::default();
        store.fail_on = Some("alice".into());

        let resolution = resolve(&store, "alice").await;

        assert_eq!(resolution.resolved_username, "alice");
        assert!(!resolution.changed);
    }
}
