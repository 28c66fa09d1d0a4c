//! Analytics log port: an append-only event log per profile.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PortFuture;

/// What a visitor did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The public page was opened.
    ProfileView,
    /// A social link on the page was followed.
    LinkClick,
}

/// Coarse device class of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Phone or tablet.
    Mobile,
    /// Everything else.
    Desktop,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfileView => f.write_str("profile_view"),
            Self::LinkClick => f.write_str("link_click"),
        }
    }
}

/// A single logged visitor interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Unique event id.
    pub id: String,
    /// Profile the event belongs to.
    pub profile_id: String,
    /// Kind of interaction.
    pub event_type: EventKind,
    /// Visitor device class, when reported.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Referrer reported by the visitor's browser.
    #[serde(default)]
    pub referrer: Option<String>,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Appends and reads analytics events.
pub trait AnalyticsLog: Send + Sync {
    /// Appends an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn record(&self, event: &AnalyticsEvent) -> PortFuture<'_, ()>;

    /// Returns up to `limit` events for `profile_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried.
    fn recent(&self, profile_id: &str, limit: usize) -> PortFuture<'_, Vec<AnalyticsEvent>>;
}
