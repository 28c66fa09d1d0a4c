//! Visitor analytics: event recording and the owner's dashboard report.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::ServiceContext;
use crate::error::AppError;
use crate::ports::{AnalyticsEvent, AuthUser, EventKind, Platform};

/// Number of events the dashboard report covers.
pub const RECENT_EVENT_LIMIT: usize = 100;

/// Referrer stored when the visitor's browser sent none.
pub const DEFAULT_REFERRER: &str = "direct";

/// Payload for recording an event.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    /// Profile the event belongs to.
    pub profile_id: String,
    /// Kind of interaction.
    pub event_type: EventKind,
    /// Visitor device class.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Referrer, `direct` when absent.
    #[serde(default)]
    pub referrer: Option<String>,
}

/// Counts over the events in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    /// Profile views.
    pub total_views: usize,
    /// Link clicks.
    pub total_clicks: usize,
    /// Events from mobile visitors.
    pub mobile_events: usize,
    /// Events from desktop visitors.
    pub desktop_events: usize,
}

impl EventStats {
    /// Tallies `events`.
    #[must_use]
    pub fn tally(events: &[AnalyticsEvent]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            match event.event_type {
                EventKind::ProfileView => stats.total_views += 1,
                EventKind::LinkClick => stats.total_clicks += 1,
            }
            match event.platform {
                Some(Platform::Mobile) => stats.mobile_events += 1,
                Some(Platform::Desktop) => stats.desktop_events += 1,
                None => {}
            }
            stats
        })
    }
}

/// The dashboard's analytics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    /// Newest events first, at most [`RECENT_EVENT_LIMIT`].
    pub events: Vec<AnalyticsEvent>,
    /// Counts over `events`.
    pub stats: EventStats,
}

/// Records a visitor event.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for a blank profile id, or
/// [`AppError::Backend`] when the write fails.
pub async fn record_event(ctx: &ServiceContext, new: NewEvent) -> Result<AnalyticsEvent, AppError> {
    if new.profile_id.trim().is_empty() {
        return Err(AppError::BadRequest("profile_id is required".to_string()));
    }

    let event = AnalyticsEvent {
        id: ctx.id_gen.generate_id(),
        profile_id: new.profile_id,
        event_type: new.event_type,
        platform: new.platform,
        referrer: Some(
            new.referrer
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REFERRER.to_string()),
        ),
        timestamp: ctx.clock.now(),
    };
    ctx.analytics.record(&event).await?;
    debug!(profile_id = %event.profile_id, kind = %event.event_type, "Recorded analytics event");
    Ok(event)
}

/// Builds the report for the signed-in user's own profile.
///
/// # Errors
///
/// Returns [`AppError::Backend`] when the events cannot be read.
pub async fn report_for_user(
    ctx: &ServiceContext,
    user: &AuthUser,
) -> Result<AnalyticsReport, AppError> {
    let events = ctx.analytics.recent(&user.id, RECENT_EVENT_LIMIT).await?;
    let stats = EventStats::tally(&events);
    Ok(AnalyticsReport { events, stats })
}
