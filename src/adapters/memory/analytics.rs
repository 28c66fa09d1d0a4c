//! In-memory analytics log.

use std::sync::Mutex;

use super::lock;
use crate::ports::{AnalyticsEvent, AnalyticsLog, PortFuture};

/// Append-only event list.
#[derive(Default)]
pub struct MemoryAnalyticsLog {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl AnalyticsLog for MemoryAnalyticsLog {
    fn record(&self, event: &AnalyticsEvent) -> PortFuture<'_, ()> {
        let result = lock(&self.events, "record analytics event").map(|mut events| {
            events.push(event.clone());
        });
        Box::pin(async move { result })
    }

    fn recent(&self, profile_id: &str, limit: usize) -> PortFuture<'_, Vec<AnalyticsEvent>> {
        let result = lock(&self.events, "list analytics events").map(|events| {
            // Walk newest-appended first so equal timestamps keep recency order.
            let mut matching: Vec<AnalyticsEvent> =
                events.iter().rev().filter(|e| e.profile_id == profile_id).cloned().collect();
            matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            matching.truncate(limit);
            matching
        });
        Box::pin(async move { result })
    }
}
