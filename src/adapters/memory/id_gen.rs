//! Predictable identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::IdGenerator;

/// Generates `<prefix>-1`, `<prefix>-2`, ...
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose ids start with `prefix`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), next: AtomicU64::new(1) }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
