//! Random UUID identifiers.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Generates v4 UUIDs, the same id format the backend assigns to rows.
#[derive(Default)]
pub struct LiveIdGenerator;

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_uuids() {
        let ids = LiveIdGenerator;
        let first = ids.generate_id();
        let second = ids.generate_id();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
