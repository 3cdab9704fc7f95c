use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::AppError;

static ID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Record identifier: 24 lowercase hex characters in object-id layout
/// (4-byte seconds timestamp, 5 random bytes, 3-byte counter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub const LEN: usize = 24;

    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let random = rand::rng().random::<u64>() & 0xff_ffff_ffff;
        let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xff_ffff;
        EntityId(format!("{seconds:08x}{random:010x}{counter:06x}"))
    }

    /// Parses a client-supplied id, trimming whitespace and normalising case.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.len() != Self::LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::validation(format!("Invalid id: '{trimmed}'")));
        }
        Ok(EntityId(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntityId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_well_formed() {
        let id = EntityId::generate();
        assert_eq!(id.as_str().len(), EntityId::LEN);
        assert!(EntityId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<EntityId> = (0..500).map(|_| EntityId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_parse_normalises_case_and_whitespace() {
        let id = EntityId::parse("  64B7F0C2A1B2C3D4E5F60718 ").unwrap();
        assert_eq!(id.as_str(), "64b7f0c2a1b2c3d4e5f60718");
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for raw in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "64b7f0c2a1b2c3d4e5f6071"] {
            let err = EntityId::parse(raw).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(_)),
                "{raw} should be rejected"
            );
        }
    }
}
