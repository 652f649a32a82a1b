//! Session store - persistence seam for cross-session stats
//!
//! The game only needs a tiny string key-value interface. Two keys are used:
//! [`BEST_SCORE_KEY`] and [`TOTAL_MOVE_COUNT_KEY`], both holding decimal
//! integers. Missing or unparsable values read as 0.

use std::collections::HashMap;

use tracing::warn;

use crate::error::StoreError;

pub const BEST_SCORE_KEY: &str = "bestScore";
pub const TOTAL_MOVE_COUNT_KEY: &str = "totalMoveCount";

/// Key-value persistence collaborator
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Process-local store. Used in tests and when durable storage is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stats that outlive a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionStats {
    pub best_score: u32,
    pub total_move_count: u32,
}

impl SessionStats {
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        Ok(Self {
            best_score: parse_count(BEST_SCORE_KEY, store.get(BEST_SCORE_KEY)?),
            total_move_count: parse_count(TOTAL_MOVE_COUNT_KEY, store.get(TOTAL_MOVE_COUNT_KEY)?),
        })
    }

    pub fn save<S: SessionStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(BEST_SCORE_KEY, &self.best_score.to_string())?;
        store.set(TOTAL_MOVE_COUNT_KEY, &self.total_move_count.to_string())?;
        Ok(())
    }

    /// Field-wise maximum. Both stats only ever grow.
    pub fn max(self, other: Self) -> Self {
        Self {
            best_score: self.best_score.max(other.best_score),
            total_move_count: self.total_move_count.max(other.total_move_count),
        }
    }
}

fn parse_count(key: &str, raw: Option<String>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable stored value");
            0
        }
    }
}
