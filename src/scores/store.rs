//! Score store trait and the in-memory backend.

use rustc_hash::FxHashMap;

use crate::core::StoreError;

/// Key-value persistence for best scores.
///
/// Keys are `bestScore_<grid size>`; values are attempt counts.
pub trait ScoreStore {
    /// Read the stored value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Non-persistent store, lives as long as the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    scores: FxHashMap<String, u32>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key (builder pattern).
    #[must_use]
    pub fn with_score(mut self, key: impl Into<String>, value: u32) -> Self {
        self.scores.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.scores.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.scores.insert(key.to_string(), value);
        Ok(())
    }
}
