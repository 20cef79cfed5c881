//! JSON file score store.
//!
//! The file holds one JSON object mapping keys to attempt counts:
//!
//! ```json
//! { "bestScore_2": 2, "bestScore_4": 11 }
//! ```
//!
//! The file is read on every `get` and rewritten on every `set`, so several
//! processes sharing it see each other's scores. A missing file is an empty
//! store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::store::ScoreStore;
use crate::core::StoreError;

/// Score store backed by a JSON file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry.
    pub fn load(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, scores: &BTreeMap<String, u32>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write beside the target then rename, so readers never see half a file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(scores)?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.load()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut scores = self.load()?;
        scores.insert(key.to_string(), value);
        self.save(&scores)?;
        tracing::debug!(path = %self.path.display(), key, value, "score file updated");
        Ok(())
    }
}
