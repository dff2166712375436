//! Key-value settings store and the criteria-weights blob it persists.
//!
//! The store is injected wherever settings are needed, so any persistence
//! backend can stand in during tests. Values are plain strings under fixed
//! keys, one JSON object per store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Fixed key the scoring weights live under
pub const CRITERIA_WEIGHTS_KEY: &str = "criteriaWeights";

/// Minimal key-value persistence: get/set/clear on string values
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

/// File-backed store: one JSON object per file, keys mapping to string
/// values. A missing file reads as empty.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {}", self.path.display()))?;
        let map = serde_json::from_str(&raw)
            .with_context(|| format!("Settings file {} is not a JSON object", self.path.display()))?;
        Ok(map)
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write settings file {}", self.path.display()))?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn clear(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Weighted scoring criteria, percentages summing to 100 by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaWeights {
    pub technical: u32,
    pub communication: u32,
    pub experience: u32,
    pub cultural_fit: u32,
    pub motivation: u32,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            technical: 30,
            communication: 25,
            experience: 20,
            cultural_fit: 15,
            motivation: 10,
        }
    }
}

impl CriteriaWeights {
    pub fn total(&self) -> u32 {
        self.technical + self.communication + self.experience + self.cultural_fit + self.motivation
    }

    /// Share of one weight relative to the current total, as a rounded
    /// percentage. Zero total yields zero.
    pub fn share(&self, weight: u32) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((weight as f64 / total as f64) * 100.0).round() as u32
    }

    /// Load from the store, falling back to defaults when the key is
    /// absent or the stored blob no longer parses
    pub fn load(store: &dyn SettingsStore) -> Self {
        match store.get(CRITERIA_WEIGHTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Stored criteria weights unreadable, using defaults: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Failed to read criteria weights, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        store.set(CRITERIA_WEIGHTS_KEY, &raw)
    }
}
