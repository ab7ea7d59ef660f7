//! Durable Store
//!
//! Worker memory kept between ticks as one JSON string per worker name.
//! Every record goes through a full encode and decode each tick, so nothing
//! the engine holds in memory can leak from one tick into the next.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use worker_state::WorkerMemory;

/// Errors raised by the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("memory record for {name} is corrupt: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode memory: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-worker memory records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurableStore {
    records: BTreeMap<String, String>,
}

impl DurableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the record for `name`, if one exists.
    pub fn load(&self, name: &str) -> Result<Option<WorkerMemory>, StoreError> {
        let Some(raw) = self.records.get(name) else {
            return Ok(None);
        };
        WorkerMemory::from_json(raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                name: name.to_string(),
                source,
            })
    }

    /// Decodes the record for `name`, or starts a fresh one homed in `room`.
    pub fn load_or_init(&self, name: &str, room: &str) -> Result<WorkerMemory, StoreError> {
        Ok(self
            .load(name)?
            .unwrap_or_else(|| WorkerMemory::for_room(room)))
    }

    pub fn save(&mut self, name: &str, memory: &WorkerMemory) -> Result<(), StoreError> {
        self.records.insert(name.to_string(), memory.to_json()?);
        Ok(())
    }

    /// The encoded record for `name`.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.records.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops records of workers that no longer exist; returns their names.
    pub fn collect_garbage(&mut self, is_alive: impl Fn(&str) -> bool) -> Vec<String> {
        let dead: Vec<String> = self
            .records
            .keys()
            .filter(|name| !is_alive(name))
            .cloned()
            .collect();
        for name in &dead {
            self.records.remove(name);
            tracing::debug!(worker = %name, "released memory of dead worker");
        }
        dead
    }

    /// Renders every record as one JSON object keyed by worker name.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let mut dump = BTreeMap::new();
        for (name, raw) in &self.records {
            let value: Value = serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
                name: name.clone(),
                source,
            })?;
            dump.insert(name.as_str(), value);
        }
        Ok(serde_json::to_string_pretty(&dump)?)
    }

    /// Parses a dump written by [`DurableStore::to_json`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let dump: BTreeMap<String, Value> = serde_json::from_str(json)?;
        let records = dump
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        Ok(Self { records })
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
