//! Storage backends for the patient registry.
//!
//! The registry is one JSON document mapping patient id to record body.
//! Backends load the whole mapping and store the whole mapping; there is
//! no partial persistence.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::StoredPatient;

use super::StoreError;

/// The full registry mapping, ordered by patient id.
pub type Registry = BTreeMap<String, StoredPatient>;

/// Load/save seam over the persisted registry document.
pub trait StoreBackend: Send {
    /// Read the entire registry. A backend with no document yet reports an
    /// empty mapping, not an error.
    fn load_all(&self) -> Result<Registry, StoreError>;

    /// Replace the entire registry as one unit.
    fn save_all(&mut self, registry: &Registry) -> Result<(), StoreError>;
}

/// Flat-file backend: the registry lives in a single JSON document on disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreBackend for JsonFileBackend {
    fn load_all(&self) -> Result<Registry, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Registry::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_all(&mut self, registry: &Registry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let doc = serde_json::to_string_pretty(registry)?;
        fs::write(&self.path, doc)?;
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryBackend {
    registry: Registry,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = (String, StoredPatient)>) -> Self {
        Self {
            registry: records.into_iter().collect(),
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn load_all(&self) -> Result<Registry, StoreError> {
        Ok(self.registry.clone())
    }

    fn save_all(&mut self, registry: &Registry) -> Result<(), StoreError> {
        self.registry = registry.clone();
        Ok(())
    }
}
