//! Host platform services
//!
//! Persistence, key-value storage and the clipboard are owned by the host.
//! The engine only sees these traits, so it runs (and tests) without a DOM or
//! a filesystem. In-memory implementations are provided for tests and
//! embedding.

use crate::error::StoreError;
use crate::ops::heal;
use crate::presets::seed_schema;
use crate::schema::Schema;
use rustc_hash::FxHashMap;

/// Schema snapshot persistence
pub trait SchemaStore {
    /// Load the persisted snapshot; `None` means nothing was saved yet
    fn load(&self) -> Result<Option<Schema>, StoreError>;

    fn save(&mut self, schema: &Schema) -> Result<(), StoreError>;
}

/// String key-value storage (alias settings and similar preferences)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Text clipboard
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), StoreError>;
}

/// Load a schema, healing it, or fall back to the seeded baseline
pub fn load_or_seed(store: &dyn SchemaStore) -> Result<Schema, StoreError> {
    match store.load()? {
        Some(schema) => Ok(heal(&schema)),
        None => {
            tracing::debug!("No persisted schema, using seed");
            Ok(seed_schema())
        }
    }
}

/// Schema store keeping a JSON snapshot in memory
#[derive(Debug, Default)]
pub struct MemorySchemaStore {
    snapshot: Option<String>,
}

impl MemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw persisted JSON, if any
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl SchemaStore for MemorySchemaStore {
    fn load(&self) -> Result<Option<Schema>, StoreError> {
        self.snapshot
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&mut self, schema: &Schema) -> Result<(), StoreError> {
        self.snapshot = Some(serde_json::to_string(schema)?);
        Ok(())
    }
}

/// Key-value store backed by a hash map
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: FxHashMap<String, String>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Clipboard that remembers the last written text
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), StoreError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
