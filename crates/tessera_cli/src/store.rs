//! File-backed platform services

use crate::config::TesseraConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tessera_theme::alias::{KEY_ALIAS_DARK, KEY_ALIAS_LIGHT, KEY_INITIAL_SLOT};
use tessera_theme::{KeyValueStore, Schema, SchemaStore, StoreError};

/// Schema snapshot stored as pretty JSON
///
/// Saves go through a sibling temp file and a rename, so a crash never leaves
/// a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaStore for JsonFileStore {
    fn load(&self) -> Result<Option<Schema>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, schema: &Schema) -> Result<(), StoreError> {
        write_atomic(&self.path, &serde_json::to_string_pretty(schema)?)?;
        tracing::debug!(path = %self.path.display(), "Schema saved");
        Ok(())
    }
}

/// Alias settings kept in the `[aliases]` table of tessera.toml
///
/// Maps `aliasLight`, `aliasDark` and `initialSlot` onto `light`, `dark` and
/// `initial_slot`. Other keys are not stored.
#[derive(Debug, Clone)]
pub struct TomlAliasStore {
    path: PathBuf,
}

impl TomlAliasStore {
    /// Store over the config file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<TesseraConfig, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        TesseraConfig::from_toml(&content).map_err(|err| StoreError::Serialization(err.to_string()))
    }

    fn write(&self, config: &TesseraConfig) -> Result<(), StoreError> {
        let content = config
            .to_toml()
            .map_err(|err| StoreError::Serialization(err.to_string()))?;
        write_atomic(&self.path, &content)
    }

    fn slot_mut<'a>(config: &'a mut TesseraConfig, key: &str) -> Option<&'a mut String> {
        match key {
            KEY_ALIAS_LIGHT => Some(&mut config.aliases.light),
            KEY_ALIAS_DARK => Some(&mut config.aliases.dark),
            KEY_INITIAL_SLOT => Some(&mut config.aliases.initial_slot),
            _ => None,
        }
    }
}

impl KeyValueStore for TomlAliasStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut config = self.read()?;
        Ok(Self::slot_mut(&mut config, key).map(|value| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut config = self.read()?;
        let Some(slot) = Self::slot_mut(&mut config, key) else {
            return Err(StoreError::Unavailable(format!(
                "setting {key:?} is not stored in {}",
                self.path.display()
            )));
        };
        if slot.as_str() == value {
            return Ok(());
        }
        *slot = value.to_string();
        self.write(&config)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut config = self.read()?;
        let default = TesseraConfig::new(&config.project.name).aliases;
        let fallback = match key {
            KEY_ALIAS_LIGHT => default.light,
            KEY_ALIAS_DARK => default.dark,
            KEY_INITIAL_SLOT => default.initial_slot,
            _ => return Ok(()),
        };
        if let Some(slot) = Self::slot_mut(&mut config, key) {
            *slot = fallback;
        }
        self.write(&config)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_theme::{seed_schema, AliasConfig, Slot, ThemeAliases};

    #[test]
    fn json_store_round_trips_and_reports_missing_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/theme.json"));
        assert!(store.load().unwrap().is_none());

        let schema = seed_schema();
        store.save(&schema).unwrap();
        assert_eq!(store.load().unwrap(), Some(schema));
        assert!(!dir.path().join("nested/theme.json.tmp").exists());
    }

    #[test]
    fn corrupt_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        fs::write(&path, "{\"themes\": 3").unwrap();
        assert!(matches!(
            JsonFileStore::new(path).load(),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn alias_store_edits_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tessera.toml");
        fs::write(&path, TesseraConfig::new("acme").to_toml().unwrap()).unwrap();

        let mut store = TomlAliasStore::new(&path);
        assert_eq!(
            AliasConfig::load(&store).unwrap(),
            Some(AliasConfig::default())
        );

        let config = AliasConfig::new(ThemeAliases::new("paper", "ink"), Slot::Dark);
        config.save(&mut store).unwrap();
        let reread = TesseraConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(reread.aliases.dark, "ink");
        assert_eq!(reread.alias_config().unwrap(), config);

        store.remove(KEY_ALIAS_DARK).unwrap();
        assert_eq!(store.get(KEY_ALIAS_DARK).unwrap().as_deref(), Some("dark"));
        assert!(store.set("theme", "x").is_err());
    }
}
