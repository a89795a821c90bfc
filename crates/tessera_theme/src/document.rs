//! Editable theme document
//!
//! Owns the current schema and alias config. Every edit builds a new schema
//! and swaps it in whole, so readers never see a half-applied change.
//! - `revision` bumps on every effective change
//! - `needs_save` stays set until the host persists the document
//! - the generated stylesheet is memoized per revision

use crate::alias::{AliasConfig, Slot, ThemeAliases};
use crate::command::Command;
use crate::css::{generate_css, CssOptions};
use crate::error::{SchemaError, StoreError};
use crate::export::{export_json, Imported};
use crate::platform::{load_or_seed, Clipboard, KeyValueStore, SchemaStore};
use crate::presets::seed_schema;
use crate::resolve::resolve;
use crate::schema::Schema;
use crate::state::State;
use crate::tokens::TokenSet;

pub struct ThemeDocument {
    schema: Schema,
    config: AliasConfig,
    css_options: CssOptions,
    revision: u64,
    needs_save: bool,
    /// (revision, stylesheet)
    stylesheet: Option<(u64, String)>,
}

impl ThemeDocument {
    pub fn new(schema: Schema, config: AliasConfig) -> Self {
        Self {
            schema,
            config,
            css_options: CssOptions::default(),
            revision: 0,
            needs_save: false,
            stylesheet: None,
        }
    }

    /// Seeded schema with the default `light`/`dark` aliases
    pub fn seeded() -> Self {
        Self::new(seed_schema(), AliasConfig::default())
    }

    /// Load the schema and alias config from host storage
    ///
    /// Falls back to the seed schema and default aliases when nothing is
    /// stored yet.
    pub fn load(schemas: &dyn SchemaStore, settings: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let schema = load_or_seed(schemas)?;
        let config = AliasConfig::load(settings)?.unwrap_or_default();
        Ok(Self::new(schema, config))
    }

    pub fn with_css_options(mut self, options: CssOptions) -> Self {
        self.css_options = options;
        self
    }

    // ========== Accessors ==========

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &AliasConfig {
        &self.config
    }

    pub fn aliases(&self) -> &ThemeAliases {
        &self.config.aliases
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether there are edits the host has not persisted
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Clear the save flag
    pub fn clear_save(&mut self) {
        self.needs_save = false;
    }

    pub fn resolve(&self, control: &str, theme: &str, state: State) -> TokenSet {
        resolve(&self.schema, control, theme, state)
    }

    // ========== Edits ==========

    /// Apply a command; returns whether the schema changed
    pub fn dispatch(&mut self, command: &Command) -> bool {
        let next = command.apply(&self.schema, &self.config.aliases);
        let changed = self.replace_schema(next);
        if changed {
            if let Command::RenameTheme { from, to } = command {
                self.config.aliases = self.config.aliases.follow_rename(from, to);
            }
        }
        changed
    }

    /// Like [`dispatch`](Self::dispatch) but reports why nothing changed
    pub fn try_dispatch(&mut self, command: &Command) -> Result<bool, SchemaError> {
        let next = command.try_apply(&self.schema, &self.config.aliases)?;
        if let Command::RenameTheme { from, to } = command {
            self.config.aliases = self.config.aliases.follow_rename(from, to);
        }
        Ok(self.replace_schema(next))
    }

    /// Swap in a whole schema (import, undo); returns whether it differed
    pub fn replace_schema(&mut self, schema: Schema) -> bool {
        if schema == self.schema {
            return false;
        }
        self.schema = schema;
        self.touch();
        true
    }

    /// Take over an imported schema and, when present, its alias config
    pub fn import(&mut self, imported: Imported) {
        if let Some(config) = imported.aliases {
            self.set_config(config);
        }
        self.replace_schema(imported.schema);
    }

    pub fn set_alias(&mut self, slot: Slot, theme: &str) {
        if self.config.aliases.resolve(slot) == theme {
            return;
        }
        self.config.aliases.set(slot, theme);
        self.touch();
    }

    pub fn set_config(&mut self, config: AliasConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.needs_save = true;
    }

    // ========== Output ==========

    /// Generated stylesheet for the current revision
    pub fn stylesheet(&mut self) -> &str {
        let stale = !matches!(&self.stylesheet, Some((rev, _)) if *rev == self.revision);
        if stale {
            tracing::debug!(revision = self.revision, "Regenerating stylesheet");
            let css = generate_css(&self.schema, &self.config.aliases, &self.css_options);
            self.stylesheet = Some((self.revision, css));
        }
        self.stylesheet.as_ref().map(|(_, css)| css.as_str()).unwrap_or_default()
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(export_json(&self.schema, &self.config)?)
    }

    pub fn copy_css(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), StoreError> {
        let css = self.stylesheet().to_string();
        clipboard.write_text(&css)
    }

    /// Persist schema and aliases, clearing the save flag on success
    pub fn save(
        &mut self,
        schemas: &mut dyn SchemaStore,
        settings: &mut dyn KeyValueStore,
    ) -> Result<(), StoreError> {
        schemas.save(&self.schema)?;
        self.config.save(settings)?;
        self.clear_save();
        tracing::debug!(revision = self.revision, "Theme document saved");
        Ok(())
    }
}

impl Default for ThemeDocument {
    fn default() -> Self {
        Self::seeded()
    }
}
