//! Theme schema: controls × physical themes × states → sparse token sets

use crate::state::State;
use crate::tokens::TokenSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current schema format version
pub const SCHEMA_VERSION: u32 = 1;

/// Physical theme identifier
pub type ThemeId = String;

/// Control (logical UI element) identifier
pub type ControlId = String;

/// One token set per state
pub type StateMap = IndexMap<State, TokenSet>;

/// One state map per physical theme
pub type ControlThemes = IndexMap<ThemeId, StateMap>;

/// The full token schema
///
/// Values are treated as immutable: every operation in [`crate::ops`] takes a
/// schema and returns a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(alias = "$version", default = "default_version")]
    pub version: u32,
    /// Physical themes, in display order
    #[serde(default)]
    pub themes: Vec<ThemeId>,
    #[serde(default)]
    pub global: GlobalTokens,
    #[serde(default)]
    pub components: IndexMap<ControlId, ControlThemes>,
    /// Unknown top-level keys, preserved across load/save
    ///
    /// Reserved (never stored here): `version`, `$version`, `themes`, `global`,
    /// `components`.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Tokens without a state axis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalTokens {
    /// Page body tokens per physical theme
    #[serde(default)]
    pub body: IndexMap<ThemeId, TokenSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSettings>,
}

/// Application-wide font settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSettings {
    pub family: String,
    /// Stylesheet URL imported ahead of the generated rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_url: Option<String>,
}

impl Schema {
    /// A schema with no themes or controls
    ///
    /// Not valid on its own; use [`crate::presets::seed_schema`] or
    /// [`crate::ops::heal`] to obtain one that satisfies the invariants.
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            themes: Vec::new(),
            global: GlobalTokens::default(),
            components: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|t| t == theme)
    }

    pub fn has_component(&self, control: &str) -> bool {
        self.components.contains_key(control)
    }

    /// Control ids in insertion order
    pub fn control_ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Raw override cell, if present
    pub fn cell(&self, control: &str, theme: &str, state: State) -> Option<&TokenSet> {
        self.components.get(control)?.get(theme)?.get(&state)
    }

    /// Raw body tokens for a theme, if present
    pub fn body(&self, theme: &str) -> Option<&TokenSet> {
        self.global.body.get(theme)
    }

    /// Mutable cell, creating intermediate maps on demand
    pub(crate) fn cell_mut(&mut self, control: &str, theme: &str, state: State) -> &mut TokenSet {
        self.components
            .entry(control.to_string())
            .or_default()
            .entry(theme.to_string())
            .or_default()
            .entry(state)
            .or_default()
    }
}
