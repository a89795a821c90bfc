//! Light/dark alias slots
//!
//! The schema only knows physical theme ids. Which of them currently *is*
//! "light" or "dark" lives here, outside the schema, so themes can be renamed
//! or multiplied without touching the public vocabulary.
//!
//! Alias validity is host policy: the engine never rejects a dangling alias.
//! CSS generation simply omits that slot's remap block; [`ThemeAliases::validate`]
//! and [`ThemeAliases::repair`] let a host enforce it.

use crate::error::{AliasError, StoreError};
use crate::platform::KeyValueStore;
use crate::schema::{Schema, ThemeId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage key for the light alias
pub const KEY_ALIAS_LIGHT: &str = "aliasLight";
/// Storage key for the dark alias
pub const KEY_ALIAS_DARK: &str = "aliasDark";
/// Storage key for the initial slot
pub const KEY_INITIAL_SLOT: &str = "initialSlot";

/// Public theme slot
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    Light,
    Dark,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Light, Slot::Dark];

    /// Value of the `data-theme` attribute selecting this slot
    pub fn id(self) -> &'static str {
        match self {
            Slot::Light => "light",
            Slot::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Slot {
        match self {
            Slot::Light => Slot::Dark,
            Slot::Dark => Slot::Light,
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Slot {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Slot::Light),
            "dark" => Ok(Slot::Dark),
            _ => Err(()),
        }
    }
}

/// Which aliased slots an operation covers
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeScope {
    Light,
    Dark,
    #[default]
    Both,
}

impl ThemeScope {
    pub fn slots(self) -> &'static [Slot] {
        match self {
            ThemeScope::Light => &[Slot::Light],
            ThemeScope::Dark => &[Slot::Dark],
            ThemeScope::Both => &Slot::ALL,
        }
    }
}

impl FromStr for ThemeScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeScope::Light),
            "dark" => Ok(ThemeScope::Dark),
            "both" | "all" => Ok(ThemeScope::Both),
            _ => Err(()),
        }
    }
}

/// Slot → physical theme binding
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeAliases {
    pub light: ThemeId,
    pub dark: ThemeId,
}

impl ThemeAliases {
    pub fn new(light: impl Into<ThemeId>, dark: impl Into<ThemeId>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// Physical theme bound to a slot
    pub fn resolve(&self, slot: Slot) -> &str {
        match slot {
            Slot::Light => &self.light,
            Slot::Dark => &self.dark,
        }
    }

    pub fn set(&mut self, slot: Slot, theme: impl Into<ThemeId>) {
        match slot {
            Slot::Light => self.light = theme.into(),
            Slot::Dark => self.dark = theme.into(),
        }
    }

    /// Physical themes covered by a scope, deduplicated, in slot order
    pub fn themes_in(&self, scope: ThemeScope) -> Vec<&str> {
        let mut themes: Vec<&str> = Vec::with_capacity(2);
        for &slot in scope.slots() {
            let theme = self.resolve(slot);
            if !themes.contains(&theme) {
                themes.push(theme);
            }
        }
        themes
    }

    /// Slots whose target theme is missing from the schema
    pub fn dangling(&self, schema: &Schema) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|&slot| !schema.has_theme(self.resolve(slot)))
            .collect()
    }

    pub fn validate(&self, schema: &Schema) -> Result<(), AliasError> {
        match self.dangling(schema).first() {
            Some(&slot) => Err(AliasError::DanglingAlias {
                slot,
                theme: self.resolve(slot).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Keep slots pointing at a theme that was renamed
    pub fn follow_rename(&self, old: &str, new: &str) -> Self {
        let mut next = self.clone();
        for slot in Slot::ALL {
            if next.resolve(slot) == old {
                next.set(slot, new);
            }
        }
        next
    }

    /// Re-point dangling slots at the schema's first theme
    pub fn repair(&self, schema: &Schema) -> Self {
        let mut next = self.clone();
        let Some(first) = schema.themes.first() else {
            return next;
        };
        for slot in self.dangling(schema) {
            tracing::debug!(%slot, theme = self.resolve(slot), to = %first, "Repairing dangling alias");
            next.set(slot, first.clone());
        }
        next
    }
}

impl Default for ThemeAliases {
    fn default() -> Self {
        Self::new(Slot::Light.id(), Slot::Dark.id())
    }
}

/// Alias binding plus the slot active on first paint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasConfig {
    pub aliases: ThemeAliases,
    #[serde(default)]
    pub initial_slot: Slot,
}

impl AliasConfig {
    pub fn new(aliases: ThemeAliases, initial_slot: Slot) -> Self {
        Self {
            aliases,
            initial_slot,
        }
    }

    /// Physical theme active on first paint
    pub fn initial_theme(&self) -> &str {
        self.aliases.resolve(self.initial_slot)
    }

    /// Load from `aliasLight` / `aliasDark` / `initialSlot`
    ///
    /// Returns `None` when either alias key is absent. An unreadable initial
    /// slot falls back to light.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<AliasConfig>, StoreError> {
        let (Some(light), Some(dark)) = (store.get(KEY_ALIAS_LIGHT)?, store.get(KEY_ALIAS_DARK)?)
        else {
            return Ok(None);
        };
        let initial_slot = store
            .get(KEY_INITIAL_SLOT)?
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Ok(Some(AliasConfig::new(ThemeAliases::new(light, dark), initial_slot)))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(KEY_ALIAS_LIGHT, &self.aliases.light)?;
        store.set(KEY_ALIAS_DARK, &self.aliases.dark)?;
        store.set(KEY_INITIAL_SLOT, self.initial_slot.id())?;
        Ok(())
    }
}
