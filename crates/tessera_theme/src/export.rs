//! Read-only export views and JSON import

use crate::alias::{AliasConfig, Slot, ThemeAliases, ThemeScope};
use crate::css::{body_slot_var, body_var, distinct_idents, physical_var, slot_var};
use crate::error::ImportError;
use crate::ops::heal;
use crate::resolve::{resolve, resolve_body};
use crate::schema::{ControlId, ControlThemes, GlobalTokens, Schema, ThemeId};
use crate::state::State;
use crate::tokens::TokenKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical snapshot limited to the aliased themes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExport {
    #[serde(rename = "$version")]
    pub version: u32,
    pub aliases: ThemeAliases,
    pub initial_slot: Slot,
    pub themes: Vec<ThemeId>,
    pub components: IndexMap<ControlId, ControlThemes>,
    pub global: GlobalTokens,
}

impl ThemeExport {
    pub fn new(schema: &Schema, config: &AliasConfig) -> Self {
        let themes: Vec<ThemeId> = config
            .aliases
            .themes_in(ThemeScope::Both)
            .into_iter()
            .filter(|theme| schema.has_theme(theme))
            .map(str::to_string)
            .collect();

        let components = schema
            .components
            .iter()
            .map(|(control, per_theme)| {
                let kept = per_theme
                    .iter()
                    .filter(|(theme, _)| themes.contains(theme))
                    .map(|(theme, states)| (theme.clone(), states.clone()))
                    .collect();
                (control.clone(), kept)
            })
            .collect();

        let body = schema
            .global
            .body
            .iter()
            .filter(|(theme, _)| themes.contains(theme))
            .map(|(theme, tokens)| (theme.clone(), tokens.clone()))
            .collect();

        Self {
            version: schema.version,
            aliases: config.aliases.clone(),
            initial_slot: config.initial_slot,
            themes,
            components,
            global: GlobalTokens {
                body,
                font: schema.global.font.clone(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Pretty JSON export of a schema under an alias config
pub fn export_json(schema: &Schema, config: &AliasConfig) -> Result<String, serde_json::Error> {
    ThemeExport::new(schema, config).to_json()
}

// ========== Import ==========

/// A healed schema plus the alias config the payload carried, if any
#[derive(Clone, Debug, PartialEq)]
pub struct Imported {
    pub schema: Schema,
    pub aliases: Option<AliasConfig>,
}

/// Import either a schema snapshot or a [`ThemeExport`] payload
///
/// Missing themes, controls and cells are synthesized by the same heal pass
/// used at load time. A malformed alias section is ignored rather than
/// rejected.
pub fn import_json(json: &str) -> Result<Imported, ImportError> {
    let serde_json::Value::Object(mut map) = serde_json::from_str(json)? else {
        return Err(ImportError::NotAnObject);
    };

    let initial_slot = map
        .remove("initialSlot")
        .and_then(|v| serde_json::from_value::<Slot>(v).ok())
        .unwrap_or_default();
    let aliases = map.remove("aliases").and_then(|v| {
        serde_json::from_value::<ThemeAliases>(v)
            .map_err(|err| tracing::debug!(%err, "Ignoring malformed aliases in import"))
            .ok()
    });

    let schema: Schema = serde_json::from_value(serde_json::Value::Object(map))?;
    Ok(Imported {
        schema: heal(&schema),
        aliases: aliases.map(|a| AliasConfig::new(a, initial_slot)),
    })
}

// ========== Variable Listing ==========

/// Which tier a listed variable belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableTier {
    /// Resolved value for one physical theme
    Physical,
    /// Slot-generic reference declared in an alias remap block
    Alias,
}

/// One emitted CSS variable
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableEntry {
    pub name: String,
    pub value: String,
    pub tier: VariableTier,
    pub slot: Option<Slot>,
    pub theme: ThemeId,
    /// `None` for body variables
    pub control: Option<ControlId>,
    /// `None` for body variables
    pub state: Option<State>,
    pub property: TokenKey,
}

/// Filter axes for [`list_variables`]; an unset axis matches everything
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableFilter {
    #[serde(default)]
    pub scope: ThemeScope,
    /// Control id, or `body` for body variables
    pub control: Option<ControlId>,
    pub state: Option<State>,
    pub property: Option<TokenKey>,
    /// Case-insensitive substring of the name or value
    pub search: Option<String>,
}

impl VariableFilter {
    fn matches(&self, entry: &VariableEntry) -> bool {
        if let Some(control) = &self.control {
            let id = entry.control.as_deref().unwrap_or("body");
            if id != control {
                return false;
            }
        }
        if self.state.is_some() && entry.state != self.state {
            return false;
        }
        if self.property.is_some_and(|p| p != entry.property) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = needle.to_lowercase();
            return entry.name.to_lowercase().contains(&needle)
                || entry.value.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Flat list of every variable the stylesheet would emit for the scoped
/// slots, physical tier first
pub fn list_variables(
    schema: &Schema,
    aliases: &ThemeAliases,
    filter: &VariableFilter,
) -> Vec<VariableEntry> {
    let mut entries = Vec::new();

    let slots: Vec<(Slot, &str)> = filter
        .scope
        .slots()
        .iter()
        .map(|&slot| (slot, aliases.resolve(slot)))
        .filter(|(_, theme)| schema.has_theme(theme))
        .collect();

    let mut seen: Vec<&str> = Vec::new();
    for &(_, theme) in &slots {
        if seen.contains(&theme) {
            continue;
        }
        seen.push(theme);

        for (key, value) in resolve_body(schema, theme).iter() {
            entries.push(VariableEntry {
                name: body_var(key, theme),
                value: key.css_value(&value),
                tier: VariableTier::Physical,
                slot: None,
                theme: theme.to_string(),
                control: None,
                state: None,
                property: key,
            });
        }
        for control in distinct_idents(schema.control_ids()) {
            for state in State::ALL {
                for (key, value) in resolve(schema, control, theme, state).iter() {
                    entries.push(VariableEntry {
                        name: physical_var(control, key, theme, state),
                        value: key.css_value(&value),
                        tier: VariableTier::Physical,
                        slot: None,
                        theme: theme.to_string(),
                        control: Some(control.to_string()),
                        state: Some(state),
                        property: key,
                    });
                }
            }
        }
    }

    for &(slot, theme) in &slots {
        for key in TokenKey::ALL {
            entries.push(VariableEntry {
                name: body_slot_var(key),
                value: format!("var({})", body_var(key, theme)),
                tier: VariableTier::Alias,
                slot: Some(slot),
                theme: theme.to_string(),
                control: None,
                state: None,
                property: key,
            });
        }
        for control in distinct_idents(schema.control_ids()) {
            for state in State::ALL {
                for key in TokenKey::ALL {
                    entries.push(VariableEntry {
                        name: slot_var(control, key, state),
                        value: format!("var({})", physical_var(control, key, theme, state)),
                        tier: VariableTier::Alias,
                        slot: Some(slot),
                        theme: theme.to_string(),
                        control: Some(control.to_string()),
                        state: Some(state),
                        property: key,
                    });
                }
            }
        }
    }

    entries.retain(|entry| filter.matches(entry));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::seed_schema;

    #[test]
    fn rejects_non_object_payloads() {
        assert!(matches!(import_json("[1, 2]"), Err(ImportError::NotAnObject)));
        assert!(matches!(import_json("{"), Err(ImportError::Json(_))));
    }

    #[test]
    fn search_matches_name_or_value() {
        let filter = VariableFilter {
            control: Some("button".into()),
            state: Some(State::Rest),
            property: Some(TokenKey::BackgroundColor),
            search: Some("FFFFFF".into()),
            ..VariableFilter::default()
        };
        let found = list_variables(&seed_schema(), &ThemeAliases::default(), &filter);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.tier == VariableTier::Physical));
        assert_eq!(found[0].name, "--button-backgroundColor-light-rest");
    }

    #[test]
    fn body_filter_selects_body_variables() {
        let filter = VariableFilter {
            scope: ThemeScope::Dark,
            control: Some("body".into()),
            ..VariableFilter::default()
        };
        let found = list_variables(&seed_schema(), &ThemeAliases::default(), &filter);
        assert_eq!(found.len(), TokenKey::ALL.len() * 2);
        assert!(found.iter().all(|e| e.theme == "dark" && e.control.is_none()));
    }
}
