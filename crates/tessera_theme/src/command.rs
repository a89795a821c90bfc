//! Serializable schema edits
//!
//! A [`Command`] names one schema operation with its arguments, so edits can
//! be scripted, logged or replayed. JSON form is internally tagged by `op`:
//!
//! ```json
//! {"op": "updateTokens", "theme": "dark", "control": "button", "state": "rest",
//!  "patch": {"backgroundColor": "#111"}}
//! ```

use crate::alias::ThemeAliases;
use crate::bulk::{self, BulkCopyRequest};
use crate::error::SchemaError;
use crate::ops;
use crate::presets::ThemePreset;
use crate::schema::{ControlId, FontSettings, Schema, ThemeId};
use crate::state::State;
use crate::tokens::{TokenKey, TokenSet};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    UpdateTokens {
        theme: ThemeId,
        control: ControlId,
        state: State,
        patch: TokenSet,
    },
    UnsetToken {
        theme: ThemeId,
        control: ControlId,
        state: State,
        key: TokenKey,
    },
    CopyRestToState {
        theme: ThemeId,
        control: ControlId,
        state: State,
    },
    CopyRestToAllStates {
        theme: ThemeId,
        control: ControlId,
    },
    ClearStateOverrides {
        theme: ThemeId,
        control: ControlId,
        state: State,
    },
    UpdateBody {
        theme: ThemeId,
        patch: TokenSet,
    },
    UnsetBodyToken {
        theme: ThemeId,
        key: TokenKey,
    },
    SetFont {
        #[serde(default)]
        font: Option<FontSettings>,
    },
    EnsureTheme {
        theme: ThemeId,
        #[serde(default)]
        base: Option<ThemeId>,
    },
    RenameTheme {
        from: ThemeId,
        to: ThemeId,
    },
    RemoveTheme {
        theme: ThemeId,
    },
    EnsureComponent {
        control: ControlId,
    },
    DuplicateComponent {
        from: ControlId,
        to: ControlId,
    },
    RenameComponent {
        from: ControlId,
        to: ControlId,
    },
    RemoveComponent {
        control: ControlId,
    },
    BulkCopy(BulkCopyRequest),
    ApplyPreset {
        theme: ThemeId,
        preset: ThemePreset,
    },
}

impl Command {
    /// Short operation name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::UpdateTokens { .. } => "updateTokens",
            Command::UnsetToken { .. } => "unsetToken",
            Command::CopyRestToState { .. } => "copyRestToState",
            Command::CopyRestToAllStates { .. } => "copyRestToAllStates",
            Command::ClearStateOverrides { .. } => "clearStateOverrides",
            Command::UpdateBody { .. } => "updateBody",
            Command::UnsetBodyToken { .. } => "unsetBodyToken",
            Command::SetFont { .. } => "setFont",
            Command::EnsureTheme { .. } => "ensureTheme",
            Command::RenameTheme { .. } => "renameTheme",
            Command::RemoveTheme { .. } => "removeTheme",
            Command::EnsureComponent { .. } => "ensureComponent",
            Command::DuplicateComponent { .. } => "duplicateComponent",
            Command::RenameComponent { .. } => "renameComponent",
            Command::RemoveComponent { .. } => "removeComponent",
            Command::BulkCopy(_) => "bulkCopy",
            Command::ApplyPreset { .. } => "applyPreset",
        }
    }

    /// Apply, turning structural conflicts into an unchanged copy
    pub fn apply(&self, schema: &Schema, aliases: &ThemeAliases) -> Schema {
        match self.try_apply(schema, aliases) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(op = self.name(), %err, "Command skipped");
                schema.clone()
            }
        }
    }

    /// Apply, reporting why a command could not take effect
    pub fn try_apply(&self, schema: &Schema, aliases: &ThemeAliases) -> Result<Schema, SchemaError> {
        let mut s = schema.clone();
        match self {
            Command::UpdateTokens {
                theme,
                control,
                state,
                patch,
            } => ops::update_tokens_in(&mut s, theme, control, *state, patch)?,
            Command::UnsetToken {
                theme,
                control,
                state,
                key,
            } => ops::unset_token_in(&mut s, theme, control, *state, *key)?,
            Command::CopyRestToState {
                theme,
                control,
                state,
            } => ops::copy_rest_to_state_in(&mut s, theme, control, *state)?,
            Command::CopyRestToAllStates { theme, control } => {
                ops::copy_rest_to_all_states_in(&mut s, theme, control)?
            }
            Command::ClearStateOverrides {
                theme,
                control,
                state,
            } => ops::clear_state_overrides_in(&mut s, theme, control, *state)?,
            Command::UpdateBody { theme, patch } => ops::update_body_in(&mut s, theme, patch)?,
            Command::UnsetBodyToken { theme, key } => ops::unset_body_token_in(&mut s, theme, *key)?,
            Command::SetFont { font } => s.global.font = font.clone(),
            Command::EnsureTheme { theme, base } => {
                ops::ensure_theme_in(&mut s, theme, base.as_deref())?
            }
            Command::RenameTheme { from, to } => ops::rename_theme_in(&mut s, from, to)?,
            Command::RemoveTheme { theme } => ops::remove_theme_in(&mut s, theme)?,
            Command::EnsureComponent { control } => ops::ensure_component_in(&mut s, control)?,
            Command::DuplicateComponent { from, to } => {
                ops::duplicate_component_in(&mut s, from, to)?
            }
            Command::RenameComponent { from, to } => ops::rename_component_in(&mut s, from, to)?,
            Command::RemoveComponent { control } => ops::remove_component_in(&mut s, control)?,
            Command::BulkCopy(request) => bulk::bulk_copy_in(&mut s, aliases, request)?,
            Command::ApplyPreset { theme, preset } => preset.apply_in(&mut s, theme)?,
        }
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::seed_schema;

    #[test]
    fn parses_tagged_json() {
        let cmd: Command = serde_json::from_str(
            r##"{"op":"updateTokens","theme":"dark","control":"button","state":"rest","patch":{"backgroundColor":"#111"}}"##,
        )
        .unwrap();
        assert_eq!(cmd.name(), "updateTokens");

        let next = cmd.apply(&seed_schema(), &ThemeAliases::default());
        assert_eq!(
            next.cell("button", "dark", State::Rest)
                .and_then(|c| c.background_color.as_deref()),
            Some("#111")
        );
    }

    #[test]
    fn bulk_copy_is_a_flattened_request() {
        let cmd: Command = serde_json::from_str(
            r#"{"op":"bulkCopy","sourceControl":"button","targetControls":["input"],"properties":["borderRadius"]}"#,
        )
        .unwrap();
        assert!(matches!(&cmd, Command::BulkCopy(r) if r.target_controls == ["input"]));
    }

    #[test]
    fn try_apply_reports_conflicts_apply_swallows_them() {
        let schema = seed_schema();
        let cmd = Command::RenameTheme {
            from: "light".into(),
            to: "dark".into(),
        };
        assert_eq!(
            cmd.try_apply(&schema, &ThemeAliases::default()),
            Err(SchemaError::ThemeExists("dark".into()))
        );
        assert_eq!(cmd.apply(&schema, &ThemeAliases::default()), schema);
    }
}
