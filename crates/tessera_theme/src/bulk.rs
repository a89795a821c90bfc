//! Bulk copy of resolved tokens between controls
//!
//! Copies bake inheritance in: the source's *resolved* values are written as
//! explicit overrides on each target, so later edits to the source never leak
//! into the targets.

use crate::alias::{ThemeAliases, ThemeScope};
use crate::error::SchemaError;
use crate::ops::{self, OpResult};
use crate::resolve::resolve;
use crate::schema::{ControlId, Schema};
use crate::state::State;
use crate::tokens::TokenKey;
use serde::{Deserialize, Serialize};

/// What to copy, from where, to where
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCopyRequest {
    pub source_control: ControlId,
    pub target_controls: Vec<ControlId>,
    #[serde(default)]
    pub theme_scope: ThemeScope,
    /// Properties to copy; empty means every property
    #[serde(default)]
    pub properties: Vec<TokenKey>,
    /// States to copy; empty means every state
    #[serde(default)]
    pub states: Vec<State>,
    /// Write every copied state into this state instead of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_state: Option<State>,
}

impl BulkCopyRequest {
    pub fn new(source: impl Into<ControlId>, targets: impl IntoIterator<Item = impl Into<ControlId>>) -> Self {
        Self {
            source_control: source.into(),
            target_controls: targets.into_iter().map(Into::into).collect(),
            theme_scope: ThemeScope::Both,
            properties: Vec::new(),
            states: Vec::new(),
            target_state: None,
        }
    }

    pub fn scope(mut self, scope: ThemeScope) -> Self {
        self.theme_scope = scope;
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = TokenKey>) -> Self {
        self.properties = properties.into_iter().collect();
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    pub fn into_state(mut self, state: State) -> Self {
        self.target_state = Some(state);
        self
    }

    fn selected_properties(&self) -> Vec<TokenKey> {
        if self.properties.is_empty() {
            TokenKey::ALL.to_vec()
        } else {
            self.properties.clone()
        }
    }

    fn selected_states(&self) -> Vec<State> {
        if self.states.is_empty() {
            State::ALL.to_vec()
        } else {
            self.states.clone()
        }
    }
}

/// Copy resolved source tokens into every target
///
/// Unknown source controls and themes are skipped. The source is never
/// written over the very cell it was read from.
pub fn bulk_copy(schema: &Schema, aliases: &ThemeAliases, request: &BulkCopyRequest) -> Schema {
    let mut next = schema.clone();
    match bulk_copy_in(&mut next, aliases, request) {
        Ok(()) => next,
        Err(err) => {
            tracing::debug!(%err, source = %request.source_control, "Bulk copy skipped");
            schema.clone()
        }
    }
}

pub(crate) fn bulk_copy_in(s: &mut Schema, aliases: &ThemeAliases, request: &BulkCopyRequest) -> OpResult {
    if !s.has_component(&request.source_control) {
        return Err(SchemaError::ComponentNotFound(request.source_control.clone()));
    }

    let properties = request.selected_properties();
    let states = request.selected_states();
    let themes: Vec<String> = aliases
        .themes_in(request.theme_scope)
        .into_iter()
        .filter(|theme| {
            let known = s.has_theme(theme);
            if !known {
                tracing::debug!(theme, "Bulk copy skipping dangling alias");
            }
            known
        })
        .map(str::to_string)
        .collect();

    for theme in &themes {
        for &state in &states {
            let patch = resolve(s, &request.source_control, theme, state).pick(&properties);
            let write_state = request.target_state.unwrap_or(state);
            for target in &request.target_controls {
                if *target == request.source_control && write_state == state {
                    continue;
                }
                tracing::trace!(%target, %theme, %state, %write_state, "Bulk copy write");
                ops::update_tokens_in(s, theme, target, write_state, &patch)?;
            }
        }
    }
    Ok(())
}
