//! Structural schema operations
//!
//! Every public function here is total: it takes a schema and returns a new
//! one, and an invalid request (rename collision, removing the last theme, an
//! unknown source) returns an unchanged copy. Callers detect a no-op by
//! comparing values. The checked forms live behind [`crate::Command::try_apply`].
//!
//! Invariants kept by every operation:
//! - every listed theme has a body entry and a state map in every control
//! - every (control, theme) pair has a fully-defaulted `rest` cell
//! - at least one theme and one control exist

use crate::css::css_ident;
use crate::error::SchemaError;
use crate::presets::{BASE_CONTROLS, FALLBACK_CONTROL, SEED_THEMES};
use crate::resolve::resolve;
use crate::schema::{FontSettings, Schema, StateMap, SCHEMA_VERSION};
use crate::state::State;
use crate::tokens::{TokenKey, TokenSet};
use indexmap::IndexMap;

pub(crate) type OpResult = Result<(), SchemaError>;

fn total(schema: &Schema, op: &'static str, f: impl FnOnce(&mut Schema) -> OpResult) -> Schema {
    let mut next = schema.clone();
    match f(&mut next) {
        Ok(()) => next,
        Err(err) => {
            tracing::debug!(op, %err, "Schema operation skipped");
            schema.clone()
        }
    }
}

// ========== Token Edits ==========

/// Shallow-merge `patch` into the override cell at (theme, control, state)
///
/// Missing controls and themes are created on demand with their full shape.
pub fn update_tokens(
    schema: &Schema,
    theme: &str,
    control: &str,
    state: State,
    patch: &TokenSet,
) -> Schema {
    total(schema, "update_tokens", |s| {
        update_tokens_in(s, theme, control, state, patch)
    })
}

/// Drop one property from a cell's overrides
///
/// For `rest` the property is reset to its default instead, since `rest`
/// stays fully populated.
pub fn unset_token(schema: &Schema, theme: &str, control: &str, state: State, key: TokenKey) -> Schema {
    total(schema, "unset_token", |s| unset_token_in(s, theme, control, state, key))
}

/// Overwrite a state's overrides with the resolved `rest` tokens
pub fn copy_rest_to_state(schema: &Schema, theme: &str, control: &str, state: State) -> Schema {
    total(schema, "copy_rest_to_state", |s| {
        copy_rest_to_state_in(s, theme, control, state)
    })
}

/// [`copy_rest_to_state`] for every non-rest state
pub fn copy_rest_to_all_states(schema: &Schema, theme: &str, control: &str) -> Schema {
    total(schema, "copy_rest_to_all_states", |s| {
        copy_rest_to_all_states_in(s, theme, control)
    })
}

/// Empty a non-rest cell; no-op for `rest`
pub fn clear_state_overrides(schema: &Schema, theme: &str, control: &str, state: State) -> Schema {
    total(schema, "clear_state_overrides", |s| {
        clear_state_overrides_in(s, theme, control, state)
    })
}

/// Shallow-merge `patch` into a theme's body tokens
pub fn update_body(schema: &Schema, theme: &str, patch: &TokenSet) -> Schema {
    total(schema, "update_body", |s| update_body_in(s, theme, patch))
}

/// Drop one body property so it falls back to the default
pub fn unset_body_token(schema: &Schema, theme: &str, key: TokenKey) -> Schema {
    total(schema, "unset_body_token", |s| unset_body_token_in(s, theme, key))
}

/// Replace the global font settings
pub fn set_font(schema: &Schema, font: Option<FontSettings>) -> Schema {
    let mut next = schema.clone();
    next.global.font = font;
    next
}

// ========== Theme Lifecycle ==========

/// Make sure `theme` exists everywhere, cloning `base`'s shape for missing
/// entries (or seeding from defaults). Idempotent.
pub fn ensure_theme(schema: &Schema, theme: &str, base: Option<&str>) -> Schema {
    total(schema, "ensure_theme", |s| ensure_theme_in(s, theme, base))
}

/// Rename a theme in the theme list, the body map and every control
pub fn rename_theme(schema: &Schema, old: &str, new: &str) -> Schema {
    total(schema, "rename_theme", |s| rename_theme_in(s, old, new))
}

/// Delete a theme everywhere; no-op for the last theme
pub fn remove_theme(schema: &Schema, theme: &str) -> Schema {
    total(schema, "remove_theme", |s| remove_theme_in(s, theme))
}

// ========== Control Lifecycle ==========

/// Make sure a control exists with a full shape for every theme. Idempotent.
pub fn ensure_component(schema: &Schema, key: &str) -> Schema {
    total(schema, "ensure_component", |s| ensure_component_in(s, key))
}

pub fn duplicate_component(schema: &Schema, from: &str, to: &str) -> Schema {
    total(schema, "duplicate_component", |s| duplicate_component_in(s, from, to))
}

pub fn rename_component(schema: &Schema, from: &str, to: &str) -> Schema {
    total(schema, "rename_component", |s| rename_component_in(s, from, to))
}

/// Delete a control; removing the last one re-creates the fallback control
pub fn remove_component(schema: &Schema, key: &str) -> Schema {
    total(schema, "remove_component", |s| remove_component_in(s, key))
}

/// Repair a loaded or imported schema so every invariant holds
///
/// Missing themes, body entries, controls and cells are synthesized; nothing
/// present is discarded.
pub fn heal(schema: &Schema) -> Schema {
    let mut s = schema.clone();
    if s.version == 0 {
        s.version = SCHEMA_VERSION;
    }

    let mut themes: Vec<String> = Vec::with_capacity(s.themes.len());
    for theme in &s.themes {
        if !theme.trim().is_empty() && !themes.contains(theme) {
            themes.push(theme.clone());
        }
    }
    if themes.is_empty() {
        let discovered = s
            .global
            .body
            .keys()
            .chain(s.components.values().flat_map(|c| c.keys()));
        for theme in discovered {
            if !theme.trim().is_empty() && !themes.contains(theme) {
                themes.push(theme.clone());
            }
        }
    }
    if themes.is_empty() {
        themes = SEED_THEMES.iter().map(|t| t.to_string()).collect();
    }
    s.themes = themes.clone();

    if s.components.is_empty() {
        for control in BASE_CONTROLS {
            s.components.insert(control.to_string(), IndexMap::new());
        }
    }

    for theme in &themes {
        if let Err(err) = ensure_theme_in(&mut s, theme, None) {
            tracing::debug!(%err, %theme, "Heal skipped theme");
        }
    }
    let controls: Vec<String> = s.components.keys().cloned().collect();
    for control in controls {
        if let Err(err) = ensure_component_in(&mut s, &control) {
            tracing::debug!(%err, "Heal dropped control with empty id");
            s.components.shift_remove(&control);
        }
    }
    if s.components.is_empty() {
        if let Err(err) = ensure_component_in(&mut s, FALLBACK_CONTROL) {
            tracing::debug!(%err, control = FALLBACK_CONTROL, "Heal could not restore fallback control");
        }
    }
    s
}

// ========== In-place Implementations ==========

/// State map for a fresh (control, theme) pair
pub(crate) fn default_state_map() -> StateMap {
    State::ALL
        .into_iter()
        .map(|state| {
            let tokens = if state.is_rest() {
                TokenSet::defaults()
            } else {
                TokenSet::new()
            };
            (state, tokens)
        })
        .collect()
}

/// Fill `rest` with defaults, add empty cells for missing states, and put the
/// states in canonical order
fn heal_state_map(states: &mut StateMap) {
    let rest = states.entry(State::Rest).or_default();
    *rest = TokenSet::defaults().merged(rest);
    for state in State::overrides() {
        states.entry(state).or_default();
    }
    states.sort_keys();
}

fn require_id(id: &str) -> OpResult {
    if id.trim().is_empty() {
        return Err(SchemaError::EmptyIdentifier);
    }
    Ok(())
}

fn require_theme(s: &Schema, theme: &str) -> OpResult {
    if !s.has_theme(theme) {
        return Err(SchemaError::ThemeNotFound(theme.to_string()));
    }
    Ok(())
}

fn require_component(s: &Schema, control: &str) -> OpResult {
    if !s.has_component(control) {
        return Err(SchemaError::ComponentNotFound(control.to_string()));
    }
    Ok(())
}

/// An existing id, other than `candidate` and `except`, that would emit the
/// same CSS variable names as `candidate`
fn css_twin<'a>(
    mut ids: impl Iterator<Item = &'a str>,
    candidate: &str,
    except: Option<&str>,
) -> Option<String> {
    let ident = css_ident(candidate);
    ids.find(|id| *id != candidate && Some(*id) != except && css_ident(id) == ident)
        .map(str::to_string)
}

fn require_distinct_theme(s: &Schema, theme: &str, except: Option<&str>) -> OpResult {
    match css_twin(s.themes.iter().map(String::as_str), theme, except) {
        Some(twin) => Err(SchemaError::ThemeExists(twin)),
        None => Ok(()),
    }
}

fn require_distinct_component(s: &Schema, control: &str, except: Option<&str>) -> OpResult {
    match css_twin(s.control_ids(), control, except) {
        Some(twin) => Err(SchemaError::ComponentExists(twin)),
        None => Ok(()),
    }
}

/// Rename a map key in place, keeping its position
fn rename_key<V>(map: &mut IndexMap<String, V>, old: &str, new: &str) {
    if let Some((index, _, value)) = map.shift_remove_full(old) {
        map.shift_insert(index, new.to_string(), value);
    }
}

pub(crate) fn update_tokens_in(
    s: &mut Schema,
    theme: &str,
    control: &str,
    state: State,
    patch: &TokenSet,
) -> OpResult {
    require_id(theme)?;
    require_id(control)?;
    if !s.has_theme(theme) {
        ensure_theme_in(s, theme, None)?;
    }
    if !s.has_component(control) {
        ensure_component_in(s, control)?;
    }
    s.cell_mut(control, theme, state).merge(patch);
    Ok(())
}

pub(crate) fn unset_token_in(
    s: &mut Schema,
    theme: &str,
    control: &str,
    state: State,
    key: TokenKey,
) -> OpResult {
    let Some(cell) = s
        .components
        .get_mut(control)
        .and_then(|c| c.get_mut(theme))
        .and_then(|t| t.get_mut(&state))
    else {
        return Ok(());
    };

    if state.is_rest() {
        if let Some(default) = TokenSet::defaults().get(key) {
            cell.set(key, default);
        }
    } else {
        cell.remove(key);
    }
    Ok(())
}

pub(crate) fn copy_rest_to_state_in(
    s: &mut Schema,
    theme: &str,
    control: &str,
    state: State,
) -> OpResult {
    require_theme(s, theme)?;
    require_component(s, control)?;
    if state.is_rest() {
        return Ok(());
    }
    let rest = resolve(s, control, theme, State::Rest);
    *s.cell_mut(control, theme, state) = rest;
    Ok(())
}

pub(crate) fn copy_rest_to_all_states_in(s: &mut Schema, theme: &str, control: &str) -> OpResult {
    require_theme(s, theme)?;
    require_component(s, control)?;
    let rest = resolve(s, control, theme, State::Rest);
    for state in State::overrides() {
        *s.cell_mut(control, theme, state) = rest.clone();
    }
    Ok(())
}

pub(crate) fn clear_state_overrides_in(
    s: &mut Schema,
    theme: &str,
    control: &str,
    state: State,
) -> OpResult {
    require_theme(s, theme)?;
    require_component(s, control)?;
    if state.is_rest() {
        return Ok(());
    }
    *s.cell_mut(control, theme, state) = TokenSet::new();
    Ok(())
}

pub(crate) fn update_body_in(s: &mut Schema, theme: &str, patch: &TokenSet) -> OpResult {
    require_id(theme)?;
    if !s.has_theme(theme) {
        ensure_theme_in(s, theme, None)?;
    }
    s.global
        .body
        .entry(theme.to_string())
        .or_default()
        .merge(patch);
    Ok(())
}

pub(crate) fn unset_body_token_in(s: &mut Schema, theme: &str, key: TokenKey) -> OpResult {
    if let Some(body) = s.global.body.get_mut(theme) {
        body.remove(key);
    }
    Ok(())
}

pub(crate) fn ensure_theme_in(s: &mut Schema, theme: &str, base: Option<&str>) -> OpResult {
    require_id(theme)?;
    if !s.has_theme(theme) {
        require_distinct_theme(s, theme, None)?;
    }
    let base = base.filter(|b| *b != theme && s.has_theme(b));

    if !s.global.body.contains_key(theme) {
        let body = base
            .and_then(|b| s.global.body.get(b))
            .cloned()
            .unwrap_or_else(TokenSet::defaults);
        s.global.body.insert(theme.to_string(), body);
    }

    for themes in s.components.values_mut() {
        if !themes.contains_key(theme) {
            let shape = base
                .and_then(|b| themes.get(b))
                .cloned()
                .unwrap_or_else(default_state_map);
            themes.insert(theme.to_string(), shape);
        }
        if let Some(states) = themes.get_mut(theme) {
            heal_state_map(states);
        }
    }

    if !s.has_theme(theme) {
        s.themes.push(theme.to_string());
    }
    Ok(())
}

pub(crate) fn rename_theme_in(s: &mut Schema, old: &str, new: &str) -> OpResult {
    require_id(new)?;
    require_theme(s, old)?;
    if s.has_theme(new) {
        return Err(SchemaError::ThemeExists(new.to_string()));
    }
    require_distinct_theme(s, new, Some(old))?;

    for theme in s.themes.iter_mut().filter(|t| t.as_str() == old) {
        *theme = new.to_string();
    }
    // Stale entries under the new name (left over from partial data) are replaced
    s.global.body.shift_remove(new);
    rename_key(&mut s.global.body, old, new);
    for themes in s.components.values_mut() {
        themes.shift_remove(new);
        rename_key(themes, old, new);
    }
    Ok(())
}

pub(crate) fn remove_theme_in(s: &mut Schema, theme: &str) -> OpResult {
    require_theme(s, theme)?;
    if s.themes.len() <= 1 {
        return Err(SchemaError::LastTheme(theme.to_string()));
    }

    s.themes.retain(|t| t != theme);
    s.global.body.shift_remove(theme);
    for themes in s.components.values_mut() {
        themes.shift_remove(theme);
    }
    Ok(())
}

pub(crate) fn ensure_component_in(s: &mut Schema, key: &str) -> OpResult {
    require_id(key)?;
    if !s.has_component(key) {
        require_distinct_component(s, key, None)?;
    }
    let themes = s.themes.clone();
    let control = s.components.entry(key.to_string()).or_default();
    for theme in themes {
        let states = control.entry(theme).or_insert_with(default_state_map);
        heal_state_map(states);
    }
    Ok(())
}

pub(crate) fn duplicate_component_in(s: &mut Schema, from: &str, to: &str) -> OpResult {
    require_id(to)?;
    require_component(s, from)?;
    if s.has_component(to) {
        return Err(SchemaError::ComponentExists(to.to_string()));
    }
    require_distinct_component(s, to, None)?;

    if let Some(source) = s.components.get(from).cloned() {
        s.components.insert(to.to_string(), source);
    }
    ensure_component_in(s, to)
}

pub(crate) fn rename_component_in(s: &mut Schema, from: &str, to: &str) -> OpResult {
    require_id(to)?;
    require_component(s, from)?;
    if s.has_component(to) {
        return Err(SchemaError::ComponentExists(to.to_string()));
    }
    require_distinct_component(s, to, Some(from))?;

    rename_key(&mut s.components, from, to);
    Ok(())
}

pub(crate) fn remove_component_in(s: &mut Schema, key: &str) -> OpResult {
    require_component(s, key)?;
    s.components.shift_remove(key);
    if s.components.is_empty() {
        tracing::debug!(removed = key, fallback = FALLBACK_CONTROL, "Re-creating fallback control");
        ensure_component_in(s, FALLBACK_CONTROL)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::seed_schema;

    #[test]
    fn rename_key_keeps_position() {
        let mut map: IndexMap<String, u8> = IndexMap::new();
        map.insert("a".into(), 1);
        map.insert("b".into(), 2);
        map.insert("c".into(), 3);
        rename_key(&mut map, "b", "z");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "z", "c"]);
    }

    #[test]
    fn heal_orders_states_canonically() {
        let mut schema = seed_schema();
        let states = schema
            .components
            .get_mut("button")
            .and_then(|c| c.get_mut("light"))
            .unwrap();
        states.shift_remove(&State::Rest);
        states.insert(State::Rest, TokenSet::new());

        let healed = heal(&schema);
        let order: Vec<State> = healed.components["button"]["light"].keys().copied().collect();
        assert_eq!(order, State::ALL.to_vec());
        assert_eq!(healed.components["button"]["light"][&State::Rest], TokenSet::defaults());
    }

    #[test]
    fn ids_sharing_a_css_identifier_are_rejected() {
        let schema = ensure_component(&seed_schema(), "nav-item");
        let schema = ensure_theme(&schema, "high-contrast", None);
        assert_eq!(ensure_component(&schema, "nav item"), schema);
        assert_eq!(duplicate_component(&schema, "button", "nav.item"), schema);
        assert_eq!(rename_component(&schema, "button", "nav item"), schema);
        assert_eq!(ensure_theme(&schema, "high contrast", None), schema);
        assert_eq!(rename_theme(&schema, "light", "high.contrast"), schema);

        let mut s = schema.clone();
        assert_eq!(
            update_tokens_in(&mut s, "light", "nav item", State::Rest, &TokenSet::new()),
            Err(SchemaError::ComponentExists("nav-item".into()))
        );

        let renamed = rename_component(&schema, "nav-item", "nav item");
        assert!(renamed.has_component("nav item"));
        let renamed = rename_theme(&schema, "high-contrast", "high contrast");
        assert!(renamed.has_theme("high contrast"));
    }

    #[test]
    fn heal_restores_fallback_when_only_blank_controls_remain() {
        let mut schema = seed_schema();
        schema.components.clear();
        schema.components.insert("  ".to_string(), IndexMap::new());

        let healed = heal(&schema);
        assert_eq!(healed.control_ids().collect::<Vec<_>>(), vec![FALLBACK_CONTROL]);
        assert_eq!(
            healed.cell(FALLBACK_CONTROL, "dark", State::Rest),
            Some(&TokenSet::defaults())
        );
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        let schema = seed_schema();
        assert_eq!(ensure_component(&schema, "  "), schema);
        assert_eq!(rename_theme(&schema, "light", ""), schema);
    }
}
