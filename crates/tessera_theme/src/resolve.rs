//! Token resolution
//!
//! The single authority on what a cell actually renders with:
//! defaults < the theme's `rest` overrides < the requested state's overrides.
//! Merging is property-by-property; resolution never mutates the schema and
//! treats missing maps as empty.

use crate::schema::Schema;
use crate::state::State;
use crate::tokens::TokenSet;

/// Fully materialized token set for a (control, theme, state) cell
pub fn resolve(schema: &Schema, control: &str, theme: &str, state: State) -> TokenSet {
    let mut tokens = TokenSet::defaults();
    let Some(themes) = schema.components.get(control).and_then(|c| c.get(theme)) else {
        return tokens;
    };

    if let Some(rest) = themes.get(&State::Rest) {
        tokens.merge(rest);
    }
    if !state.is_rest() {
        if let Some(overrides) = themes.get(&state) {
            tokens.merge(overrides);
        }
    }
    tokens
}

/// Fully materialized body tokens for a theme
pub fn resolve_body(schema: &Schema, theme: &str) -> TokenSet {
    let mut tokens = TokenSet::defaults();
    if let Some(body) = schema.body(theme) {
        tokens.merge(body);
    }
    tokens
}
