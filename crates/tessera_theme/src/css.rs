//! CSS custom property generation
//!
//! Two tiers of variables make runtime theme switching a single attribute flip:
//!
//! - **Physical variables**, one block per theme, hold resolved values:
//!   `--{control}-{property}-{theme}-{state}` and `--body-{property}-{theme}`.
//! - **Alias remap blocks**, `html[data-theme="light"]` / `"dark"`, point the
//!   slot-generic names (`--{control}-{property}-{state}`, `--body-{property}`)
//!   at whichever physical theme is bound to that slot.
//!
//! Wrapper rules only reference slot-generic names, so flipping `data-theme`
//! on the document root restyles everything through native variable
//! resolution.
//!
//! ```css
//! html[data-theme="dark"] {
//!   --button-backgroundColor-rest: var(--button-backgroundColor-midnight-rest);
//! }
//! .button { background: var(--button-backgroundColor-rest); }
//! ```

use crate::alias::{Slot, ThemeAliases};
use crate::resolve::{resolve, resolve_body};
use crate::schema::Schema;
use crate::state::State;
use crate::tokens::TokenKey;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// Generation switches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssOptions {
    /// Prepended to every wrapper class name
    pub selector_prefix: String,
    /// Emit per-control wrapper rules
    pub include_wrappers: bool,
    /// Emit the `body` rule
    pub include_body: bool,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            selector_prefix: String::new(),
            include_wrappers: true,
            include_body: true,
        }
    }
}

/// Wrapper selector suffix per state, in cascade order (later wins)
const WRAPPER_STATES: [State; 11] = [
    State::Rest,
    State::Hover,
    State::Focus,
    State::Active,
    State::Visited,
    State::Highlight,
    State::Highhover,
    State::Warning,
    State::Error,
    State::Disabled,
    State::Inert,
];

// ========== Variable Names ==========

/// `--{control}-{property}-{theme}-{state}`
pub fn physical_var(control: &str, key: TokenKey, theme: &str, state: State) -> String {
    format!("--{}-{}-{}-{}", css_ident(control), key, css_ident(theme), state)
}

/// `--body-{property}-{theme}`
pub fn body_var(key: TokenKey, theme: &str) -> String {
    format!("--body-{}-{}", key, css_ident(theme))
}

/// `--{control}-{property}-{state}`
pub fn slot_var(control: &str, key: TokenKey, state: State) -> String {
    format!("--{}-{}-{}", css_ident(control), key, state)
}

/// `--body-{property}`
pub fn body_slot_var(key: TokenKey) -> String {
    format!("--body-{key}")
}

// ========== Generation ==========

/// The complete stylesheet for a schema under an alias binding
pub fn generate_css(schema: &Schema, aliases: &ThemeAliases, options: &CssOptions) -> String {
    let mut out = String::new();

    if let Some(url) = schema.global.font.as_ref().and_then(|f| f.import_url.as_deref()) {
        out.push_str(&format!("@import url(\"{}\");\n\n", sanitize_value(url)));
    }

    let themes = distinct_idents(schema.themes.iter().map(String::as_str));
    if themes.len() != schema.themes.len() {
        tracing::warn!("Themes share a CSS identifier, emitting the first of each");
    }
    if distinct_idents(schema.control_ids()).len() != schema.components.len() {
        tracing::warn!("Controls share a CSS identifier, emitting the first of each");
    }

    for theme in themes {
        out.push_str(&format!("/* theme: {} */\n", css_ident(theme)));
        out.push_str(&physical_block(schema, theme).to_string());
        out.push('\n');
    }

    for slot in Slot::ALL {
        if let Some(block) = alias_block(schema, aliases, slot) {
            out.push_str(&block.to_string());
            out.push('\n');
        }
    }

    if options.include_body {
        out.push_str(&body_rule(schema).to_string());
        out.push('\n');
    }

    if options.include_wrappers {
        for control in distinct_idents(schema.control_ids()) {
            for rule in wrapper_rules(control, &options.selector_prefix) {
                out.push_str(&rule.to_string());
                out.push('\n');
            }
        }
    }

    out
}

/// Resolved physical variables for one theme
pub fn physical_block(schema: &Schema, theme: &str) -> CssRule {
    let mut rule = CssRule::new(":root");

    let body = resolve_body(schema, theme);
    for (key, value) in body.iter() {
        rule.declare(body_var(key, theme), key.css_value(&value));
    }

    for control in distinct_idents(schema.control_ids()) {
        for state in State::ALL {
            let tokens = resolve(schema, control, theme, state);
            for (key, value) in tokens.iter() {
                rule.declare(physical_var(control, key, theme, state), key.css_value(&value));
            }
        }
    }
    rule
}

/// Slot-generic names remapped onto the slot's physical theme
///
/// `None` when the slot points at a theme the schema does not have.
pub fn alias_block(schema: &Schema, aliases: &ThemeAliases, slot: Slot) -> Option<CssRule> {
    let theme = aliases.resolve(slot);
    if !schema.has_theme(theme) {
        tracing::warn!(%slot, theme, "Alias points at missing theme, omitting remap block");
        return None;
    }

    let mut rule = CssRule::new(format!("html[data-theme=\"{}\"]", slot.id()));
    rule.declare("color-scheme", slot.id());
    for key in TokenKey::ALL {
        rule.declare(body_slot_var(key), var(&body_var(key, theme)));
    }
    for control in distinct_idents(schema.control_ids()) {
        for state in State::ALL {
            for key in TokenKey::ALL {
                rule.declare(
                    slot_var(control, key, state),
                    var(&physical_var(control, key, theme, state)),
                );
            }
        }
    }
    Some(rule)
}

/// Page body rule over the slot-generic body variables
pub fn body_rule(schema: &Schema) -> CssRule {
    let mut rule = CssRule::new("body");
    rule.declare("background-color", var(&body_slot_var(TokenKey::BackgroundColor)));
    rule.declare("color", var(&body_slot_var(TokenKey::TextColor)));
    match &schema.global.font {
        Some(font) => rule.declare("font-family", font.family.as_str()),
        None => rule.declare("font-family", var(&body_slot_var(TokenKey::FontFamily))),
    }
    rule.declare("font-size", var(&body_slot_var(TokenKey::FontSize)));
    rule.declare("font-weight", var(&body_slot_var(TokenKey::FontWeight)));
    rule.declare("line-height", var(&body_slot_var(TokenKey::LineHeight)));
    rule.declare("letter-spacing", var(&body_slot_var(TokenKey::LetterSpacing)));
    rule.declare(
        "transition",
        format!(
            "background-color {0} ease, color {0} ease",
            var(&body_slot_var(TokenKey::TransitionSpeed))
        ),
    );
    rule
}

/// Wrapper rules for one control, one per state
pub fn wrapper_rules(control: &str, prefix: &str) -> Vec<CssRule> {
    let class = format!("{}{}", css_ident(prefix), css_ident(control));
    WRAPPER_STATES
        .iter()
        .map(|&state| {
            let mut rule = CssRule::new(wrapper_selector(&class, state));
            let v = |key: TokenKey| var(&slot_var(control, key, state));
            rule.declare("background", v(TokenKey::BackgroundColor));
            rule.declare("color", v(TokenKey::TextColor));
            rule.declare(
                "border",
                format!("{} solid {}", v(TokenKey::BorderWidth), v(TokenKey::BorderColor)),
            );
            rule.declare("border-radius", v(TokenKey::BorderRadius));
            rule.declare("box-shadow", v(TokenKey::BoxShadow));
            rule.declare(
                "padding",
                format!("{} {}", v(TokenKey::PaddingY), v(TokenKey::PaddingX)),
            );
            rule.declare(
                "margin",
                format!("{} {}", v(TokenKey::MarginY), v(TokenKey::MarginX)),
            );
            rule.declare(
                "outline",
                format!("{} solid {}", v(TokenKey::OutlineWidth), v(TokenKey::OutlineColor)),
            );
            rule.declare("opacity", v(TokenKey::Opacity));
            rule.declare("cursor", v(TokenKey::Cursor));
            rule.declare("font-family", v(TokenKey::FontFamily));
            rule.declare("font-size", v(TokenKey::FontSize));
            rule.declare("font-weight", v(TokenKey::FontWeight));
            rule.declare("letter-spacing", v(TokenKey::LetterSpacing));
            rule.declare("line-height", v(TokenKey::LineHeight));
            rule.declare("transition", format!("all {} ease", v(TokenKey::TransitionSpeed)));
            rule
        })
        .collect()
}

fn wrapper_selector(class: &str, state: State) -> String {
    match state {
        State::Rest => format!(".{class}"),
        State::Hover => format!(".{class}:hover"),
        State::Focus => format!(".{class}:focus-visible"),
        State::Active => format!(".{class}:active"),
        State::Visited => format!(".{class}:visited"),
        State::Highlight => format!(".{class}.{class}-highlight"),
        State::Highhover => format!(".{class}.{class}-highlight:hover"),
        State::Warning => format!(".{class}.{class}-warning"),
        State::Error => format!(".{class}.{class}-error"),
        State::Disabled => format!(".{class}[disabled]"),
        State::Inert => format!(".{class}[inert]"),
    }
}

fn var(name: &str) -> String {
    format!("var({name})")
}

/// Replace characters that cannot appear in a custom property name
pub(crate) fn css_ident(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Ids whose CSS identifier is not taken by an earlier id
///
/// Distinct ids such as `nav item` and `nav-item` share a variable name once
/// sanitized; only the first is emitted.
pub(crate) fn distinct_idents<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = FxHashSet::default();
    ids.filter(|id| {
        let fresh = seen.insert(css_ident(id));
        if !fresh {
            tracing::debug!(id, "Skipping id with a duplicate CSS identifier");
        }
        fresh
    })
    .collect()
}

/// Strip characters that would end a declaration or block early
fn sanitize_value(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '\n' | '\r'))
        .collect();
    if clean.len() != raw.len() {
        tracing::debug!(value = raw, "Stripped unsafe characters from CSS value");
    }
    clean
}

// ========== Rule Model ==========

/// A CSS rule: a selector and its declarations, in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn declare(&mut self, property: impl Into<String>, value: impl AsRef<str>) {
        self.declarations
            .push((property.into(), sanitize_value(value.as_ref())));
    }

    /// Value of the first declaration of `property`
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for CssRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            writeln!(f, "  {property}: {value};")?;
        }
        writeln!(f, "}}")
    }
}
