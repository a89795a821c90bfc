//! Seed baseline and built-in palette presets.

use crate::ops::{self, OpResult};
use crate::schema::Schema;
use crate::state::State;
use crate::tokens::TokenSet;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Physical themes every seeded schema starts with
pub const SEED_THEMES: [&str; 2] = ["light", "dark"];

/// Control vocabulary every seeded schema starts with
pub const BASE_CONTROLS: [&str; 15] = [
    "button", "input", "select", "textarea", "checkbox", "link", "card", "badge", "label", "h1",
    "h2", "h3", "h4", "h5", "h6",
];

/// Control re-created when the last control is removed
pub const FALLBACK_CONTROL: &str = "button";

/// The seeded baseline: two themes, the base controls, `rest` = defaults and
/// every other state empty
pub fn seed_schema() -> Schema {
    ops::heal(&Schema::empty())
}

/// Built-in palette catalog for starting a theme from something other than
/// the plain defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// Light surfaces, dark text.
    Daylight,
    /// Dark surfaces, light text.
    Midnight,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Daylight => "daylight",
            Self::Midnight => "midnight",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Daylight => "Daylight",
            Self::Midnight => "Midnight",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::Daylight, ThemePreset::Midnight];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    fn palette(self) -> Palette {
        match self {
            Self::Daylight => Palette {
                background: "#ffffff",
                surface: "#f9fafb",
                text: "#111827",
                border: "#d1d5db",
                accent: "#2563eb",
                muted: "#e5e7eb",
                danger: "#dc2626",
                caution: "#d97706",
            },
            Self::Midnight => Palette {
                background: "#0b1120",
                surface: "#111827",
                text: "#f3f4f6",
                border: "#374151",
                accent: "#60a5fa",
                muted: "#1f2937",
                danger: "#f87171",
                caution: "#fbbf24",
            },
        }
    }

    /// Body tokens for this preset
    pub fn body_tokens(self) -> TokenSet {
        let p = self.palette();
        TokenSet {
            background_color: Some(p.background.to_string()),
            text_color: Some(p.text.to_string()),
            ..TokenSet::default()
        }
    }

    /// Per-state overrides applied to every control
    pub fn state_tokens(self, state: State) -> TokenSet {
        let p = self.palette();
        let colors = |bg: &str, text: &str, border: &str| TokenSet {
            background_color: Some(bg.to_string()),
            text_color: Some(text.to_string()),
            border_color: Some(border.to_string()),
            ..TokenSet::default()
        };
        match state {
            State::Rest => colors(p.surface, p.text, p.border),
            State::Hover => TokenSet {
                background_color: Some(p.muted.to_string()),
                ..TokenSet::default()
            },
            State::Active | State::Highlight => colors(p.accent, p.background, p.accent),
            State::Highhover => TokenSet {
                opacity: Some(0.9),
                ..colors(p.accent, p.background, p.accent)
            },
            State::Focus => TokenSet {
                outline_color: Some(p.accent.to_string()),
                outline_width: Some(2.0),
                ..TokenSet::default()
            },
            State::Disabled | State::Inert => TokenSet {
                opacity: Some(0.5),
                cursor: Some("not-allowed".to_string()),
                ..TokenSet::default()
            },
            State::Visited => TokenSet {
                text_color: Some(p.accent.to_string()),
                ..TokenSet::default()
            },
            State::Warning => TokenSet {
                border_color: Some(p.caution.to_string()),
                ..TokenSet::default()
            },
            State::Error => TokenSet {
                border_color: Some(p.danger.to_string()),
                ..TokenSet::default()
            },
        }
    }

    /// Write this preset into `theme` for the body and every control
    pub fn apply(self, schema: &Schema, theme: &str) -> Schema {
        let mut next = schema.clone();
        match self.apply_in(&mut next, theme) {
            Ok(()) => next,
            Err(err) => {
                tracing::debug!(preset = self.id(), %err, "Preset not applied");
                schema.clone()
            }
        }
    }

    pub(crate) fn apply_in(self, s: &mut Schema, theme: &str) -> OpResult {
        ops::update_body_in(s, theme, &self.body_tokens())?;
        let controls: Vec<String> = s.components.keys().cloned().collect();
        for control in &controls {
            for state in State::ALL {
                ops::update_tokens_in(s, theme, control, state, &self.state_tokens(state))?;
            }
        }
        Ok(())
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Clone, Copy)]
struct Palette {
    background: &'static str,
    surface: &'static str,
    text: &'static str,
    border: &'static str,
    accent: &'static str,
    muted: &'static str,
    danger: &'static str,
    caution: &'static str,
}
