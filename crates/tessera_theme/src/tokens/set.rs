//! Sparse token sets

use super::key::{TokenKey, TokenValue};
use super::speed::TransitionSpeed;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A sparse record of style properties for one (control, theme, state) cell
///
/// `None` means "not overridden here"; resolution fills it from the layer below.
///
/// Deserialization is lenient: see [`TokenSet::from_json_value`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    // Colors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    // Box model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_y: Option<f64>,

    // Effects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    // Typography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,

    // Motion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_speed: Option<TransitionSpeed>,
}

impl TokenSet {
    /// An empty set (no overrides)
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default token set, with a value for every key
    pub fn defaults() -> Self {
        Self {
            background_color: Some("#ffffff".to_string()),
            text_color: Some("#111827".to_string()),
            border_color: Some("#d1d5db".to_string()),
            border_radius: Some(6.0),
            border_width: Some(1.0),
            padding_x: Some(12.0),
            padding_y: Some(8.0),
            margin_x: Some(0.0),
            margin_y: Some(0.0),
            box_shadow: Some("0px 1px 2px 0px rgba(0,0,0,0.05)".to_string()),
            outline_color: Some("#2563eb".to_string()),
            outline_width: Some(0.0),
            opacity: Some(1.0),
            cursor: Some("default".to_string()),
            font_family: Some("inherit".to_string()),
            font_size: Some(14.0),
            font_weight: Some(400.0),
            letter_spacing: Some(0.0),
            line_height: Some(1.5),
            transition_speed: Some(TransitionSpeed::Normal),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: TokenKey) -> Option<TokenValue> {
        let text = |v: &Option<String>| v.clone().map(TokenValue::Text);
        let number = |v: &Option<f64>| v.map(TokenValue::Number);
        match key {
            TokenKey::BackgroundColor => text(&self.background_color),
            TokenKey::TextColor => text(&self.text_color),
            TokenKey::BorderColor => text(&self.border_color),
            TokenKey::BorderRadius => number(&self.border_radius),
            TokenKey::BorderWidth => number(&self.border_width),
            TokenKey::PaddingX => number(&self.padding_x),
            TokenKey::PaddingY => number(&self.padding_y),
            TokenKey::MarginX => number(&self.margin_x),
            TokenKey::MarginY => number(&self.margin_y),
            TokenKey::BoxShadow => text(&self.box_shadow),
            TokenKey::OutlineColor => text(&self.outline_color),
            TokenKey::OutlineWidth => number(&self.outline_width),
            TokenKey::Opacity => number(&self.opacity),
            TokenKey::Cursor => text(&self.cursor),
            TokenKey::FontFamily => text(&self.font_family),
            TokenKey::FontSize => number(&self.font_size),
            TokenKey::FontWeight => number(&self.font_weight),
            TokenKey::LetterSpacing => number(&self.letter_spacing),
            TokenKey::LineHeight => number(&self.line_height),
            TokenKey::TransitionSpeed => self.transition_speed.map(TokenValue::Speed),
        }
    }

    /// Set a value by key
    ///
    /// Returns `false` (and leaves the set untouched) when the value does not
    /// fit the key's domain, e.g. a number for `backgroundColor`.
    pub fn set(&mut self, key: TokenKey, value: TokenValue) -> bool {
        match (self.slot_mut(key), value) {
            (SlotMut::Text(slot), TokenValue::Text(text)) => *slot = Some(text),
            (SlotMut::Number(slot), TokenValue::Number(n)) => *slot = Some(n),
            (SlotMut::Speed(slot), TokenValue::Speed(speed)) => *slot = Some(speed),
            (SlotMut::Speed(slot), TokenValue::Text(text)) => match text.parse() {
                Ok(speed) => *slot = Some(speed),
                Err(()) => {
                    tracing::debug!(%key, value = %text, "Unknown transition speed");
                    return false;
                }
            },
            (_, value) => {
                tracing::debug!(%key, kind = ?key.kind(), ?value, "Token value does not fit key domain");
                return false;
            }
        }
        true
    }

    /// Remove a value by key, returning whether it was present
    pub fn remove(&mut self, key: TokenKey) -> bool {
        match self.slot_mut(key) {
            SlotMut::Text(slot) => slot.take().is_some(),
            SlotMut::Number(slot) => slot.take().is_some(),
            SlotMut::Speed(slot) => slot.take().is_some(),
        }
    }

    pub fn contains(&self, key: TokenKey) -> bool {
        self.get(key).is_some()
    }

    /// Shallow merge: every property present in `patch` overwrites this set's value
    pub fn merge(&mut self, patch: &TokenSet) {
        for (key, value) in patch.iter() {
            self.set(key, value);
        }
    }

    /// Return `self` overlaid with `patch`
    pub fn merged(&self, patch: &TokenSet) -> TokenSet {
        let mut out = self.clone();
        out.merge(patch);
        out
    }

    /// A copy holding only the listed keys
    pub fn pick(&self, keys: &[TokenKey]) -> TokenSet {
        let mut out = TokenSet::new();
        for &key in keys {
            if let Some(value) = self.get(key) {
                out.set(key, value);
            }
        }
        out
    }

    /// Present properties in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (TokenKey, TokenValue)> + '_ {
        TokenKey::ALL
            .iter()
            .filter_map(move |&key| self.get(key).map(|value| (key, value)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// CSS value for a key, if present
    pub fn css_value(&self, key: TokenKey) -> Option<String> {
        self.get(key).map(|value| key.css_value(&value))
    }

    fn slot_mut(&mut self, key: TokenKey) -> SlotMut<'_> {
        match key {
            TokenKey::BackgroundColor => SlotMut::Text(&mut self.background_color),
            TokenKey::TextColor => SlotMut::Text(&mut self.text_color),
            TokenKey::BorderColor => SlotMut::Text(&mut self.border_color),
            TokenKey::BorderRadius => SlotMut::Number(&mut self.border_radius),
            TokenKey::BorderWidth => SlotMut::Number(&mut self.border_width),
            TokenKey::PaddingX => SlotMut::Number(&mut self.padding_x),
            TokenKey::PaddingY => SlotMut::Number(&mut self.padding_y),
            TokenKey::MarginX => SlotMut::Number(&mut self.margin_x),
            TokenKey::MarginY => SlotMut::Number(&mut self.margin_y),
            TokenKey::BoxShadow => SlotMut::Text(&mut self.box_shadow),
            TokenKey::OutlineColor => SlotMut::Text(&mut self.outline_color),
            TokenKey::OutlineWidth => SlotMut::Number(&mut self.outline_width),
            TokenKey::Opacity => SlotMut::Number(&mut self.opacity),
            TokenKey::Cursor => SlotMut::Text(&mut self.cursor),
            TokenKey::FontFamily => SlotMut::Text(&mut self.font_family),
            TokenKey::FontSize => SlotMut::Number(&mut self.font_size),
            TokenKey::FontWeight => SlotMut::Number(&mut self.font_weight),
            TokenKey::LetterSpacing => SlotMut::Number(&mut self.letter_spacing),
            TokenKey::LineHeight => SlotMut::Number(&mut self.line_height),
            TokenKey::TransitionSpeed => SlotMut::Speed(&mut self.transition_speed),
        }
    }

    /// Build a set from loosely-typed JSON
    ///
    /// Unknown properties and values that do not fit their key are dropped,
    /// so one bad value never rejects the rest of a snapshot.
    pub fn from_json_value(value: Value) -> TokenSet {
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return TokenSet::new(),
            other => {
                tracing::debug!(value = %other, "Token set is not an object, treating as empty");
                return TokenSet::new();
            }
        };

        let mut set = TokenSet::new();
        for (name, raw) in map {
            let Ok(key) = name.parse::<TokenKey>() else {
                tracing::debug!(property = %name, "Dropping unknown token property");
                continue;
            };
            let value = match raw {
                Value::Null => continue,
                Value::String(text) => TokenValue::Text(text),
                Value::Number(n) => match n.as_f64() {
                    Some(n) => TokenValue::Number(n),
                    None => continue,
                },
                other => {
                    tracing::debug!(%key, value = %other, "Dropping malformed token value");
                    continue;
                }
            };
            set.set(key, value);
        }
        set
    }
}

impl<'de> Deserialize<'de> for TokenSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(TokenSet::from_json_value)
    }
}

/// Mutable access to one property, typed by the key's value domain
enum SlotMut<'a> {
    Text(&'a mut Option<String>),
    Number(&'a mut Option<f64>),
    Speed(&'a mut Option<TransitionSpeed>),
}
