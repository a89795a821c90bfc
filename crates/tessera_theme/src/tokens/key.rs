//! Token keys and values for dynamic access

use super::speed::TransitionSpeed;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stylable property keys
///
/// The serialized (and CSS variable) name of each key is its camelCase form,
/// e.g. `backgroundColor`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKey {
    // Colors
    BackgroundColor,
    TextColor,
    BorderColor,

    // Box model
    BorderRadius,
    BorderWidth,
    PaddingX,
    PaddingY,
    MarginX,
    MarginY,

    // Effects
    BoxShadow,
    OutlineColor,
    OutlineWidth,
    Opacity,
    Cursor,

    // Typography
    FontFamily,
    FontSize,
    FontWeight,
    LetterSpacing,
    LineHeight,

    // Motion
    TransitionSpeed,
}

/// Value domain of a token key
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TokenKind {
    /// Color string (hex, rgba, hsla, named, `transparent`)
    Color,
    /// Numeric px-scale value
    Length,
    /// Unitless number
    Number,
    /// Free text (font family, cursor)
    Text,
    /// Compound box-shadow string
    Shadow,
    /// Named transition speed
    Speed,
}

impl TokenKey {
    /// Every key in declaration order
    pub const ALL: [TokenKey; 20] = [
        TokenKey::BackgroundColor,
        TokenKey::TextColor,
        TokenKey::BorderColor,
        TokenKey::BorderRadius,
        TokenKey::BorderWidth,
        TokenKey::PaddingX,
        TokenKey::PaddingY,
        TokenKey::MarginX,
        TokenKey::MarginY,
        TokenKey::BoxShadow,
        TokenKey::OutlineColor,
        TokenKey::OutlineWidth,
        TokenKey::Opacity,
        TokenKey::Cursor,
        TokenKey::FontFamily,
        TokenKey::FontSize,
        TokenKey::FontWeight,
        TokenKey::LetterSpacing,
        TokenKey::LineHeight,
        TokenKey::TransitionSpeed,
    ];

    /// camelCase property name
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKey::BackgroundColor => "backgroundColor",
            TokenKey::TextColor => "textColor",
            TokenKey::BorderColor => "borderColor",
            TokenKey::BorderRadius => "borderRadius",
            TokenKey::BorderWidth => "borderWidth",
            TokenKey::PaddingX => "paddingX",
            TokenKey::PaddingY => "paddingY",
            TokenKey::MarginX => "marginX",
            TokenKey::MarginY => "marginY",
            TokenKey::BoxShadow => "boxShadow",
            TokenKey::OutlineColor => "outlineColor",
            TokenKey::OutlineWidth => "outlineWidth",
            TokenKey::Opacity => "opacity",
            TokenKey::Cursor => "cursor",
            TokenKey::FontFamily => "fontFamily",
            TokenKey::FontSize => "fontSize",
            TokenKey::FontWeight => "fontWeight",
            TokenKey::LetterSpacing => "letterSpacing",
            TokenKey::LineHeight => "lineHeight",
            TokenKey::TransitionSpeed => "transitionSpeed",
        }
    }

    pub fn kind(self) -> TokenKind {
        match self {
            TokenKey::BackgroundColor
            | TokenKey::TextColor
            | TokenKey::BorderColor
            | TokenKey::OutlineColor => TokenKind::Color,
            TokenKey::BorderRadius
            | TokenKey::BorderWidth
            | TokenKey::PaddingX
            | TokenKey::PaddingY
            | TokenKey::MarginX
            | TokenKey::MarginY
            | TokenKey::OutlineWidth
            | TokenKey::FontSize
            | TokenKey::LetterSpacing => TokenKind::Length,
            TokenKey::Opacity | TokenKey::FontWeight | TokenKey::LineHeight => TokenKind::Number,
            TokenKey::Cursor | TokenKey::FontFamily => TokenKind::Text,
            TokenKey::BoxShadow => TokenKind::Shadow,
            TokenKey::TransitionSpeed => TokenKind::Speed,
        }
    }

    /// Unit appended to numeric values when emitted as CSS
    pub fn css_unit(self) -> &'static str {
        match self.kind() {
            TokenKind::Length => "px",
            _ => "",
        }
    }

    /// Render a value of this key as a CSS value
    pub fn css_value(self, value: &TokenValue) -> String {
        match value {
            TokenValue::Text(text) => text.clone(),
            TokenValue::Number(n) => format!("{}{}", format_number(*n), self.css_unit()),
            TokenValue::Speed(speed) => speed.to_css(),
        }
    }
}

impl Display for TokenKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TokenKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A single token value
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Text(String),
    Number(f64),
    Speed(TransitionSpeed),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

impl From<TransitionSpeed> for TokenValue {
    fn from(value: TransitionSpeed) -> Self {
        TokenValue::Speed(value)
    }
}

/// Format a number without a trailing `.0` and without negative zero
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for key in TokenKey::ALL {
            assert_eq!(key.as_str().parse::<TokenKey>(), Ok(key));
        }
    }

    #[test]
    fn serde_name_matches_as_str() {
        for key in TokenKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn css_values_carry_units() {
        assert_eq!(TokenKey::BorderRadius.css_value(&TokenValue::Number(6.0)), "6px");
        assert_eq!(TokenKey::Opacity.css_value(&TokenValue::Number(0.5)), "0.5");
        assert_eq!(TokenKey::MarginX.css_value(&TokenValue::Number(-0.0)), "0px");
        assert_eq!(
            TokenKey::TransitionSpeed.css_value(&TokenValue::Speed(TransitionSpeed::Slow)),
            "400ms"
        );
    }
}
