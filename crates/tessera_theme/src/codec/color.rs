//! Color normalization with independent alpha editing
//!
//! Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and `transparent`.
//! Anything else (named colors, `rgba()`/`hsla()` text) passes through untouched
//! with an assumed alpha of 1, so a stored value never fails to load.

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::all_consuming,
    error::{ErrorKind, ParseError as NomParseError},
    IResult,
};
use std::fmt::{Display, Formatter};

/// A token color value
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// Hex color with a separate alpha channel in `0.0..=1.0`
    Hex { rgb: [u8; 3], alpha: f32 },
    /// The `transparent` keyword
    Transparent,
    /// Unrecognized color text, kept verbatim
    Other(String),
}

/// Editor-facing decomposition of a color
#[derive(Clone, Debug, PartialEq)]
pub struct ColorParts {
    /// `#rrggbb` for hex colors, `#000000` for transparent, the raw text otherwise
    pub base_hex: String,
    pub alpha: f32,
    pub is_transparent: bool,
}

impl Color {
    pub const BLACK: Color = Color::Hex {
        rgb: [0, 0, 0],
        alpha: 1.0,
    };

    /// Parse a color string; never fails
    pub fn parse(input: &str) -> Color {
        let input = input.trim();

        if input.eq_ignore_ascii_case("transparent") {
            return Color::Transparent;
        }

        if let Ok((_, (rgb, alpha))) = all_consuming(parse_hex::<nom::error::Error<&str>>)(input)
        {
            return Color::Hex { rgb, alpha };
        }

        tracing::debug!(value = input, "Passing through non-hex color");
        Color::Other(input.to_string())
    }

    /// Opaque color from RGB bytes
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Hex {
            rgb: [r, g, b],
            alpha: 1.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Color::Transparent)
    }

    /// Alpha channel; `transparent` is 0 and pass-through text is assumed opaque
    pub fn alpha(&self) -> f32 {
        match self {
            Color::Hex { alpha, .. } => *alpha,
            Color::Transparent => 0.0,
            Color::Other(_) => 1.0,
        }
    }

    /// `#rrggbb` without alpha, if the color is hex-addressable
    pub fn base_hex(&self) -> Option<String> {
        match self {
            Color::Hex { rgb, .. } => Some(format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])),
            Color::Transparent => Some("#000000".to_string()),
            Color::Other(_) => None,
        }
    }

    /// Replace the alpha channel, keeping the base color
    ///
    /// Pass-through colors cannot be edited and are returned unchanged.
    pub fn with_alpha(&self, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        match self {
            Color::Hex { rgb, .. } => Color::Hex { rgb: *rgb, alpha },
            Color::Transparent => Color::Hex {
                rgb: [0, 0, 0],
                alpha,
            },
            Color::Other(text) => {
                tracing::debug!(value = %text, "Cannot edit alpha of non-hex color");
                self.clone()
            }
        }
    }

    /// Replace the base color, keeping the current alpha
    ///
    /// Picking a base for `transparent` yields an opaque color. A base that is
    /// not hex replaces the color outright.
    pub fn with_base(&self, base: &str) -> Color {
        match Color::parse(base) {
            Color::Hex { rgb, .. } => {
                let alpha = match self {
                    Color::Hex { alpha, .. } => *alpha,
                    _ => 1.0,
                };
                Color::Hex { rgb, alpha }
            }
            other => other,
        }
    }

    pub fn parts(&self) -> ColorParts {
        ColorParts {
            base_hex: match self {
                Color::Other(text) => text.clone(),
                _ => self.base_hex().unwrap_or_default(),
            },
            alpha: self.alpha(),
            is_transparent: self.is_transparent(),
        }
    }
}

impl ColorParts {
    /// Compose back to a stored color string
    pub fn compose(&self) -> String {
        if self.is_transparent {
            return Color::Transparent.to_string();
        }
        Color::parse(&self.base_hex)
            .with_alpha(self.alpha)
            .to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Hex { rgb, alpha } => write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                rgb[0],
                rgb[1],
                rgb[2],
                alpha_byte(*alpha)
            ),
            Color::Transparent => f.write_str("transparent"),
            Color::Other(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color::parse(value)
    }
}

fn alpha_byte(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parse hex color: #RGB, #RGBA, #RRGGBB, or #RRGGBBAA
fn parse_hex<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, ([u8; 3], f32), E> {
    let (rest, _) = char('#')(input)?;
    let (rest, hex) = take_while_m_n(3, 8, |c: char| c.is_ascii_hexdigit())(rest)?;

    let channel = |digits: &str| -> Result<u8, nom::Err<E>> {
        let digits = if digits.len() == 1 {
            digits.repeat(2)
        } else {
            digits.to_string()
        };
        u8::from_str_radix(&digits, 16)
            .map_err(|_| nom::Err::Error(E::from_error_kind(input, ErrorKind::HexDigit)))
    };

    let (rgb, alpha) = match hex.len() {
        3 | 4 => {
            let rgb = [channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?];
            let alpha = if hex.len() == 4 {
                channel(&hex[3..4])?
            } else {
                255
            };
            (rgb, alpha)
        }
        6 | 8 => {
            let rgb = [channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?];
            let alpha = if hex.len() == 8 {
                channel(&hex[6..8])?
            } else {
                255
            };
            (rgb, alpha)
        }
        _ => {
            return Err(nom::Err::Error(E::from_error_kind(
                input,
                ErrorKind::LengthValue,
            )));
        }
    };

    Ok((rest, (rgb, f32::from(alpha) / 255.0)))
}
