//! Box-shadow decomposition and composition

use super::color::Color;
use crate::tokens::format_number;
use nom::{
    bytes::complete::tag_no_case,
    combinator::{all_consuming, opt},
    error::{ErrorKind, ParseError as NomParseError},
    number::complete::double,
    IResult,
};
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// Color used when a shadow string carries no recognizable color token
pub const FALLBACK_SHADOW_COLOR: &str = "rgba(0,0,0,0.2)";

/// A single box shadow broken into editable parts
#[derive(Clone, Debug, PartialEq)]
pub struct BoxShadow {
    pub inset: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub spread: f64,
    pub color: String,
}

impl BoxShadow {
    pub fn new(offset_x: f64, offset_y: f64, blur: f64, spread: f64, color: impl Into<String>) -> Self {
        Self {
            inset: false,
            offset_x,
            offset_y,
            blur,
            spread,
            color: color.into(),
        }
    }

    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, "transparent")
    }

    pub fn inset(mut self, inset: bool) -> Self {
        self.inset = inset;
        self
    }

    /// Parse a box-shadow string
    ///
    /// Missing trailing lengths default to 0; a missing color falls back to
    /// [`FALLBACK_SHADOW_COLOR`]. `none` and empty input yield [`BoxShadow::none`].
    pub fn parse(value: &str) -> BoxShadow {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            return BoxShadow::none();
        }

        // Pull out the trailing color token first so its digits aren't read as lengths
        let (color, rest) = match color_pattern().find_iter(value).last() {
            Some(m) => (
                m.as_str().to_string(),
                format!("{} {}", &value[..m.start()], &value[m.end()..]),
            ),
            None => (FALLBACK_SHADOW_COLOR.to_string(), value.to_string()),
        };

        let mut shadow = BoxShadow {
            color,
            ..BoxShadow::none()
        };

        let mut lengths = Vec::with_capacity(4);
        for part in rest.split_whitespace() {
            if part.eq_ignore_ascii_case("inset") {
                shadow.inset = true;
                continue;
            }
            match all_consuming(parse_length::<nom::error::Error<&str>>)(part) {
                Ok((_, length)) => lengths.push(length),
                Err(_) => tracing::debug!(token = part, shadow = value, "Ignoring box-shadow token"),
            }
        }

        let mut lengths = lengths.into_iter();
        shadow.offset_x = lengths.next().unwrap_or(0.0);
        shadow.offset_y = lengths.next().unwrap_or(0.0);
        shadow.blur = lengths.next().unwrap_or(0.0);
        shadow.spread = lengths.next().unwrap_or(0.0);
        shadow
    }

    /// Parsed shadow color
    pub fn color(&self) -> Color {
        Color::parse(&self.color)
    }

    /// Replace the shadow color's alpha, keeping its base
    pub fn with_color_alpha(mut self, alpha: f32) -> Self {
        self.color = self.color().with_alpha(alpha).to_string();
        self
    }
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self::none()
    }
}

impl Display for BoxShadow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.inset {
            f.write_str("inset ")?;
        }
        write!(
            f,
            "{}px {}px {}px {}px {}",
            format_number(self.offset_x),
            format_number(self.offset_y),
            format_number(self.blur),
            format_number(self.spread),
            self.color.trim()
        )
    }
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b|(?:rgba?|hsla?)\([^)]*\)",
        )
        .expect("Invalid regex pattern")
    })
}

/// Parse a length: a finite number with an optional `px` suffix
fn parse_length<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, f64, E> {
    let (rest, value) = double(input)?;
    if !value.is_finite() {
        return Err(nom::Err::Error(E::from_error_kind(input, ErrorKind::Float)));
    }
    let input = rest;
    let (input, _) = opt(tag_no_case("px"))(input)?;
    Ok((input, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_round_trips() {
        let input = "2px 4px 6px 0px rgba(0,0,0,0.2)";
        assert_eq!(BoxShadow::parse(input).to_string(), input);
    }

    #[test]
    fn parses_inset_and_hex_color() {
        let shadow = BoxShadow::parse("inset 0 2px 4px #00000033");
        assert!(shadow.inset);
        assert_eq!(shadow.offset_x, 0.0);
        assert_eq!(shadow.offset_y, 2.0);
        assert_eq!(shadow.blur, 4.0);
        assert_eq!(shadow.spread, 0.0);
        assert_eq!(shadow.color, "#00000033");
        assert_eq!(shadow.to_string(), "inset 0px 2px 4px 0px #00000033");
    }

    #[test]
    fn missing_parts_degrade_to_defaults() {
        let shadow = BoxShadow::parse("3px");
        assert_eq!(shadow.offset_x, 3.0);
        assert_eq!(shadow.offset_y, 0.0);
        assert_eq!(shadow.color, FALLBACK_SHADOW_COLOR);

        assert_eq!(BoxShadow::parse("none"), BoxShadow::none());
        assert_eq!(BoxShadow::parse("garbage words"), BoxShadow {
            color: FALLBACK_SHADOW_COLOR.to_string(),
            ..BoxShadow::none()
        });
    }

    #[test]
    fn color_may_lead_the_lengths() {
        let shadow = BoxShadow::parse("hsla(0, 0%, 0%, 0.3) -1px 1.5px 3px");
        assert_eq!(shadow.color, "hsla(0, 0%, 0%, 0.3)");
        assert_eq!(shadow.offset_x, -1.0);
        assert_eq!(shadow.offset_y, 1.5);
        assert_eq!(shadow.to_string(), "-1px 1.5px 3px 0px hsla(0, 0%, 0%, 0.3)");
    }

    #[test]
    fn non_finite_lengths_are_ignored() {
        let shadow = BoxShadow::parse("nan 1px");
        assert_eq!(shadow.offset_x, 1.0);
        assert_eq!(shadow.offset_y, 0.0);
        assert_eq!(shadow.to_string(), "1px 0px 0px 0px rgba(0,0,0,0.2)");

        let shadow = BoxShadow::parse("inf -infinity NaNpx #000");
        assert_eq!(shadow.to_string(), "0px 0px 0px 0px #000");
    }

    #[test]
    fn whitespace_is_normalized() {
        let shadow = BoxShadow::parse("  1px   2px\t3px 4px   #fff ");
        assert_eq!(shadow.to_string(), "1px 2px 3px 4px #fff");
    }

    #[test]
    fn shadow_color_alpha_is_editable() {
        let shadow = BoxShadow::parse("0 1px 2px 0 #336699").with_color_alpha(0.5);
        assert_eq!(shadow.color, "#33669980");
    }
}
