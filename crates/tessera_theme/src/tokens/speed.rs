//! Transition speed tokens

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named transition speeds, each mapped to a fixed duration
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionSpeed {
    Instant,
    Fast,
    #[default]
    Normal,
    Slow,
    Slower,
}

impl TransitionSpeed {
    /// All speeds, fastest first
    pub const ALL: [TransitionSpeed; 5] = [
        TransitionSpeed::Instant,
        TransitionSpeed::Fast,
        TransitionSpeed::Normal,
        TransitionSpeed::Slow,
        TransitionSpeed::Slower,
    ];

    /// Duration in milliseconds
    pub fn millis(self) -> u32 {
        match self {
            Self::Instant => 0,
            Self::Fast => 150,
            Self::Normal => 250,
            Self::Slow => 400,
            Self::Slower => 600,
        }
    }

    /// Stable id used in serialized schemas
    pub fn id(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Slow => "slow",
            Self::Slower => "slower",
        }
    }

    /// CSS duration, e.g. `250ms`
    pub fn to_css(self) -> String {
        format!("{}ms", self.millis())
    }
}

impl Display for TransitionSpeed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TransitionSpeed {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|speed| speed.id().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}
