//! Interaction states a control can be styled for
//!
//! `Rest` is the base state: it is always fully populated for every
//! (control, theme) pair, while every other state holds only explicit overrides
//! on top of it.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Interaction / variant state of a control
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Rest,
    Hover,
    Active,
    Disabled,
    Highlight,
    Highhover,
    Inert,
    Focus,
    Visited,
    Warning,
    Error,
}

impl State {
    /// Every state, `Rest` first
    pub const ALL: [State; 11] = [
        State::Rest,
        State::Hover,
        State::Active,
        State::Disabled,
        State::Highlight,
        State::Highhover,
        State::Inert,
        State::Focus,
        State::Visited,
        State::Warning,
        State::Error,
    ];

    /// Stable id used in serialized schemas and variable names
    pub fn id(self) -> &'static str {
        match self {
            State::Rest => "rest",
            State::Hover => "hover",
            State::Active => "active",
            State::Disabled => "disabled",
            State::Highlight => "highlight",
            State::Highhover => "highhover",
            State::Inert => "inert",
            State::Focus => "focus",
            State::Visited => "visited",
            State::Warning => "warning",
            State::Error => "error",
        }
    }

    pub fn is_rest(self) -> bool {
        self == State::Rest
    }

    /// Every state except `Rest`
    pub fn overrides() -> impl Iterator<Item = State> {
        State::ALL.into_iter().filter(|s| !s.is_rest())
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for State {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .iter()
            .copied()
            .find(|state| state.id().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}
