//! Codecs for compound token values
//!
//! Both codecs degrade instead of failing: a malformed persisted value parses
//! to defaults or passes through, so resolution never breaks on bad input.

mod color;
mod shadow;

pub use color::*;
pub use shadow::*;
