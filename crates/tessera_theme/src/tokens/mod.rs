//! Design token vocabulary
//!
//! The fixed set of stylable properties and their value domains:
//! - Colors (background, text, border, outline)
//! - Box model (radius, border width, padding, margin)
//! - Effects (box shadow, opacity, cursor)
//! - Typography (family, size, weight, letter spacing, line height)
//! - Motion (named transition speeds)

mod key;
mod set;
mod speed;

pub use key::*;
pub use set::*;
pub use speed::*;

pub(crate) use key::format_number;
