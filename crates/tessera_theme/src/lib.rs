//! Tessera Theme Engine
//!
//! A design-token engine for per-control, per-state, multi-theme styling,
//! compiled to CSS custom properties.
//!
//! # Overview
//!
//! The engine provides:
//! - **Schema**: controls × physical themes × interaction states → sparse token sets
//! - **Resolution**: defaults → `rest` → state overrides, the only lookup rule
//! - **Lifecycle**: total, value-returning edits for tokens, themes and controls
//! - **Aliases**: stable `light`/`dark` slots bound to any physical theme
//! - **CSS generation**: physical variables plus `data-theme` remap blocks
//! - **Bulk copy**: materialize one control's resolved look onto others
//!
//! # Quick Start
//!
//! ```rust
//! use tessera_theme::{
//!     ensure_theme, generate_css, seed_schema, update_tokens, CssOptions, State, ThemeAliases,
//!     TokenSet,
//! };
//!
//! let schema = ensure_theme(&seed_schema(), "dark", Some("light"));
//! let patch = TokenSet {
//!     background_color: Some("#111".into()),
//!     ..TokenSet::default()
//! };
//! let schema = update_tokens(&schema, "dark", "button", State::Rest, &patch);
//!
//! let css = generate_css(&schema, &ThemeAliases::default(), &CssOptions::default());
//! assert!(css.contains("--button-backgroundColor-dark-rest: #111;"));
//! ```
//!
//! # Architecture
//!
//! Schemas are values. Every operation takes a schema and returns a new one;
//! invalid requests (renaming onto an existing theme, removing the last one)
//! return an unchanged copy. [`Command::try_apply`] reports the reason instead.
//!
//! Persistence, key-value settings and the clipboard are host services behind
//! the traits in [`platform`]. [`ThemeDocument`] ties a schema, its aliases and
//! those services together for an editing session.

pub mod alias;
pub mod bulk;
pub mod codec;
pub mod command;
pub mod css;
pub mod document;
pub mod error;
pub mod export;
pub mod ops;
pub mod platform;
pub mod presets;
pub mod resolve;
pub mod schema;
pub mod state;
pub mod tokens;

// Re-export commonly used types
pub use alias::{AliasConfig, Slot, ThemeAliases, ThemeScope};
pub use bulk::{bulk_copy, BulkCopyRequest};
pub use codec::{BoxShadow, Color, ColorParts};
pub use command::Command;
pub use css::{generate_css, CssOptions, CssRule};
pub use document::ThemeDocument;
pub use error::{AliasError, ImportError, SchemaError, StoreError};
pub use export::{
    export_json, import_json, list_variables, Imported, ThemeExport, VariableEntry,
    VariableFilter, VariableTier,
};
pub use ops::*;
pub use platform::{Clipboard, KeyValueStore, SchemaStore};
pub use presets::{seed_schema, ThemePreset};
pub use resolve::{resolve, resolve_body};
pub use schema::{ControlId, FontSettings, GlobalTokens, Schema, ThemeId};
pub use state::State;
pub use tokens::*;
