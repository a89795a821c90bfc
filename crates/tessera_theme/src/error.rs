//! Error types

use crate::alias::Slot;
use thiserror::Error;

/// Structural conflicts reported by checked schema operations
///
/// The total operations in [`crate::ops`] turn these into no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("theme not found: {0}")]
    ThemeNotFound(String),

    #[error("theme already exists: {0}")]
    ThemeExists(String),

    #[error("cannot remove the last theme: {0}")]
    LastTheme(String),

    #[error("control not found: {0}")]
    ComponentNotFound(String),

    #[error("control already exists: {0}")]
    ComponentExists(String),

    #[error("identifier must not be empty")]
    EmptyIdentifier,
}

/// Alias wiring problems
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("{slot} alias points at missing theme {theme:?}")]
    DanglingAlias { slot: Slot, theme: String },
}

/// Schema / export import failures
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("import payload must be a JSON object")]
    NotAnObject,
}

/// Platform service failures (persistence, clipboard)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
