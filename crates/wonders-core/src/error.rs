//! Error types for the wonders domain crate
//!
//! We use `thiserror` for ergonomic error definitions. These variants are the
//! structured failures the server boundary maps onto HTTP outcomes; nothing in
//! this crate panics or raises an untyped fault for an expected condition.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by [`crate::WonderStore`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live record carries the given id
    #[error("Wonder with ID {0} not found")]
    NotFound(i64),

    /// A random pick was requested from an empty store
    #[error("no wonders available")]
    Empty,
}

/// Failures raised by the seed loader.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed path does not resolve to an existing file
    #[error("seed file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file exists but is not a JSON array of wonder records
    #[error("seed file is not a JSON array of wonders: {0}")]
    Parse(String),

    /// The file exists but could not be read
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while decoding a [`crate::WonderDraft`] from JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("field `{0}` must be a string")]
    ExpectedString(String),

    #[error("field `{0}` must be an integer")]
    ExpectedInteger(String),
}
