//! Error types for Redraft operations.
//!
//! This module provides the main error type [`RedraftError`]. Applying edits
//! never fails; errors only come from reading input and decoding the edit
//! script.

use std::io;

use thiserror::Error;

use redraft_core::script::DecodeError;

/// The main error type for Redraft operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant keeps the JSON source it failed on, so the failing
/// line and column can be shown in context.
#[derive(Debug, Error)]
pub enum RedraftError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode { err: DecodeError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RedraftError {
    /// Create a new `Decode` error with the associated JSON source.
    pub fn new_decode_error(err: DecodeError, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }
}
