//! Failures raised by mutators.
//!
//! An [`EditError`] means a mutator could not finish. The pipeline catches
//! it, restores the buffer to its state before the edit, records an error
//! diagnostic, and moves on to the next edit.

use thiserror::Error;

use redraft_core::document::DocumentError;

use crate::error::ErrorCode;

/// A mutator failure.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("buffer error: {0}")]
    Document(#[from] DocumentError),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl EditError {
    /// Returns the diagnostic code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            EditError::Document(_) => ErrorCode::E300,
            EditError::Pattern(_) => ErrorCode::E301,
        }
    }
}
