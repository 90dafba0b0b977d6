//! Severity levels for diagnostics.
//!
//! This module defines the severity of diagnostic messages, distinguishing
//! edits that failed outright from edits that were skipped or only fit the
//! diagram loosely.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] marks an edit whose mutator failed; the buffer was
///   rolled back to its state before that edit
/// - [`Severity::Warning`] marks an edit that was skipped or applied with a
///   caveat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The mutator failed and its changes were discarded.
    Error,

    /// The edit had no effect, or was applied outside its usual dialect.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
