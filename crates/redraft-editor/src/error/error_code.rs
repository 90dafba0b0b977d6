//! Error codes for the Redraft diagnostic system.
//!
//! Error codes are organized by the stage that gave up on an edit:
//! - `E0xx` - Decoding errors
//! - `E1xx` - Lookup errors
//! - `E2xx` - Dialect errors
//! - `E3xx` - Mutator failures

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Decoding Errors (E0xx)
    // =========================================================================
    /// Unknown edit kind.
    ///
    /// The `type` of an edit names none of the supported edit kinds.
    E001,

    /// Malformed edit details.
    ///
    /// The `details` of an edit do not have the shape its kind expects.
    E002,

    /// Missing edit type.
    ///
    /// An edit entry has no `type` field, or the entry is not an object.
    E003,

    // =========================================================================
    // Lookup Errors (E1xx)
    // =========================================================================
    /// Target entity not found.
    ///
    /// The class, participant, or state an edit targets is not defined.
    E100,

    /// Referenced line not found.
    ///
    /// No relationship, message, transition, note, or member line matches
    /// the edit.
    E101,

    /// Missing required field.
    ///
    /// A field the edit kind needs (a name, an endpoint, a member) is absent.
    E102,

    // =========================================================================
    // Dialect Errors (E2xx)
    // =========================================================================
    /// Edit kind does not match the diagram dialect.
    ///
    /// The edit was still applied using the heuristics of its own dialect.
    E200,

    // =========================================================================
    // Mutator Failures (E3xx)
    // =========================================================================
    /// Line index out of range.
    ///
    /// A mutator addressed a line that does not exist.
    E300,

    /// Pattern build failure.
    ///
    /// A search pattern built from an entity name could not be compiled.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Decoding errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Lookup errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            // Dialect errors
            ErrorCode::E200 => "E200",
            // Mutator failures
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Decoding errors
            ErrorCode::E001 => "unknown edit kind",
            ErrorCode::E002 => "malformed edit details",
            ErrorCode::E003 => "missing edit type",
            // Lookup errors
            ErrorCode::E100 => "target not found",
            ErrorCode::E101 => "referenced line not found",
            ErrorCode::E102 => "missing required field",
            // Dialect errors
            ErrorCode::E200 => "dialect mismatch",
            // Mutator failures
            ErrorCode::E300 => "line index out of range",
            ErrorCode::E301 => "invalid search pattern",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
