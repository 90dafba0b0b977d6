//! The core diagnostic type for the Redraft error system.
//!
//! A [`Diagnostic`] describes what happened to one edit of a script that did
//! not apply cleanly: its severity, an optional error code, which edit it
//! concerns, and optional help text.

use std::fmt;

use crate::error::{Severity, error_code::ErrorCode};

/// The edit a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EditRef {
    index: usize,
    kind: String,
}

/// A diagnostic message about one edit of a script.
///
/// # Example
///
/// ```text
/// warning[E100]: class `Order` not found
///   = edit #2 (remove_class)
///   = help: check the class name against the diagram
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    edit: Option<EditRef>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use redraft_editor::error::{Diagnostic, ErrorCode};
    ///
    /// let diag = Diagnostic::error("line index 9 is out of range")
    ///     .with_code(ErrorCode::E300)
    ///     .with_edit(0, "add_state");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use redraft_editor::error::Diagnostic;
    ///
    /// let diag = Diagnostic::warning("unknown edit kind `teleport_class`")
    ///     .with_help("supported kinds include add_class and remove_class");
    /// assert!(diag.severity().is_warning());
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the zero-based position of the edit in its script, if recorded.
    pub fn edit_index(&self) -> Option<usize> {
        self.edit.as_ref().map(|edit| edit.index)
    }

    /// Get the kind name of the edit, if recorded.
    pub fn edit_kind(&self) -> Option<&str> {
        self.edit.as_ref().map(|edit| edit.kind.as_str())
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Record which edit of the script this diagnostic concerns.
    pub fn with_edit(mut self, index: usize, kind: impl Into<String>) -> Self {
        self.edit = Some(EditRef {
            index,
            kind: kind.into(),
        });
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            edit: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
