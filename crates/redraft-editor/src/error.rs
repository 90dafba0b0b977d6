//! Error and diagnostic system for the Redraft edit engine.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Severity levels
//! - A diagnostic collector that accumulates one report per skipped edit
//! - [`EditError`] for mutator failures
//!
//! # Overview
//!
//! The engine never fails a batch. Each edit that is skipped, or that only
//! partially fits the diagram, produces a [`Diagnostic`] naming the edit's
//! position in the script. Diagnostics are logged as they are emitted and are
//! also returned to callers that ask for an edit report.
//!
//! # Example
//!
//! ```
//! # use redraft_editor::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::warning("class `Order` not found")
//!     .with_code(ErrorCode::E100)
//!     .with_edit(3, "remove_class")
//!     .with_help("check the class name against the diagram");
//! assert_eq!(diag.to_string(), "warning[E100]: class `Order` not found");
//! ```

mod collector;
mod diagnostic;
mod edit_error;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use edit_error::EditError;
pub use error_code::ErrorCode;
pub use severity::Severity;
