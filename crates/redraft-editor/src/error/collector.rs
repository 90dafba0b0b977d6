//! Collector for accumulating diagnostics while a script is applied.
//!
//! The [`DiagnosticCollector`] lets the pipeline report every skipped or
//! failed edit instead of stopping at the first one. Each diagnostic is
//! logged as it is emitted.

use log::{error, warn};

use crate::error::Diagnostic;

/// A collector for accumulating diagnostics during one pipeline run.
///
/// # Example
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("class `Order` not found")
///         .with_code(ErrorCode::E100)
///         .with_edit(0, "remove_class"),
/// );
///
/// let diagnostics = collector.finish();
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// The diagnostic is logged at a level matching its severity, then added
    /// to the collection. An error marks the collector as having errors.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let edit_index = diagnostic.edit_index();
        let edit_kind = diagnostic.edit_kind().unwrap_or("");
        if diagnostic.severity().is_error() {
            self.has_errors = true;
            error!(edit_index:?, edit_kind; "{diagnostic}");
        } else {
            warn!(edit_index:?, edit_kind; "{diagnostic}");
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any error diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection and return every diagnostic in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
