//! Redraft - structured edits for Mermaid-style diagrams.
//!
//! Decoding of edit scripts and their application to class, sequence and
//! state diagram text. Edits are applied line by line; everything an edit
//! does not touch is kept as written.

pub mod config;

mod error;
mod extract;

pub use redraft_core::{kind, operation, script};
pub use redraft_editor::{
    EditReport, EditorOptions,
    error::{Diagnostic, ErrorCode, Severity},
};

pub use error::RedraftError;
pub use extract::{extract_diagram_code, extract_edit_json};

use log::{debug, info, trace};

use config::AppConfig;
use script::EditScript;

/// Editor for applying edit scripts to diagram text.
///
/// This provides an API for decoding edit scripts and applying them to
/// diagrams with the settings of an [`AppConfig`].
///
/// # Examples
///
/// ```rust
/// use redraft::{DiagramEditor, config::AppConfig};
///
/// let diagram = "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping";
///
/// // With custom config
/// let config = AppConfig::default();
/// let editor = DiagramEditor::new(config);
///
/// // Decode the edit script
/// let script = editor
///     .parse_edits(r#"{"edits": [{"type": "add_message",
///         "details": {"from": "A", "to": "B", "message": "pong", "type": "-->>"}}]}"#)
///     .expect("Failed to decode");
///
/// // Apply it
/// let edited = editor.apply(diagram, &script);
/// assert!(edited.ends_with("A-->>B: pong"));
///
/// // Or use default config
/// let editor = DiagramEditor::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramEditor {
    config: AppConfig,
}

impl DiagramEditor {
    /// Create a new diagram editor with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including editor and input settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this editor was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode an edit script.
    ///
    /// When code-fence stripping is enabled, the JSON object is first pulled
    /// out of any fence or prose around it.
    ///
    /// # Errors
    ///
    /// Returns `RedraftError::Decode` if the script is not a JSON object of
    /// the `{ "edits": [...] }` shape. Individual edits that are unknown or
    /// malformed are not errors; they are reported when the script is applied.
    pub fn parse_edits(&self, source: &str) -> Result<EditScript, RedraftError> {
        info!("Decoding edit script");

        let json = if self.config.input().strip_code_fences() {
            extract_edit_json(source)
        } else {
            source
        };

        let script =
            EditScript::from_json(json).map_err(|err| RedraftError::new_decode_error(err, json))?;

        debug!(edit_count = script.len(); "Edit script decoded");
        trace!(script:?; "Decoded edit script");

        Ok(script)
    }

    /// Apply `script` to `diagram` and return the edited text.
    ///
    /// This never fails: edits that cannot be applied are skipped.
    pub fn apply(&self, diagram: &str, script: &EditScript) -> String {
        self.apply_with_report(diagram, script).into_text()
    }

    /// Apply `script` to `diagram` and report on every edit.
    pub fn apply_with_report(&self, diagram: &str, script: &EditScript) -> EditReport {
        let diagram = if self.config.input().strip_code_fences() {
            extract_diagram_code(diagram)
        } else {
            diagram
        };

        let options = self.config.editor().to_options();
        let report = redraft_editor::apply_edits_with_report(diagram, script, &options);

        info!(
            kind:% = report.kind(),
            applied = report.applied(),
            diagnostics = report.diagnostics().len();
            "Diagram edited"
        );
        trace!(text = report.text(); "Edited diagram");

        report
    }

    /// Decode `edits` and apply them to `diagram`.
    ///
    /// # Errors
    ///
    /// Returns `RedraftError::Decode` if `edits` cannot be decoded.
    pub fn edit(&self, diagram: &str, edits: &str) -> Result<String, RedraftError> {
        let script = self.parse_edits(edits)?;
        Ok(self.apply(diagram, &script))
    }
}
