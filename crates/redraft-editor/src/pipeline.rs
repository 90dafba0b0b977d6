//! The edit pipeline.
//!
//! [`apply_edits`] turns diagram text and an [`EditScript`] into edited
//! text. The dialect is detected once, before the first edit, and every
//! instruction is then applied in order against the same line buffer.
//!
//! The pipeline never fails. Unknown or malformed instructions, edits whose
//! target is missing, and mutators that fail are each reported as a
//! [`Diagnostic`] and skipped; the edits after them still run. A mutator that
//! fails halfway has its partial changes rolled back first.

use log::{debug, info};

use redraft_core::{
    document::DiagramDocument,
    kind::DiagramKind,
    operation::EditOperation,
    script::{EditScript, Instruction},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, EditError, ErrorCode},
    mutate::{self, EditContext, Outcome},
    options::EditorOptions,
};

/// The edited text together with what happened to each edit.
#[derive(Debug, Clone)]
pub struct EditReport {
    text: String,
    kind: DiagramKind,
    applied: usize,
    diagnostics: Vec<Diagnostic>,
}

impl EditReport {
    /// Returns the edited diagram text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the report and return the edited diagram text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Returns the dialect detected before the first edit.
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Returns the number of edits that changed the diagram.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Returns one diagnostic per skipped, failed, or questionable edit.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if a mutator failed and its edit was rolled back.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity().is_error())
    }
}

/// Apply `script` to `text` and return the edited text.
///
/// # Examples
///
/// ```
/// # use redraft_core::script::EditScript;
/// # use redraft_editor::{EditorOptions, apply_edits};
/// let script = EditScript::from_json(
///     r#"{"edits": [{"type": "add_message",
///                    "details": {"from": "A", "to": "B", "message": "pong", "type": "-->>"}}]}"#,
/// ).unwrap();
///
/// let text = apply_edits("sequenceDiagram\nA->>B: ping", &script, &EditorOptions::default());
/// assert_eq!(text, "sequenceDiagram\nA->>B: ping\nA-->>B: pong");
/// ```
pub fn apply_edits(text: &str, script: &EditScript, options: &EditorOptions) -> String {
    apply_edits_with_report(text, script, options).into_text()
}

/// Apply `script` to `text` and report on every edit.
pub fn apply_edits_with_report(
    text: &str,
    script: &EditScript,
    options: &EditorOptions,
) -> EditReport {
    run_script(text, script, options, mutate::apply)
}

/// Run every instruction of `script` through `mutator`.
pub(crate) fn run_script<F>(
    text: &str,
    script: &EditScript,
    options: &EditorOptions,
    mut mutator: F,
) -> EditReport
where
    F: FnMut(&mut DiagramDocument, &EditContext<'_>, &EditOperation) -> Result<Outcome, EditError>,
{
    let mut doc = DiagramDocument::from_text(text);
    let kind = DiagramKind::detect(doc.lines());
    info!(kind:%, edits = script.len(); "Applying edit script");

    let mut collector = DiagnosticCollector::new();
    let mut applied = 0;

    for (index, instruction) in script.into_iter().enumerate() {
        let op = match instruction {
            Instruction::Edit(op) => op,
            Instruction::Unknown { kind: name } => {
                collector.emit(
                    Diagnostic::warning(format!("unknown edit type `{name}`"))
                        .with_code(ErrorCode::E001)
                        .with_edit(index, name.as_str())
                        .with_help("the edit was skipped"),
                );
                continue;
            }
            Instruction::Malformed { kind: name, reason } => {
                let code = if name.is_some() {
                    ErrorCode::E002
                } else {
                    ErrorCode::E003
                };
                collector.emit(
                    Diagnostic::warning(format!("malformed edit: {reason}"))
                        .with_code(code)
                        .with_edit(index, name.as_deref().unwrap_or_default()),
                );
                continue;
            }
        };

        let edit_kind = op.kind();
        if let Some(dialect) = edit_kind.dialect() {
            if kind != DiagramKind::Unknown && dialect != kind {
                collector.emit(
                    Diagnostic::warning(format!("`{edit_kind}` edit on a {kind} diagram"))
                        .with_code(ErrorCode::E200)
                        .with_edit(index, edit_kind.as_str())
                        .with_help(format!("`{edit_kind}` expects a {dialect} diagram")),
                );
            }
        }

        let ctx = EditContext::new(&doc, kind, options);
        let snapshot = doc.clone();
        match mutator(&mut doc, &ctx, op) {
            Ok(Outcome::Applied) => {
                applied += 1;
                debug!(edit_index = index, edit_kind = edit_kind.as_str(); "Edit applied");
            }
            Ok(Outcome::Unchanged(skip)) => {
                collector.emit(
                    Diagnostic::warning(skip.message)
                        .with_code(skip.code)
                        .with_edit(index, edit_kind.as_str()),
                );
            }
            Err(err) => {
                doc = snapshot;
                collector.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(err.code())
                        .with_edit(index, edit_kind.as_str())
                        .with_help("the edit was rolled back"),
                );
            }
        }
    }

    let has_errors = collector.has_errors();
    let diagnostics = collector.finish();
    info!(applied, skipped = script.len() - applied, has_errors; "Edit script finished");

    EditReport {
        text: doc.into_text(),
        kind,
        applied,
        diagnostics,
    }
}
