//! Note mutators.
//!
//! Notes are written in the shape of the diagram's dialect:
//!
//! | Dialect  | Line                          |
//! |----------|-------------------------------|
//! | sequence | `Note right of T: text`       |
//! | state    | `note right of T : text`      |
//! | other    | `note for T "text"`           |

use redraft_core::{
    document::{DiagramDocument, indent_of},
    kind::DiagramKind,
    operation::NoteEdit,
};

use super::{EditContext, Outcome, append_index, required};
use crate::{error::EditError, locator::NoteLocator};

fn note_line(kind: DiagramKind, target: &str, text: &str) -> String {
    match kind {
        DiagramKind::Sequence => format!("Note right of {target}: {text}"),
        DiagramKind::State => format!("note right of {target} : {text}"),
        _ => format!("note for {target} \"{text}\""),
    }
}

/// Append a note about `target`.
pub(super) fn add_note(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    note: &NoteEdit,
) -> Result<Outcome, EditError> {
    let Some(target) = required(&note.target) else {
        return Ok(Outcome::missing("target"));
    };
    let Some(text) = required(&note.text) else {
        return Ok(Outcome::missing("text"));
    };

    let index = append_index(doc);
    ctx.insert(doc, index, &note_line(ctx.kind, target, text))?;
    Ok(Outcome::Applied)
}

/// Remove the most recent note about `target`, optionally the one containing
/// `text`.
pub(super) fn remove_note(
    doc: &mut DiagramDocument,
    note: &NoteEdit,
) -> Result<Outcome, EditError> {
    let Some(target) = required(&note.target) else {
        return Ok(Outcome::missing("target"));
    };

    match NoteLocator.find_note(doc, target, required(&note.text))? {
        Some(idx) => {
            doc.remove(idx)?;
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::no_match(format!("note for `{target}`"))),
    }
}

/// Replace the text of the most recent note about `target`.
///
/// Sequence and state notes keep their placement (`over A,B`, `left of`) and
/// only the text after the `:` changes. Other notes are rewritten whole.
pub(super) fn modify_note(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    note: &NoteEdit,
) -> Result<Outcome, EditError> {
    let Some(target) = required(&note.target) else {
        return Ok(Outcome::missing("target"));
    };
    let Some(text) = required(&note.text) else {
        return Ok(Outcome::missing("text"));
    };
    let Some(idx) = NoteLocator.find_note(doc, target, None)? else {
        return Ok(Outcome::no_match(format!("note for `{target}`")));
    };

    let current = doc.line(idx).unwrap_or_default();
    let indent = indent_of(current);
    let placed = match ctx.kind {
        DiagramKind::Sequence | DiagramKind::State => current
            .trim()
            .split_once(':')
            .map(|(placement, _)| format!("{placement}: {text}")),
        _ => None,
    };
    let body = placed.unwrap_or_else(|| note_line(ctx.kind, target, text));

    let line = format!("{indent}{body}");
    doc.replace(idx, line)?;
    Ok(Outcome::Applied)
}
