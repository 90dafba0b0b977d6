//! Mutators: one function per edit kind.
//!
//! A mutator reads the details of one [`EditOperation`], locates what it
//! needs with the [`locator`](crate::locator) module, and inserts, removes,
//! or replaces whole lines of the document. Every index it uses is resolved
//! right before the single change it makes.
//!
//! A mutator that cannot act (a required field is missing, or the target is
//! not in the diagram) leaves the document untouched and reports why through
//! [`Outcome::Unchanged`].

mod class;
mod member;
mod note;
mod relationship;
mod sequence;
mod state;

use std::collections::BTreeSet;

use log::debug;

use redraft_core::{document::DiagramDocument, kind::DiagramKind, operation::EditOperation};

use crate::{
    error::{EditError, ErrorCode},
    locator::Locator,
    options::EditorOptions,
};

/// Why a mutator left the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Skip {
    pub code: ErrorCode,
    pub message: String,
}

/// Result of running one mutator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Applied,
    Unchanged(Skip),
}

impl Outcome {
    /// The target entity is not defined in the diagram.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::skip(ErrorCode::E100, format!("{} not found", what.into()))
    }

    /// No line matches what the edit refers to.
    pub fn no_match(what: impl Into<String>) -> Self {
        Self::skip(ErrorCode::E101, format!("no {} matches", what.into()))
    }

    /// A field the edit needs is absent or empty.
    pub fn missing(field: &str) -> Self {
        Self::skip(ErrorCode::E102, format!("missing required field `{field}`"))
    }

    fn skip(code: ErrorCode, message: String) -> Self {
        Outcome::Unchanged(Skip { code, message })
    }
}

/// What every mutator knows besides its own details.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EditContext<'a> {
    pub kind: DiagramKind,
    pub header: Option<usize>,
    pub options: &'a EditorOptions,
}

impl<'a> EditContext<'a> {
    pub fn new(doc: &DiagramDocument, kind: DiagramKind, options: &'a EditorOptions) -> Self {
        Self {
            kind,
            header: DiagramKind::locate_header(doc.lines()).map(|(idx, _)| idx),
            options,
        }
    }

    /// Indentation for a line inserted at `index`.
    pub fn indent(&self, doc: &DiagramDocument, index: usize) -> String {
        if self.options.match_indentation {
            doc.indent_for(index, self.header).to_string()
        } else {
            String::new()
        }
    }

    /// Insert `text` at `index`, indented like its neighbours.
    pub fn insert(
        &self,
        doc: &mut DiagramDocument,
        index: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let indent = self.indent(doc, index);
        doc.insert(index, format!("{indent}{text}"))?;
        Ok(())
    }
}

/// Apply one operation to `doc`.
pub(crate) fn apply(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    op: &EditOperation,
) -> Result<Outcome, EditError> {
    match op {
        EditOperation::AddClass(details) => class::add_class(doc, ctx, details),
        EditOperation::RemoveClass(entity) => class::remove_class(doc, entity),
        EditOperation::ModifyClass(details) => class::modify_class(doc, ctx, details),
        EditOperation::AddRelationship(details) => {
            relationship::add_relationship(doc, ctx, details)
        }
        EditOperation::RemoveRelationship(details) => {
            relationship::remove_relationship(doc, details)
        }
        EditOperation::ModifyRelationship(details) => {
            relationship::modify_relationship(doc, ctx, details)
        }
        EditOperation::AddAttribute(edit) => member::add(doc, ctx, edit, "attribute"),
        EditOperation::RemoveAttribute(edit) => member::remove(doc, edit, "attribute"),
        EditOperation::ModifyAttribute(change) => member::modify(doc, change, "attribute"),
        EditOperation::AddMethod(edit) => member::add(doc, ctx, edit, "method"),
        EditOperation::RemoveMethod(edit) => member::remove(doc, edit, "method"),
        EditOperation::ModifyMethod(change) => member::modify(doc, change, "method"),
        EditOperation::AddParticipant(details) => sequence::add_participant(doc, ctx, details),
        EditOperation::RemoveParticipant(entity) => sequence::remove_participant(doc, entity),
        EditOperation::AddMessage(details) => sequence::add_message(doc, ctx, details),
        EditOperation::RemoveMessage(details) => sequence::remove_message(doc, details),
        EditOperation::AddState(details) => state::add_state(doc, ctx, details),
        EditOperation::RemoveState(entity) => state::remove_state(doc, entity),
        EditOperation::AddTransition(details) => state::add_transition(doc, ctx, details),
        EditOperation::RemoveTransition(details) => state::remove_transition(doc, details),
        EditOperation::AddNote(note) => note::add_note(doc, ctx, note),
        EditOperation::RemoveNote(note) => note::remove_note(doc, note),
        EditOperation::ModifyNote(note) => note::modify_note(doc, ctx, note),
    }
}

/// A trimmed, non-empty field value.
pub(crate) fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Index right after the last non-blank line.
///
/// Appending here keeps a trailing newline at the end of the text.
pub(crate) fn append_index(doc: &DiagramDocument) -> usize {
    (0..doc.len())
        .rev()
        .find(|&idx| !doc.trimmed(idx).is_empty())
        .map_or(0, |idx| idx + 1)
}

/// Remove an entity's definition, its block, and every line referencing it.
///
/// All indices are collected first and removed in one descending pass.
pub(crate) fn remove_entity<L: Locator>(
    doc: &mut DiagramDocument,
    locator: &L,
    name: &str,
    what: &str,
) -> Result<Outcome, EditError> {
    let definition = locator.find_entity(doc, name)?;
    if definition.is_none() && locator.requires_definition() {
        return Ok(Outcome::not_found(format!("{what} `{name}`")));
    }

    let mut lines = BTreeSet::new();
    if let Some(definition) = definition {
        lines.insert(definition);
        lines.extend(locator.find_block(doc, name, definition)?);
    }
    lines.extend(locator.find_references(doc, name)?);

    if lines.is_empty() {
        return Ok(Outcome::not_found(format!("{what} `{name}`")));
    }

    let removed = doc.remove_all(&lines)?;
    debug!(name, removed; "Removed {what}");
    Ok(Outcome::Applied)
}
