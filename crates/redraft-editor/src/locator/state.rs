//! State-diagram lookups.

use std::sync::LazyLock;

use regex::Regex;

use redraft_core::{document::DiagramDocument, kind::DiagramKind};

use super::{Locator, NoteLocator, matching_brace, whole_word};
use crate::error::EditError;

/// Arrows and pseudo-state brackets; a line holding either is not a state
/// declaration.
static ARROW_OR_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"->|\[").expect("arrow pattern is valid"));

const TRANSITION: &str = "-->";

/// Locator for `stateDiagram` entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateLocator;

impl StateLocator {
    /// Find the `state Parent {` line opening a composite state.
    pub fn find_composite(
        &self,
        doc: &DiagramDocument,
        parent: &str,
    ) -> Result<Option<usize>, EditError> {
        let opener = Regex::new(&format!(r"^state\s+{}\s*\{{", regex::escape(parent)))?;
        Ok((0..doc.len()).find(|&idx| opener.is_match(doc.trimmed(idx))))
    }

    /// Find the most recent transition from `from` to `to`.
    ///
    /// When `label` is given, the text after the `:` must contain it.
    pub fn find_transition(
        &self,
        doc: &DiagramDocument,
        from: &str,
        to: &str,
        label: Option<&str>,
    ) -> Result<Option<usize>, EditError> {
        let from = whole_word(from)?;
        let to = whole_word(to)?;

        Ok((0..doc.len()).rev().find(|&idx| {
            let trimmed = doc.trimmed(idx);
            if !trimmed.contains(TRANSITION) || NoteLocator::is_note_line(trimmed) {
                return false;
            }
            let (edge, text) = trimmed.split_once(':').unwrap_or((trimmed, ""));
            from.is_match(edge)
                && to.is_match(edge)
                && label.is_none_or(|label| text.contains(label))
        }))
    }

    /// Index of the last transition line, if any.
    pub fn last_transition(&self, doc: &DiagramDocument) -> Option<usize> {
        (0..doc.len())
            .rev()
            .find(|&idx| doc.trimmed(idx).contains(TRANSITION))
    }
}

impl Locator for StateLocator {
    /// The first line that mentions the state without an arrow or bracket.
    ///
    /// The name is matched as a plain substring, so a state whose name is
    /// contained in an earlier declaration resolves to that line.
    fn find_entity(&self, doc: &DiagramDocument, name: &str) -> Result<Option<usize>, EditError> {
        let header = DiagramKind::locate_header(doc.lines()).map(|(idx, _)| idx);
        Ok((0..doc.len()).find(|&idx| {
            let trimmed = doc.trimmed(idx);
            Some(idx) != header
                && trimmed.contains(name)
                && !ARROW_OR_BRACKET.is_match(trimmed)
                && !NoteLocator::is_note_line(trimmed)
                && !trimmed.starts_with("%%")
        }))
    }

    /// The body and closing brace of a composite state.
    fn find_block(
        &self,
        doc: &DiagramDocument,
        _name: &str,
        definition: usize,
    ) -> Result<Vec<usize>, EditError> {
        let trimmed = doc.trimmed(definition);
        if !(trimmed.starts_with("state ") && trimmed.ends_with('{')) {
            return Ok(Vec::new());
        }
        let close = matching_brace(doc, definition).unwrap_or(doc.len().saturating_sub(1));
        Ok((definition + 1..=close).collect())
    }

    /// Transitions into or out of the state, and notes about it.
    fn find_references(
        &self,
        doc: &DiagramDocument,
        name: &str,
    ) -> Result<Vec<usize>, EditError> {
        let word = whole_word(name)?;
        let notes = NoteLocator.references(doc, name)?;

        let mut lines: Vec<usize> = (0..doc.len())
            .filter(|&idx| {
                let trimmed = doc.trimmed(idx);
                let edge = trimmed.split_once(':').map_or(trimmed, |(edge, _)| edge);
                trimmed.contains(TRANSITION) && word.is_match(edge)
            })
            .chain(notes)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        Ok(lines)
    }

    fn requires_definition(&self) -> bool {
        false
    }
}
