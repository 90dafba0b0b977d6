//! Note lookups shared by every dialect.

use redraft_core::document::DiagramDocument;

use super::whole_word;
use crate::error::EditError;

/// Locator for note lines.
///
/// A note line opens with the word `note` in any case: `note for User "..."`
/// in class diagrams, `Note right of A: ...` in sequence diagrams, and
/// `note right of Idle : ...` in state diagrams.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoteLocator;

impl NoteLocator {
    /// Returns `true` if `trimmed` is a note line.
    pub fn is_note_line(trimmed: &str) -> bool {
        trimmed
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("note "))
    }

    /// Index of the first note line.
    pub fn first_note(&self, doc: &DiagramDocument) -> Option<usize> {
        (0..doc.len()).find(|&idx| Self::is_note_line(doc.trimmed(idx)))
    }

    /// Find the most recent note about `target`.
    ///
    /// When `text` is given the note must also contain it.
    pub fn find_note(
        &self,
        doc: &DiagramDocument,
        target: &str,
        text: Option<&str>,
    ) -> Result<Option<usize>, EditError> {
        let word = whole_word(target)?;
        Ok((0..doc.len()).rev().find(|&idx| {
            let trimmed = doc.trimmed(idx);
            Self::is_note_line(trimmed)
                && word.is_match(trimmed)
                && text.is_none_or(|text| trimmed.contains(text))
        }))
    }

    /// Every note line that names `target` as a whole word, ascending.
    pub fn references(&self, doc: &DiagramDocument, target: &str) -> Result<Vec<usize>, EditError> {
        let word = whole_word(target)?;
        Ok((0..doc.len())
            .filter(|&idx| {
                let trimmed = doc.trimmed(idx);
                Self::is_note_line(trimmed) && word.is_match(trimmed)
            })
            .collect())
    }
}
