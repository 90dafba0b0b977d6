//! Sequence-diagram lookups.

use std::sync::LazyLock;

use regex::Regex;

use redraft_core::document::DiagramDocument;

use super::{Locator, NoteLocator, unquote, whole_word};
use crate::error::EditError;

/// Arrow tokens of a message: `->`, `->>`, `-x`, `-)` and their dashed forms.
static MESSAGE_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--?(?:>>|>|x|\))").expect("message arrow pattern is valid")
});

const DECLARATION_KEYWORDS: [&str; 2] = ["participant ", "actor "];
const ACTIVATION_KEYWORDS: [&str; 2] = ["activate ", "deactivate "];

/// Split a message line into its arrow part and its text.
///
/// Returns `None` for lines that are not messages. The text is empty when the
/// line has no `:`.
pub(crate) fn split_message(trimmed: &str) -> Option<(&str, &str)> {
    if NoteLocator::is_note_line(trimmed) {
        return None;
    }
    let (head, text) = trimmed.split_once(':').unwrap_or((trimmed, ""));
    MESSAGE_ARROW
        .is_match(head)
        .then(|| (head, text.trim()))
}

/// Returns `true` if `trimmed` declares a participant or actor.
pub(crate) fn is_declaration(trimmed: &str) -> bool {
    declaration_body(trimmed).is_some()
}

fn declaration_body(trimmed: &str) -> Option<&str> {
    DECLARATION_KEYWORDS
        .iter()
        .find_map(|keyword| trimmed.strip_prefix(keyword))
        .map(str::trim)
}

/// Locator for `sequenceDiagram` entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequenceLocator;

impl SequenceLocator {
    /// End of the participant declarations that follow `header`.
    ///
    /// Returns the index of the first line after `header` that is not a
    /// declaration.
    pub fn declarations_end(&self, doc: &DiagramDocument, header: usize) -> usize {
        (header + 1..doc.len())
            .find(|&idx| !is_declaration(doc.trimmed(idx)))
            .unwrap_or(doc.len())
    }

    /// Find the most recent message from `from` to `to`.
    ///
    /// Both names must appear as whole words before the `:`. When `message`
    /// is given, the line must contain it verbatim or with every literal `\n`
    /// read as a space.
    pub fn find_message(
        &self,
        doc: &DiagramDocument,
        from: &str,
        to: &str,
        message: Option<&str>,
    ) -> Result<Option<usize>, EditError> {
        let from = whole_word(from)?;
        let to = whole_word(to)?;

        Ok((0..doc.len()).rev().find(|&idx| {
            let trimmed = doc.trimmed(idx);
            let Some((head, _)) = split_message(trimmed) else {
                return false;
            };
            from.is_match(head)
                && to.is_match(head)
                && message.is_none_or(|message| message_matches(trimmed, message))
        }))
    }

    /// First message line containing `text`.
    pub fn find_message_containing(&self, doc: &DiagramDocument, text: &str) -> Option<usize> {
        (0..doc.len()).find(|&idx| {
            let trimmed = doc.trimmed(idx);
            split_message(trimmed).is_some() && trimmed.contains(text)
        })
    }

    /// Index of the last message line, if any.
    pub fn last_message(&self, doc: &DiagramDocument) -> Option<usize> {
        (0..doc.len())
            .rev()
            .find(|&idx| split_message(doc.trimmed(idx)).is_some())
    }
}

fn message_matches(line: &str, message: &str) -> bool {
    line.contains(message) || line.contains(&message.replace("\\n", " "))
}

impl Locator for SequenceLocator {
    /// Matches `participant` and `actor` lines by declared name, alias, or a
    /// whole-word occurrence of the name.
    fn find_entity(&self, doc: &DiagramDocument, name: &str) -> Result<Option<usize>, EditError> {
        let word = whole_word(name)?;
        Ok((0..doc.len()).find(|&idx| {
            let Some(body) = declaration_body(doc.trimmed(idx)) else {
                return false;
            };
            let (declared, alias) = match body.split_once(" as ") {
                Some((declared, alias)) => (unquote(declared), Some(unquote(alias))),
                None => (unquote(body), None),
            };
            declared == name || alias == Some(name) || word.is_match(body)
        }))
    }

    fn find_block(
        &self,
        _doc: &DiagramDocument,
        _name: &str,
        _definition: usize,
    ) -> Result<Vec<usize>, EditError> {
        Ok(Vec::new())
    }

    /// Messages sent or received by the participant, its activation lines,
    /// and notes about it.
    fn find_references(
        &self,
        doc: &DiagramDocument,
        name: &str,
    ) -> Result<Vec<usize>, EditError> {
        let word = whole_word(name)?;
        Ok((0..doc.len())
            .filter(|&idx| {
                let trimmed = doc.trimmed(idx);
                if let Some((head, _)) = split_message(trimmed) {
                    return word.is_match(head);
                }
                if NoteLocator::is_note_line(trimmed) {
                    let head = trimmed.split_once(':').map_or(trimmed, |(head, _)| head);
                    return word.is_match(head);
                }
                ACTIVATION_KEYWORDS
                    .iter()
                    .find_map(|keyword| trimmed.strip_prefix(keyword))
                    .is_some_and(|subject| unquote(subject) == name)
            })
            .collect())
    }

    fn requires_definition(&self) -> bool {
        false
    }
}
