//! Entity locators.
//!
//! Locators find where entities live in a [`DiagramDocument`] without a
//! grammar: they scan lines and match them against patterns built from the
//! entity name. Each dialect has its own locator behind the common
//! [`Locator`] trait, so mutators that remove an entity work the same way for
//! classes, participants, and states.
//!
//! Scan direction is part of each lookup's contract. Definitions and blocks
//! are found scanning forward (the first match wins). Relationship, message,
//! transition, and note lines targeted for removal or modification are found
//! scanning backward (the most recent match wins).

mod class;
mod note;
mod sequence;
mod state;

pub use class::{BlockStyle, ClassDefinition, ClassLocator, MemberBlock};
pub use note::NoteLocator;
pub use sequence::SequenceLocator;
pub use state::StateLocator;

use regex::Regex;

use redraft_core::document::DiagramDocument;

use crate::error::EditError;

/// Lookups every dialect provides for its named entities.
pub trait Locator {
    /// Find the line that defines `name`.
    fn find_entity(&self, doc: &DiagramDocument, name: &str) -> Result<Option<usize>, EditError>;

    /// Find the lines owned by the entity defined at `definition`, such as
    /// class members or the body of a composite state. The definition line
    /// itself is not included.
    fn find_block(
        &self,
        doc: &DiagramDocument,
        name: &str,
        definition: usize,
    ) -> Result<Vec<usize>, EditError>;

    /// Find every line that refers to `name` without defining it, in
    /// ascending order.
    fn find_references(&self, doc: &DiagramDocument, name: &str)
    -> Result<Vec<usize>, EditError>;

    /// Whether references are only removed when the definition exists.
    ///
    /// Classes own their references; participants and states may be used
    /// without an explicit declaration.
    fn requires_definition(&self) -> bool {
        true
    }
}

/// Returns `true` for characters that take part in a regex word boundary.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build a pattern matching `name` as a whole word.
///
/// Boundaries are only asserted on sides where `name` starts or ends with a
/// word character, so names such as `"Order Service"` or `Foo~T~` still
/// match.
pub(crate) fn whole_word(name: &str) -> Result<Regex, regex::Error> {
    let start = if name.starts_with(is_word_char) { r"\b" } else { "" };
    let end = if name.ends_with(is_word_char) { r"\b" } else { "" };
    Regex::new(&format!("{start}{}{end}", regex::escape(name)))
}

/// Find the line holding the `}` that closes the block opened on `open`.
///
/// Braces are counted across lines, so nested blocks are skipped. Returns
/// `None` if the block is never closed.
pub(crate) fn matching_brace(doc: &DiagramDocument, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, line) in doc.lines().iter().enumerate().skip(open) {
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(idx);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Remove surrounding double or single quotes.
pub(crate) fn unquote(text: &str) -> &str {
    text.trim().trim_matches('"').trim_matches('\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_boundaries() {
        let re = whole_word("User").unwrap();
        assert!(re.is_match("User --> Order"));
        assert!(re.is_match("note for User \"x\""));
        assert!(!re.is_match("UserProfile --> Order"));
        assert!(!re.is_match("SuperUser --> Order"));
    }

    #[test]
    fn test_whole_word_with_punctuation_edges() {
        let re = whole_word("Foo~T~").unwrap();
        assert!(re.is_match("Foo~T~ <|-- Bar"));

        let spaced = whole_word("Order Service").unwrap();
        assert!(spaced.is_match("\"Order Service\"->>DB: save"));
    }

    #[test]
    fn test_whole_word_escapes_metacharacters() {
        let re = whole_word("a.b").unwrap();
        assert!(re.is_match("x a.b y"));
        assert!(!re.is_match("x acb y"));
    }

    #[test]
    fn test_matching_brace_nested() {
        let doc = DiagramDocument::from_text("state A {\n  state B {\n    x\n  }\n  y\n}\nz");
        assert_eq!(matching_brace(&doc, 0), Some(5));
        assert_eq!(matching_brace(&doc, 1), Some(3));
    }

    #[test]
    fn test_matching_brace_unclosed() {
        let doc = DiagramDocument::from_text("class A {\n  +x");
        assert_eq!(matching_brace(&doc, 0), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(" \"NLP Extractor\" "), "NLP Extractor");
        assert_eq!(unquote("'A'"), "A");
        assert_eq!(unquote("B"), "B");
    }
}
