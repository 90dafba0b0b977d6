//! Class-diagram lookups.
//!
//! Classes come in two shapes. Colon style declares `class User` and lists
//! members as `User : +name String` lines that follow it. Brace style wraps
//! bare member lines in `class User {` ... `}`.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use redraft_core::document::DiagramDocument;

use super::{Locator, NoteLocator, matching_brace, whole_word};
use crate::error::EditError;

/// A line that opens with an identifier, an optional quoted multiplicity and
/// a relationship token.
static RELATIONSHIP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z_][A-Za-z0-9_]*\s*(?:"[^"]*"\s*)?(?:<|--|\.\.|o--|\*--)"#)
        .expect("relationship line pattern is valid")
});

/// A relationship token anywhere in a line.
static RELATIONSHIP_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<|--|\.\.|o--|\*--").expect("relationship token pattern is valid")
});

/// `Name :` at the start of a line, whatever the class.
static ANY_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*:").expect("member line pattern is valid")
});

/// How a class lists its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `Name : member` lines after a bare `class Name`.
    Colon,
    /// Bare member lines inside `class Name { ... }`.
    Brace,
}

/// Where and how a class is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefinition {
    pub line: usize,
    /// The name as spelled on the declaration line.
    pub name: String,
    pub style: BlockStyle,
    pub quoted: bool,
}

/// The member lines of a class, as the half-open range `start..end`.
///
/// New members are inserted at `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBlock {
    pub start: usize,
    pub end: usize,
    pub style: BlockStyle,
}

impl MemberBlock {
    /// Returns `true` if `trimmed` is a member line of class `name` in this
    /// block's style.
    pub fn is_member_line(&self, member: &Regex, trimmed: &str) -> bool {
        match self.style {
            BlockStyle::Colon => member.is_match(trimmed),
            BlockStyle::Brace => !trimmed.is_empty() && trimmed != "}",
        }
    }
}

/// Locator for `classDiagram` entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassLocator;

impl ClassLocator {
    /// Find the declaration of class `name`.
    ///
    /// Matches `class Name`, `class "Name"` and their brace-opening forms,
    /// case-insensitively, scanning forward.
    pub fn find_definition(
        &self,
        doc: &DiagramDocument,
        name: &str,
    ) -> Result<Option<ClassDefinition>, EditError> {
        let escaped = regex::escape(name);
        let pattern = Regex::new(&format!(
            r#"(?i)^class\s+(?:{escaped}|"{escaped}")\s*(\{{)?\s*$"#
        ))?;

        for idx in 0..doc.len() {
            let trimmed = doc.trimmed(idx);
            if let Some(caps) = pattern.captures(trimmed) {
                let style = if caps.get(1).is_some() {
                    BlockStyle::Brace
                } else {
                    BlockStyle::Colon
                };
                return Ok(Some(ClassDefinition {
                    line: idx,
                    name: declared_name(trimmed).to_string(),
                    style,
                    quoted: trimmed.contains('"'),
                }));
            }
        }
        Ok(None)
    }

    /// Pattern for member lines of class `name`.
    ///
    /// With `visibility`, the member text must open with one of `+ - # ~`.
    pub fn member_pattern(&self, name: &str, visibility: bool) -> Result<Regex, regex::Error> {
        let escaped = regex::escape(name);
        if visibility {
            Regex::new(&format!(r"^{escaped}\s*:\s*[+\-#~]"))
        } else {
            Regex::new(&format!(r"^{escaped}\s*:"))
        }
    }

    /// First colon-style member line after `definition`.
    ///
    /// The scan stops at the next class declaration or relationship line.
    pub fn find_member_block_start(
        &self,
        doc: &DiagramDocument,
        name: &str,
        definition: usize,
    ) -> Result<Option<usize>, EditError> {
        let start = self.member_pattern(name, true)?;
        for idx in definition + 1..doc.len() {
            let trimmed = doc.trimmed(idx);
            if start.is_match(trimmed) {
                return Ok(Some(idx));
            }
            if trimmed.starts_with("class ") || is_relationship_line(trimmed) {
                break;
            }
        }
        Ok(None)
    }

    /// First line at or after `start` that is not a member line of `name`.
    pub fn find_member_block_end(
        &self,
        doc: &DiagramDocument,
        name: &str,
        start: usize,
    ) -> Result<usize, EditError> {
        let member = self.member_pattern(name, false)?;
        Ok((start..doc.len())
            .find(|&idx| !member.is_match(doc.trimmed(idx)))
            .unwrap_or(doc.len()))
    }

    /// Resolve the member block of a class.
    ///
    /// A colon-style class without visible members has no block. With
    /// `for_insert`, the block then defaults to the line right after the
    /// declaration so that a first member can be added.
    pub fn members(
        &self,
        doc: &DiagramDocument,
        name: &str,
        definition: &ClassDefinition,
        for_insert: bool,
    ) -> Result<Option<MemberBlock>, EditError> {
        match definition.style {
            BlockStyle::Brace => {
                let end = matching_brace(doc, definition.line).unwrap_or(doc.len());
                Ok(Some(MemberBlock {
                    start: (definition.line + 1).min(end),
                    end,
                    style: BlockStyle::Brace,
                }))
            }
            BlockStyle::Colon => {
                let start = match self.find_member_block_start(doc, name, definition.line)? {
                    Some(start) => start,
                    None if for_insert => definition.line + 1,
                    None => return Ok(None),
                };
                let end = self.find_member_block_end(doc, name, start)?;
                Ok(Some(MemberBlock {
                    start,
                    end,
                    style: BlockStyle::Colon,
                }))
            }
        }
    }

    /// The index right after class `name`'s declaration and members, where a
    /// following class would be inserted.
    ///
    /// Blank lines after the class are skipped unless they trail the
    /// document.
    pub fn class_end(
        &self,
        doc: &DiagramDocument,
        name: &str,
        definition: usize,
    ) -> Result<usize, EditError> {
        let brace = doc.trimmed(definition).ends_with('{');
        let member = self.member_pattern(name, false)?;

        let first = if brace {
            matching_brace(doc, definition).map_or(doc.len(), |close| close + 1)
        } else {
            definition + 1
        };

        let mut idx = first;
        let mut settled = first;
        while idx < doc.len() {
            let trimmed = doc.trimmed(idx);
            if trimmed.is_empty() {
                idx += 1;
            } else if !brace && member.is_match(trimmed) {
                idx += 1;
                settled = idx;
            } else {
                break;
            }
        }

        Ok(if idx == doc.len() { settled } else { idx })
    }

    /// The last class declaration in the document with its name.
    pub fn last_class(&self, doc: &DiagramDocument) -> Option<(usize, String)> {
        (0..doc.len()).rev().find_map(|idx| {
            let trimmed = doc.trimmed(idx);
            trimmed
                .starts_with("class ")
                .then(|| (idx, declared_name(trimmed).to_string()))
        })
    }

    /// Find the most recent relationship line connecting `from` and `to`.
    ///
    /// Both names must appear as whole words. When `arrow` is given the line
    /// must also contain it.
    pub fn find_relationship(
        &self,
        doc: &DiagramDocument,
        from: &str,
        to: &str,
        arrow: Option<&str>,
    ) -> Result<Option<usize>, EditError> {
        let from = whole_word(from)?;
        let to = whole_word(to)?;
        let bodies = self.brace_bodies(doc);

        Ok((0..doc.len()).rev().find(|&idx| {
            let trimmed = doc.trimmed(idx);
            !bodies.contains(&idx)
                && is_relationship_reference(trimmed)
                && from.is_match(trimmed)
                && to.is_match(trimmed)
                && arrow.is_none_or(|arrow| trimmed.contains(arrow))
        }))
    }

    /// Lines inside the braces of every brace-style class block.
    ///
    /// Member types such as `List<Order>` look like relationship tokens, so
    /// these lines never count as edges.
    pub fn brace_bodies(&self, doc: &DiagramDocument) -> BTreeSet<usize> {
        let mut bodies = BTreeSet::new();
        for idx in 0..doc.len() {
            let trimmed = doc.trimmed(idx);
            if trimmed.starts_with("class ") && trimmed.ends_with('{') {
                let close = matching_brace(doc, idx).unwrap_or(doc.len());
                bodies.extend(idx + 1..close);
            }
        }
        bodies
    }

    /// Index of the last relationship line, if any.
    pub fn last_relationship(&self, doc: &DiagramDocument) -> Option<usize> {
        (0..doc.len())
            .rev()
            .find(|&idx| is_relationship_line(doc.trimmed(idx)))
    }
}

impl Locator for ClassLocator {
    fn find_entity(&self, doc: &DiagramDocument, name: &str) -> Result<Option<usize>, EditError> {
        Ok(self
            .find_definition(doc, name)?
            .map(|definition| definition.line))
    }

    /// Member lines of the class, including the closing brace of a brace
    /// block.
    ///
    /// Colon-style members are collected past unrelated lines up to the next
    /// class declaration or relationship line.
    fn find_block(
        &self,
        doc: &DiagramDocument,
        name: &str,
        definition: usize,
    ) -> Result<Vec<usize>, EditError> {
        if doc.trimmed(definition).ends_with('{') {
            let close = matching_brace(doc, definition).unwrap_or(doc.len().saturating_sub(1));
            return Ok((definition + 1..=close).collect());
        }

        let member = self.member_pattern(name, false)?;
        let mut lines = Vec::new();
        for idx in definition + 1..doc.len() {
            let trimmed = doc.trimmed(idx);
            if member.is_match(trimmed) {
                lines.push(idx);
            } else if trimmed.starts_with("class ") || is_relationship_line(trimmed) {
                break;
            }
        }
        Ok(lines)
    }

    /// Relationship lines and notes naming the class as a whole word.
    fn find_references(
        &self,
        doc: &DiagramDocument,
        name: &str,
    ) -> Result<Vec<usize>, EditError> {
        let word = whole_word(name)?;
        let notes = NoteLocator.references(doc, name)?;
        let bodies = self.brace_bodies(doc);

        let mut lines: Vec<usize> = (0..doc.len())
            .filter(|&idx| {
                let trimmed = doc.trimmed(idx);
                !bodies.contains(&idx)
                    && is_relationship_reference(trimmed)
                    && word.is_match(trimmed)
            })
            .chain(notes)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        Ok(lines)
    }
}

/// The class name of a `class Name`, `class "Name"` or `class Name {` line.
fn declared_name(trimmed: &str) -> &str {
    trimmed
        .get("class".len()..)
        .unwrap_or_default()
        .trim()
        .trim_end_matches('{')
        .trim()
        .trim_matches('"')
}

/// Returns `true` if `trimmed` opens like a relationship edge.
pub(crate) fn is_relationship_line(trimmed: &str) -> bool {
    RELATIONSHIP_LINE.is_match(trimmed)
}

/// Returns `true` if `trimmed` carries a relationship token and is not a
/// member, declaration, or note line.
pub(crate) fn is_relationship_reference(trimmed: &str) -> bool {
    RELATIONSHIP_TOKEN.is_match(trimmed)
        && !ANY_MEMBER.is_match(trimmed)
        && !trimmed.starts_with("class ")
        && !NoteLocator::is_note_line(trimmed)
}
