//! The diagram line buffer.
//!
//! A [`DiagramDocument`] holds the diagram source as an ordered sequence of
//! lines. It is the only unit the edit engine reads and rewrites: every
//! mutation inserts, removes, or replaces whole lines. Splitting and joining
//! both use a bare `\n`, so a document that receives no edits round-trips to
//! byte-identical text.

use std::collections::BTreeSet;

use thiserror::Error;

/// Errors raised by line-level document mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("line index {index} is out of range for a document of {len} lines")]
    OutOfRange { index: usize, len: usize },
}

/// An ordered, mutable sequence of diagram lines.
///
/// # Example
///
/// ```
/// # use redraft_core::document::DiagramDocument;
/// let mut doc = DiagramDocument::from_text("classDiagram\nclass User");
/// doc.insert(2, "class Order").unwrap();
/// assert_eq!(doc.to_text(), "classDiagram\nclass User\nclass Order");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagramDocument {
    lines: Vec<String>,
}

impl DiagramDocument {
    /// Split diagram text into a document, one entry per `\n`-separated line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Rejoin the lines with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Consume the document and rejoin its lines with `\n`.
    pub fn into_text(self) -> String {
        self.to_text()
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the line at `index`, if any.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Returns the trimmed line at `index`, or `""` past the end.
    pub fn trimmed(&self, index: usize) -> &str {
        self.line(index).map(str::trim).unwrap_or_default()
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Insert a line so that it ends up at `index`.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if `index > len()`.
    pub fn insert(&mut self, index: usize, line: impl Into<String>) -> Result<(), DocumentError> {
        self.check_insert(index)?;
        self.lines.insert(index, line.into());
        Ok(())
    }

    /// Insert several lines as a contiguous run starting at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if `index > len()`.
    pub fn insert_all<I>(&mut self, index: usize, lines: I) -> Result<(), DocumentError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.check_insert(index)?;
        self.lines
            .splice(index..index, lines.into_iter().map(Into::into));
        Ok(())
    }

    /// Remove and return the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if there is no such line.
    pub fn remove(&mut self, index: usize) -> Result<String, DocumentError> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Remove every line whose index is in `indices`.
    ///
    /// Indices are removed in descending order so that earlier removals never
    /// shift the position of later ones. Returns the number of lines removed.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if any index is past the end; in
    /// that case nothing is removed.
    pub fn remove_all(&mut self, indices: &BTreeSet<usize>) -> Result<usize, DocumentError> {
        if let Some(&last) = indices.last() {
            self.check_index(last)?;
        }
        for &index in indices.iter().rev() {
            self.lines.remove(index);
        }
        Ok(indices.len())
    }

    /// Replace the line at `index`, returning the previous content.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfRange`] if there is no such line.
    pub fn replace(
        &mut self,
        index: usize,
        line: impl Into<String>,
    ) -> Result<String, DocumentError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.lines[index], line.into()))
    }

    /// Apply `f` to every line, replacing those for which it returns `Some`.
    ///
    /// Returns the number of lines that changed.
    pub fn rewrite_lines<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut changed = 0;
        for line in &mut self.lines {
            if let Some(new_line) = f(line) {
                if new_line != *line {
                    *line = new_line;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Indentation that a line inserted at `index` should carry.
    ///
    /// Looks for the nearest non-blank line above `index` that is not
    /// `skip`, then the nearest one below, and returns its leading
    /// whitespace. `skip` is usually the header line, which sits at column
    /// zero even when the body is indented.
    pub fn indent_for(&self, index: usize, skip: Option<usize>) -> &str {
        let usable = |idx: &usize| Some(*idx) != skip && !self.lines[*idx].trim().is_empty();

        let above = (0..index.min(self.lines.len())).rev().find(&usable);
        let found = above.or_else(|| (index..self.lines.len()).find(&usable));

        found.map(|idx| indent_of(&self.lines[idx])).unwrap_or("")
    }

    fn check_index(&self, index: usize) -> Result<(), DocumentError> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(DocumentError::OutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }

    fn check_insert(&self, index: usize) -> Result<(), DocumentError> {
        if index <= self.lines.len() {
            Ok(())
        } else {
            Err(DocumentError::OutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }
}

/// Returns the leading whitespace of `line`.
pub fn indent_of(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}
