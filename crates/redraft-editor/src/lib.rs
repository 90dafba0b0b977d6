//! # Redraft Editor
//!
//! Structured edits for diagram source text. This crate takes the text of a
//! class, sequence, or state diagram plus a list of edit operations, and
//! returns the text with the edits applied.
//!
//! There is no grammar behind the edits. The engine works line by line:
//! entities are found by pattern, and every edit inserts, removes, or replaces
//! whole lines, so anything an edit does not touch is kept byte for byte.
//!
//! ## Usage
//!
//! ```
//! # use redraft_core::script::EditScript;
//! # use redraft_editor::{EditorOptions, apply_edits};
//! let diagram = "classDiagram\nclass User\nUser : +name String\nclass Order\nOrder \"1\" --> \"*\" User";
//! let script = EditScript::from_json(r#"{"edits": [{"type": "remove_class", "target": "Order"}]}"#)
//!     .unwrap();
//!
//! let edited = apply_edits(diagram, &script, &EditorOptions::default());
//! assert_eq!(edited, "classDiagram\nclass User\nUser : +name String");
//! ```

pub mod error;
pub mod locator;
mod mutate;
mod options;
mod pipeline;
#[cfg(test)]
mod pipeline_tests;
pub mod relationship;

pub use options::EditorOptions;
pub use pipeline::{EditReport, apply_edits, apply_edits_with_report};
