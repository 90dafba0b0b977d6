//! Redraft Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Redraft edit
//! engine and its front ends. It includes:
//!
//! - **Document**: The diagram source as an ordered, mutable line buffer ([`document::DiagramDocument`])
//! - **Kind**: Dialect classification from the diagram header ([`kind::DiagramKind`])
//! - **Relationship**: The class-diagram arrow vocabulary ([`relationship::RelationshipKind`])
//! - **Operation**: The typed edit operations ([`operation::EditOperation`])
//! - **Script**: Decoding of `{ "edits": [...] }` instruction lists ([`script::EditScript`])

pub mod document;
pub mod kind;
pub mod operation;
pub mod relationship;
pub mod script;
