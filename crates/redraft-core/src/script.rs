//! Decoding of edit scripts.
//!
//! An edit script is the JSON object `{ "edits": [...] }` produced upstream.
//! Decoding is lenient per element: each entry becomes an [`Instruction`],
//! and an entry with an unknown `type` or with details of the wrong shape is
//! kept as a diagnosable instruction instead of failing the whole script.
//! Only a document that is not a JSON object at all is a [`DecodeError`].

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::operation::{EditKind, EditOperation};

/// Error returned when the edit script as a whole cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid edit script: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    /// One-based line of the failure in the JSON source.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::Json(err) => err.line(),
        }
    }

    /// One-based column of the failure in the JSON source.
    pub fn column(&self) -> usize {
        match self {
            DecodeError::Json(err) => err.column(),
        }
    }
}

/// One decoded entry of an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A well-formed edit operation.
    Edit(EditOperation),
    /// An entry whose `type` names no known edit kind.
    Unknown { kind: String },
    /// An entry that could not be turned into an operation.
    Malformed { kind: Option<String>, reason: String },
}

impl From<EditOperation> for Instruction {
    fn from(op: EditOperation) -> Self {
        Instruction::Edit(op)
    }
}

/// An ordered list of instructions, consumed front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    instructions: Vec<Instruction>,
}

#[derive(Deserialize)]
struct RawScript {
    edits: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct RawEdit {
    #[serde(rename = "type")]
    kind: Option<String>,
    target: Option<String>,
    #[serde(default)]
    details: Value,
}

impl EditScript {
    /// Decode a script from JSON text.
    ///
    /// A missing `edits` key yields an empty script.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if `json` is not valid JSON or is not an
    /// object whose `edits` field (when present) is an array.
    ///
    /// # Example
    ///
    /// ```
    /// # use redraft_core::script::{EditScript, Instruction};
    /// let script = EditScript::from_json(
    ///     r#"{"edits": [{"type": "remove_class", "target": "Order"}, {"type": "teleport_class"}]}"#,
    /// ).unwrap();
    ///
    /// assert_eq!(script.len(), 2);
    /// assert!(matches!(script.instructions()[0], Instruction::Edit(_)));
    /// assert!(matches!(script.instructions()[1], Instruction::Unknown { .. }));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let raw: RawScript = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawScript) -> Self {
        let Some(edits) = raw.edits else {
            warn!("No edits found in edit instructions");
            return Self::default();
        };

        debug!(edit_count = edits.len(); "Decoding edit script");
        Self {
            instructions: edits.into_iter().map(decode_instruction).collect(),
        }
    }

    /// Returns the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the script has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: impl Into<Instruction>) {
        self.instructions.push(instruction.into());
    }
}

impl From<Vec<EditOperation>> for EditScript {
    fn from(ops: Vec<EditOperation>) -> Self {
        Self {
            instructions: ops.into_iter().map(Instruction::Edit).collect(),
        }
    }
}

impl FromIterator<EditOperation> for EditScript {
    fn from_iter<T: IntoIterator<Item = EditOperation>>(iter: T) -> Self {
        Self {
            instructions: iter.into_iter().map(Instruction::Edit).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

fn decode_instruction(value: Value) -> Instruction {
    let raw: RawEdit = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(err) => {
            return Instruction::Malformed {
                kind: None,
                reason: err.to_string(),
            };
        }
    };

    let Some(kind_name) = raw.kind.filter(|kind| !kind.trim().is_empty()) else {
        return Instruction::Malformed {
            kind: None,
            reason: "missing edit type".to_string(),
        };
    };

    let Ok(kind) = kind_name.parse::<EditKind>() else {
        return Instruction::Unknown { kind: kind_name };
    };

    match EditOperation::from_parts(kind, raw.target, raw.details) {
        Ok(op) => Instruction::Edit(op),
        Err(err) => Instruction::Malformed {
            kind: Some(kind_name),
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{EntityRef, Transition};

    #[test]
    fn test_decode_mixed_script() {
        let json = r#"{
            "edits": [
                {"type": "remove_class", "target": "Order"},
                {"type": "teleport_class", "target": "Order"},
                {"type": "add_class", "details": {"name": "X", "methods": 3}},
                {"target": "Order"},
                "not an object",
                {"type": "add_transition", "details": {"from": "Idle", "to": "Busy"}}
            ]
        }"#;

        let script = EditScript::from_json(json).unwrap();
        let instructions = script.instructions();

        assert_eq!(instructions.len(), 6);
        assert_eq!(
            instructions[0],
            Instruction::Edit(EditOperation::RemoveClass(EntityRef::new("Order")))
        );
        assert_eq!(
            instructions[1],
            Instruction::Unknown {
                kind: "teleport_class".to_string()
            }
        );
        assert!(matches!(
            &instructions[2],
            Instruction::Malformed { kind: Some(kind), .. } if kind == "add_class"
        ));
        assert!(matches!(
            &instructions[3],
            Instruction::Malformed { kind: None, reason } if reason == "missing edit type"
        ));
        assert!(matches!(
            &instructions[4],
            Instruction::Malformed { kind: None, .. }
        ));
        assert_eq!(
            instructions[5],
            Instruction::Edit(EditOperation::AddTransition(Transition {
                from: Some("Idle".to_string()),
                to: Some("Busy".to_string()),
                label: None,
            }))
        );
    }

    #[test]
    fn test_missing_edits_is_empty() {
        let script = EditScript::from_json(r#"{"changes": []}"#).unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_invalid_json_reports_position() {
        let err = EditScript::from_json("{\n  \"edits\": [\n    {\"type\": }\n  ]\n}").unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(err.column() > 0);
    }

    #[test]
    fn test_edits_must_be_an_array() {
        assert!(EditScript::from_json(r#"{"edits": "remove everything"}"#).is_err());
        assert!(EditScript::from_json("[]").is_err());
    }

    #[test]
    fn test_from_operations() {
        let script: EditScript = vec![EditOperation::RemoveState(EntityRef::new("Idle"))].into();
        assert_eq!(script.len(), 1);

        let collected: EditScript = std::iter::once(EditOperation::RemoveClass(EntityRef::new(
            "User",
        )))
        .collect();
        assert_eq!((&collected).into_iter().count(), 1);
    }
}
