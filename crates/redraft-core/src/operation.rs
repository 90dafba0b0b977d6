//! Typed edit operations.
//!
//! An [`EditOperation`] is one atomic structural change. There is exactly one
//! variant per edit kind, each carrying its own details record, so the engine
//! dispatches on them with an exhaustive `match`.
//!
//! Every field is optional at this level. A missing required field is not a
//! decode error: the mutator that consumes the operation treats it as a
//! no-op, which mirrors how a missing target entity is handled.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::kind::DiagramKind;

/// Where to insert a new entity relative to existing ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Position {
    /// The dialect's default insertion point.
    #[default]
    End,
    /// Immediately after the named anchor.
    After(String),
    /// Immediately before the named anchor.
    Before(String),
}

impl From<&str> for Position {
    /// Parse `end`, `after:<anchor>` or `before:<anchor>`.
    ///
    /// Anything unrecognised falls back to [`Position::End`].
    fn from(value: &str) -> Self {
        if let Some(anchor) = value.strip_prefix("after:") {
            Position::After(anchor.trim().to_string())
        } else if let Some(anchor) = value.strip_prefix("before:") {
            Position::Before(anchor.trim().to_string())
        } else {
            Position::End
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Position::from(value.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(Position::from).unwrap_or_default())
    }
}

/// Accept a JSON string, number or boolean as text. `null` maps to `None`.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// A reference to a single named entity (class, participant, state).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRef {
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Details for `add_class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddClass {
    pub name: Option<String>,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
    pub position: Position,
}

/// One `old` -> `new` substitution inside a member line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Replacement {
    pub old: String,
    pub new: String,
}

/// Details for `modify_class`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModifyClass {
    #[serde(skip)]
    pub target: Option<String>,
    pub new_name: Option<String>,
    pub add_attributes: Vec<String>,
    pub remove_attributes: Vec<String>,
    pub modify_attributes: Vec<Replacement>,
    pub add_methods: Vec<String>,
    pub remove_methods: Vec<String>,
    pub modify_methods: Vec<Replacement>,
}

/// Details for `add_relationship`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddRelationship {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Arrow token or relationship name; the configured default when absent.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub multiplicity_from: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub multiplicity_to: Option<String>,
}

/// Details for `remove_relationship`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoveRelationship {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Details for `modify_relationship`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModifyRelationship {
    pub from: Option<String>,
    pub to: Option<String>,
    pub old_type: Option<String>,
    pub new_type: Option<String>,
    pub new_label: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub new_multiplicity_from: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub new_multiplicity_to: Option<String>,
}

/// Details for adding or removing a single attribute or method line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberEdit {
    #[serde(skip)]
    pub class: Option<String>,
    #[serde(alias = "attribute", alias = "method")]
    pub member: Option<String>,
}

/// Details for modifying a single attribute or method line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemberChange {
    #[serde(skip)]
    pub class: Option<String>,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Details for `add_participant`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddParticipant {
    pub name: Option<String>,
    pub position: Position,
}

/// Details for `add_message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddMessage {
    pub from: Option<String>,
    pub to: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub position: Position,
}

/// Details for `remove_message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoveMessage {
    pub from: Option<String>,
    pub to: Option<String>,
    pub message: Option<String>,
}

/// Details for `add_state`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddState {
    pub name: Option<String>,
    pub parent: Option<String>,
}

/// Details for `add_transition` and `remove_transition`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Transition {
    pub from: Option<String>,
    pub to: Option<String>,
    pub label: Option<String>,
}

/// Details for `add_note`, `remove_note` and `modify_note`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoteEdit {
    pub target: Option<String>,
    #[serde(alias = "new_text")]
    pub text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct NameOnly {
    name: Option<String>,
}

/// The name of an edit kind, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    AddClass,
    RemoveClass,
    ModifyClass,
    AddRelationship,
    RemoveRelationship,
    ModifyRelationship,
    AddAttribute,
    RemoveAttribute,
    ModifyAttribute,
    AddMethod,
    RemoveMethod,
    ModifyMethod,
    AddParticipant,
    RemoveParticipant,
    AddMessage,
    RemoveMessage,
    AddState,
    RemoveState,
    AddTransition,
    RemoveTransition,
    AddNote,
    RemoveNote,
    ModifyNote,
}

impl EditKind {
    /// All 23 kinds in declaration order.
    pub const ALL: [EditKind; 23] = [
        EditKind::AddClass,
        EditKind::RemoveClass,
        EditKind::ModifyClass,
        EditKind::AddRelationship,
        EditKind::RemoveRelationship,
        EditKind::ModifyRelationship,
        EditKind::AddAttribute,
        EditKind::RemoveAttribute,
        EditKind::ModifyAttribute,
        EditKind::AddMethod,
        EditKind::RemoveMethod,
        EditKind::ModifyMethod,
        EditKind::AddParticipant,
        EditKind::RemoveParticipant,
        EditKind::AddMessage,
        EditKind::RemoveMessage,
        EditKind::AddState,
        EditKind::RemoveState,
        EditKind::AddTransition,
        EditKind::RemoveTransition,
        EditKind::AddNote,
        EditKind::RemoveNote,
        EditKind::ModifyNote,
    ];

    /// Returns the snake_case name used in edit scripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::AddClass => "add_class",
            EditKind::RemoveClass => "remove_class",
            EditKind::ModifyClass => "modify_class",
            EditKind::AddRelationship => "add_relationship",
            EditKind::RemoveRelationship => "remove_relationship",
            EditKind::ModifyRelationship => "modify_relationship",
            EditKind::AddAttribute => "add_attribute",
            EditKind::RemoveAttribute => "remove_attribute",
            EditKind::ModifyAttribute => "modify_attribute",
            EditKind::AddMethod => "add_method",
            EditKind::RemoveMethod => "remove_method",
            EditKind::ModifyMethod => "modify_method",
            EditKind::AddParticipant => "add_participant",
            EditKind::RemoveParticipant => "remove_participant",
            EditKind::AddMessage => "add_message",
            EditKind::RemoveMessage => "remove_message",
            EditKind::AddState => "add_state",
            EditKind::RemoveState => "remove_state",
            EditKind::AddTransition => "add_transition",
            EditKind::RemoveTransition => "remove_transition",
            EditKind::AddNote => "add_note",
            EditKind::RemoveNote => "remove_note",
            EditKind::ModifyNote => "modify_note",
        }
    }

    /// The dialect this kind of edit is written for.
    ///
    /// Notes exist in every dialect and return `None`.
    pub fn dialect(&self) -> Option<DiagramKind> {
        match self {
            EditKind::AddClass
            | EditKind::RemoveClass
            | EditKind::ModifyClass
            | EditKind::AddRelationship
            | EditKind::RemoveRelationship
            | EditKind::ModifyRelationship
            | EditKind::AddAttribute
            | EditKind::RemoveAttribute
            | EditKind::ModifyAttribute
            | EditKind::AddMethod
            | EditKind::RemoveMethod
            | EditKind::ModifyMethod => Some(DiagramKind::Class),
            EditKind::AddParticipant
            | EditKind::RemoveParticipant
            | EditKind::AddMessage
            | EditKind::RemoveMessage => Some(DiagramKind::Sequence),
            EditKind::AddState
            | EditKind::RemoveState
            | EditKind::AddTransition
            | EditKind::RemoveTransition => Some(DiagramKind::State),
            EditKind::AddNote | EditKind::RemoveNote | EditKind::ModifyNote => None,
        }
    }
}

impl FromStr for EditKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or("Unknown edit kind")
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One structural edit to apply to a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    AddClass(AddClass),
    RemoveClass(EntityRef),
    ModifyClass(ModifyClass),
    AddRelationship(AddRelationship),
    RemoveRelationship(RemoveRelationship),
    ModifyRelationship(ModifyRelationship),
    AddAttribute(MemberEdit),
    RemoveAttribute(MemberEdit),
    ModifyAttribute(MemberChange),
    AddMethod(MemberEdit),
    RemoveMethod(MemberEdit),
    ModifyMethod(MemberChange),
    AddParticipant(AddParticipant),
    RemoveParticipant(EntityRef),
    AddMessage(AddMessage),
    RemoveMessage(RemoveMessage),
    AddState(AddState),
    RemoveState(EntityRef),
    AddTransition(Transition),
    RemoveTransition(Transition),
    AddNote(NoteEdit),
    RemoveNote(NoteEdit),
    ModifyNote(NoteEdit),
}

impl EditOperation {
    /// Build an operation from its kind, the edit's `target`, and its raw
    /// `details` object.
    ///
    /// For kinds that act on one named entity, `target` names it; a `name`
    /// inside `details` is accepted as a fallback. For notes, `target` fills
    /// in a missing `details.target`.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised when `details` does not have
    /// the shape the kind expects (for example a string where a list belongs).
    pub fn from_parts(
        kind: EditKind,
        target: Option<String>,
        details: Value,
    ) -> Result<Self, serde_json::Error> {
        let details = match details {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        let op = match kind {
            EditKind::AddClass => EditOperation::AddClass(decode(details)?),
            EditKind::RemoveClass => EditOperation::RemoveClass(entity(target, details)?),
            EditKind::ModifyClass => {
                let mut modify: ModifyClass = decode(details)?;
                modify.target = target;
                EditOperation::ModifyClass(modify)
            }
            EditKind::AddRelationship => EditOperation::AddRelationship(decode(details)?),
            EditKind::RemoveRelationship => EditOperation::RemoveRelationship(decode(details)?),
            EditKind::ModifyRelationship => EditOperation::ModifyRelationship(decode(details)?),
            EditKind::AddAttribute => EditOperation::AddAttribute(member_edit(target, details)?),
            EditKind::RemoveAttribute => {
                EditOperation::RemoveAttribute(member_edit(target, details)?)
            }
            EditKind::ModifyAttribute => {
                EditOperation::ModifyAttribute(member_change(target, details)?)
            }
            EditKind::AddMethod => EditOperation::AddMethod(member_edit(target, details)?),
            EditKind::RemoveMethod => EditOperation::RemoveMethod(member_edit(target, details)?),
            EditKind::ModifyMethod => EditOperation::ModifyMethod(member_change(target, details)?),
            EditKind::AddParticipant => EditOperation::AddParticipant(decode(details)?),
            EditKind::RemoveParticipant => {
                EditOperation::RemoveParticipant(entity(target, details)?)
            }
            EditKind::AddMessage => EditOperation::AddMessage(decode(details)?),
            EditKind::RemoveMessage => EditOperation::RemoveMessage(decode(details)?),
            EditKind::AddState => EditOperation::AddState(decode(details)?),
            EditKind::RemoveState => EditOperation::RemoveState(entity(target, details)?),
            EditKind::AddTransition => EditOperation::AddTransition(decode(details)?),
            EditKind::RemoveTransition => EditOperation::RemoveTransition(decode(details)?),
            EditKind::AddNote => EditOperation::AddNote(note(target, details)?),
            EditKind::RemoveNote => EditOperation::RemoveNote(note(target, details)?),
            EditKind::ModifyNote => EditOperation::ModifyNote(note(target, details)?),
        };

        Ok(op)
    }

    /// Returns the kind of this operation.
    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::AddClass(_) => EditKind::AddClass,
            EditOperation::RemoveClass(_) => EditKind::RemoveClass,
            EditOperation::ModifyClass(_) => EditKind::ModifyClass,
            EditOperation::AddRelationship(_) => EditKind::AddRelationship,
            EditOperation::RemoveRelationship(_) => EditKind::RemoveRelationship,
            EditOperation::ModifyRelationship(_) => EditKind::ModifyRelationship,
            EditOperation::AddAttribute(_) => EditKind::AddAttribute,
            EditOperation::RemoveAttribute(_) => EditKind::RemoveAttribute,
            EditOperation::ModifyAttribute(_) => EditKind::ModifyAttribute,
            EditOperation::AddMethod(_) => EditKind::AddMethod,
            EditOperation::RemoveMethod(_) => EditKind::RemoveMethod,
            EditOperation::ModifyMethod(_) => EditKind::ModifyMethod,
            EditOperation::AddParticipant(_) => EditKind::AddParticipant,
            EditOperation::RemoveParticipant(_) => EditKind::RemoveParticipant,
            EditOperation::AddMessage(_) => EditKind::AddMessage,
            EditOperation::RemoveMessage(_) => EditKind::RemoveMessage,
            EditOperation::AddState(_) => EditKind::AddState,
            EditOperation::RemoveState(_) => EditKind::RemoveState,
            EditOperation::AddTransition(_) => EditKind::AddTransition,
            EditOperation::RemoveTransition(_) => EditKind::RemoveTransition,
            EditOperation::AddNote(_) => EditKind::AddNote,
            EditOperation::RemoveNote(_) => EditKind::RemoveNote,
            EditOperation::ModifyNote(_) => EditKind::ModifyNote,
        }
    }
}

fn decode<T: DeserializeOwned>(details: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(details)
}

fn entity(target: Option<String>, details: Value) -> Result<EntityRef, serde_json::Error> {
    let NameOnly { name } = decode(details)?;
    Ok(EntityRef {
        name: target.or(name),
    })
}

fn member_edit(target: Option<String>, details: Value) -> Result<MemberEdit, serde_json::Error> {
    let mut edit: MemberEdit = decode(details)?;
    edit.class = target;
    Ok(edit)
}

fn member_change(
    target: Option<String>,
    details: Value,
) -> Result<MemberChange, serde_json::Error> {
    let mut change: MemberChange = decode(details)?;
    change.class = target;
    Ok(change)
}

fn note(target: Option<String>, details: Value) -> Result<NoteEdit, serde_json::Error> {
    let mut edit: NoteEdit = decode(details)?;
    if edit.target.is_none() {
        edit.target = target;
    }
    Ok(edit)
}
