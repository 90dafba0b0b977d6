//! Sequence-diagram mutators.

use std::borrow::Cow;

use log::debug;

use redraft_core::{
    document::DiagramDocument,
    operation::{AddMessage, AddParticipant, EntityRef, Position, RemoveMessage},
};

use super::{EditContext, Outcome, append_index, remove_entity, required};
use crate::{
    error::EditError,
    locator::{Locator, SequenceLocator},
};

/// Declare a participant.
///
/// By default the declaration joins the run of declarations right after the
/// header. `after:X` and `before:X` place it next to participant `X`.
pub(super) fn add_participant(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &AddParticipant,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&details.name) else {
        return Ok(Outcome::missing("name"));
    };

    let locator = SequenceLocator;
    let default_index = |doc: &DiagramDocument| match ctx.header {
        Some(header) => locator.declarations_end(doc, header),
        None => doc.len().min(1),
    };
    let index = match &details.position {
        Position::End => default_index(doc),
        Position::After(anchor) => match locator.find_entity(doc, anchor)? {
            Some(idx) => idx + 1,
            None => default_index(doc),
        },
        Position::Before(anchor) => match locator.find_entity(doc, anchor)? {
            Some(idx) => idx,
            None => default_index(doc),
        },
    };

    debug!(name, index; "Adding participant");
    ctx.insert(doc, index, &format!("participant {name}"))?;
    Ok(Outcome::Applied)
}

/// Remove a participant declaration, its messages, activations, and notes.
pub(super) fn remove_participant(
    doc: &mut DiagramDocument,
    entity: &EntityRef,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&entity.name) else {
        return Ok(Outcome::missing("name"));
    };
    remove_entity(doc, &SequenceLocator, name, "participant")
}

/// Insert a message line `From<arrow>To: text`.
///
/// Endpoint names containing spaces are quoted and a literal `\n` in the text
/// becomes a space. `after:T` and `before:T` place the message next to the
/// first message containing `T`; otherwise it follows the last message.
pub(super) fn add_message(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &AddMessage,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };

    let arrow = required(&details.kind).unwrap_or(ctx.options.default_message_type.as_str());
    let text = details
        .message
        .as_deref()
        .unwrap_or_default()
        .replace("\\n", " ");
    let line = format!("{}{arrow}{}: {}", endpoint(from), endpoint(to), text.trim())
        .trim_end()
        .to_string();

    let locator = SequenceLocator;
    let after_last = |doc: &DiagramDocument| {
        locator
            .last_message(doc)
            .map_or_else(|| append_index(doc), |idx| idx + 1)
    };
    let index = match &details.position {
        Position::End => after_last(doc),
        Position::After(anchor) => locator
            .find_message_containing(doc, anchor)
            .map_or_else(|| after_last(doc), |idx| idx + 1),
        Position::Before(anchor) => locator
            .find_message_containing(doc, anchor)
            .unwrap_or_else(|| after_last(doc)),
    };

    debug!(index, line = line.as_str(); "Adding message");
    ctx.insert(doc, index, &line)?;
    Ok(Outcome::Applied)
}

/// Remove the most recent message from `from` to `to`.
pub(super) fn remove_message(
    doc: &mut DiagramDocument,
    details: &RemoveMessage,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };

    match SequenceLocator.find_message(doc, from, to, required(&details.message))? {
        Some(idx) => {
            doc.remove(idx)?;
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::no_match(format!("message from `{from}` to `{to}`"))),
    }
}

fn endpoint(name: &str) -> Cow<'_, str> {
    if name.contains(char::is_whitespace) {
        Cow::Owned(format!("\"{name}\""))
    } else {
        Cow::Borrowed(name)
    }
}
