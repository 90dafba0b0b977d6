//! State-diagram mutators.

use log::debug;

use redraft_core::{
    document::{DiagramDocument, indent_of},
    operation::{AddState, EntityRef, Transition},
};

use super::{EditContext, Outcome, append_index, remove_entity, required};
use crate::{
    error::EditError,
    locator::{StateLocator, matching_brace},
};

/// Add a state, either at the end or inside a composite parent.
///
/// Inside a parent the state goes right before the parent's closing brace,
/// one indent unit deeper than that brace.
pub(super) fn add_state(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &AddState,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&details.name) else {
        return Ok(Outcome::missing("name"));
    };

    let Some(parent) = required(&details.parent) else {
        let index = append_index(doc);
        ctx.insert(doc, index, name)?;
        return Ok(Outcome::Applied);
    };

    let Some(open) = StateLocator.find_composite(doc, parent)? else {
        return Ok(Outcome::not_found(format!("composite state `{parent}`")));
    };
    let Some(close) = matching_brace(doc, open) else {
        return Ok(Outcome::no_match(format!("closing brace for `{parent}`")));
    };

    let indent = if ctx.options.match_indentation {
        format!(
            "{}{}",
            indent_of(doc.line(close).unwrap_or_default()),
            ctx.options.indent_unit
        )
    } else {
        String::new()
    };

    debug!(name, parent, index = close; "Adding nested state");
    doc.insert(close, format!("{indent}{name}"))?;
    Ok(Outcome::Applied)
}

/// Remove a state declaration, its composite body, its transitions, and notes
/// about it.
pub(super) fn remove_state(
    doc: &mut DiagramDocument,
    entity: &EntityRef,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&entity.name) else {
        return Ok(Outcome::missing("name"));
    };
    remove_entity(doc, &StateLocator, name, "state")
}

/// Insert `from --> to [: label]` after the last transition.
pub(super) fn add_transition(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &Transition,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };

    let line = match required(&details.label) {
        Some(label) => format!("{from} --> {to} : {label}"),
        None => format!("{from} --> {to}"),
    };
    let index = StateLocator
        .last_transition(doc)
        .map_or_else(|| append_index(doc), |idx| idx + 1);

    ctx.insert(doc, index, &line)?;
    Ok(Outcome::Applied)
}

/// Remove the most recent transition from `from` to `to`.
pub(super) fn remove_transition(
    doc: &mut DiagramDocument,
    details: &Transition,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };

    match StateLocator.find_transition(doc, from, to, required(&details.label))? {
        Some(idx) => {
            doc.remove(idx)?;
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::no_match(format!("transition from `{from}` to `{to}`"))),
    }
}
