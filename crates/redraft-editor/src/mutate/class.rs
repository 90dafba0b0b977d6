//! Class mutators.

use log::debug;
use regex::NoExpand;

use redraft_core::{
    document::{DiagramDocument, indent_of},
    operation::{AddClass, EntityRef, ModifyClass, Position},
};

use super::{EditContext, Outcome, member, remove_entity, required};
use crate::{
    error::EditError,
    locator::{BlockStyle, ClassDefinition, ClassLocator, Locator, whole_word},
};

/// Insert a class declaration followed by its members.
///
/// `end` places the class after the last class and its members, `after:X`
/// after class `X` and its members, and `before:X` right above `X`'s
/// declaration. An anchor that does not exist falls back to the end of the
/// document.
pub(super) fn add_class(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &AddClass,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&details.name) else {
        return Ok(Outcome::missing("name"));
    };

    let locator = ClassLocator;
    let index = match &details.position {
        Position::End => match locator.last_class(doc) {
            Some((definition, last)) => locator.class_end(doc, &last, definition)?,
            None => super::append_index(doc),
        },
        Position::After(anchor) => match locator.find_entity(doc, anchor)? {
            Some(definition) => locator.class_end(doc, anchor, definition)?,
            None => super::append_index(doc),
        },
        Position::Before(anchor) => locator
            .find_entity(doc, anchor)?
            .unwrap_or_else(|| super::append_index(doc)),
    };

    let indent = ctx.indent(doc, index);
    let members = details
        .attributes
        .iter()
        .chain(&details.methods)
        .map(|member| member.trim())
        .filter(|member| !member.is_empty())
        .map(|member| format!("{indent}{name} : {member}"));
    let lines: Vec<String> = std::iter::once(format!("{indent}class {name}"))
        .chain(members)
        .collect();

    debug!(name, index, lines = lines.len(); "Adding class");
    doc.insert_all(index, lines)?;
    Ok(Outcome::Applied)
}

/// Remove a class, its members, and every relationship and note naming it.
pub(super) fn remove_class(
    doc: &mut DiagramDocument,
    entity: &EntityRef,
) -> Result<Outcome, EditError> {
    let Some(name) = required(&entity.name) else {
        return Ok(Outcome::missing("name"));
    };
    match ClassLocator.find_definition(doc, name)? {
        Some(definition) => remove_entity(doc, &ClassLocator, &definition.name, "class"),
        None => remove_entity(doc, &ClassLocator, name, "class"),
    }
}

/// Rename a class and apply member changes.
///
/// Attributes are processed before methods. Within each group, removals run
/// first, then modifications, then additions. Member changes that match
/// nothing are skipped without failing the edit.
pub(super) fn modify_class(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &ModifyClass,
) -> Result<Outcome, EditError> {
    let Some(target) = required(&details.target) else {
        return Ok(Outcome::missing("target"));
    };

    let locator = ClassLocator;
    let Some(definition) = locator.find_definition(doc, target)? else {
        return Ok(Outcome::not_found(format!("class `{target}`")));
    };

    let declared = definition.name.clone();
    let mut name = declared.as_str();
    if let Some(new_name) = required(&details.new_name).filter(|new_name| *new_name != declared) {
        rename_class(doc, &definition, new_name)?;
        name = new_name;
    }

    let groups = [
        (
            &details.remove_attributes,
            &details.modify_attributes,
            &details.add_attributes,
        ),
        (
            &details.remove_methods,
            &details.modify_methods,
            &details.add_methods,
        ),
    ];
    for (remove, modify, add) in groups {
        for member in remove {
            if !member::remove_member(doc, name, member)? {
                debug!(class = name, member; "Member to remove not found");
            }
        }
        for change in modify {
            if !member::replace_member(doc, name, &change.old, &change.new)? {
                debug!(class = name, member = change.old.as_str(); "Member to modify not found");
            }
        }
        for member in add {
            member::insert_member(doc, ctx, name, member)?;
        }
    }

    Ok(Outcome::Applied)
}

/// Replace every whole-word occurrence of the declared name with `new`,
/// then rewrite the declaration line with its quoting and opener.
fn rename_class(
    doc: &mut DiagramDocument,
    definition: &ClassDefinition,
    new: &str,
) -> Result<(), EditError> {
    let old = definition.name.as_str();
    let word = whole_word(old)?;
    let renamed = doc.rewrite_lines(|line| {
        word.is_match(line)
            .then(|| word.replace_all(line, NoExpand(new)).into_owned())
    });

    let current = doc.line(definition.line).unwrap_or_default();
    let indent = indent_of(current).to_string();
    let spelled = if definition.quoted {
        format!("\"{new}\"")
    } else {
        new.to_string()
    };
    let opener = match definition.style {
        BlockStyle::Brace => " {",
        BlockStyle::Colon => "",
    };
    doc.replace(definition.line, format!("{indent}class {spelled}{opener}"))?;

    debug!(old, new, renamed; "Renamed class");
    Ok(())
}
