//! Attribute and method mutators.
//!
//! Attributes and methods share one representation: a member line of the
//! class, either `Name : member` or a bare line inside the class braces.
//! Removal and modification match by substring, so `+email` finds
//! `User : +email String`.

use redraft_core::{
    document::{DiagramDocument, indent_of},
    operation::{MemberChange, MemberEdit},
};

use super::{EditContext, Outcome, required};
use crate::{
    error::EditError,
    locator::{BlockStyle, ClassLocator},
};

pub(super) fn add(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    edit: &MemberEdit,
    what: &str,
) -> Result<Outcome, EditError> {
    let Some(class) = required(&edit.class) else {
        return Ok(Outcome::missing("target"));
    };
    let Some(member) = required(&edit.member) else {
        return Ok(Outcome::missing(what));
    };

    if insert_member(doc, ctx, class, member)? {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::not_found(format!("class `{class}`")))
    }
}

pub(super) fn remove(
    doc: &mut DiagramDocument,
    edit: &MemberEdit,
    what: &str,
) -> Result<Outcome, EditError> {
    let Some(class) = required(&edit.class) else {
        return Ok(Outcome::missing("target"));
    };
    let Some(member) = required(&edit.member) else {
        return Ok(Outcome::missing(what));
    };

    if ClassLocator.find_definition(doc, class)?.is_none() {
        return Ok(Outcome::not_found(format!("class `{class}`")));
    }
    if remove_member(doc, class, member)? {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::no_match(format!("{what} `{member}` in class `{class}`")))
    }
}

pub(super) fn modify(
    doc: &mut DiagramDocument,
    change: &MemberChange,
    what: &str,
) -> Result<Outcome, EditError> {
    let Some(class) = required(&change.class) else {
        return Ok(Outcome::missing("target"));
    };
    let Some(old) = required(&change.old) else {
        return Ok(Outcome::missing("old"));
    };
    let Some(new) = change.new.as_deref() else {
        return Ok(Outcome::missing("new"));
    };

    if ClassLocator.find_definition(doc, class)?.is_none() {
        return Ok(Outcome::not_found(format!("class `{class}`")));
    }
    if replace_member(doc, class, old, new.trim())? {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::no_match(format!("{what} `{old}` in class `{class}`")))
    }
}

/// Append `member` to the end of the member block of `class`.
///
/// Returns `false` if the class is not declared.
pub(super) fn insert_member(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    class: &str,
    member: &str,
) -> Result<bool, EditError> {
    let locator = ClassLocator;
    let Some(definition) = locator.find_definition(doc, class)? else {
        return Ok(false);
    };
    let class = definition.name.as_str();
    let Some(block) = locator.members(doc, class, &definition, true)? else {
        return Ok(false);
    };

    let member = member.trim();
    let line = match block.style {
        BlockStyle::Colon => format!("{}{class} : {member}", ctx.indent(doc, block.end)),
        BlockStyle::Brace if block.start == block.end && ctx.options.match_indentation => {
            let outer = indent_of(doc.line(definition.line).unwrap_or_default());
            format!("{outer}{}{member}", ctx.options.indent_unit)
        }
        BlockStyle::Brace => format!("{}{member}", ctx.indent(doc, block.end)),
    };

    doc.insert(block.end, line)?;
    Ok(true)
}

/// Remove the last member line of `class` containing `member`.
pub(super) fn remove_member(
    doc: &mut DiagramDocument,
    class: &str,
    member: &str,
) -> Result<bool, EditError> {
    let member = member.trim();
    if member.is_empty() {
        return Ok(false);
    }

    let locator = ClassLocator;
    let Some(definition) = locator.find_definition(doc, class)? else {
        return Ok(false);
    };
    let class = definition.name.as_str();
    let Some(block) = locator.members(doc, class, &definition, false)? else {
        return Ok(false);
    };
    let pattern = locator.member_pattern(class, false)?;

    let found = (block.start..block.end).rev().find(|&idx| {
        let trimmed = doc.trimmed(idx);
        block.is_member_line(&pattern, trimmed) && trimmed.contains(member)
    });
    match found {
        Some(idx) => {
            doc.remove(idx)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Replace the first occurrence of `old` in the first member line of
/// `class` that contains it.
pub(super) fn replace_member(
    doc: &mut DiagramDocument,
    class: &str,
    old: &str,
    new: &str,
) -> Result<bool, EditError> {
    let old = old.trim();
    if old.is_empty() {
        return Ok(false);
    }

    let locator = ClassLocator;
    let Some(definition) = locator.find_definition(doc, class)? else {
        return Ok(false);
    };
    let class = definition.name.as_str();
    let Some(block) = locator.members(doc, class, &definition, false)? else {
        return Ok(false);
    };
    let pattern = locator.member_pattern(class, false)?;

    let found = (block.start..block.end).find(|&idx| {
        let trimmed = doc.trimmed(idx);
        block.is_member_line(&pattern, trimmed) && trimmed.contains(old)
    });
    let Some(idx) = found else {
        return Ok(false);
    };

    let updated = doc.line(idx).unwrap_or_default().replacen(old, new, 1);
    doc.replace(idx, updated)?;
    Ok(true)
}
