//! Relationship mutators.

use log::debug;

use redraft_core::{
    document::{DiagramDocument, indent_of},
    operation::{AddRelationship, ModifyRelationship, RemoveRelationship},
    relationship::resolve_arrow,
};

use super::{EditContext, Outcome, append_index, required};
use crate::{
    error::EditError,
    locator::{ClassLocator, NoteLocator},
    relationship::RelationshipLine,
};

/// Insert a relationship line.
///
/// The line goes right before the first note, else right after the last
/// relationship, else at the end.
pub(super) fn add_relationship(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &AddRelationship,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };

    let arrow = resolve_arrow(
        required(&details.kind).unwrap_or(ctx.options.default_relationship_type.as_str()),
    );
    let line = RelationshipLine {
        multiplicity_from: required(&details.multiplicity_from),
        multiplicity_to: required(&details.multiplicity_to),
        label: required(&details.label),
        ..RelationshipLine::new(from, &arrow, to)
    }
    .to_string();

    let index = NoteLocator
        .first_note(doc)
        .or_else(|| ClassLocator.last_relationship(doc).map(|idx| idx + 1))
        .unwrap_or_else(|| append_index(doc));

    debug!(index, line = line.as_str(); "Adding relationship");
    ctx.insert(doc, index, &line)?;
    Ok(Outcome::Applied)
}

/// Remove the most recent relationship between `from` and `to`.
pub(super) fn remove_relationship(
    doc: &mut DiagramDocument,
    details: &RemoveRelationship,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };
    let arrow = required(&details.kind).map(resolve_arrow);

    match ClassLocator.find_relationship(doc, from, to, arrow.as_deref())? {
        Some(idx) => {
            doc.remove(idx)?;
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::no_match(format!(
            "relationship between `{from}` and `{to}`"
        ))),
    }
}

/// Rewrite the most recent relationship between `from` and `to`.
///
/// The existing line is parsed and only the parts named by the edit change:
/// the arrow, either multiplicity, and the label. A line that does not parse
/// is rebuilt as `from <arrow> to`, keeping any label after its `:`.
pub(super) fn modify_relationship(
    doc: &mut DiagramDocument,
    ctx: &EditContext<'_>,
    details: &ModifyRelationship,
) -> Result<Outcome, EditError> {
    let (Some(from), Some(to)) = (required(&details.from), required(&details.to)) else {
        return Ok(Outcome::missing("from/to"));
    };
    let old_arrow = required(&details.old_type).map(resolve_arrow);
    let new_arrow = required(&details.new_type).map(resolve_arrow);

    let Some(idx) = ClassLocator.find_relationship(doc, from, to, old_arrow.as_deref())? else {
        return Ok(Outcome::no_match(format!(
            "relationship between `{from}` and `{to}`"
        )));
    };

    let current = doc.line(idx).unwrap_or_default().to_string();
    let rebuilt = match RelationshipLine::parse(&current) {
        Some(parsed) => RelationshipLine {
            arrow: new_arrow.as_deref().unwrap_or(parsed.arrow),
            multiplicity_from: required(&details.new_multiplicity_from)
                .or(parsed.multiplicity_from),
            multiplicity_to: required(&details.new_multiplicity_to).or(parsed.multiplicity_to),
            label: required(&details.new_label).or(parsed.label),
            ..parsed
        }
        .to_string(),
        None => {
            debug!(line = current.as_str(); "Relationship line did not parse, rebuilding");
            let arrow = new_arrow
                .or(old_arrow)
                .unwrap_or_else(|| resolve_arrow(&ctx.options.default_relationship_type));
            let kept_label = current
                .split_once(':')
                .map(|(_, label)| label.trim())
                .filter(|label| !label.is_empty());
            RelationshipLine {
                label: required(&details.new_label).or(kept_label),
                ..RelationshipLine::new(from, &arrow, to)
            }
            .to_string()
        }
    };

    doc.replace(idx, format!("{}{rebuilt}", indent_of(&current)))?;
    Ok(Outcome::Applied)
}

#[cfg(test)]
mod tests {
    use redraft_core::kind::DiagramKind;

    use super::*;
    use crate::options::EditorOptions;

    fn run<F>(text: &str, f: F) -> (String, Outcome)
    where
        F: FnOnce(&mut DiagramDocument, &EditContext<'_>) -> Result<Outcome, EditError>,
    {
        let options = EditorOptions::default();
        let mut doc = DiagramDocument::from_text(text);
        let ctx = EditContext::new(&doc, DiagramKind::Class, &options);
        let outcome = f(&mut doc, &ctx).unwrap();
        (doc.into_text(), outcome)
    }

    fn add(from: &str, to: &str) -> AddRelationship {
        AddRelationship {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            ..AddRelationship::default()
        }
    }

    #[test]
    fn test_add_relationship_before_first_note() {
        let (text, _) = run(
            "classDiagram\nclass A\nclass B\nA --> B\nnote for A \"a\"\nnote for B \"b\"",
            |doc, ctx| {
                add_relationship(
                    doc,
                    ctx,
                    &AddRelationship {
                        kind: Some("inheritance".to_string()),
                        ..add("B", "A")
                    },
                )
            },
        );
        assert_eq!(
            text,
            "classDiagram\nclass A\nclass B\nA --> B\nB <|-- A\nnote for A \"a\"\nnote for B \"b\""
        );
    }

    #[test]
    fn test_add_relationship_after_last_relationship() {
        let (text, _) = run(
            "classDiagram\nA --> B\nclass C\nB ..> C\nclass D",
            |doc, ctx| {
                add_relationship(
                    doc,
                    ctx,
                    &AddRelationship {
                        label: Some("uses".to_string()),
                        multiplicity_from: Some("1".to_string()),
                        multiplicity_to: Some("*".to_string()),
                        ..add("C", "D")
                    },
                )
            },
        );
        assert_eq!(
            text,
            "classDiagram\nA --> B\nclass C\nB ..> C\nC \"1\" --> \"*\" D : uses\nclass D"
        );
    }

    #[test]
    fn test_add_relationship_requires_endpoints() {
        let (text, outcome) = run("classDiagram", |doc, ctx| {
            add_relationship(
                doc,
                ctx,
                &AddRelationship {
                    from: Some("A".to_string()),
                    ..AddRelationship::default()
                },
            )
        });
        assert_eq!(text, "classDiagram");
        assert_eq!(outcome, Outcome::missing("from/to"));
    }

    #[test]
    fn test_remove_relationship_latest_with_type_filter() {
        let mut doc = DiagramDocument::from_text("classDiagram\nA --> B\nA ..> B\nA --> B : again");
        let remove = |kind: Option<&str>| RemoveRelationship {
            from: Some("A".to_string()),
            to: Some("B".to_string()),
            kind: kind.map(str::to_string),
        };

        assert_eq!(
            remove_relationship(&mut doc, &remove(Some("dependency"))).unwrap(),
            Outcome::Applied
        );
        assert_eq!(doc.to_text(), "classDiagram\nA --> B\nA --> B : again");

        remove_relationship(&mut doc, &remove(None)).unwrap();
        assert_eq!(doc.to_text(), "classDiagram\nA --> B");
    }

    #[test]
    fn test_modify_relationship_keeps_unnamed_parts() {
        let (text, outcome) = run(
            "classDiagram\n  Order \"1\" --> \"*\" Item : contains",
            |doc, ctx| {
                modify_relationship(
                    doc,
                    ctx,
                    &ModifyRelationship {
                        from: Some("Order".to_string()),
                        to: Some("Item".to_string()),
                        new_type: Some("composition".to_string()),
                        new_multiplicity_to: Some("1..*".to_string()),
                        ..ModifyRelationship::default()
                    },
                )
            },
        );
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            text,
            "classDiagram\n  Order \"1\" *-- \"1..*\" Item : contains"
        );
    }

    #[test]
    fn test_modify_relationship_not_found() {
        let (text, outcome) = run("classDiagram\nA --> B", |doc, ctx| {
            modify_relationship(
                doc,
                ctx,
                &ModifyRelationship {
                    from: Some("A".to_string()),
                    to: Some("C".to_string()),
                    new_type: Some("..>".to_string()),
                    ..ModifyRelationship::default()
                },
            )
        });
        assert_eq!(text, "classDiagram\nA --> B");
        assert!(matches!(outcome, Outcome::Unchanged(_)));
    }

    #[test]
    fn test_modify_relationship_fallback_rebuild() {
        let (text, _) = run("classDiagram\nA --> B C : odd", |doc, ctx| {
            modify_relationship(
                doc,
                ctx,
                &ModifyRelationship {
                    from: Some("A".to_string()),
                    to: Some("B".to_string()),
                    new_type: Some("..>".to_string()),
                    ..ModifyRelationship::default()
                },
            )
        });
        assert_eq!(text, "classDiagram\nA ..> B : odd");
    }
}
