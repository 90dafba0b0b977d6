//! End-to-end tests for the edit pipeline.
//!
//! Each test feeds diagram text and a JSON edit script through
//! [`apply_edits_with_report`] and checks the resulting text and diagnostics.

use redraft_core::{kind::DiagramKind, script::EditScript};

use crate::{
    EditReport, EditorOptions, apply_edits, apply_edits_with_report,
    error::{ErrorCode, Severity},
};

/// Wrap comma-separated edit objects into a full script.
fn script(edits: &str) -> EditScript {
    let json = format!(r#"{{"edits": [{edits}]}}"#);
    EditScript::from_json(&json).expect("Test script should decode")
}

/// Apply `edits` to `text` with default options.
fn run(text: &str, edits: &str) -> EditReport {
    apply_edits_with_report(text, &script(edits), &EditorOptions::default())
}

/// Apply `edits` and assert the resulting text.
fn assert_edits(text: &str, edits: &str, expected: &str) {
    let report = run(text, edits);
    assert_eq!(
        report.text(),
        expected,
        "Unexpected text; diagnostics: {:?}",
        report.diagnostics()
    );
}

/// Codes of every diagnostic in `report`, in order.
fn codes(report: &EditReport) -> Vec<ErrorCode> {
    report
        .diagnostics()
        .iter()
        .filter_map(|diagnostic| diagnostic.code())
        .collect()
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_remove_class_removes_relationship() {
        assert_edits(
            "classDiagram\nclass User\nUser : +name String\nclass Order\nOrder \"1\" --> \"*\" User",
            r#"{"type": "remove_class", "target": "Order"}"#,
            "classDiagram\nclass User\nUser : +name String",
        );
    }

    #[test]
    fn test_add_message_appends_final_line() {
        assert_edits(
            "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping",
            r#"{"type": "add_message", "details": {"from": "A", "to": "B", "message": "pong", "type": "-->>", "position": "end"}}"#,
            "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping\nA-->>B: pong",
        );
    }

    #[test]
    fn test_unknown_edit_kind_leaves_text_unchanged() {
        let text = "classDiagram\nclass User";
        let report = run(text, r#"{"type": "teleport_class", "target": "User", "details": {}}"#);

        assert_eq!(report.text(), text);
        assert_eq!(codes(&report), vec![ErrorCode::E001]);
        assert_eq!(report.applied(), 0);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_empty_script_round_trips_bytes() {
        let text = "classDiagram\n    class A\n\n    A : +x Int\n";
        assert_eq!(
            apply_edits(text, &EditScript::default(), &EditorOptions::default()),
            text
        );
    }

    #[test]
    fn test_edits_apply_in_order_against_evolving_buffer() {
        assert_edits(
            "classDiagram\nclass User\nUser : +name String",
            r#"
            {"type": "add_class", "details": {"name": "Order", "attributes": ["+id Int"]}},
            {"type": "add_method", "target": "Order", "details": {"method": "+total() Money"}},
            {"type": "add_relationship", "details": {"from": "User", "to": "Order", "type": "association", "multiplicity_from": 1, "multiplicity_to": "*"}}
            "#,
            "classDiagram\nclass User\nUser : +name String\nclass Order\nOrder : +id Int\nOrder : +total() Money\nUser \"1\" --> \"*\" Order",
        );
    }

    #[test]
    fn test_report_kind_is_detected_once() {
        let report = run("stateDiagram-v2\n[*] --> Idle", "");
        assert_eq!(report.kind(), DiagramKind::State);
        assert!(report.diagnostics().is_empty());
    }
}

#[cfg(test)]
mod class_tests {
    use super::*;

    #[test]
    fn test_add_relationship_lands_before_first_note() {
        assert_edits(
            "classDiagram\nclass A\nclass B\nA --> B\nnote for A \"first\"\nB ..> A\nnote for B \"second\"",
            r#"{"type": "add_relationship", "details": {"from": "A", "to": "B", "type": "composition"}}"#,
            "classDiagram\nclass A\nclass B\nA --> B\nA *-- B\nnote for A \"first\"\nB ..> A\nnote for B \"second\"",
        );
    }

    #[test]
    fn test_remove_class_keeps_generic_members_of_other_classes() {
        assert_edits(
            "classDiagram\nclass User {\n  +orders List<Order>\n  +name String\n}\nclass Order",
            r#"{"type": "remove_class", "target": "Order"}"#,
            "classDiagram\nclass User {\n  +orders List<Order>\n  +name String\n}",
        );
    }

    #[test]
    fn test_rename_matches_declaration_case() {
        assert_edits(
            "classDiagram\nclass user\nuser : +id Int",
            r#"{"type": "modify_class", "target": "User", "details": {"new_name": "Account"}}"#,
            "classDiagram\nclass Account\nAccount : +id Int",
        );
    }

    #[test]
    fn test_rename_rewrites_note_text() {
        assert_edits(
            "classDiagram\nclass User\nUser : +name String\nnote for User \"Represents a User\"",
            r#"{"type": "modify_class", "target": "User", "details": {"new_name": "Account"}}"#,
            "classDiagram\nclass Account\nAccount : +name String\nnote for Account \"Represents a Account\"",
        );
    }

    #[test]
    fn test_add_then_remove_attribute_restores_block() {
        let text = "classDiagram\nclass C\nC : +b Int";
        assert_edits(
            text,
            r#"
            {"type": "add_attribute", "target": "C", "details": {"attribute": "+a Int"}},
            {"type": "remove_attribute", "target": "C", "details": {"attribute": "+a Int"}}
            "#,
            text,
        );
    }

    #[test]
    fn test_remove_then_add_attribute_is_not_commutative() {
        let report = run(
            "classDiagram\nclass C\nC : +b Int",
            r#"
            {"type": "remove_attribute", "target": "C", "details": {"attribute": "+a Int"}},
            {"type": "add_attribute", "target": "C", "details": {"attribute": "+a Int"}}
            "#,
        );
        assert_eq!(report.text(), "classDiagram\nclass C\nC : +b Int\nC : +a Int");
        assert_eq!(codes(&report), vec![ErrorCode::E101]);
        assert_eq!(report.applied(), 1);
    }

    #[test]
    fn test_modify_relationship_keeps_label() {
        assert_edits(
            "classDiagram\nCustomer \"1\" --> \"*\" Order : places",
            r#"{"type": "modify_relationship", "details": {"from": "Customer", "to": "Order", "new_type": "aggregation"}}"#,
            "classDiagram\nCustomer \"1\" o-- \"*\" Order : places",
        );
    }

    #[test]
    fn test_modify_method_by_substring() {
        assert_edits(
            "classDiagram\nclass Cart\nCart : +items List\nCart : +total() Int",
            r#"{"type": "modify_method", "target": "Cart", "details": {"old": "total() Int", "new": "total() Money"}}"#,
            "classDiagram\nclass Cart\nCart : +items List\nCart : +total() Money",
        );
    }

    #[test]
    fn test_remove_relationship_most_recent() {
        assert_edits(
            "classDiagram\nA --> B : first\nA --> B : second",
            r#"{"type": "remove_relationship", "details": {"from": "A", "to": "B"}}"#,
            "classDiagram\nA --> B : first",
        );
    }
}

#[cfg(test)]
mod sequence_tests {
    use super::*;

    #[test]
    fn test_add_participant_after_declarations() {
        assert_edits(
            "sequenceDiagram\n    participant A\n    A->>A: self",
            r#"{"type": "add_participant", "details": {"name": "B"}}"#,
            "sequenceDiagram\n    participant A\n    participant B\n    A->>A: self",
        );
    }

    #[test]
    fn test_remove_participant_cascades() {
        assert_edits(
            "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping\nactivate B\nB-->>A: pong\ndeactivate B\nNote right of B: done",
            r#"{"type": "remove_participant", "target": "B"}"#,
            "sequenceDiagram\nparticipant A",
        );
    }

    #[test]
    fn test_remove_message_matches_flattened_newlines() {
        assert_edits(
            "sequenceDiagram\nA->>B: hello world\nA->>B: bye",
            r#"{"type": "remove_message", "details": {"from": "A", "to": "B", "message": "hello\\nworld"}}"#,
            "sequenceDiagram\nA->>B: bye",
        );
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn test_add_nested_state_and_transition() {
        assert_edits(
            "stateDiagram-v2\n    [*] --> Idle\n    state Busy {\n        Working --> Done\n    }\n    Idle --> Busy",
            r#"
            {"type": "add_state", "details": {"name": "Paused", "parent": "Busy"}},
            {"type": "add_transition", "details": {"from": "Busy", "to": "Idle", "label": "finish"}}
            "#,
            "stateDiagram-v2\n    [*] --> Idle\n    state Busy {\n        Working --> Done\n        Paused\n    }\n    Idle --> Busy\n    Busy --> Idle : finish",
        );
    }

    #[test]
    fn test_remove_state_cascades() {
        assert_edits(
            "stateDiagram-v2\n[*] --> Idle\nIdle --> Busy\nBusy --> Idle\nnote right of Busy : slow",
            r#"{"type": "remove_state", "target": "Busy"}"#,
            "stateDiagram-v2\n[*] --> Idle",
        );
    }

    #[test]
    fn test_remove_transition_with_label() {
        assert_edits(
            "stateDiagram-v2\nIdle --> Busy : start\nIdle --> Busy : resume",
            r#"{"type": "remove_transition", "details": {"from": "Idle", "to": "Busy", "label": "start"}}"#,
            "stateDiagram-v2\nIdle --> Busy : resume",
        );
    }
}

#[cfg(test)]
mod note_tests {
    use super::*;

    #[test]
    fn test_note_lifecycle_in_class_diagram() {
        assert_edits(
            "classDiagram\nclass User",
            r#"
            {"type": "add_note", "target": "User", "details": {"text": "draft"}},
            {"type": "modify_note", "target": "User", "details": {"new_text": "final"}}
            "#,
            "classDiagram\nclass User\nnote for User \"final\"",
        );
    }

    #[test]
    fn test_remove_note_in_sequence_diagram() {
        assert_edits(
            "sequenceDiagram\nA->>B: hi\nNote right of B: first\nNote right of B: second",
            r#"{"type": "remove_note", "target": "B"}"#,
            "sequenceDiagram\nA->>B: hi\nNote right of B: first",
        );
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use super::*;

    #[test]
    fn test_each_skip_gets_its_own_code() {
        let report = run(
            "classDiagram\nclass User",
            r#"
            {"type": "add_class", "details": {"name": "X", "attributes": "+x Int"}},
            {"target": "User"},
            {"type": "remove_class", "target": "Ghost"},
            {"type": "add_class", "details": {}},
            {"type": "remove_relationship", "details": {"from": "User", "to": "Ghost"}}
            "#,
        );

        assert_eq!(report.text(), "classDiagram\nclass User");
        assert_eq!(
            codes(&report),
            vec![
                ErrorCode::E002,
                ErrorCode::E003,
                ErrorCode::E100,
                ErrorCode::E102,
                ErrorCode::E101,
            ]
        );
        assert!(
            report
                .diagnostics()
                .iter()
                .all(|diagnostic| diagnostic.severity() == Severity::Warning)
        );
    }

    #[test]
    fn test_diagnostics_name_their_edit() {
        let report = run(
            "classDiagram",
            r#"{"type": "add_class", "details": {"name": "A"}}, {"type": "remove_class", "target": "Ghost"}"#,
        );

        let diagnostic = &report.diagnostics()[0];
        assert_eq!(diagnostic.edit_index(), Some(1));
        assert_eq!(diagnostic.edit_kind(), Some("remove_class"));
        assert_eq!(diagnostic.message(), "class `Ghost` not found");
    }

    #[test]
    fn test_dialect_mismatch_warns_but_applies() {
        let report = run(
            "sequenceDiagram\nA->>B: hi",
            r#"{"type": "add_class", "details": {"name": "X"}}"#,
        );

        assert_eq!(report.text(), "sequenceDiagram\nA->>B: hi\nclass X");
        assert_eq!(codes(&report), vec![ErrorCode::E200]);
        assert_eq!(report.applied(), 1);
    }

    #[test]
    fn test_notes_have_no_dialect() {
        let report = run(
            "stateDiagram-v2\n[*] --> Idle",
            r#"{"type": "add_note", "target": "Idle", "details": {"text": "start"}}"#,
        );
        assert!(report.diagnostics().is_empty());
        assert_eq!(
            report.text(),
            "stateDiagram-v2\n[*] --> Idle\nnote right of Idle : start"
        );
    }
}

#[cfg(test)]
mod rollback_tests {
    use redraft_core::{
        document::DocumentError,
        operation::{AddClass, EditOperation},
    };

    use super::*;
    use crate::{mutate, pipeline::run_script};

    fn add_class(name: &str) -> EditOperation {
        EditOperation::AddClass(AddClass {
            name: Some(name.to_string()),
            ..AddClass::default()
        })
    }

    /// Applies every edit normally, except that adding `Broken` writes a line
    /// and then fails.
    fn run_with_failing_class(text: &str, script: &EditScript) -> EditReport {
        run_script(text, script, &EditorOptions::default(), |doc, ctx, op| {
            match op {
                EditOperation::AddClass(details) if details.name.as_deref() == Some("Broken") => {
                    let end = doc.len();
                    doc.insert(end, "class Broken")?;
                    Err(DocumentError::OutOfRange {
                        index: end + 5,
                        len: doc.len(),
                    }
                    .into())
                }
                _ => mutate::apply(doc, ctx, op),
            }
        })
    }

    #[test]
    fn test_failed_edit_is_rolled_back_and_later_edits_apply() {
        let mut script = script(r#"{"type": "add_class", "details": {"name": "A"}}"#);
        script.push(add_class("Broken"));
        script.push(add_class("Order"));

        let report = run_with_failing_class("classDiagram\nclass User", &script);

        assert_eq!(report.text(), "classDiagram\nclass User\nclass A\nclass Order");
        assert_eq!(report.applied(), 2);
        assert_eq!(codes(&report), vec![ErrorCode::E300]);
        assert!(report.has_errors());

        let diagnostic = &report.diagnostics()[0];
        assert_eq!(diagnostic.severity(), Severity::Error);
        assert_eq!(diagnostic.edit_index(), Some(1));
        assert_eq!(diagnostic.edit_kind(), Some("add_class"));
        assert!(diagnostic.message().starts_with("buffer error:"));
    }

    #[test]
    fn test_failure_on_first_edit_keeps_input() {
        let script = EditScript::from(vec![add_class("Broken")]);

        let report = run_with_failing_class("classDiagram\nclass User\n", &script);

        assert_eq!(report.text(), "classDiagram\nclass User\n");
        assert_eq!(report.applied(), 0);
        assert_eq!(report.diagnostics()[0].help(), Some("the edit was rolled back"));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const POOL: [&str; 6] = ["User", "Order", "Item", "Cart", "Invoice", "Payment"];

    // ===================
    // Strategies
    // ===================

    /// Strategy for class diagrams built from pool names: declarations with
    /// colon-style members, then relationships, then notes.
    fn class_diagram_strategy() -> impl Strategy<Value = (Vec<&'static str>, String)> {
        (
            prop::sample::subsequence(POOL.to_vec(), 1..=POOL.len()),
            0usize..3,
            prop::collection::vec((0usize..POOL.len(), 0usize..POOL.len()), 0..4),
            prop::collection::vec(0usize..POOL.len(), 0..3),
        )
            .prop_map(|(names, members, relationships, notes)| {
                let mut lines = vec!["classDiagram".to_string()];
                for name in &names {
                    lines.push(format!("class {name}"));
                    lines.extend((0..members).map(|i| format!("{name} : +field{i} Int")));
                }
                for (from, to) in relationships {
                    let (from, to) = (names[from % names.len()], names[to % names.len()]);
                    lines.push(format!("{from} --> {to}"));
                }
                for target in notes {
                    lines.push(format!("note for {} \"about\"", names[target % names.len()]));
                }
                (names, lines.join("\n"))
            })
    }

    /// Strategy for arbitrary printable text, including blank lines.
    fn any_text_strategy() -> impl Strategy<Value = String> {
        "[ -~\n]{0,200}"
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Adding a fresh class and then removing it restores the text exactly.
    fn check_add_remove_class_restores(text: &str) -> Result<(), TestCaseError> {
        let options = EditorOptions::default();
        let added = apply_edits(
            text,
            &script(r#"{"type": "add_class", "details": {"name": "Zeta", "attributes": ["+id Int"]}}"#),
            &options,
        );
        prop_assert_ne!(&added, text);

        let restored = apply_edits(
            &added,
            &script(r#"{"type": "remove_class", "target": "Zeta"}"#),
            &options,
        );
        prop_assert_eq!(restored, text);
        Ok(())
    }

    /// Adding and then removing the same attribute restores the text exactly.
    fn check_add_remove_attribute_restores(text: &str, class: &str) -> Result<(), TestCaseError> {
        let edits = format!(
            r#"{{"type": "add_attribute", "target": "{class}", "details": {{"attribute": "+fresh Bool"}}}},
               {{"type": "remove_attribute", "target": "{class}", "details": {{"attribute": "+fresh Bool"}}}}"#
        );
        let report = run(text, &edits);
        prop_assert_eq!(report.text(), text);
        prop_assert_eq!(report.applied(), 2);
        Ok(())
    }

    /// A relationship lands before the first note, else after the last
    /// relationship, else at the end.
    fn check_relationship_insertion_point(text: &str) -> Result<(), TestCaseError> {
        let original: Vec<&str> = text.split('\n').collect();
        let expected = original
            .iter()
            .position(|line| line.starts_with("note "))
            .or_else(|| {
                original
                    .iter()
                    .rposition(|line| line.contains(" --> "))
                    .map(|idx| idx + 1)
            })
            .unwrap_or(original.len());

        let edited = apply_edits(
            text,
            &script(r#"{"type": "add_relationship", "details": {"from": "Alpha", "to": "Omega"}}"#),
            &EditorOptions::default(),
        );
        let lines: Vec<&str> = edited.split('\n').collect();
        prop_assert_eq!(lines.len(), original.len() + 1);
        prop_assert_eq!(lines[expected], "Alpha --> Omega");
        Ok(())
    }

    /// The same text and script always produce the same output.
    fn check_deterministic(text: &str) -> Result<(), TestCaseError> {
        let script = script(
            r#"
            {"type": "add_attribute", "target": "User", "details": {"attribute": "+flag Bool"}},
            {"type": "modify_class", "target": "Order", "details": {"new_name": "Purchase"}},
            {"type": "remove_class", "target": "Cart"},
            {"type": "add_relationship", "details": {"from": "Item", "to": "Invoice", "type": "dependency"}}
            "#,
        );
        let options = EditorOptions::default();

        let first = apply_edits(text, &script, &options);
        let second = apply_edits(text, &script, &options);
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Unknown edit kinds never change any text.
    fn check_unknown_edit_is_noop(text: &str) -> Result<(), TestCaseError> {
        let edited = apply_edits(
            text,
            &script(r#"{"type": "teleport_class", "target": "User"}"#),
            &EditorOptions::default(),
        );
        prop_assert_eq!(edited, text);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn add_remove_class_restores((_, text) in class_diagram_strategy()) {
            check_add_remove_class_restores(&text)?;
        }

        #[test]
        fn add_remove_attribute_restores(
            ((names, text), pick) in (class_diagram_strategy(), any::<prop::sample::Index>())
        ) {
            let class = pick.get(&names);
            check_add_remove_attribute_restores(&text, class)?;
        }

        #[test]
        fn relationship_insertion_point((_, text) in class_diagram_strategy()) {
            check_relationship_insertion_point(&text)?;
        }

        #[test]
        fn deterministic((_, text) in class_diagram_strategy()) {
            check_deterministic(&text)?;
        }

        #[test]
        fn unknown_edit_is_noop(text in any_text_strategy()) {
            check_unknown_edit_is_noop(&text)?;
        }
    }
}
