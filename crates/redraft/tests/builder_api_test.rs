//! Integration tests for the DiagramEditor API
//!
//! These tests verify that the public API works and is usable.

use redraft::{
    DiagramEditor, ErrorCode, RedraftError,
    config::{AppConfig, EditorConfig, InputConfig},
    kind::DiagramKind,
};

const CLASS_DIAGRAM: &str = "classDiagram\nclass User\nUser : +name String\nclass Order\nOrder \"1\" --> \"*\" User";

#[test]
fn test_editor_api_exists() {
    let _editor = DiagramEditor::default();
}

#[test]
fn test_edit_class_diagram() {
    let editor = DiagramEditor::default();
    let result = editor.edit(
        CLASS_DIAGRAM,
        r#"{"edits": [{"type": "remove_class", "target": "Order"}]}"#,
    );

    assert_eq!(
        result.expect("Should decode edits"),
        "classDiagram\nclass User\nUser : +name String"
    );
}

#[test]
fn test_fenced_generator_output() {
    let diagram = "```mermaid\nsequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping\n```";
    let edits = "Here are the edits:\n```json\n{\"edits\": [{\"type\": \"add_message\", \"details\": {\"from\": \"A\", \"to\": \"B\", \"message\": \"pong\", \"type\": \"-->>\"}}]}\n```";

    let editor = DiagramEditor::default();
    let edited = editor.edit(diagram, edits).expect("Should decode fenced edits");
    assert_eq!(
        edited,
        "sequenceDiagram\nparticipant A\nparticipant B\nA->>B: ping\nA-->>B: pong"
    );
}

#[test]
fn test_fence_stripping_can_be_disabled() {
    let config = AppConfig::new(EditorConfig::default(), InputConfig::new(false));
    let editor = DiagramEditor::new(config);

    let result = editor.parse_edits("```json\n{\"edits\": []}\n```");
    assert!(result.is_err(), "Fenced JSON should not decode as is");
}

#[test]
fn test_invalid_json_returns_decode_error() {
    let editor = DiagramEditor::default();
    let result = editor.parse_edits("{\"edits\": [");

    match result {
        Err(RedraftError::Decode { src, .. }) => assert_eq!(src, "{\"edits\": ["),
        other => panic!("Expected decode error, got {other:?}"),
    }
}

#[test]
fn test_report_lists_skipped_edits() {
    let editor = DiagramEditor::default();
    let script = editor
        .parse_edits(
            r#"{"edits": [
                {"type": "teleport_class", "target": "User"},
                {"type": "remove_class", "target": "Ghost"},
                {"type": "add_attribute", "target": "User", "details": {"attribute": "+email String"}}
            ]}"#,
        )
        .expect("Should decode edits");

    let report = editor.apply_with_report(CLASS_DIAGRAM, &script);
    assert_eq!(report.kind(), DiagramKind::Class);
    assert_eq!(report.applied(), 1);

    let codes: Vec<_> = report.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E001, ErrorCode::E100]);
    assert!(report.text().contains("User : +name String\nUser : +email String"));
}

#[test]
fn test_editor_reusability() {
    let editor = DiagramEditor::default();

    let first = editor
        .edit(
            "stateDiagram-v2\n[*] --> Idle",
            r#"{"edits": [{"type": "add_transition", "details": {"from": "Idle", "to": "Busy"}}]}"#,
        )
        .expect("Failed to edit first diagram");
    let second = editor
        .edit(
            &first,
            r#"{"edits": [{"type": "remove_state", "target": "Busy"}]}"#,
        )
        .expect("Failed to edit second diagram");

    assert_eq!(first, "stateDiagram-v2\n[*] --> Idle\nIdle --> Busy");
    assert_eq!(second, "stateDiagram-v2\n[*] --> Idle");
}
