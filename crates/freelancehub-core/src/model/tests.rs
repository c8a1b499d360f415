use crate::model::project::{validate_draft, validate_patch, MAX_TITLE_LENGTH};
use crate::model::*;

fn sample_project() -> Project {
    Project {
        id: "p1".into(),
        title: "Build a dashboard".into(),
        description: "Analytics dashboard with charts".into(),
        budget: 1200,
        tech_stack: vec!["React".into(), "FastAPI".into()],
        status: ProjectStatus::Open,
        created_by: Some("u1".into()),
        created_at: None,
        is_completed: false,
    }
}

#[test]
fn test_project_deserializes_canonical_id() {
    let json = r#"{"id":"p1","title":"T","description":"D","budget":100,"tech_stack":["Go"],"status":"OPEN"}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.id, "p1");
    assert_eq!(project.status, ProjectStatus::Open);
    assert!(!project.is_completed);
}

#[test]
fn test_project_deserializes_legacy_id_field() {
    // Older API payloads spell the identity field `_id`.
    let json = r#"{"_id":"p2","title":"T","description":"D","budget":100}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert_eq!(project.id, "p2");
}

#[test]
fn test_project_defaults_for_absent_fields() {
    let json = r#"{"id":"p3","title":"T","description":"D","budget":1}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert!(project.tech_stack.is_empty());
    assert_eq!(project.status, ProjectStatus::Open);
    assert!(project.created_by.is_none());
    assert!(project.created_at.is_none());
    assert!(!project.is_completed);
}

#[test]
fn test_project_viewer_badge_wire_name() {
    let json = r#"{"id":"p4","title":"T","description":"D","budget":1,"isCompleted":true}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert!(project.is_completed);

    let out = serde_json::to_value(&project).unwrap();
    assert_eq!(out["isCompleted"], serde_json::json!(true));
}

#[test]
fn test_project_null_created_at() {
    let json = r#"{"id":"p5","title":"T","description":"D","budget":1,"created_at":null}"#;
    let project: Project = serde_json::from_str(json).unwrap();
    assert!(project.created_at.is_none());
}

#[test]
fn test_status_roundtrip() {
    for status in [ProjectStatus::Open, ProjectStatus::Completed] {
        let s = status.to_string();
        let parsed: ProjectStatus = s.parse().unwrap();
        assert_eq!(status, parsed);
    }
    assert!("pending".parse::<ProjectStatus>().is_err());
}

#[test]
fn test_status_wire_form() {
    let json = serde_json::to_string(&ProjectStatus::Completed).unwrap();
    assert_eq!(json, r#""COMPLETED""#);
    let parsed: ProjectStatus = serde_json::from_str(r#""OPEN""#).unwrap();
    assert_eq!(parsed, ProjectStatus::Open);
}

#[test]
fn test_apply_patch_merges_present_fields() {
    let mut project = sample_project();
    let patch = ProjectPatch {
        budget: Some(500),
        status: Some(ProjectStatus::Completed),
        ..Default::default()
    };
    project.apply_patch(&patch);
    assert_eq!(project.budget, 500);
    assert_eq!(project.status, ProjectStatus::Completed);
    // Untouched fields survive the merge.
    assert_eq!(project.title, "Build a dashboard");
    assert_eq!(project.tech_stack.len(), 2);
}

#[test]
fn test_apply_patch_empty_is_noop() {
    let mut project = sample_project();
    let before = project.clone();
    project.apply_patch(&ProjectPatch::default());
    assert_eq!(project, before);
}

#[test]
fn test_patch_skips_absent_fields_on_wire() {
    let patch = ProjectPatch {
        title: Some("New title".into()),
        ..Default::default()
    };
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, serde_json::json!({"title": "New title"}));
}

#[test]
fn test_patch_is_empty() {
    assert!(ProjectPatch::default().is_empty());
    let patch = ProjectPatch {
        budget: Some(1),
        ..Default::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn test_auth_payload_deserializes() {
    let json = r#"{"access_token":"tok-1","user":{"id":"u1","name":"Ada","email":"ada@example.com"}}"#;
    let payload: AuthPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.access_token, "tok-1");
    assert_eq!(payload.user.name, "Ada");
}

#[test]
fn test_signup_payload_ignores_extra_fields() {
    let json = r#"{"success":true,"message":"User created successfully","user":{"id":"u2","name":"Bo","email":"bo@example.com"},"access_token":"ignored"}"#;
    let payload: SignupPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.user.id, "u2");
    assert_eq!(payload.message.as_deref(), Some("User created successfully"));
}

// -- Validation tests --

#[test]
fn test_validate_draft_valid() {
    let draft = ProjectDraft {
        title: "X".into(),
        description: "Something real".into(),
        budget: 100,
        tech_stack: vec!["Go".into()],
    };
    assert!(validate_draft(&draft).is_ok());
}

#[test]
fn test_validate_draft_empty_title_rejected() {
    let draft = ProjectDraft {
        title: "   ".into(),
        description: "D".into(),
        budget: 100,
        tech_stack: vec!["Go".into()],
    };
    let err = validate_draft(&draft).unwrap_err();
    assert!(err.to_string().contains("title cannot be empty"));
}

#[test]
fn test_validate_draft_title_too_long() {
    let draft = ProjectDraft {
        title: "a".repeat(MAX_TITLE_LENGTH + 1),
        description: "D".into(),
        budget: 100,
        tech_stack: vec!["Go".into()],
    };
    let err = validate_draft(&draft).unwrap_err();
    assert!(err.to_string().contains("maximum length"));
}

#[test]
fn test_validate_draft_zero_budget_rejected() {
    let draft = ProjectDraft {
        title: "T".into(),
        description: "D".into(),
        budget: 0,
        tech_stack: vec!["Go".into()],
    };
    assert!(validate_draft(&draft).is_err());
}

#[test]
fn test_validate_draft_empty_stack_rejected() {
    let draft = ProjectDraft {
        title: "T".into(),
        description: "D".into(),
        budget: 100,
        tech_stack: Vec::new(),
    };
    assert!(validate_draft(&draft).is_err());
}

#[test]
fn test_validate_patch_none_fields_pass() {
    assert!(validate_patch(&ProjectPatch::default()).is_ok());
}

#[test]
fn test_validate_patch_empty_title_rejected() {
    let patch = ProjectPatch {
        title: Some("".into()),
        ..Default::default()
    };
    assert!(validate_patch(&patch).is_err());
}

#[test]
fn test_validate_patch_zero_budget_rejected() {
    let patch = ProjectPatch {
        budget: Some(0),
        ..Default::default()
    };
    assert!(validate_patch(&patch).is_err());
}
