// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::types::{CommitRef, DocumentState, Doctype};
use serde_json::{json, Value};

#[test]
fn test_unknown_doctype_is_preserved() {
    let doctype: Doctype = serde_json::from_value(json!("model-instance")).unwrap();
    assert_eq!(doctype, Doctype::Other("model-instance".into()));
    assert_eq!(doctype.to_string(), "model-instance");

    let known: Doctype = serde_json::from_value(json!("caip10-link")).unwrap();
    assert_eq!(known, Doctype::Caip10Link);
}

#[test]
fn test_materialized_content_prefers_primary() {
    let mut doc = DocumentState::new(Doctype::Tile, json!({"a": "1"}));
    doc.next_content = Some(json!({"a": "2"}));
    assert_eq!(doc.materialized_content(), Some(&json!({"a": "1"})));
}

#[test]
fn test_null_content_counts_as_absent() {
    let mut doc = DocumentState::new(Doctype::Tile, Value::Null);
    assert_eq!(doc.materialized_content(), None);

    doc.next_content = Some(json!({"a": "pending"}));
    assert_eq!(doc.materialized_content(), Some(&json!({"a": "pending"})));
}

#[test]
fn test_newest_commit_is_last_in_log() {
    let mut doc = DocumentState::new(Doctype::Tile, json!({}));
    assert!(doc.newest_commit().is_none());

    doc.log = vec![CommitRef::new("cidA"), CommitRef::new("cidB")];
    assert_eq!(doc.newest_commit().map(|c| c.as_str()), Some("cidB"));
    assert!(doc.contains_commit(&"cidA".into()));
    assert!(!doc.contains_commit(&"cidZ".into()));
}
