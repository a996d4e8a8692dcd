// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::ViewerError;
use crate::snapshot::Snapshot;
use crate::state::{ViewerState, ViewerView};
use crate::types::{CommitId, CommitRef, DocId, DocumentState, Doctype};
use serde_json::{json, Value};

fn latest_doc() -> DocumentState {
    let mut doc = DocumentState::new(Doctype::Tile, json!({"title": "v3"}));
    doc.log = vec![
        CommitRef::new("cidA"),
        CommitRef::new("cidB"),
        CommitRef::new("cidC"),
    ];
    doc.anchor_status = 3;
    doc
}

fn commit_doc(title: &str) -> DocumentState {
    DocumentState::new(Doctype::Tile, json!({ "title": title }))
}

fn content(state: &ViewerState) -> Option<Value> {
    state.snapshot().content().cloned()
}

#[test]
fn test_latest_content_before_selection() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    assert!(state.is_loading());
    assert_eq!(content(&state), None);

    assert!(state.apply_document(g, Ok(latest_doc())));
    assert!(!state.is_loading());
    assert_eq!(content(&state), Some(json!({"title": "v3"})));
    assert!(matches!(state.snapshot(), Snapshot::Latest(_)));
}

#[test]
fn test_next_content_fallback_and_absent() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();

    let mut doc = latest_doc();
    doc.content = None;
    doc.next_content = Some(json!({"title": "pending"}));
    state.apply_document(g, Ok(doc));
    assert_eq!(content(&state), Some(json!({"title": "pending"})));

    let g = state.request_document();
    let mut doc = latest_doc();
    doc.content = None;
    state.apply_document(g, Ok(doc));
    assert_eq!(content(&state), None);
    assert!(matches!(state.view(), ViewerView::Ready { loading: false, .. }));
}

#[test]
fn test_select_same_commit_twice_reconciles_once() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let before = state.reconciliations();

    let first = state.select_commit(CommitId::from("cidB"));
    assert!(first.is_some());
    assert_eq!(state.reconciliations(), before + 1);

    let second = state.select_commit(CommitId::from("cidB"));
    assert!(second.is_none());
    assert_eq!(state.reconciliations(), before + 1);
}

#[test]
fn test_pinned_content_regardless_of_arrival_order() {
    // Commit first, then document.
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g_doc = state.request_document();
    let req = state.select_commit(CommitId::from("cidA")).unwrap();
    state.apply_commit(req.generation, Ok(commit_doc("v1")));
    assert_eq!(content(&state), Some(json!({"title": "v1"})));
    state.apply_document(g_doc, Ok(latest_doc()));
    assert_eq!(content(&state), Some(json!({"title": "v1"})));

    // Document first, then commit.
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g_doc = state.request_document();
    let req = state.select_commit(CommitId::from("cidA")).unwrap();
    state.apply_document(g_doc, Ok(latest_doc()));
    assert_eq!(content(&state), Some(json!({"title": "v3"})));
    assert!(state.is_loading());
    state.apply_commit(req.generation, Ok(commit_doc("v1")));
    assert_eq!(content(&state), Some(json!({"title": "v1"})));
    assert_eq!(state.snapshot().pinned_commit(), Some(&CommitId::from("cidA")));
}

#[test]
fn test_stale_commit_response_is_dropped() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g_doc = state.request_document();
    state.apply_document(g_doc, Ok(latest_doc()));

    let old = state.select_commit(CommitId::from("cidA")).unwrap();
    let new = state.select_commit(CommitId::from("cidB")).unwrap();
    assert_ne!(old.generation, new.generation);

    assert!(state.apply_commit(new.generation, Ok(commit_doc("v2"))));
    assert!(!state.apply_commit(old.generation, Ok(commit_doc("v1"))));
    assert_eq!(content(&state), Some(json!({"title": "v2"})));
    assert_eq!(state.snapshot().pinned_commit(), Some(&CommitId::from("cidB")));
}

#[test]
fn test_selection_outside_log_marks_nothing_active() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));

    let req = state.select_commit(CommitId::from("foreign")).unwrap();
    state.apply_commit(req.generation, Ok(commit_doc("elsewhere")));

    let history = state.history();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|e| !e.active));
    assert!(state.error().is_none());
}

#[test]
fn test_history_follows_selection() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));

    let history = state.history();
    assert_eq!(history[0].cid.as_str(), "cidC");
    assert!(history[0].active && history[0].latest);

    state.select_commit(CommitId::from("cidA"));
    let history = state.history();
    assert!(!history[0].active);
    assert!(history[2].active);
}

#[test]
fn test_error_after_success_suppresses_content() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));
    assert!(matches!(state.view(), ViewerView::Ready { .. }));

    let g = state.request_document();
    state.apply_document(g, Err("connection reset".into()));
    assert_eq!(
        state.view(),
        ViewerView::Failed(ViewerError::DocumentLoad("connection reset".into()))
    );
}

#[test]
fn test_document_error_reported_before_commit_error() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    let req = state.select_commit(CommitId::from("cidA")).unwrap();
    state.apply_commit(req.generation, Err("no such commit".into()));
    assert_eq!(
        state.error(),
        Some(ViewerError::CommitLoad("no such commit".into()))
    );

    state.apply_document(g, Err("not found".into()));
    assert_eq!(state.error(), Some(ViewerError::DocumentLoad("not found".into())));
}

#[test]
fn test_new_selection_clears_commit_error() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));

    let req = state.select_commit(CommitId::from("cidA")).unwrap();
    state.apply_commit(req.generation, Err("timeout".into()));
    assert!(matches!(state.view(), ViewerView::Failed(_)));

    let req = state.select_commit(CommitId::from("cidB")).unwrap();
    assert!(state.error().is_none());
    state.apply_commit(req.generation, Ok(commit_doc("v2")));
    assert_eq!(content(&state), Some(json!({"title": "v2"})));
}

#[test]
fn test_pin_survives_document_refresh() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));
    let req = state.select_commit(CommitId::from("cidA")).unwrap();
    state.apply_commit(req.generation, Ok(commit_doc("v1")));

    let g = state.request_document();
    assert!(state.is_loading());
    let mut newer = latest_doc();
    newer.log.push(CommitRef::new("cidD"));
    newer.content = Some(json!({"title": "v4"}));
    state.apply_document(g, Ok(newer));

    assert_eq!(state.selected_commit(), Some(&CommitId::from("cidA")));
    assert_eq!(content(&state), Some(json!({"title": "v1"})));
    assert_eq!(state.history()[0].cid.as_str(), "cidD");
}

#[test]
fn test_refresh_keeps_previous_state_visible() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let g = state.request_document();
    state.apply_document(g, Ok(latest_doc()));

    let stale = state.request_document();
    assert_eq!(content(&state), Some(json!({"title": "v3"})));

    let current = state.request_document();
    assert!(!state.apply_document(stale, Err("late failure".into())));
    assert!(state.error().is_none());
    assert!(state.apply_document(current, Ok(latest_doc())));
}

#[test]
fn test_empty_commit_id_issues_no_request() {
    let mut state = ViewerState::new(DocId::new("kjz1"));
    let before = state.reconciliations();
    assert!(state.select_commit(CommitId::from("")).is_none());
    assert!(state.selected_commit().is_none());
    assert!(!state.is_loading());
    assert_eq!(state.reconciliations(), before);
}
