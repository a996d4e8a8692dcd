// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Display snapshot reconciliation.
//!
//! A snapshot names which loaded state is on screen. It is rebuilt from the
//! current inputs every time one of them changes, never patched in place.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::types::{present, AnchorProof, CommitId, CommitRef, DocumentState, Doctype};

/// Progress of one load.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// No request has been issued.
    #[default]
    Idle,
    Pending,
    Ready(Arc<DocumentState>),
    /// A new request is in flight while the previous result stays usable.
    Refreshing(Arc<DocumentState>),
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending | LoadState::Refreshing(_))
    }

    pub fn document(&self) -> Option<&Arc<DocumentState>> {
        match self {
            LoadState::Ready(doc) | LoadState::Refreshing(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Commit load together with the commit it was issued for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommitSlot {
    pub commit: Option<CommitId>,
    pub load: LoadState,
}

/// Which source the viewer currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Snapshot {
    /// Nothing loaded yet.
    #[default]
    Absent,
    Latest(Arc<DocumentState>),
    Pinned {
        commit: CommitId,
        state: Arc<DocumentState>,
    },
}

impl Snapshot {
    /// Picks the active source from the selection and both load results.
    ///
    /// The pinned commit wins only when its load resolved for exactly the
    /// current selection; anything else falls back to the latest state.
    pub fn reconcile(selected: Option<&CommitId>, latest: &LoadState, commit: &CommitSlot) -> Self {
        if let (Some(sel), Some(state)) = (selected, commit.load.document()) {
            if commit.commit.as_ref() == Some(sel) {
                return Snapshot::Pinned {
                    commit: sel.clone(),
                    state: Arc::clone(state),
                };
            }
        }

        match latest.document() {
            Some(state) => Snapshot::Latest(Arc::clone(state)),
            None => Snapshot::Absent,
        }
    }

    pub fn state(&self) -> Option<&DocumentState> {
        match self {
            Snapshot::Absent => None,
            Snapshot::Latest(state) => Some(&**state),
            Snapshot::Pinned { state, .. } => Some(&**state),
        }
    }

    pub fn pinned_commit(&self) -> Option<&CommitId> {
        match self {
            Snapshot::Pinned { commit, .. } => Some(commit),
            _ => None,
        }
    }

    /// Content to display. The latest state falls back to its pending
    /// revision; a pinned commit shows its own content only.
    pub fn content(&self) -> Option<&Value> {
        match self {
            Snapshot::Absent => None,
            Snapshot::Latest(state) => state.materialized_content(),
            Snapshot::Pinned { state, .. } => present(state.content.as_ref()),
        }
    }

    pub fn doctype(&self) -> Option<&Doctype> {
        self.state().map(|s| &s.doctype)
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.state().map(|s| &s.metadata)
    }

    pub fn anchor_status(&self) -> Option<i64> {
        self.state().map(|s| s.anchor_status)
    }

    pub fn anchor_proof(&self) -> Option<&AnchorProof> {
        self.state().and_then(|s| s.anchor_proof.as_ref())
    }

    pub fn log(&self) -> &[CommitRef] {
        self.state().map(|s| s.log.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(content: Value) -> Arc<DocumentState> {
        Arc::new(DocumentState::new(Doctype::Tile, content))
    }

    #[test]
    fn test_absent_when_nothing_loaded() {
        let snap = Snapshot::reconcile(None, &LoadState::Pending, &CommitSlot::default());
        assert_eq!(snap, Snapshot::Absent);
        assert!(snap.content().is_none());
    }

    #[test]
    fn test_latest_falls_back_to_next_content() {
        let mut state = DocumentState::new(Doctype::Tile, Value::Null);
        state.content = None;
        state.next_content = Some(json!({"draft": "yes"}));
        let latest = LoadState::Ready(Arc::new(state));

        let snap = Snapshot::reconcile(None, &latest, &CommitSlot::default());
        assert_eq!(snap.content(), Some(&json!({"draft": "yes"})));
    }

    #[test]
    fn test_pinned_requires_matching_slot() {
        let latest = LoadState::Ready(doc(json!({"v": "latest"})));
        let sel = CommitId::from("c1");
        let slot = CommitSlot {
            commit: Some(CommitId::from("c0")),
            load: LoadState::Ready(doc(json!({"v": "old"}))),
        };

        let snap = Snapshot::reconcile(Some(&sel), &latest, &slot);
        assert!(matches!(snap, Snapshot::Latest(_)));

        let slot = CommitSlot {
            commit: Some(sel.clone()),
            load: LoadState::Ready(doc(json!({"v": "old"}))),
        };
        let snap = Snapshot::reconcile(Some(&sel), &latest, &slot);
        assert_eq!(snap.pinned_commit(), Some(&sel));
        assert_eq!(snap.content(), Some(&json!({"v": "old"})));
    }

    #[test]
    fn test_pinned_without_content_is_absent() {
        let mut state = DocumentState::new(Doctype::Tile, Value::Null);
        state.next_content = Some(json!({"draft": true}));
        let sel = CommitId::from("c1");
        let slot = CommitSlot {
            commit: Some(sel.clone()),
            load: LoadState::Ready(Arc::new(state)),
        };

        let snap = Snapshot::reconcile(Some(&sel), &LoadState::Idle, &slot);
        assert!(snap.pinned_commit().is_some());
        assert!(snap.content().is_none());
    }
}
