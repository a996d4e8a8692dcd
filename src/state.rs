// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Viewer state machine.
//!
//! Holds the selection and the two most recent load results, and rebuilds the
//! display snapshot synchronously whenever one of them changes. Requests are
//! tagged with a generation; a completion whose generation is no longer
//! current is dropped.

use std::sync::Arc;

use crate::error::ViewerError;
use crate::history::{history_entries, HistoryEntry};
use crate::snapshot::{CommitSlot, LoadState, Snapshot};
use crate::types::{CommitId, DocId, DocumentState};

/// Monotonic request tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    fn bump(&mut self) -> Generation {
        self.0 += 1;
        *self
    }
}

/// A commit load the caller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub generation: Generation,
    pub doc_id: DocId,
    pub commit: CommitId,
}

/// What the rendering layer may show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerView<'a> {
    /// A load failed. Content is suppressed entirely.
    Failed(ViewerError),
    Ready { snapshot: &'a Snapshot, loading: bool },
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    doc_id: DocId,
    selected: Option<CommitId>,
    latest: LoadState,
    latest_generation: Generation,
    commit: CommitSlot,
    commit_generation: Generation,
    snapshot: Snapshot,
    reconciliations: u64,
}

impl ViewerState {
    pub fn new(doc_id: DocId) -> Self {
        Self {
            doc_id,
            selected: None,
            latest: LoadState::Idle,
            latest_generation: Generation::default(),
            commit: CommitSlot::default(),
            commit_generation: Generation::default(),
            snapshot: Snapshot::Absent,
            reconciliations: 0,
        }
    }

    pub fn doc_id(&self) -> &DocId {
        &self.doc_id
    }

    /// Marks a latest-state request as issued and returns its tag.
    ///
    /// A previously loaded state stays displayable while the new request runs.
    pub fn request_document(&mut self) -> Generation {
        let generation = self.latest_generation.bump();
        self.latest = match std::mem::take(&mut self.latest) {
            LoadState::Ready(doc) | LoadState::Refreshing(doc) => LoadState::Refreshing(doc),
            _ => LoadState::Pending,
        };
        tracing::debug!(doc_id = %self.doc_id, generation = generation.0, "document request issued");
        self.reconcile();
        generation
    }

    /// Applies a latest-state result. Returns `false` when the result was stale.
    pub fn apply_document(
        &mut self,
        generation: Generation,
        result: Result<DocumentState, String>,
    ) -> bool {
        if generation != self.latest_generation {
            tracing::debug!(
                generation = generation.0,
                current = self.latest_generation.0,
                "dropping stale document response"
            );
            return false;
        }
        self.latest = match result {
            Ok(doc) => LoadState::Ready(Arc::new(doc)),
            Err(reason) => {
                tracing::warn!(doc_id = %self.doc_id, %reason, "document load failed");
                LoadState::Failed(reason)
            }
        };
        self.reconcile();
        true
    }

    /// Selects a historical commit.
    ///
    /// Re-selecting the current commit is a no-op, as is an empty id. Otherwise
    /// the previous commit result is discarded and the returned request must be
    /// issued. There is no way back to "latest" other than selecting its commit.
    pub fn select_commit(&mut self, commit: CommitId) -> Option<CommitRequest> {
        if commit.is_empty() {
            tracing::debug!("ignoring empty commit selection");
            return None;
        }
        if self.selected.as_ref() == Some(&commit) {
            return None;
        }

        let generation = self.commit_generation.bump();
        self.selected = Some(commit.clone());
        self.commit = CommitSlot {
            commit: Some(commit.clone()),
            load: LoadState::Pending,
        };
        tracing::debug!(%commit, generation = generation.0, "commit selected");
        self.reconcile();

        Some(CommitRequest {
            generation,
            doc_id: self.doc_id.clone(),
            commit,
        })
    }

    /// Applies a commit result. Returns `false` when the result was stale.
    pub fn apply_commit(
        &mut self,
        generation: Generation,
        result: Result<DocumentState, String>,
    ) -> bool {
        if generation != self.commit_generation {
            tracing::debug!(
                generation = generation.0,
                current = self.commit_generation.0,
                "dropping stale commit response"
            );
            return false;
        }
        self.commit.load = match result {
            Ok(doc) => LoadState::Ready(Arc::new(doc)),
            Err(reason) => {
                tracing::warn!(doc_id = %self.doc_id, %reason, "commit load failed");
                LoadState::Failed(reason)
            }
        };
        self.reconcile();
        true
    }

    fn reconcile(&mut self) {
        self.snapshot = Snapshot::reconcile(self.selected.as_ref(), &self.latest, &self.commit);
        self.reconciliations += 1;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selected_commit(&self) -> Option<&CommitId> {
        self.selected.as_ref()
    }

    pub fn latest(&self) -> &LoadState {
        &self.latest
    }

    pub fn commit_slot(&self) -> &CommitSlot {
        &self.commit
    }

    pub fn is_loading(&self) -> bool {
        self.latest.is_pending() || self.commit.load.is_pending()
    }

    /// First failure of the two sources, document before commit.
    pub fn error(&self) -> Option<ViewerError> {
        if let Some(reason) = self.latest.failure() {
            return Some(ViewerError::DocumentLoad(reason.to_string()));
        }
        self.commit
            .load
            .failure()
            .map(|reason| ViewerError::CommitLoad(reason.to_string()))
    }

    pub fn view(&self) -> ViewerView<'_> {
        match self.error() {
            Some(err) => ViewerView::Failed(err),
            None => ViewerView::Ready {
                snapshot: &self.snapshot,
                loading: self.is_loading(),
            },
        }
    }

    /// History list, newest first.
    ///
    /// Built from the latest state's log so later revisions stay reachable
    /// while an older commit is pinned.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let log = match self.latest.document() {
            Some(doc) => doc.log.as_slice(),
            None => self.snapshot.log(),
        };
        history_entries(log, self.selected.as_ref())
    }

    /// Number of snapshot rebuilds so far.
    pub fn reconciliations(&self) -> u64 {
        self.reconciliations
    }
}
