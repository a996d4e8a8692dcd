// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Async driver for the viewer state machine.
//!
//! Loads run as tokio tasks and report back over a channel. The controller
//! applies every completion on the caller's task, so the kernel state is only
//! ever touched from one place. Must be used inside a tokio runtime.

use std::sync::Arc;

use docview_kernel::{
    CommitId, DocId, DocumentState, Generation, HistoryEntry, Snapshot, ViewerError, ViewerState,
    ViewerView,
};
use docview_loader::{CommitLoader, DocumentLoader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::LoadEvent;

/// Reports a load task's completion exactly once.
///
/// A task that unwinds or is cancelled before its loader returns still
/// reports, as a failure for its generation. Superseded tasks report under
/// an old generation and are dropped as stale.
struct Completion {
    tx: mpsc::UnboundedSender<LoadEvent>,
    event: fn(Generation, Result<DocumentState, String>) -> LoadEvent,
    generation: Generation,
    sent: bool,
}

impl Completion {
    fn new(
        tx: mpsc::UnboundedSender<LoadEvent>,
        event: fn(Generation, Result<DocumentState, String>) -> LoadEvent,
        generation: Generation,
    ) -> Self {
        Self {
            tx,
            event,
            generation,
            sent: false,
        }
    }

    fn send(mut self, result: Result<DocumentState, String>) {
        self.sent = true;
        // Receiver gone means the controller was dropped.
        let _ = self.tx.send((self.event)(self.generation, result));
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.sent {
            tracing::debug!(generation = self.generation.0, "load task ended without a result");
            let _ = self.tx.send((self.event)(
                self.generation,
                Err("load task ended without a result".to_string()),
            ));
        }
    }
}

pub struct ViewerController {
    state: ViewerState,
    documents: Arc<dyn DocumentLoader>,
    commits: Arc<dyn CommitLoader>,
    tx: mpsc::UnboundedSender<LoadEvent>,
    rx: mpsc::UnboundedReceiver<LoadEvent>,
    document_task: Option<JoinHandle<()>>,
    commit_task: Option<JoinHandle<()>>,
}

impl ViewerController {
    pub fn new(
        doc_id: DocId,
        documents: Arc<dyn DocumentLoader>,
        commits: Arc<dyn CommitLoader>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: ViewerState::new(doc_id),
            documents,
            commits,
            tx,
            rx,
            document_task: None,
            commit_task: None,
        }
    }

    /// Convenience for a single value serving both roles.
    pub fn with_loader<L>(doc_id: DocId, loader: Arc<L>) -> Self
    where
        L: DocumentLoader + CommitLoader + 'static,
    {
        let documents: Arc<dyn DocumentLoader> = loader.clone();
        let commits: Arc<dyn CommitLoader> = loader;
        Self::new(doc_id, documents, commits)
    }

    /// Requests the latest document state. Calling it again re-requests it;
    /// an in-flight request is superseded.
    pub fn load_document(&mut self) {
        let generation = self.state.request_document();
        let doc_id = self.state.doc_id().clone();
        let loader = Arc::clone(&self.documents);
        let completion = Completion::new(self.tx.clone(), LoadEvent::document, generation);

        tracing::info!(%doc_id, "loading document");
        if let Some(task) = self.document_task.take() {
            task.abort();
        }
        self.document_task = Some(tokio::spawn(async move {
            let result = loader.load(&doc_id).await.map_err(|e| e.to_string());
            completion.send(result);
        }));
    }

    /// Selects a historical commit and requests its state.
    ///
    /// Returns `false` when nothing changed (same commit, or an empty id).
    pub fn select_commit(&mut self, commit: impl Into<CommitId>) -> bool {
        let Some(request) = self.state.select_commit(commit.into()) else {
            return false;
        };

        tracing::info!(doc_id = %request.doc_id, commit = %request.commit, "loading commit");
        if let Some(task) = self.commit_task.take() {
            task.abort();
        }
        let loader = Arc::clone(&self.commits);
        let completion = Completion::new(self.tx.clone(), LoadEvent::commit, request.generation);
        self.commit_task = Some(tokio::spawn(async move {
            let result = loader
                .load_commit(&request.doc_id, &request.commit)
                .await
                .map_err(|e| e.to_string());
            completion.send(result);
        }));
        true
    }

    /// Applies one completion. Returns `false` when it was stale and dropped.
    pub fn apply(&mut self, event: LoadEvent) -> bool {
        let generation = event.generation();
        let applied = match event {
            LoadEvent::Document { generation, result } => self.state.apply_document(generation, result),
            LoadEvent::Commit { generation, result } => self.state.apply_commit(generation, result),
        };
        if applied {
            tracing::debug!(generation = generation.0, "reconciled");
        }
        applied
    }

    /// Waits for the next completion and applies it.
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Applies completions already queued, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits until neither source is loading.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            self.next_event().await;
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.state.snapshot()
    }

    pub fn view(&self) -> ViewerView<'_> {
        self.state.view()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<ViewerError> {
        self.state.error()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.history()
    }

    pub fn selected_commit(&self) -> Option<&CommitId> {
        self.state.selected_commit()
    }
}

impl Drop for ViewerController {
    fn drop(&mut self) {
        if let Some(task) = self.document_task.take() {
            task.abort();
        }
        if let Some(task) = self.commit_task.take() {
            task.abort();
        }
    }
}
