// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! docview-kernel: the state-resolution core of a read-only viewer for
//! versioned, content-addressed documents.
//!
//! The kernel is synchronous and performs no I/O. Loaders live in
//! `docview-loader`; the async driver lives in `docview-controller`.

pub mod anchor;
pub mod error;
pub mod history;
pub mod render;
pub mod snapshot;
pub mod state;
pub mod types;

#[cfg(test)]
pub mod tests;

pub use anchor::{format_anchor_status, AnchorStatus};
pub use error::ViewerError;
pub use history::{history_entries, HistoryEntry};
pub use render::{ContentRenderer, ContentView, Field, FieldValue, RendererRegistry};
pub use snapshot::{CommitSlot, LoadState, Snapshot};
pub use state::{CommitRequest, Generation, ViewerState, ViewerView};
pub use types::{AnchorProof, CommitId, CommitRef, DocId, DocumentState, Doctype};
