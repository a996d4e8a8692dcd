// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Data sources for the document viewer.
//!
//! Two collaborator interfaces feed the viewer: one yields a document's latest
//! state, the other its state as of a specific commit. Implementations here
//! talk to a document node over HTTP or serve from memory.

pub mod error;
pub mod fixtures;
pub mod http;
pub mod memory;
pub mod wire;

use async_trait::async_trait;
use docview_kernel::{CommitId, DocId, DocumentState};

pub use error::{LoadError, Result};
pub use http::HttpLoader;
pub use memory::MemoryStore;

/// Yields a document's latest known state.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, doc_id: &DocId) -> Result<DocumentState>;
}

/// Yields a document's state as of one commit.
#[async_trait]
pub trait CommitLoader: Send + Sync {
    async fn load_commit(&self, doc_id: &DocId, commit: &CommitId) -> Result<DocumentState>;
}
