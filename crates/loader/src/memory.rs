// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory, content-addressed document store.
//!
//! Every revision gets a commit id derived from its content and its parent,
//! so the same history always produces the same ids.

use std::collections::HashMap;

use async_trait::async_trait;
use docview_kernel::{AnchorProof, CommitId, CommitRef, DocId, DocumentState, Doctype};
use serde_json::{Map, Value};

use crate::error::{LoadError, Result};
use crate::{CommitLoader, DocumentLoader};

#[derive(Debug, Clone)]
struct Revision {
    cid: CommitId,
    content: Value,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    doctype: Doctype,
    metadata: Map<String, Value>,
    revisions: Vec<Revision>,
    pending: Option<Value>,
    anchor_status: i64,
    anchor_proof: Option<AnchorProof>,
}

impl StoredDocument {
    fn state_with(&self, content: Option<Value>, next_content: Option<Value>, upto: usize) -> DocumentState {
        DocumentState {
            doctype: self.doctype.clone(),
            content,
            next_content,
            metadata: self.metadata.clone(),
            anchor_status: self.anchor_status,
            anchor_proof: self.anchor_proof.clone(),
            log: self.revisions[..upto]
                .iter()
                .map(|r| CommitRef { cid: r.cid.clone() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<DocId, StoredDocument>,
}

/// Commit id for a revision: BLAKE3 over the document id, the parent commit
/// and the serialized content, hex encoded behind a `b` multibase-style prefix.
pub fn commit_id_for(doc_id: &DocId, parent: Option<&CommitId>, content: &Value) -> CommitId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(doc_id.as_str().as_bytes());
    hasher.update(&[0]);
    if let Some(parent) = parent {
        hasher.update(parent.as_str().as_bytes());
    }
    hasher.update(&[0]);
    hasher.update(content.to_string().as_bytes());
    CommitId::new(format!("b{}", hasher.finalize().to_hex()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Creates a document with its genesis revision, replacing any existing one.
    pub fn create(
        &mut self,
        doc_id: DocId,
        doctype: Doctype,
        metadata: Map<String, Value>,
        content: Value,
    ) -> CommitId {
        let cid = commit_id_for(&doc_id, None, &content);
        let doc = StoredDocument {
            doctype,
            metadata,
            revisions: vec![Revision {
                cid: cid.clone(),
                content,
            }],
            pending: None,
            anchor_status: 0,
            anchor_proof: None,
        };
        self.documents.insert(doc_id, doc);
        cid
    }

    /// Appends a revision and clears any pending content.
    pub fn update(&mut self, doc_id: &DocId, content: Value) -> Result<CommitId> {
        let doc = self.get_mut(doc_id)?;
        let parent = doc.revisions.last().map(|r| r.cid.clone());
        let cid = commit_id_for(doc_id, parent.as_ref(), &content);
        doc.revisions.push(Revision {
            cid: cid.clone(),
            content,
        });
        doc.pending = None;
        Ok(cid)
    }

    /// Records content that is not materialized until anchoring completes.
    pub fn set_pending(&mut self, doc_id: &DocId, next: Value) -> Result<()> {
        self.get_mut(doc_id)?.pending = Some(next);
        Ok(())
    }

    pub fn set_anchor(&mut self, doc_id: &DocId, status: i64, proof: Option<AnchorProof>) -> Result<()> {
        let doc = self.get_mut(doc_id)?;
        doc.anchor_status = status;
        doc.anchor_proof = proof;
        Ok(())
    }

    /// Latest state. With pending content and only a genesis revision the
    /// primary content is withheld, the way a node reports a document still
    /// being anchored.
    pub fn latest(&self, doc_id: &DocId) -> Result<DocumentState> {
        let doc = self.get(doc_id)?;
        let upto = doc.revisions.len();
        let content = match (&doc.pending, upto) {
            (Some(_), 1) => None,
            _ => doc.revisions.last().map(|r| r.content.clone()),
        };
        Ok(doc.state_with(content, doc.pending.clone(), upto))
    }

    /// State as of `commit`, with the log cut at that commit.
    pub fn at_commit(&self, doc_id: &DocId, commit: &CommitId) -> Result<DocumentState> {
        let doc = self.get(doc_id)?;
        let idx = doc
            .revisions
            .iter()
            .position(|r| &r.cid == commit)
            .ok_or_else(|| LoadError::NotFound(format!("{} at {}", doc_id, commit)))?;
        let content = doc.revisions[idx].content.clone();
        Ok(doc.state_with(Some(content), None, idx + 1))
    }

    fn get(&self, doc_id: &DocId) -> Result<&StoredDocument> {
        self.documents
            .get(doc_id)
            .ok_or_else(|| LoadError::NotFound(doc_id.to_string()))
    }

    fn get_mut(&mut self, doc_id: &DocId) -> Result<&mut StoredDocument> {
        self.documents
            .get_mut(doc_id)
            .ok_or_else(|| LoadError::NotFound(doc_id.to_string()))
    }
}

#[async_trait]
impl DocumentLoader for MemoryStore {
    async fn load(&self, doc_id: &DocId) -> Result<DocumentState> {
        self.latest(doc_id)
    }
}

#[async_trait]
impl CommitLoader for MemoryStore {
    async fn load_commit(&self, doc_id: &DocId, commit: &CommitId) -> Result<DocumentState> {
        self.at_commit(doc_id, commit)
    }
}
