// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON shapes served by the document node's `/api/v0/documents` endpoint.

use docview_kernel::{AnchorProof, CommitRef, DocumentState, Doctype};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    #[serde(default)]
    pub doc_id: String,
    pub state: WireState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireState {
    pub doctype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<WireNext>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub anchor_status: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_proof: Option<AnchorProof>,
    #[serde(default)]
    pub log: Vec<WireLogEntry>,
}

/// Pending revision that has not been anchored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNext {
    #[serde(default)]
    pub content: Option<Value>,
}

/// Log entries arrive either as `{"cid": ".."}` or as a bare cid string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireLogEntry {
    Entry { cid: String },
    Bare(String),
}

impl WireLogEntry {
    pub fn cid(&self) -> &str {
        match self {
            WireLogEntry::Entry { cid } | WireLogEntry::Bare(cid) => cid,
        }
    }
}

impl From<WireState> for DocumentState {
    fn from(wire: WireState) -> Self {
        DocumentState {
            doctype: Doctype::parse(&wire.doctype),
            content: wire.content,
            next_content: wire.next.and_then(|n| n.content),
            metadata: wire.metadata,
            anchor_status: wire.anchor_status,
            anchor_proof: wire.anchor_proof,
            log: wire.log.iter().map(|e| CommitRef::new(e.cid())).collect(),
        }
    }
}

impl From<&DocumentState> for WireState {
    fn from(state: &DocumentState) -> Self {
        WireState {
            doctype: state.doctype.as_str().to_string(),
            content: state.content.clone(),
            next: state
                .next_content
                .clone()
                .map(|content| WireNext { content: Some(content) }),
            metadata: state.metadata.clone(),
            anchor_status: state.anchor_status,
            anchor_proof: state.anchor_proof.clone(),
            log: state
                .log
                .iter()
                .map(|c| WireLogEntry::Entry {
                    cid: c.cid.as_str().to_string(),
                })
                .collect(),
        }
    }
}
