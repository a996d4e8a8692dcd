// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON fixture files describing documents for offline viewing and tests.

use std::fs;
use std::path::{Path, PathBuf};

use docview_kernel::{AnchorProof, CommitId, DocId, Doctype};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{LoadError, Result};
use crate::memory::MemoryStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureFile {
    pub documents: Vec<FixtureDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDocument {
    pub doc_id: String,
    pub doctype: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Content of each revision, oldest first. Must not be empty.
    pub revisions: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<Value>,
    #[serde(default)]
    pub anchor_status: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_proof: Option<AnchorProof>,
}

impl FixtureFile {
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();
        for doc in self.documents {
            let id = DocId::new(doc.doc_id);
            let mut revisions = doc.revisions.into_iter();
            let genesis = revisions
                .next()
                .ok_or_else(|| LoadError::Fixture(format!("document {} has no revisions", id)))?;

            store.create(id.clone(), Doctype::parse(&doc.doctype), doc.metadata, genesis);
            for content in revisions {
                store.update(&id, content)?;
            }
            if let Some(next) = doc.pending {
                store.set_pending(&id, next)?;
            }
            store.set_anchor(&id, doc.anchor_status, doc.anchor_proof)?;
        }
        Ok(store)
    }
}

pub fn parse(json: &str) -> Result<MemoryStore> {
    let file: FixtureFile =
        serde_json::from_str(json).map_err(|e| LoadError::Fixture(e.to_string()))?;
    file.into_store()
}

pub fn load(path: impl AsRef<Path>) -> Result<MemoryStore> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

pub const SAMPLE_TILE_ID: &str = "kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s";
pub const SAMPLE_LINK_ID: &str = "kjzl6cwe1jw14bby0mywi9yjxgq1m7q8ss8kcb3f6ouz8nb48ckeme0mmcam8uq";

/// A tile with three revisions and an anchored caip10 link.
pub fn sample() -> FixtureFile {
    FixtureFile {
        documents: vec![
            FixtureDocument {
                doc_id: SAMPLE_TILE_ID.to_string(),
                doctype: Doctype::TILE.to_string(),
                metadata: json!({
                    "controllers": ["did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"],
                    "family": "profile"
                })
                .as_object()
                .cloned()
                .unwrap_or_default(),
                revisions: vec![
                    json!({"name": "Alice"}),
                    json!({"name": "Alice", "age": 30}),
                    json!({"name": "Alice", "age": 31, "links": ["https://example.org"]}),
                ],
                pending: None,
                anchor_status: 3,
                anchor_proof: Some(AnchorProof {
                    block_number: 9_384_217,
                    block_timestamp: 1_614_943_215,
                    chain_id: "eip155:3".to_string(),
                }),
            },
            FixtureDocument {
                doc_id: SAMPLE_LINK_ID.to_string(),
                doctype: Doctype::CAIP10_LINK.to_string(),
                metadata: json!({"controllers": ["0xabc@eip155:1"]})
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
                revisions: vec![json!("did:pkh:eip155:1:0xabc")],
                pending: None,
                anchor_status: 1,
                anchor_proof: None,
            },
        ],
    }
}

/// Writes the sample fixture to `dir/documents.json`.
pub fn write_sample(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join("documents.json");
    let body = serde_json::to_string_pretty(&sample()).map_err(|e| LoadError::Fixture(e.to_string()))?;
    fs::write(&path, body)?;
    Ok(path)
}

/// Commit ids of a sample document, oldest first.
pub fn sample_commits(store: &MemoryStore, doc_id: &str) -> Result<Vec<CommitId>> {
    Ok(store
        .latest(&DocId::new(doc_id))?
        .log
        .into_iter()
        .map(|c| c.cid)
        .collect())
}
