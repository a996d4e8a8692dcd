// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Document data model.
//!
//! Everything here is produced by a loader and treated as immutable afterwards.
//! The viewer never writes documents back.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a document (stream).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-derived identifier of one historical version of a document.
///
/// Equality is string identity; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(pub String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CommitId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One entry of a document's revision log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub cid: CommitId,
}

impl CommitRef {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: CommitId::new(cid) }
    }
}

/// Document type tag. Unknown tags are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Doctype {
    Tile,
    Caip10Link,
    Other(String),
}

impl Doctype {
    pub const TILE: &'static str = "tile";
    pub const CAIP10_LINK: &'static str = "caip10-link";

    pub fn parse(tag: &str) -> Self {
        match tag {
            "tile" => Doctype::Tile,
            "caip10-link" => Doctype::Caip10Link,
            other => Doctype::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Doctype::Tile => Self::TILE,
            Doctype::Caip10Link => Self::CAIP10_LINK,
            Doctype::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Doctype {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Doctype {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Doctype::parse(&tag))
    }
}

/// Proof that a document state was committed to an external chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorProof {
    pub block_number: u64,
    /// Seconds since the unix epoch.
    pub block_timestamp: i64,
    pub chain_id: String,
}

/// A loaded document state, either the latest one or the state as of a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentState {
    pub doctype: Doctype,
    /// Materialized content. `None` while only a pending revision exists.
    pub content: Option<Value>,
    /// Content of a revision that is not anchored yet.
    pub next_content: Option<Value>,
    pub metadata: Map<String, Value>,
    /// Raw anchor status code. Kept as an integer so unknown codes survive.
    pub anchor_status: i64,
    pub anchor_proof: Option<AnchorProof>,
    /// Revision log, oldest first.
    pub log: Vec<CommitRef>,
}

impl DocumentState {
    pub fn new(doctype: Doctype, content: Value) -> Self {
        Self {
            doctype,
            content: Some(content),
            next_content: None,
            metadata: Map::new(),
            anchor_status: 0,
            anchor_proof: None,
            log: Vec::new(),
        }
    }

    /// Primary content, or the pending revision's content when the primary is absent.
    ///
    /// JSON `null` counts as absent.
    pub fn materialized_content(&self) -> Option<&Value> {
        present(self.content.as_ref()).or_else(|| present(self.next_content.as_ref()))
    }

    pub fn newest_commit(&self) -> Option<&CommitId> {
        self.log.last().map(|c| &c.cid)
    }

    pub fn contains_commit(&self, cid: &CommitId) -> bool {
        self.log.iter().any(|c| &c.cid == cid)
    }
}

pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
