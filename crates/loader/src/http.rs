// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::time::Duration;

use async_trait::async_trait;
use docview_kernel::{CommitId, DocId, DocumentState};
use reqwest::{Client, StatusCode, Url};

use crate::error::{LoadError, Result};
use crate::wire::DocumentResponse;
use crate::{CommitLoader, DocumentLoader};

/// Loads documents from a node's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    base_url: Url,
    client: Client,
}

impl HttpLoader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        let url = url.into();
        let base_url = Url::parse(&url).map_err(|e| LoadError::InvalidUrl(format!("{}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(LoadError::InvalidUrl(url));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Document URL with the id as a single, percent-encoded path segment.
    fn document_url(&self, doc_id: &DocId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LoadError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v0", "documents", doc_id.as_str()]);
        Ok(url)
    }

    async fn fetch(&self, doc_id: &DocId, version: Option<&CommitId>) -> Result<DocumentState> {
        let url = self.document_url(doc_id)?;
        let mut req = self.client.get(url.clone());
        if let Some(commit) = version {
            req = req.query(&[("version", commit.as_str())]);
        }

        tracing::debug!(%url, version = ?version.map(|c| c.as_str()), "fetching document");
        let resp = req
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => {
                let what = match version {
                    Some(commit) => format!("{} at {}", doc_id, commit),
                    None => doc_id.to_string(),
                };
                return Err(LoadError::NotFound(what));
            }
            s => {
                return Err(LoadError::Status {
                    status: s.as_u16(),
                    url: url.to_string(),
                })
            }
        }

        let body: DocumentResponse = resp
            .json()
            .await
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        Ok(body.state.into())
    }
}

#[async_trait]
impl DocumentLoader for HttpLoader {
    async fn load(&self, doc_id: &DocId) -> Result<DocumentState> {
        self.fetch(doc_id, None).await
    }
}

#[async_trait]
impl CommitLoader for HttpLoader {
    async fn load_commit(&self, doc_id: &DocId, commit: &CommitId) -> Result<DocumentState> {
        self.fetch(doc_id, Some(commit)).await
    }
}
