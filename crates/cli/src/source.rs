// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use anyhow::Context;
use docview_controller::ViewerController;
use docview_kernel::DocId;
use docview_loader::{fixtures, HttpLoader};

use crate::config::ViewerConfig;

/// Builds a controller backed by the fixture file or the configured node.
pub fn open_controller(cfg: &ViewerConfig, doc_id: &str) -> anyhow::Result<ViewerController> {
    let doc_id = DocId::new(doc_id);
    match &cfg.fixture {
        Some(path) => {
            let store = fixtures::load(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            tracing::debug!(path = %path.display(), documents = store.len(), "serving from fixture");
            Ok(ViewerController::with_loader(doc_id, Arc::new(store)))
        }
        None => {
            let loader = HttpLoader::new(cfg.endpoint.clone(), cfg.request_timeout())
                .context("Failed to build HTTP client")?;
            tracing::debug!(endpoint = loader.base_url(), "serving from node");
            Ok(ViewerController::with_loader(doc_id, Arc::new(loader)))
        }
    }
}

/// Waits for outstanding loads, bounded by the request timeout plus slack.
pub async fn settle(controller: &mut ViewerController, cfg: &ViewerConfig) -> anyhow::Result<()> {
    let limit = cfg.request_timeout() + std::time::Duration::from_secs(1);
    tokio::time::timeout(limit, controller.settle())
        .await
        .map_err(|_| anyhow::anyhow!("Timed out after {:?} waiting for the document", limit))
}
