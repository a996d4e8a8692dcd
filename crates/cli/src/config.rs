// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const ENV_ENDPOINT: &str = "DOCVIEW_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "DOCVIEW_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Base URL of the document node.
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
    /// Serve documents from a fixture file instead of the node.
    pub fixture: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7007".to_string(),
            request_timeout_secs: 30,
            log_filter: "docview=info,docview_cli=info,docview_controller=info,docview_loader=info"
                .to_string(),
            fixture: None,
        }
    }
}

impl ViewerConfig {
    /// Defaults overridden by `DOCVIEW_ENDPOINT` and `DOCVIEW_TIMEOUT_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            cfg.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            cfg.request_timeout_secs = raw
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))?;
        }
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
