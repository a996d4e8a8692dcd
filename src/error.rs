// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

/// Failure of one of the two data sources feeding the viewer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// The latest-state fetch failed.
    #[error("Document load failed: {0}")]
    DocumentLoad(String),
    /// The historical-state fetch failed.
    #[error("Commit load failed: {0}")]
    CommitLoad(String),
}

impl ViewerError {
    /// The single message shown in place of content whenever any load failed.
    pub const GENERIC_MESSAGE: &'static str = "Something's wrong – try another document";
}
