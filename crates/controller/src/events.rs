// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Completions sent from load tasks back to the controller.

use docview_kernel::{DocumentState, Generation};

#[derive(Debug)]
pub enum LoadEvent {
    Document {
        generation: Generation,
        result: Result<DocumentState, String>,
    },
    Commit {
        generation: Generation,
        result: Result<DocumentState, String>,
    },
}

impl LoadEvent {
    pub fn document(generation: Generation, result: Result<DocumentState, String>) -> Self {
        LoadEvent::Document { generation, result }
    }

    pub fn commit(generation: Generation, result: Result<DocumentState, String>) -> Self {
        LoadEvent::Commit { generation, result }
    }

    pub fn generation(&self) -> Generation {
        match self {
            LoadEvent::Document { generation, .. } | LoadEvent::Commit { generation, .. } => *generation,
        }
    }
}
