// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Content rendering model.
//!
//! Turns document content into a presentation-neutral view. Each doctype has
//! one renderer in a registry; a mandatory fallback handles everything else,
//! so rendering is total over doctypes that do not exist yet.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::types::Doctype;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text. Only string values take this path.
    Text(String),
    /// Pretty-printed JSON (2-space indent), shown in a monospaced block.
    Structured(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Fields(Vec<Field>),
    Text(String),
    /// Nothing displayable; the caller shows a placeholder.
    Absent,
}

pub trait ContentRenderer: Send + Sync {
    fn render(&self, content: &Value) -> ContentView;
}

/// Mapping content, one labeled field per entry.
pub struct TileRenderer;

impl ContentRenderer for TileRenderer {
    fn render(&self, content: &Value) -> ContentView {
        let Some(map) = content.as_object() else {
            tracing::warn!("tile content is not a mapping, rendering nothing");
            return ContentView::Absent;
        };

        let fields = map
            .iter()
            .map(|(label, value)| Field {
                label: label.clone(),
                value: match value {
                    Value::String(s) => FieldValue::Text(s.clone()),
                    other => FieldValue::Structured(pretty(other)),
                },
            })
            .collect();
        ContentView::Fields(fields)
    }
}

/// Single account link value, shown as-is.
pub struct Caip10LinkRenderer;

impl ContentRenderer for Caip10LinkRenderer {
    fn render(&self, content: &Value) -> ContentView {
        ContentView::Text(stringify(content))
    }
}

pub struct AbsentRenderer;

impl ContentRenderer for AbsentRenderer {
    fn render(&self, _content: &Value) -> ContentView {
        ContentView::Absent
    }
}

pub struct RendererRegistry {
    handlers: HashMap<String, Box<dyn ContentRenderer>>,
    fallback: Box<dyn ContentRenderer>,
}

impl RendererRegistry {
    /// An empty registry; every doctype goes to `fallback` until registered.
    pub fn new(fallback: Box<dyn ContentRenderer>) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, doctype: &str, renderer: Box<dyn ContentRenderer>) -> Self {
        self.handlers.insert(doctype.to_string(), renderer);
        self
    }

    pub fn render(&self, doctype: &Doctype, content: Option<&Value>) -> ContentView {
        let Some(content) = content else {
            return ContentView::Absent;
        };
        match self.handlers.get(doctype.as_str()) {
            Some(renderer) => renderer.render(content),
            None => {
                tracing::debug!(doctype = %doctype, "no renderer registered, using fallback");
                self.fallback.render(content)
            }
        }
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        RendererRegistry::new(Box::new(AbsentRenderer))
            .with(Doctype::TILE, Box::new(TileRenderer))
            .with(Doctype::CAIP10_LINK, Box::new(Caip10LinkRenderer))
    }
}

/// Metadata as `(key, value)` label pairs, both stringified.
pub fn metadata_fields(metadata: &Map<String, Value>) -> Vec<(String, String)> {
    metadata
        .iter()
        .map(|(key, value)| (key.clone(), stringify(value)))
        .collect()
}

/// Strings verbatim, everything else as compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
