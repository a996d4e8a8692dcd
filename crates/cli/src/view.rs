// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Terminal rendering of the viewer state.

use std::fmt::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use docview_kernel::render::metadata_fields;
use docview_kernel::{
    format_anchor_status, AnchorProof, ContentView, FieldValue, HistoryEntry, RendererRegistry,
    Snapshot, ViewerError, ViewerView,
};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn placeholder(loading: bool, what: &str) -> String {
    if loading {
        "Loading...".to_string()
    } else {
        format!("Get a document to see its {}", what)
    }
}

/// Full document view. A failed load replaces everything with one message.
pub fn render_document(
    doc_id: &str,
    view: &ViewerView<'_>,
    history: &[HistoryEntry],
    registry: &RendererRegistry,
) -> String {
    let mut out = String::new();
    let (snapshot, loading) = match view {
        ViewerView::Failed(err) => {
            tracing::error!(%err, "document unavailable");
            let _ = writeln!(out, "\n🚨 {}\n", ViewerError::GENERIC_MESSAGE);
            return out;
        }
        ViewerView::Ready { snapshot, loading } => (*snapshot, *loading),
    };

    heading(&mut out, "Viewing Document ID");
    let _ = writeln!(out, "{}", doc_id);
    if let Some(commit) = snapshot.pinned_commit() {
        let _ = writeln!(out, "at commit {}", commit);
    }
    if loading {
        let _ = writeln!(out, "(loading...)");
    }

    heading(&mut out, "Content");
    let _ = writeln!(out, "{}", render_content(snapshot, loading, registry));

    heading(&mut out, "Doc Type");
    let _ = writeln!(
        out,
        "{}",
        snapshot.doctype().map(|d| d.to_string()).unwrap_or_default()
    );

    heading(&mut out, "Anchoring");
    let _ = writeln!(
        out,
        "{}",
        render_anchoring(snapshot.anchor_status(), snapshot.anchor_proof())
    );

    heading(&mut out, "Metadata");
    let _ = writeln!(out, "{}", render_metadata(snapshot, loading));

    heading(&mut out, "Document History");
    let _ = writeln!(out, "{}", render_history(history, loading));
    out
}

pub fn render_content(snapshot: &Snapshot, loading: bool, registry: &RendererRegistry) -> String {
    let Some(doctype) = snapshot.doctype() else {
        return placeholder(loading, "content");
    };

    match registry.render(doctype, snapshot.content()) {
        ContentView::Fields(fields) => {
            let mut table = table(vec!["Field", "Value"]);
            for field in fields {
                table.add_row(vec![field.label, field_cell(field.value)]);
            }
            table.to_string()
        }
        ContentView::Text(text) => text,
        ContentView::Absent => placeholder(loading, "content"),
    }
}

/// Plain text as is; structured values fenced so they read as a literal block.
fn field_cell(value: FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text,
        FieldValue::Structured(block) => format!("```\n{}\n```", block),
    }
}

pub fn render_anchoring(status: Option<i64>, proof: Option<&AnchorProof>) -> String {
    let label = status.and_then(format_anchor_status).unwrap_or_default();
    let timestamp = proof
        .map(|p| {
            chrono::DateTime::from_timestamp(p.block_timestamp, 0)
                .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
                .unwrap_or_else(|| p.block_timestamp.to_string())
        })
        .unwrap_or_default();

    let mut table = table(vec!["Status", "Block Number", "Block Timestamp", "Chain Id"]);
    table.add_row(vec![
        label,
        proof.map(|p| p.block_number.to_string()).unwrap_or_default(),
        timestamp,
        proof.map(|p| p.chain_id.clone()).unwrap_or_default(),
    ]);
    table.to_string()
}

fn render_metadata(snapshot: &Snapshot, loading: bool) -> String {
    let Some(metadata) = snapshot.metadata() else {
        return placeholder(loading, "metadata");
    };
    let mut table = table(vec!["Key", "Value"]);
    for (key, value) in metadata_fields(metadata) {
        table.add_row(vec![key, value]);
    }
    table.to_string()
}

pub fn render_history(history: &[HistoryEntry], loading: bool) -> String {
    if history.is_empty() {
        return placeholder(loading, "log");
    }
    let mut table = table(vec!["#", "", "Commit"]);
    for (i, entry) in history.iter().enumerate() {
        let marker = if entry.active { "[X]" } else { "" };
        let cid = if entry.latest {
            format!("{} (latest)", entry.cid)
        } else {
            entry.cid.to_string()
        };
        table.add_row(vec![i.to_string(), marker.to_string(), cid]);
    }
    table.to_string()
}

/// Snapshot content as pretty JSON, whatever its doctype.
pub fn render_raw(snapshot: &Snapshot) -> String {
    match snapshot.content() {
        Some(content) => serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string()),
        None => "null".to_string(),
    }
}
