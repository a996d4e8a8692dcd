// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::io::Write;

use docview_kernel::RendererRegistry;

use crate::config::ViewerConfig;
use crate::source::{open_controller, settle};
use crate::view;

/// Prints a document, optionally pinned at `commit`.
pub async fn run(
    cfg: &ViewerConfig,
    doc_id: &str,
    commit: Option<String>,
    raw: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut controller = open_controller(cfg, doc_id)?;
    controller.load_document();
    if let Some(commit) = commit {
        controller.select_commit(commit);
    }
    settle(&mut controller, cfg).await?;

    if raw && controller.error().is_none() {
        writeln!(out, "{}", view::render_raw(controller.snapshot()))?;
        return Ok(());
    }

    let rendered = view::render_document(
        doc_id,
        &controller.view(),
        &controller.history(),
        &RendererRegistry::default(),
    );
    write!(out, "{}", rendered)?;
    Ok(())
}
