// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::io::Write;

use docview_kernel::ViewerError;

use crate::config::ViewerConfig;
use crate::source::{open_controller, settle};
use crate::view;

/// Prints the revision log, newest first.
pub async fn run(cfg: &ViewerConfig, doc_id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let mut controller = open_controller(cfg, doc_id)?;
    controller.load_document();
    settle(&mut controller, cfg).await?;

    if let Some(err) = controller.error() {
        tracing::error!(%err, "history unavailable");
        writeln!(out, "\n🚨 {}\n", ViewerError::GENERIC_MESSAGE)?;
        return Ok(());
    }

    writeln!(out, "\nDocument History\n")?;
    writeln!(out, "{}\n", view::render_history(&controller.history(), false))?;
    Ok(())
}
