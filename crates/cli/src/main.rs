// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use docview_cli::commands::{browse, history, show};
use docview_cli::config::ViewerConfig;
use docview_cli::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "docview")]
#[command(about = "Read-only viewer for versioned, content-addressed documents", long_about = None)]
struct Cli {
    /// Base URL of the document node (overrides DOCVIEW_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides DOCVIEW_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Serve documents from a JSON fixture file instead of a node
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a document's content, type, anchoring, metadata and history
    Show {
        doc_id: String,

        /// View the document as of this commit
        #[arg(long, short)]
        commit: Option<String>,

        /// Print the content as JSON, whatever the doctype
        #[arg(long)]
        raw: bool,
    },
    /// List the document's commits, newest first
    History {
        doc_id: String,
    },
    /// Navigate the history interactively
    Browse {
        doc_id: String,

        /// Start pinned at this commit
        #[arg(long, short)]
        commit: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = ViewerConfig::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        cfg.endpoint = endpoint;
    }
    if let Some(timeout) = cli.timeout {
        cfg.request_timeout_secs = timeout;
    }
    cfg.fixture = cli.fixture.or(cfg.fixture);

    init_telemetry(&cfg.log_filter);
    tracing::debug!(?cfg, "configuration resolved");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Show { doc_id, commit, raw } => show::run(&cfg, &doc_id, commit, raw, &mut stdout).await,
        Commands::History { doc_id } => history::run(&cfg, &doc_id, &mut stdout).await,
        Commands::Browse { doc_id, commit } => {
            let stdin = io::stdin().lock();
            browse::run(&cfg, &doc_id, commit, stdin, &mut stdout).await
        }
    }
}
