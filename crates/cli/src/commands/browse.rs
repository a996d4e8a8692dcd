// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Interactive history navigation over line-based input.

use std::io::{BufRead, Write};

use docview_kernel::RendererRegistry;

use crate::config::ViewerConfig;
use crate::source::{open_controller, settle};
use crate::view;

const HELP: &str = "Enter a history number or commit id to view it, 'r' to reload, 'q' to quit.";

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Select(String),
    Reload,
    Quit,
    Help,
}

fn parse(line: &str, history_len: usize, cid_at: impl Fn(usize) -> Option<String>) -> Option<Action> {
    match line.trim() {
        "" => None,
        "q" | "quit" | "exit" => Some(Action::Quit),
        "r" | "reload" => Some(Action::Reload),
        "?" | "h" | "help" => Some(Action::Help),
        other => match other.parse::<usize>() {
            Ok(n) if n < history_len => cid_at(n).map(Action::Select),
            Ok(_) => Some(Action::Help),
            Err(_) => Some(Action::Select(other.to_string())),
        },
    }
}

pub async fn run(
    cfg: &ViewerConfig,
    doc_id: &str,
    commit: Option<String>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let registry = RendererRegistry::default();
    let mut controller = open_controller(cfg, doc_id)?;
    controller.load_document();
    if let Some(commit) = commit {
        controller.select_commit(commit);
    }
    settle(&mut controller, cfg).await?;

    let render = |controller: &docview_controller::ViewerController| {
        view::render_document(doc_id, &controller.view(), &controller.history(), &registry)
    };

    write!(out, "{}", render(&controller))?;
    writeln!(out, "\n{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        let history = controller.history();
        let action = parse(&line, history.len(), |i| {
            history.get(i).map(|e| e.cid.to_string())
        });

        match action {
            None => continue,
            Some(Action::Quit) => break,
            Some(Action::Help) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Some(Action::Reload) => controller.load_document(),
            Some(Action::Select(cid)) => {
                if !controller.select_commit(cid.clone()) {
                    writeln!(out, "Already viewing {}", cid)?;
                    continue;
                }
            }
        }

        settle(&mut controller, cfg).await?;
        write!(out, "{}", render(&controller))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid_at(i: usize) -> Option<String> {
        ["bnew", "bmid", "bold"].get(i).map(|s| s.to_string())
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse("  ", 3, cid_at), None);
        assert_eq!(parse("q", 3, cid_at), Some(Action::Quit));
        assert_eq!(parse("r", 3, cid_at), Some(Action::Reload));
        assert_eq!(parse("2", 3, cid_at), Some(Action::Select("bold".into())));
        assert_eq!(parse("7", 3, cid_at), Some(Action::Help));
        assert_eq!(
            parse("bagcqcera", 3, cid_at),
            Some(Action::Select("bagcqcera".into()))
        );
    }
}
