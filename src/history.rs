// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Revision history presentation.

use crate::types::{CommitId, CommitRef};

/// One row of the history list, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub cid: CommitId,
    /// The entry currently shown by the viewer.
    pub active: bool,
    /// The newest revision in the log.
    pub latest: bool,
}

/// Builds the newest-first history list from an oldest-first log.
///
/// The log is only read. With no selection the newest entry is active; a
/// selection that matches nothing leaves every entry inactive.
pub fn history_entries(log: &[CommitRef], selected: Option<&CommitId>) -> Vec<HistoryEntry> {
    log.iter()
        .rev()
        .enumerate()
        .map(|(i, commit)| {
            let active = match selected {
                Some(sel) => &commit.cid == sel,
                None => i == 0,
            };
            HistoryEntry {
                cid: commit.cid.clone(),
                active,
                latest: i == 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(cids: &[&str]) -> Vec<CommitRef> {
        cids.iter().map(|c| CommitRef::new(*c)).collect()
    }

    #[test]
    fn test_newest_first_and_latest_active_without_selection() {
        let log = log(&["cidA", "cidB", "cidC"]);
        let entries = history_entries(&log, None);

        let order: Vec<&str> = entries.iter().map(|e| e.cid.as_str()).collect();
        assert_eq!(order, vec!["cidC", "cidB", "cidA"]);

        assert!(entries[0].active);
        assert!(entries[0].latest);
        assert!(entries[1..].iter().all(|e| !e.active && !e.latest));

        // Source order is untouched.
        assert_eq!(log[0].cid.as_str(), "cidA");
    }

    #[test]
    fn test_selected_entry_is_the_only_active_one() {
        let log = log(&["cidA", "cidB", "cidC"]);
        let sel = CommitId::from("cidA");
        let entries = history_entries(&log, Some(&sel));

        let active: Vec<&str> = entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.cid.as_str())
            .collect();
        assert_eq!(active, vec!["cidA"]);
        // The newest row keeps its annotation even when not active.
        assert!(entries[0].latest);
        assert!(!entries[0].active);
    }

    #[test]
    fn test_foreign_selection_marks_nothing_active() {
        let log = log(&["cidA", "cidB"]);
        let sel = CommitId::from("cidZ");
        let entries = history_entries(&log, Some(&sel));
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.active));
    }

    #[test]
    fn test_empty_log() {
        assert!(history_entries(&[], None).is_empty());
    }
}
