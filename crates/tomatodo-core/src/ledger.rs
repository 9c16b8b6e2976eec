//! Todo ledger.
//!
//! Owns the pending set (insertion order) and the append-only completed log
//! (completion order). The review gate only proposes which texts to promote;
//! [`TodoLedger::commit_completions`] performs the actual mutation and it is
//! the sole mutator besides [`TodoLedger::add`]. Within one process run a
//! completed entry is never edited or deleted.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
}

/// A todo promoted during a review pass, stamped with the bounds of the work
/// interval it was completed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTodo {
    pub text: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoLedger {
    pending: Vec<TodoItem>,
    completed: Vec<CompletedTodo>,
}

impl TodoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending entry. Blank or whitespace-only text is silently
    /// rejected; returns whether an entry was added.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.pending.push(TodoItem {
            text: text.to_string(),
        });
        true
    }

    pub fn pending(&self) -> &[TodoItem] {
        &self.pending
    }

    pub fn completed(&self) -> &[CompletedTodo] {
        &self.completed
    }

    /// Promote every pending entry whose text is in `selected`, stamping each
    /// with the work interval bounds and the floored duration in minutes.
    /// Unselected entries stay pending. The pass is a single in-memory sweep,
    /// so the promotion is all-or-nothing with respect to the caller.
    ///
    /// Returns the entries promoted by this pass.
    pub fn commit_completions(
        &mut self,
        selected: &BTreeSet<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Vec<CompletedTodo> {
        let duration_minutes = (ended_at - started_at).num_minutes();
        let mut promoted = Vec::new();
        self.pending.retain(|item| {
            if selected.contains(&item.text) {
                promoted.push(CompletedTodo {
                    text: item.text.clone(),
                    started_at,
                    ended_at,
                    duration_minutes,
                });
                false
            } else {
                true
            }
        });
        self.completed.extend(promoted.iter().cloned());
        promoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn interval() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        (start, start + Duration::seconds(1500))
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut ledger = TodoLedger::new();
        assert!(!ledger.add(""));
        assert!(!ledger.add("   "));
        assert!(ledger.pending().is_empty());

        assert!(ledger.add("Write report"));
        assert_eq!(ledger.pending().len(), 1);
        assert_eq!(ledger.pending()[0].text, "Write report");
    }

    #[test]
    fn commit_promotes_selected_and_leaves_rest() {
        let mut ledger = TodoLedger::new();
        for text in ["A", "B", "C"] {
            ledger.add(text);
        }
        let (start, end) = interval();
        let selected: BTreeSet<String> = ["A", "C"].iter().map(|s| s.to_string()).collect();

        let promoted = ledger.commit_completions(&selected, start, end);

        assert_eq!(promoted.len(), 2);
        assert_eq!(ledger.pending(), &[TodoItem { text: "B".into() }]);
        let texts: Vec<&str> = ledger.completed().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["A", "C"]);
        for done in ledger.completed() {
            assert_eq!(done.started_at, start);
            assert_eq!(done.ended_at, end);
            assert_eq!(done.duration_minutes, 25);
        }
    }

    #[test]
    fn duration_is_floored_to_minutes() {
        let mut ledger = TodoLedger::new();
        ledger.add("A");
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let end = start + Duration::seconds(119);
        let selected: BTreeSet<String> = ["A".to_string()].into();
        let promoted = ledger.commit_completions(&selected, start, end);
        assert_eq!(promoted[0].duration_minutes, 1);
    }

    #[test]
    fn commit_with_empty_selection_changes_nothing() {
        let mut ledger = TodoLedger::new();
        ledger.add("A");
        let (start, end) = interval();
        let promoted = ledger.commit_completions(&BTreeSet::new(), start, end);
        assert!(promoted.is_empty());
        assert_eq!(ledger.pending().len(), 1);
        assert!(ledger.completed().is_empty());
    }

    #[test]
    fn duplicate_texts_all_promote() {
        let mut ledger = TodoLedger::new();
        ledger.add("A");
        ledger.add("A");
        let (start, end) = interval();
        let selected: BTreeSet<String> = ["A".to_string()].into();
        ledger.commit_completions(&selected, start, end);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.completed().len(), 2);
    }
}
