//! Undo/redo history for the element collection.
//!
//! The history is a bounded stack of full element-set snapshots plus an
//! index: pure value semantics, no diff/patch log. Element counts on a
//! certificate are small (tens, not thousands), so snapshotting keeps the
//! state machine trivial to reason about and test.

use crate::constants::MAX_HISTORY;
use crate::types::CertificateElement;

/// Bounded linear undo/redo stack of element-collection snapshots.
///
/// The stack always contains at least one snapshot (the starting
/// collection), and `index` always points at a valid entry. Committing from
/// a non-tip index discards the redo branch: history is linear, never a tree.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<CertificateElement>>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl History {
    /// Creates a history seeded with a single snapshot of the starting
    /// element collection.
    pub fn new(initial: Vec<CertificateElement>) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
        }
    }

    /// Commits a new snapshot.
    ///
    /// Any snapshots beyond the current index are discarded first (redo
    /// branch pruned); if the stack then exceeds the bound, the oldest entry
    /// is dropped and the index shifts down with it.
    pub fn commit(&mut self, elements: Vec<CertificateElement>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(elements);
        self.index += 1;

        if self.snapshots.len() > MAX_HISTORY {
            self.snapshots.remove(0);
            self.index -= 1;
        }
    }

    /// Steps back one snapshot and returns it, or `None` when already at the
    /// oldest entry.
    pub fn undo(&mut self) -> Option<&[CertificateElement]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Steps forward one snapshot and returns it, or `None` when already at
    /// the tip.
    pub fn redo(&mut self) -> Option<&[CertificateElement]> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// True if there is something to undo.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// True if there is something to redo.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Drops all history and reseeds with the given collection. Used when a
    /// new or loaded document replaces the current one.
    pub fn reset(&mut self, elements: Vec<CertificateElement>) {
        self.snapshots = vec![elements];
        self.index = 0;
    }

    /// Number of snapshots currently retained.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the stack retains at least the seed snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CertificateElement, ElementKind};

    fn elements(labels: &[&str]) -> Vec<CertificateElement> {
        labels
            .iter()
            .map(|l| CertificateElement::new(ElementKind::Text, Some(l.to_string())))
            .collect()
    }

    fn labels(snapshot: &[CertificateElement]) -> Vec<String> {
        snapshot.iter().map(|e| e.content.clone()).collect()
    }

    #[test]
    fn test_undo_restores_pre_commit_state() {
        let mut history = History::new(elements(&["a"]));
        history.commit(elements(&["a", "b"]));

        let restored = history.undo().expect("one undo available");
        assert_eq!(labels(restored), vec!["a"]);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_after_undo_roundtrips() {
        let mut history = History::new(elements(&["a"]));
        history.commit(elements(&["a", "b"]));

        history.undo().unwrap();
        let redone = history.redo().expect("one redo available");
        assert_eq!(labels(redone), vec!["a", "b"]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_origin_is_noop() {
        let mut history = History::new(elements(&["a"]));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_commit_behind_tip_prunes_redo_branch() {
        let mut history = History::new(elements(&[]));
        history.commit(elements(&["a"]));
        history.commit(elements(&["a", "b"]));

        history.undo().unwrap();
        assert!(history.can_redo());

        // A new mutation from behind the tip discards the redo branch.
        history.commit(elements(&["a", "c"]));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());

        let restored = history.undo().unwrap();
        assert_eq!(labels(restored), vec!["a"]);
    }

    #[test]
    fn test_stack_is_bounded() {
        let mut history = History::new(elements(&[]));
        for i in 0..(MAX_HISTORY * 2) {
            history.commit(elements(&[&format!("e{i}")]));
        }
        assert_eq!(history.len(), MAX_HISTORY);

        // Oldest entries were discarded; we can still undo down to the
        // oldest retained snapshot without panicking.
        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, MAX_HISTORY - 1);
    }

    #[test]
    fn test_reset_drops_history() {
        let mut history = History::new(elements(&["a"]));
        history.commit(elements(&["a", "b"]));
        history.reset(elements(&["z"]));

        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }
}
