//! Scribe history crate - linear snapshot undo/redo.
//!
//! Every buffer mutation in the editor stores a complete snapshot of the new
//! content. Undo and redo move a cursor over that snapshot list; pushing
//! while undone discards the abandoned redo branch. The structure is generic
//! over the snapshot type so it carries no assumptions about what a buffer
//! is, but in practice the editor uses [`TextHistory`].

/// Snapshot history for plain text buffers.
pub type TextHistory = History<String>;

/// A linear edit history of full snapshots.
///
/// Invariants:
/// - `entries` is never empty; the first entry is the seed snapshot.
/// - `cursor` always indexes a valid entry, which is the current content.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T: PartialEq> History<T> {
    /// Create a history seeded with the initial content.
    ///
    /// The seed occupies the first slot and is what `undo` bottoms out at.
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record a new snapshot as the current content.
    ///
    /// Pushing content equal to the current snapshot is a silent no-op, so
    /// callers never have to guard against redundant writes. An effective
    /// push discards any entries past the cursor; after it, `can_redo` is
    /// always false.
    pub fn push(&mut self, content: T) {
        if content == self.entries[self.cursor] {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(content);
        self.cursor += 1;
    }

    /// Step back one snapshot and return the new current content.
    ///
    /// At the oldest entry this is a no-op.
    pub fn undo(&mut self) -> &T {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        &self.entries[self.cursor]
    }

    /// Step forward one snapshot and return the new current content.
    ///
    /// At the newest entry this is a no-op.
    pub fn redo(&mut self) -> &T {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        &self.entries[self.cursor]
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// True when at least one older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True when the cursor sits before the newest snapshot.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots, including the seed.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Index of the current snapshot, counting from the seed at 0.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Discard everything and reseed with fresh content.
    ///
    /// Used when the surface switches to another document; history never
    /// carries across documents.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_history() -> TextHistory {
        History::new(String::new())
    }

    // =========================================================================
    // Seeding and push
    // =========================================================================

    #[test]
    fn test_new_seeds_single_entry() {
        let history = make_history();
        assert_eq!(history.current(), "");
        assert_eq!(history.depth(), 1);
        assert_eq!(history.position(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_appends_and_advances() {
        let mut history = make_history();
        history.push("one".to_string());
        assert_eq!(history.current(), "one");
        assert_eq!(history.depth(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_identical_content_is_noop() {
        let mut history = make_history();
        history.push("one".to_string());
        history.push("one".to_string());
        assert_eq!(history.depth(), 2);
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_push_identical_seed_is_noop() {
        let mut history = make_history();
        history.push(String::new());
        assert_eq!(history.depth(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_push_after_undo_discards_redo_branch() {
        let mut history = make_history();
        history.push("one".to_string());
        history.push("two".to_string());
        history.undo();
        history.push("three".to_string());

        assert_eq!(history.current(), "three");
        assert_eq!(history.depth(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.undo(), "one");
    }

    #[test]
    fn test_can_redo_false_after_any_effective_push() {
        let mut history = make_history();
        history.push("one".to_string());
        history.push("two".to_string());
        history.undo();
        assert!(history.can_redo());
        history.push("other".to_string());
        assert!(!history.can_redo());
    }

    // =========================================================================
    // Undo / redo movement
    // =========================================================================

    #[test]
    fn test_undo_returns_previous_content() {
        let mut history = make_history();
        history.push("one".to_string());
        assert_eq!(history.undo(), "");
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn test_undo_at_seed_is_noop() {
        let mut history = make_history();
        assert_eq!(history.undo(), "");
        assert_eq!(history.position(), 0);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = make_history();
        history.push("one".to_string());
        assert_eq!(history.redo(), "one");
        assert_eq!(history.position(), 1);
    }

    #[test]
    fn test_undo_then_redo_restores_content() {
        let mut history = make_history();
        history.push("draft".to_string());
        history.undo();
        assert_eq!(history.redo(), "draft");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_three_entry_walk() {
        let mut history = make_history();
        history.push("one".to_string());
        history.push("one two".to_string());

        assert_eq!(history.depth(), 3);
        assert_eq!(history.current(), "one two");

        assert_eq!(history.undo(), "one");
        assert_eq!(history.undo(), "");
        assert!(!history.can_undo());

        assert_eq!(history.redo(), "one");
        assert_eq!(history.redo(), "one two");
        assert!(!history.can_redo());
    }

    // =========================================================================
    // Reset and genericity
    // =========================================================================

    #[test]
    fn test_reset_discards_everything() {
        let mut history = make_history();
        history.push("one".to_string());
        history.push("two".to_string());
        history.undo();

        history.reset("fresh".to_string());
        assert_eq!(history.current(), "fresh");
        assert_eq!(history.depth(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_over_non_string_snapshots() {
        let mut history: History<Vec<u32>> = History::new(vec![]);
        history.push(vec![1]);
        history.push(vec![1, 2]);
        assert_eq!(history.undo(), &vec![1]);
        assert_eq!(history.redo(), &vec![1, 2]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut history = make_history();
        history.push("one".to_string());
        let mut copy = history.clone();
        copy.push("two".to_string());
        assert_eq!(history.current(), "one");
        assert_eq!(copy.current(), "two");
    }
}
