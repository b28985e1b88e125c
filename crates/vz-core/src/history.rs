//! Snapshot history with an undo/redo cursor

/// An ordered list of committed snapshots plus a cursor into it.
///
/// `entries[index]` is always the state currently shown. Committing while the
/// cursor is not at the end discards the redo-able tail first.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: usize,
}

impl<T: Clone> History<T> {
    /// Create a history holding a single initial snapshot
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    /// Record a new snapshot after the cursor, dropping any redo entries
    pub fn commit(&mut self, state: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push(state);
        self.index = self.entries.len() - 1;
    }

    /// Step back one snapshot. Returns `None` at the first entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward one snapshot. Returns `None` at the last entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all snapshots and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }
}
