/// Linear undo/redo over full-buffer snapshots.
///
/// The undo stack holds the buffer as it was before each stroke, the redo
/// stack the buffer as it was before each undo. Both are unbounded.
#[derive(Debug)]
pub struct SnapshotHistory<T> {
    /// Snapshots to restore when undoing
    undo_stack: Vec<T>,
    /// Snapshots to restore when redoing
    redo_stack: Vec<T>,
}

impl<T> Default for SnapshotHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SnapshotHistory<T> {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Records the buffer as it is just before a stroke starts.
    /// A new stroke invalidates everything that could have been redone.
    pub fn capture_before_stroke(&mut self, snapshot: T) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Swaps `current` for the most recent undo snapshot.
    ///
    /// `current` is only evaluated when there is something to undo, and the
    /// returned snapshot is what the buffer should be overwritten with.
    pub fn undo(&mut self, current: impl FnOnce() -> T) -> Option<T> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current());
        Some(snapshot)
    }

    /// Swaps `current` for the most recent redo snapshot, keeping the rest of the redo stack
    pub fn redo(&mut self, current: impl FnOnce() -> T) -> Option<T> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current());
        Some(snapshot)
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
