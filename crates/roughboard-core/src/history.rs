//! Linear undo/redo history over immutable snapshots.

/// A linear history of snapshots with a cursor.
///
/// Pushing after an undo discards the redo branch. An overwrite push
/// replaces the current snapshot instead, which lets a continuous edit
/// (a drag) update one history step many times.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    snapshots: Vec<T>,
    index: usize,
    /// Maximum number of snapshots kept (None = unbounded).
    max_len: Option<usize>,
}

impl<T: Default> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> HistoryStack<T> {
    /// Create a history holding only `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
            max_len: None,
        }
    }

    /// Create a history that keeps at most `max_len` snapshots, dropping
    /// the oldest ones first.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is zero.
    pub fn bounded(initial: T, max_len: usize) -> Self {
        assert!(max_len > 0, "history must hold at least one snapshot");
        Self {
            max_len: Some(max_len),
            ..Self::new(initial)
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    /// Record `state`.
    ///
    /// With `overwrite` the current snapshot is replaced in place. Without
    /// it, snapshots after the cursor are dropped, `state` is appended and
    /// becomes current.
    pub fn push(&mut self, state: T, overwrite: bool) {
        if overwrite {
            self.snapshots[self.index] = state;
            return;
        }

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(state);
        self.index += 1;

        if let Some(max_len) = self.max_len {
            let excess = self.snapshots.len().saturating_sub(max_len);
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.index -= excess;
            }
        }
    }

    /// Record the state computed from the current snapshot.
    pub fn push_with<F>(&mut self, f: F, overwrite: bool)
    where
        F: FnOnce(&T) -> T,
    {
        let state = f(self.current());
        self.push(state, overwrite);
    }

    /// Step back. Returns false if already at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward. Returns false if already at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Position of the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of snapshots, including the redo branch.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Forget everything and start over from `initial`.
    pub fn clear(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.index = 0;
    }
}
