use std::collections::VecDeque;

use super::Layout;

/// Bounded undo/redo stack of full layout snapshots.
///
/// The entry at `cursor` mirrors the current layout. Recording after an undo
/// discards the redo tail; once `limit` entries are held the oldest is
/// dropped.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Layout>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Starts a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: Layout, limit: usize) -> Self {
        let mut entries = VecDeque::with_capacity(limit.min(64));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Records a new current state.
    pub fn record(&mut self, layout: &Layout) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(layout.clone());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back, returning the state to restore.
    pub fn undo(&mut self) -> Option<&Layout> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward, returning the state to restore.
    pub fn redo(&mut self) -> Option<&Layout> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
