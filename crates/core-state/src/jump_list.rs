//! Bounded jump history (`<C-o>` / `<C-i>`).
//!
//! Entries are ordered most recent first. While traversing, `cursor` indexes the entry the
//! caret was last sent to; a fresh [`JumpList::add`] drops every entry newer than the cursor.

use std::collections::VecDeque;

use core_text::{BufferId, Point, Tracking, Translation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEntry {
    pub buffer: BufferId,
    pub point: Point,
}

#[derive(Debug, Clone)]
pub struct JumpList {
    entries: VecDeque<JumpEntry>,
    limit: usize,
    cursor: Option<usize>,
}

impl Default for JumpList {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

impl JumpList {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry last traversed to, `None` when not traversing.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> impl Iterator<Item = &JumpEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&JumpEntry> {
        self.entries.get(index)
    }

    /// Record a jump origin. Drops forward history and any older copy of the same position,
    /// then evicts the oldest entries beyond the limit.
    pub fn add(&mut self, buffer: BufferId, point: Point) {
        if let Some(cursor) = self.cursor.take() {
            self.entries.drain(..cursor);
        }
        let entry = JumpEntry { buffer, point };
        self.entries.retain(|e| e.buffer != buffer || e.point.offset != point.offset);
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
        tracing::trace!(target: "state.jumps", buffer = buffer.0, offset = point.offset, len = self.entries.len(), "jump_add");
    }

    /// Step `count` entries towards older history. `current` is recorded first when a
    /// traversal starts so [`JumpList::move_newer`] can come back to it. Returns `None` and
    /// leaves the cursor in place when there is not enough history.
    pub fn move_older(&mut self, count: usize, current: JumpEntry) -> Option<JumpEntry> {
        let count = count.max(1);
        let base = match self.cursor {
            Some(cursor) => cursor,
            None => {
                if self.entries.is_empty() {
                    return None;
                }
                if self.entries.front() != Some(&current) {
                    self.add(current.buffer, current.point);
                }
                self.cursor = Some(0);
                0
            }
        };
        let target = base + count;
        let entry = *self.entries.get(target)?;
        self.cursor = Some(target);
        Some(entry)
    }

    /// Step `count` entries towards newer history.
    pub fn move_newer(&mut self, count: usize) -> Option<JumpEntry> {
        let cursor = self.cursor?;
        let target = cursor.checked_sub(count.max(1))?;
        let entry = *self.entries.get(target)?;
        self.cursor = Some(target);
        Some(entry)
    }

    /// Re-resolve entries of `buffer` after an edit.
    pub fn map_through(&mut self, buffer: BufferId, translation: &Translation) {
        for entry in self.entries.iter_mut().filter(|e| e.buffer == buffer) {
            entry.point = translation.map_point(entry.point, Tracking::Positive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Snapshot, TextBuffer, TextEdit};

    fn entry(s: &Snapshot, offset: usize) -> JumpEntry {
        JumpEntry {
            buffer: s.buffer_id(),
            point: s.point(offset),
        }
    }

    #[test]
    fn most_recent_first_and_bounded() {
        let s = Snapshot::new(BufferId(1), "0123456789");
        let mut jumps = JumpList::new(3);
        for offset in 0..5 {
            jumps.add(s.buffer_id(), s.point(offset));
        }
        let offsets: Vec<_> = jumps.entries().map(|e| e.point.offset).collect();
        assert_eq!(offsets, vec![4, 3, 2]);
    }

    #[test]
    fn traversal_round_trip() {
        let s = Snapshot::new(BufferId(1), "0123456789");
        let mut jumps = JumpList::default();
        jumps.add(s.buffer_id(), s.point(1));
        jumps.add(s.buffer_id(), s.point(2));
        let back = jumps.move_older(1, entry(&s, 9)).unwrap();
        assert_eq!(back.point.offset, 2);
        assert_eq!(jumps.move_older(1, entry(&s, 2)).unwrap().point.offset, 1);
        assert_eq!(jumps.move_older(1, entry(&s, 1)), None);
        assert_eq!(jumps.move_newer(2).unwrap().point.offset, 9);
        assert_eq!(jumps.move_newer(1), None);
    }

    #[test]
    fn add_truncates_forward_history() {
        let s = Snapshot::new(BufferId(1), "0123456789");
        let mut jumps = JumpList::default();
        jumps.add(s.buffer_id(), s.point(1));
        jumps.add(s.buffer_id(), s.point(2));
        jumps.add(s.buffer_id(), s.point(3));
        jumps.move_older(2, entry(&s, 9));
        assert_eq!(jumps.cursor(), Some(2));
        jumps.add(s.buffer_id(), s.point(5));
        let offsets: Vec<_> = jumps.entries().map(|e| e.point.offset).collect();
        assert_eq!(offsets, vec![5, 2, 1]);
        assert_eq!(jumps.cursor(), None);
    }

    #[test]
    fn entries_track_edits() {
        let mut buf = TextBuffer::new(BufferId(1), "foo\nbar");
        let mut jumps = JumpList::default();
        jumps.add(buf.id(), buf.snapshot().point(4));
        let mut edit = TextEdit::new(buf.snapshot());
        edit.delete(0, 4);
        let tr = buf.apply(edit).unwrap();
        jumps.map_through(buf.id(), &tr);
        assert_eq!(jumps.get(0).unwrap().point, buf.snapshot().point(0));
    }
}
