//! Editing session state: mode, selections, registers, marks and the jump list.
//!
//! Everything here is plain data owned by one editing session and mutated from the editing
//! thread only. Positions held across edits (marks, jump entries, selections) are re-resolved
//! through a [`core_text::Translation`] right after each edit; nothing keeps a raw offset
//! into a stale snapshot.

use core_text::{Point, Snapshot, Tracking, Translation, VirtualPoint};

pub mod jump_list;
pub mod marks;
pub mod registers;

pub use jump_list::{JumpEntry, JumpList};
pub use marks::{MarkError, MarkMap, MarkTarget};
pub use registers::{RegisterMap, RegisterName, RegisterValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Character,
    Line,
    Block,
}

/// Current editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual(VisualKind),
    /// Selection that typed text replaces.
    Select,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual(VisualKind::Character) => "VISUAL",
            Mode::Visual(VisualKind::Line) => "VISUAL LINE",
            Mode::Visual(VisualKind::Block) => "VISUAL BLOCK",
            Mode::Select => "SELECT",
        }
    }

    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual(_))
    }
}

/// A caret plus the far end of its selection. The caret is always `active`; an empty span
/// (`anchor == active`) is a bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectedSpan {
    pub anchor: VirtualPoint,
    pub active: VirtualPoint,
}

impl SelectedSpan {
    pub fn new(anchor: VirtualPoint, active: VirtualPoint) -> Self {
        Self { anchor, active }
    }

    pub fn caret(point: Point) -> Self {
        let p = VirtualPoint::from(point);
        Self {
            anchor: p,
            active: p,
        }
    }

    pub fn caret_offset(&self) -> usize {
        self.active.offset()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// True when the caret sits before the anchor.
    pub fn is_reversed(&self) -> bool {
        self.active.offset() < self.anchor.offset()
    }

    pub fn start(&self) -> usize {
        self.anchor.offset().min(self.active.offset())
    }

    pub fn end(&self) -> usize {
        self.anchor.offset().max(self.active.offset())
    }

    pub fn collapse(&self) -> Self {
        Self {
            anchor: self.active,
            active: self.active,
        }
    }

    /// Remap both ends onto the snapshot produced by `translation`.
    pub fn translate(&self, translation: &Translation, snapshot: &Snapshot) -> Self {
        if self.is_empty() {
            let active = self.active.translate(translation, snapshot, Tracking::Positive);
            return Self {
                anchor: active,
                active,
            };
        }
        // Inserts exactly at either boundary stay outside the selection.
        let (anchor_tracking, active_tracking) = if self.is_reversed() {
            (Tracking::Negative, Tracking::Positive)
        } else {
            (Tracking::Positive, Tracking::Negative)
        };
        Self {
            anchor: self.anchor.translate(translation, snapshot, anchor_tracking),
            active: self.active.translate(translation, snapshot, active_tracking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{BufferId, TextBuffer, TextEdit};

    #[test]
    fn mode_labels() {
        assert_eq!(Mode::default(), Mode::Normal);
        assert_eq!(Mode::Visual(VisualKind::Line).as_str(), "VISUAL LINE");
        assert!(Mode::Visual(VisualKind::Block).is_visual());
        assert!(!Mode::Select.is_visual());
    }

    #[test]
    fn selection_ordering() {
        let buf = TextBuffer::new(BufferId(0), "abcdef");
        let s = buf.snapshot();
        let span = SelectedSpan::new(s.point(4).into(), s.point(1).into());
        assert!(span.is_reversed());
        assert_eq!((span.start(), span.end()), (1, 4));
        assert_eq!(span.caret_offset(), 1);
        assert!(span.collapse().is_empty());
    }

    #[test]
    fn caret_moves_past_insert_at_its_offset() {
        let mut buf = TextBuffer::new(BufferId(0), "abc");
        let caret = SelectedSpan::caret(buf.snapshot().point(1));
        let mut edit = TextEdit::new(buf.snapshot());
        edit.insert(1, "xx");
        let tr = buf.apply(edit).unwrap();
        let moved = caret.translate(&tr, buf.snapshot());
        assert!(moved.is_empty());
        assert_eq!(moved.caret_offset(), 3);
    }

    #[test]
    fn selection_does_not_absorb_boundary_inserts() {
        let mut buf = TextBuffer::new(BufferId(0), "abcdef");
        let span = SelectedSpan::new(buf.snapshot().point(1).into(), buf.snapshot().point(3).into());
        let mut edit = TextEdit::new(buf.snapshot());
        edit.insert(1, "X").insert(3, "Y");
        let tr = buf.apply(edit).unwrap();
        let moved = span.translate(&tr, buf.snapshot());
        assert_eq!((moved.anchor.offset(), moved.active.offset()), (2, 4));
        assert_eq!(buf.snapshot().slice(2, 4), "bc");
    }
}
