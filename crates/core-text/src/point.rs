//! Position and span vocabulary shared by every layer above the buffer.

use crate::Snapshot;
use crate::edit::{Tracking, Translation};

/// Absolute char offset into the snapshot with the given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub offset: usize,
    pub version: u64,
}

impl Point {
    pub fn new(offset: usize, version: u64) -> Self {
        Self { offset, version }
    }

    /// Re-resolve this point against the snapshot produced by `translation`.
    pub fn translate(self, translation: &Translation, tracking: Tracking) -> Self {
        translation.map_point(self, tracking)
    }
}

/// A point plus a count of virtual spaces past the end of its line.
///
/// `virtual_spaces` is zero unless `point` sits at the end of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPoint {
    pub point: Point,
    pub virtual_spaces: usize,
}

impl VirtualPoint {
    /// Build a virtual point, dropping virtual space that is not past the line end.
    pub fn new(snapshot: &Snapshot, point: Point, virtual_spaces: usize) -> Self {
        let line = snapshot.line_of_offset(point.offset);
        let virtual_spaces = if point.offset == snapshot.line_end(line) {
            virtual_spaces
        } else {
            0
        };
        Self {
            point,
            virtual_spaces,
        }
    }

    pub fn offset(&self) -> usize {
        self.point.offset
    }

    pub fn is_in_virtual_space(&self) -> bool {
        self.virtual_spaces > 0
    }

    /// Remap through an edit. Virtual space survives only while the point stays at a line end.
    pub fn translate(self, translation: &Translation, snapshot: &Snapshot, tracking: Tracking) -> Self {
        let point = self.point.translate(translation, tracking);
        Self::new(snapshot, point, self.virtual_spaces)
    }
}

impl From<Point> for VirtualPoint {
    fn from(point: Point) -> Self {
        Self {
            point,
            virtual_spaces: 0,
        }
    }
}

/// Whether the char at `end` takes part in a character-wise operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Inclusive,
    Exclusive,
}

/// Whether an operation treats its span as literal characters or as whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationKind {
    #[default]
    CharacterWise,
    LineWise,
}

/// Half-open `[start, end)` range within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start: Point, end: Point) -> Self {
        debug_assert_eq!(start.version, end.version, "span endpoints from different snapshots");
        if start.offset <= end.offset {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn from_offsets(snapshot: &Snapshot, start: usize, end: usize) -> Self {
        Self::new(snapshot.point(start), snapshot.point(end))
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, offset: usize) -> bool {
        (self.start.offset..self.end.offset).contains(&offset)
    }

    pub fn translate(self, translation: &Translation) -> Self {
        Self::new(
            self.start.translate(translation, Tracking::Negative),
            self.end.translate(translation, Tracking::Positive),
        )
    }
}

/// A span plus the tags an operator needs to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedSpan {
    pub span: Span,
    pub motion_kind: MotionKind,
    pub operation_kind: OperationKind,
}

impl TaggedSpan {
    pub fn new(span: Span, motion_kind: MotionKind, operation_kind: OperationKind) -> Self {
        Self {
            span,
            motion_kind,
            operation_kind,
        }
    }

    /// The concrete range an operator acts on.
    ///
    /// Inclusive spans gain the char at `end` (never past the line content). Line-wise spans
    /// cover every touched line including the final line break.
    pub fn operator_span(&self, snapshot: &Snapshot) -> Span {
        match self.operation_kind {
            OperationKind::LineWise => {
                let first = snapshot.line_of_offset(self.span.start.offset);
                let last = snapshot.line_of_offset(self.span.end.offset);
                Span::from_offsets(
                    snapshot,
                    snapshot.line_start(first),
                    snapshot.line_end_including_break(last),
                )
            }
            OperationKind::CharacterWise => match self.motion_kind {
                MotionKind::Exclusive => self.span,
                MotionKind::Inclusive => {
                    let line = snapshot.line_of_offset(self.span.end.offset);
                    let end = (self.span.end.offset + 1).min(snapshot.line_end(line));
                    Span::from_offsets(
                        snapshot,
                        self.span.start.offset,
                        end.max(self.span.end.offset),
                    )
                }
            },
        }
    }
}
