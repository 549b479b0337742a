//! Motion span resolver.
//!
//! Given a caret, a motion and a count, computes the [`TaggedSpan`] an operator acts on.
//! Rules on top of the plain motion:
//! * `Right` and forward word motions may reach one past the last char so `dl` and `dw`
//!   on the last char or word remove it.
//! * A word motion that leaves the caret's line stops at that line's end (`dw` on the last
//!   word does not swallow the line break).
//! * Vertical motions that cannot move resolve to nothing.

use core_text::{
    Motion, MotionKind, MotionOptions, OperationKind, Point, Snapshot, Span, TaggedSpan, move_point,
};

pub fn resolve_motion_span(
    snapshot: &Snapshot,
    start: Point,
    motion: Motion,
    count: usize,
) -> Option<TaggedSpan> {
    let options = MotionOptions {
        allow_past_end: matches!(motion, Motion::Right | Motion::WordForward(_)),
    };
    let outcome = move_point(snapshot, start, motion, count, options);
    if outcome.steps == 0 && motion.operation_kind() == OperationKind::LineWise {
        return None;
    }
    let mut target = outcome.point.offset;
    if let Motion::WordForward(_) = motion {
        let line = snapshot.line_of_offset(start.offset);
        if snapshot.line_of_offset(target) > line || target == snapshot.len() {
            target = target.min(snapshot.line_end(line)).max(start.offset);
        }
    }
    let span = Span::from_offsets(snapshot, start.offset, target);
    if span.is_empty() && motion.motion_kind() == MotionKind::Exclusive {
        return None;
    }
    Some(TaggedSpan::new(
        span,
        motion.motion_kind(),
        motion.operation_kind(),
    ))
}

/// Line-wise span over `count` lines starting at the caret's line.
pub fn resolve_lines(snapshot: &Snapshot, start: Point, count: usize) -> TaggedSpan {
    let first = snapshot.line_of_offset(start.offset);
    let last = (first + count.max(1) - 1).min(snapshot.last_line());
    TaggedSpan::new(
        Span::from_offsets(snapshot, snapshot.line_start(first), snapshot.line_start(last)),
        MotionKind::Inclusive,
        OperationKind::LineWise,
    )
}
