//! Motion engine.
//!
//! Motions are pure functions of a snapshot, a starting point and a repeat count. They never
//! mutate the snapshot and never fail: running into a buffer or line boundary simply stops
//! the motion where it is.

use crate::point::{MotionKind, OperationKind, Point};
use crate::word::{self, WordKind};
use crate::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordForward(WordKind),
    WordBackward(WordKind),
    LineStart,
    LineEnd,
    FirstNonWhitespace,
    DownToFirstNonWhitespace,
}

impl Motion {
    pub fn motion_kind(self) -> MotionKind {
        match self {
            Motion::LineEnd => MotionKind::Inclusive,
            _ => MotionKind::Exclusive,
        }
    }

    pub fn operation_kind(self) -> OperationKind {
        match self {
            Motion::Up | Motion::Down | Motion::DownToFirstNonWhitespace => OperationKind::LineWise,
            _ => OperationKind::CharacterWise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionOptions {
    /// Allow the caret to rest one past the last char of a line (Insert / Select semantics).
    pub allow_past_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionOutcome {
    pub point: Point,
    /// Single steps that succeeded before a boundary stopped the motion.
    pub steps: usize,
}

/// Apply `motion` `count` times (a count of 0 counts as 1).
pub fn move_point(
    snapshot: &Snapshot,
    start: Point,
    motion: Motion,
    count: usize,
    options: MotionOptions,
) -> MotionOutcome {
    debug_assert_eq!(start.version, snapshot.version());
    let count = count.max(1);
    let offset = start.offset.min(snapshot.len());
    let line = snapshot.line_of_offset(offset);
    let (target, steps) = match motion {
        Motion::Left => {
            let target = offset.saturating_sub(count).max(snapshot.line_start(line));
            (target, offset - target)
        }
        Motion::Right => {
            let limit = line_limit(snapshot, line, options).max(offset);
            let target = (offset + count).min(limit);
            (target, target - offset)
        }
        Motion::Up | Motion::Down => vertical(snapshot, offset, motion == Motion::Up, count, options),
        Motion::WordForward(kind) => {
            let (target, steps) = repeat(offset, count, |o| word::next_word_start(snapshot, o, kind));
            // Past the last word the target is the buffer end, where only Insert carets rest.
            if options.allow_past_end {
                (target, steps)
            } else {
                (snapshot.clamp_caret(target), steps)
            }
        }
        Motion::WordBackward(kind) => {
            repeat(offset, count, |o| word::previous_word_start(snapshot, o, kind))
        }
        Motion::LineStart => (snapshot.line_start(line), 1),
        Motion::LineEnd => {
            let target_line = (line + count - 1).min(snapshot.last_line());
            (line_limit(snapshot, target_line, options), 1 + target_line - line)
        }
        Motion::FirstNonWhitespace => (snapshot.first_non_blank(line), 1),
        Motion::DownToFirstNonWhitespace => {
            let target_line = (line + count).min(snapshot.last_line());
            (snapshot.first_non_blank(target_line), target_line - line)
        }
    };
    MotionOutcome {
        point: snapshot.point(target),
        steps,
    }
}

/// Rightmost offset a caret may occupy on `line`.
fn line_limit(snapshot: &Snapshot, line: usize, options: MotionOptions) -> usize {
    if options.allow_past_end {
        snapshot.line_end(line)
    } else {
        snapshot.last_char_offset(line)
    }
}

/// Move one line at a time so each step can stop independently at a boundary.
fn vertical(
    snapshot: &Snapshot,
    offset: usize,
    up: bool,
    count: usize,
    options: MotionOptions,
) -> (usize, usize) {
    let (mut line, column) = snapshot.line_column(offset);
    let mut steps = 0;
    while steps < count {
        if up {
            if line == 0 {
                break;
            }
            line -= 1;
        } else {
            if line >= snapshot.last_line() {
                break;
            }
            line += 1;
        }
        steps += 1;
    }
    if steps == 0 {
        return (offset, 0);
    }
    let target = (snapshot.line_start(line) + column).min(line_limit(snapshot, line, options));
    (target, steps)
}

fn repeat(offset: usize, count: usize, mut step: impl FnMut(usize) -> usize) -> (usize, usize) {
    let mut current = offset;
    let mut steps = 0;
    for _ in 0..count {
        let next = step(current);
        if next == current {
            break;
        }
        current = next;
        steps += 1;
    }
    (current, steps)
}
