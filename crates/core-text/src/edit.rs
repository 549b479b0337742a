//! Batched edits and offset translation.
//!
//! A [`TextEdit`] collects non-overlapping replacements expressed against one snapshot and
//! applies them as a single version step. The resulting [`Translation`] maps any offset of
//! the old snapshot onto the new one: offsets before a change are unaffected, offsets at or
//! after it shift by the change's net length delta.

use ropey::Rope;
use smallvec::SmallVec;
use thiserror::Error;

use crate::Snapshot;
use crate::point::Point;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("buffer is read-only")]
    ReadOnly,
    #[error("edit built against version {expected} but buffer is at version {found}")]
    StaleSnapshot { expected: u64, found: u64 },
    #[error("change range {start}..{end} is out of bounds for length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("change range starting at {start} overlaps previous end {prev_end}")]
    Overlapping { start: usize, prev_end: usize },
}

/// How a point sitting exactly on an insertion is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tracking {
    /// Move past inserted text.
    #[default]
    Positive,
    /// Stay before inserted text.
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Replace {
    start: usize,
    end: usize,
    text: String,
}

/// A batch of replacements against one snapshot.
#[derive(Debug, Clone)]
pub struct TextEdit {
    base_version: u64,
    ops: SmallVec<[Replace; 4]>,
}

impl TextEdit {
    pub fn new(base: &Snapshot) -> Self {
        Self {
            base_version: base.version(),
            ops: SmallVec::new(),
        }
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> &mut Self {
        self.replace(offset, offset, text)
    }

    pub fn delete(&mut self, start: usize, end: usize) -> &mut Self {
        self.replace(start, end, "")
    }

    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> &mut Self {
        if start == end && text.is_empty() {
            return self;
        }
        self.ops.push(Replace {
            start,
            end,
            text: text.to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Validate against `base` and produce the edited rope plus its translation.
    pub(crate) fn check_base(&self, base: &Snapshot) -> Result<(), EditError> {
        if self.base_version != base.version() {
            return Err(EditError::StaleSnapshot {
                expected: self.base_version,
                found: base.version(),
            });
        }
        Ok(())
    }

    pub(crate) fn apply_to(mut self, base: &Snapshot) -> Result<(Rope, Translation), EditError> {
        self.check_base(base)?;
        // Stable sort keeps same-offset inserts in the order they were added.
        self.ops.sort_by_key(|op| op.start);
        let len = base.len();
        let mut prev_end = 0;
        for op in &self.ops {
            if op.start > op.end || op.end > len {
                return Err(EditError::OutOfBounds {
                    start: op.start,
                    end: op.end,
                    len,
                });
            }
            if op.start < prev_end {
                return Err(EditError::Overlapping {
                    start: op.start,
                    prev_end,
                });
            }
            prev_end = op.end;
        }

        let mut rope = base.rope.clone();
        for op in self.ops.iter().rev() {
            if op.start < op.end {
                rope.remove(op.start..op.end);
            }
            if !op.text.is_empty() {
                rope.insert(op.start, &op.text);
            }
        }
        let changes = self
            .ops
            .iter()
            .map(|op| Change {
                start: op.start,
                old_len: op.end - op.start,
                new_len: op.text.chars().count(),
            })
            .collect();
        Ok((
            rope,
            Translation {
                from_version: base.version(),
                to_version: base.version() + 1,
                changes,
            },
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Change {
    start: usize,
    old_len: usize,
    new_len: usize,
}

/// Mapping from offsets of one snapshot to offsets of its successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    from_version: u64,
    to_version: u64,
    changes: SmallVec<[Change; 4]>,
}

impl Translation {
    /// Translation of an empty batch: nothing moves and the version stays.
    pub(crate) fn identity(version: u64) -> Self {
        Self {
            from_version: version,
            to_version: version,
            changes: SmallVec::new(),
        }
    }

    pub fn from_version(&self) -> u64 {
        self.from_version
    }

    pub fn to_version(&self) -> u64 {
        self.to_version
    }

    /// Number of individual changes in the batch.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Map an old offset to the new snapshot.
    ///
    /// Offsets inside a replaced range collapse to the start of the replacement
    /// (`Negative`) or to its end (`Positive`).
    pub fn map_offset(&self, offset: usize, tracking: Tracking) -> usize {
        let mut delta: isize = 0;
        for change in &self.changes {
            let old_end = change.start + change.old_len;
            if offset < change.start
                || (offset == change.start && change.old_len == 0 && tracking == Tracking::Negative)
            {
                break;
            }
            if offset >= old_end {
                delta += change.new_len as isize - change.old_len as isize;
                continue;
            }
            let base = (change.start as isize + delta) as usize;
            return match tracking {
                Tracking::Positive => base + change.new_len,
                Tracking::Negative => base,
            };
        }
        (offset as isize + delta) as usize
    }

    pub fn map_point(&self, point: Point, tracking: Tracking) -> Point {
        debug_assert_eq!(point.version, self.from_version, "point from a stale snapshot");
        Point::new(self.map_offset(point.offset, tracking), self.to_version)
    }
}
