//! Mark store.
//!
//! Lowercase marks are local to the buffer they were set in; uppercase marks are global and
//! remember their buffer. Stored positions are tracked: call [`MarkMap::map_through`] after
//! every edit of a buffer so its marks follow the text they were set on.

use std::collections::HashMap;

use core_text::{BufferId, Point, Tracking, Translation};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkError {
    #[error("invalid mark name '{0}'")]
    InvalidName(char),
}

/// Where a mark points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkTarget {
    pub buffer: BufferId,
    pub point: Point,
}

#[derive(Debug, Clone, Default)]
pub struct MarkMap {
    local: HashMap<BufferId, HashMap<char, Point>>,
    global: HashMap<char, MarkTarget>,
}

fn validate(name: char) -> Result<char, MarkError> {
    if name.is_ascii_alphabetic() {
        Ok(name)
    } else {
        Err(MarkError::InvalidName(name))
    }
}

impl MarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid_name(name: char) -> bool {
        validate(name).is_ok()
    }

    /// Store `point` under `name`. Invalid names are rejected before anything is stored.
    pub fn set(&mut self, buffer: BufferId, point: Point, name: char) -> Result<(), MarkError> {
        let name = validate(name)?;
        if name.is_ascii_uppercase() {
            self.global.insert(name, MarkTarget { buffer, point });
        } else {
            self.local.entry(buffer).or_default().insert(name, point);
        }
        tracing::debug!(target: "state.marks", mark = %name, buffer = buffer.0, offset = point.offset, "mark_set");
        Ok(())
    }

    /// Look up a mark as seen from `buffer`. `Ok(None)` means the name is valid but unset.
    pub fn get(&self, buffer: BufferId, name: char) -> Result<Option<MarkTarget>, MarkError> {
        let name = validate(name)?;
        if name.is_ascii_uppercase() {
            return Ok(self.global.get(&name).copied());
        }
        Ok(self
            .local
            .get(&buffer)
            .and_then(|marks| marks.get(&name))
            .map(|&point| MarkTarget { buffer, point }))
    }

    /// Re-resolve every mark of `buffer` against the snapshot produced by `translation`.
    pub fn map_through(&mut self, buffer: BufferId, translation: &Translation) {
        if let Some(marks) = self.local.get_mut(&buffer) {
            for point in marks.values_mut() {
                *point = translation.map_point(*point, Tracking::Positive);
            }
        }
        for target in self.global.values_mut().filter(|t| t.buffer == buffer) {
            target.point = translation.map_point(target.point, Tracking::Positive);
        }
    }
}
