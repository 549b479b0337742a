//! Rope-based snapshot buffer.
//!
//! A [`TextBuffer`] owns the current [`Snapshot`] of one document. Snapshots are immutable
//! and cheap to clone (the rope shares its nodes); every successful edit produces a new
//! snapshot with a higher version plus a [`Translation`] from old offsets to new ones.
//!
//! All offsets are char offsets into the rope. Line breaks are `\n`; a snapshot holding N
//! breaks has N + 1 lines and the last one may be empty.

use ropey::Rope;

pub mod edit;
pub mod motion;
pub mod point;
pub mod word;

pub use edit::{EditError, TextEdit, Tracking, Translation};
pub use motion::{Motion, MotionOptions, MotionOutcome, move_point};
pub use point::{MotionKind, OperationKind, Point, Span, TaggedSpan, VirtualPoint};
pub use word::{CharClass, WordKind};

/// Identity of a buffer, stable across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

/// Immutable, versioned view of buffer content.
#[derive(Clone)]
pub struct Snapshot {
    rope: Rope,
    version: u64,
    buffer: BufferId,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("buffer", &self.buffer)
            .field("version", &self.version)
            .field("len", &self.rope.len_chars())
            .finish()
    }
}

impl Snapshot {
    pub fn new(buffer: BufferId, text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: 0,
            buffer,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn buffer_id(&self) -> BufferId {
        self.buffer
    }

    /// Total length in chars.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Line containing `offset` (clamped to the snapshot length).
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.len()))
    }

    /// First offset of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.last_line()))
    }

    /// Offset one past the line's last content char, before any line break.
    pub fn line_end(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        let end = self.line_end_including_break(line);
        if line == self.last_line() {
            return end;
        }
        let mut content_end = end.saturating_sub(1);
        if content_end > self.line_start(line) && self.rope.char(content_end - 1) == '\r' {
            content_end -= 1;
        }
        content_end
    }

    /// Offset of the next line's start, or the snapshot end on the last line.
    pub fn line_end_including_break(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        if line + 1 < self.line_count() {
            self.rope.line_to_char(line + 1)
        } else {
            self.len()
        }
    }

    /// Length of the line content in chars, excluding the break.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_end(line) - self.line_start(line)
    }

    /// Offset of the last content char of a line; the line start for an empty line.
    pub fn last_char_offset(&self, line: usize) -> usize {
        let start = self.line_start(line);
        self.line_end(line).saturating_sub(1).max(start)
    }

    /// Offset of the first non-blank char of a line; the last char when the line is blank.
    pub fn first_non_blank(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let end = self.line_end(line);
        (start..end)
            .find(|&offset| !matches!(self.rope.char(offset), ' ' | '\t'))
            .unwrap_or_else(|| self.last_char_offset(line))
    }

    /// Line content without its break.
    pub fn line_text(&self, line: usize) -> String {
        self.slice(self.line_start(line), self.line_end(line))
    }

    /// Char at `offset`, `None` at or past the end.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.len()).then(|| self.rope.char(offset))
    }

    /// Text in `[start, end)` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn text_of(&self, span: &Span) -> String {
        debug_assert_eq!(span.start.version, self.version);
        self.slice(span.start.offset, span.end.offset)
    }

    /// All lines without their breaks.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|l| self.line_text(l)).collect()
    }

    /// Point at `offset` in this snapshot (clamped to the length).
    pub fn point(&self, offset: usize) -> Point {
        Point::new(offset.min(self.len()), self.version)
    }

    /// Point at `(line, column)`; the column is clamped to the line end.
    pub fn point_at(&self, line: usize, column: usize) -> Point {
        let start = self.line_start(line);
        self.point((start + column).min(self.line_end(line)))
    }

    /// `(line, column)` of an offset.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of_offset(offset);
        (line, offset.min(self.len()) - self.line_start(line))
    }

    /// Clamp an offset onto a char a Normal-mode caret may rest on.
    pub fn clamp_caret(&self, offset: usize) -> usize {
        let line = self.line_of_offset(offset);
        offset.min(self.last_char_offset(line))
    }

    fn successor(&self, rope: Rope) -> Self {
        Self {
            rope,
            version: self.version + 1,
            buffer: self.buffer,
        }
    }
}

/// Owner of the current snapshot of one document.
#[derive(Debug)]
pub struct TextBuffer {
    snapshot: Snapshot,
    read_only: bool,
}

impl TextBuffer {
    pub fn new(id: BufferId, text: &str) -> Self {
        Self {
            snapshot: Snapshot::new(id, text),
            read_only: false,
        }
    }

    pub fn id(&self) -> BufferId {
        self.snapshot.buffer
    }

    /// The current snapshot. Cloning it is cheap and it never changes afterwards.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Apply a batch edit as one version step. On error the buffer is untouched; an empty
    /// batch keeps the current version.
    pub fn apply(&mut self, edit: TextEdit) -> Result<Translation, EditError> {
        if self.read_only {
            tracing::debug!(target: "text.edit", buffer = self.id().0, "edit_rejected_read_only");
            return Err(EditError::ReadOnly);
        }
        if edit.is_empty() {
            edit.check_base(&self.snapshot)?;
            return Ok(Translation::identity(self.snapshot.version));
        }
        let (rope, translation) = edit.apply_to(&self.snapshot)?;
        self.snapshot = self.snapshot.successor(rope);
        tracing::trace!(
            target: "text.edit",
            buffer = self.id().0,
            version = self.snapshot.version,
            changes = translation.len(),
            "edit_applied"
        );
        Ok(translation)
    }
}
