//! Operator engine.
//!
//! [`CommonOperations`] bundles the primary caret's commands: joins, yanks, deletes, puts,
//! shifts, case changes, caret moves, scrolling, marks and jumps. Each command reads the
//! current snapshot, issues at most one batch edit and then re-resolves every tracked
//! position (marks, jump entries, primary and secondary carets) through the resulting
//! translation.

use core_state::{JumpEntry, JumpList, RegisterName, RegisterValue, SelectedSpan};
use core_text::{
    EditError, Motion, MotionOptions, MotionOutcome, OperationKind, Point, Snapshot, Span, TaggedSpan,
    TextBuffer, TextEdit, Tracking, Translation, move_point, word,
};
use tracing::{debug, warn};

use crate::error::{CommandError, CommandResult};
use crate::host::{Host, ScrollDirection};
use crate::multi_selection::SelectionCoordinator;
use crate::span_resolver::resolve_lines;
use crate::{OperatorKind, VimData};

/// How `J` treats whitespace around the joined break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    /// `J`: drop the next line's indentation and separate with one space.
    #[default]
    RemoveEmptySpaces,
    /// `gJ`: remove only the line break.
    KeepEmptySpaces,
}

pub struct CommonOperations<'a> {
    buffer: &'a mut TextBuffer,
    host: &'a mut dyn Host,
    data: &'a mut VimData,
    jumps: &'a mut JumpList,
    selections: &'a mut SelectionCoordinator,
}

impl<'a> CommonOperations<'a> {
    pub fn new(
        buffer: &'a mut TextBuffer,
        host: &'a mut dyn Host,
        data: &'a mut VimData,
        jumps: &'a mut JumpList,
        selections: &'a mut SelectionCoordinator,
    ) -> Self {
        Self {
            buffer,
            host,
            data,
            jumps,
            selections,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.buffer.snapshot()
    }

    /// Primary caret resolved against the current snapshot.
    pub fn caret(&self) -> Point {
        self.snapshot().point(self.host.primary_selection().caret_offset())
    }

    pub fn set_caret(&mut self, offset: usize) {
        let point = self.snapshot().point(offset);
        self.host.set_primary_selection(SelectedSpan::caret(point));
    }

    fn set_normal_caret(&mut self, offset: usize) {
        let offset = self.snapshot().clamp_caret(offset);
        self.set_caret(offset);
    }

    /// Apply `edit` and re-resolve every tracked position.
    fn commit(&mut self, edit: TextEdit) -> CommandResult<Translation> {
        let translation = self.buffer.apply(edit)?;
        let id = self.buffer.id();
        self.data.marks.map_through(id, &translation);
        self.jumps.map_through(id, &translation);
        let snapshot = self.buffer.snapshot();
        let primary = self.host.primary_selection().translate(&translation, snapshot);
        self.host.set_primary_selection(primary);
        self.selections.map_through(&translation, snapshot, &mut *self.host);
        Ok(translation)
    }

    /// Lines `[first, last]` covered by `count` lines from the caret, clamped to the buffer.
    fn caret_lines(&self, count: usize) -> (usize, usize) {
        let snapshot = self.snapshot();
        let first = snapshot.line_of_offset(self.caret().offset);
        let last = (first + count.max(1) - 1).min(snapshot.last_line());
        (first, last)
    }

    /// Join `count` lines (at least two) starting at the caret's line.
    pub fn join(&mut self, count: usize, kind: JoinKind) -> CommandResult {
        let snapshot = self.snapshot().clone();
        let first = snapshot.line_of_offset(self.caret().offset);
        let last = (first + count.max(2) - 1).min(snapshot.last_line());
        if first == last {
            return Ok(());
        }
        let mut edit = TextEdit::new(&snapshot);
        let mut last_content = snapshot.line_text(first).chars().last();
        let mut caret = 0;
        for line in first + 1..=last {
            let break_start = snapshot.line_end(line - 1);
            let start = snapshot.line_start(line);
            match kind {
                JoinKind::KeepEmptySpaces => {
                    edit.delete(break_start, start);
                    caret = start;
                }
                JoinKind::RemoveEmptySpaces => {
                    let content = snapshot.line_text(line);
                    let trimmed = content.trim_start_matches([' ', '\t']);
                    let indent = content.chars().count() - trimmed.chars().count();
                    let separator = match last_content {
                        Some(c) if !c.is_whitespace() && !trimmed.is_empty() => " ",
                        _ => "",
                    };
                    edit.replace(break_start, start + indent, separator);
                    caret = start + indent;
                    if let Some(c) = trimmed.chars().last() {
                        last_content = Some(c);
                    }
                }
            }
        }
        let translation = self.commit(edit)?;
        // The join point is the start of the last joined line's remaining text.
        let caret = translation.map_offset(caret, Tracking::Positive);
        self.set_normal_caret(caret);
        debug!(target: "actions.ops", first, last, ?kind, "join");
        Ok(())
    }

    /// Text and kind a yank or delete of `tagged` stores, plus the range it removes.
    fn capture(&self, tagged: &TaggedSpan) -> (usize, usize, RegisterValue) {
        let snapshot = self.snapshot();
        let span = tagged.operator_span(snapshot);
        let (mut start, end) = (span.start.offset, span.end.offset);
        let mut text = snapshot.slice(start, end);
        if tagged.operation_kind == OperationKind::LineWise && !text.ends_with('\n') {
            // The last line has no break of its own: store one, and take the preceding
            // break out of the buffer instead.
            text.push('\n');
            let line = snapshot.line_of_offset(start);
            if line > 0 {
                start = snapshot.line_end(line - 1);
            }
        }
        (start, end, RegisterValue::new(text, tagged.operation_kind))
    }

    pub fn yank(&mut self, tagged: TaggedSpan, register: Option<RegisterName>) -> CommandResult {
        let (_, _, value) = self.capture(&tagged);
        debug!(target: "actions.ops", kind = ?value.kind, len = value.text.len(), "yank");
        self.data.registers.record_yank(register, value);
        let caret = self.caret().offset;
        if tagged.operation_kind == OperationKind::CharacterWise && tagged.span.start.offset < caret {
            self.set_normal_caret(tagged.span.start.offset);
        }
        Ok(())
    }

    /// Delete the operator range of `tagged`, storing the text in `register`.
    pub fn delete_span(&mut self, tagged: TaggedSpan, register: Option<RegisterName>) -> CommandResult {
        let (start, end, value) = self.capture(&tagged);
        let kind = value.kind;
        self.delete_range(start, end, value, register)?;
        if kind == OperationKind::LineWise {
            let snapshot = self.snapshot();
            let line = snapshot.line_of_offset(start);
            let caret = snapshot.first_non_blank(line);
            self.set_normal_caret(caret);
        }
        Ok(())
    }

    fn delete_range(
        &mut self,
        start: usize,
        end: usize,
        value: RegisterValue,
        register: Option<RegisterName>,
    ) -> CommandResult {
        if start == end && value.text.is_empty() {
            return Ok(());
        }
        let mut edit = TextEdit::new(self.snapshot());
        edit.delete(start, end);
        // Reject first so a read-only buffer leaves the registers alone.
        if self.buffer.is_read_only() {
            return Err(CommandError::Edit(EditError::ReadOnly));
        }
        debug!(target: "actions.ops", start, end, kind = ?value.kind, "delete");
        self.data.registers.record_delete(register, value);
        if start < end {
            self.commit(edit)?;
        }
        self.set_normal_caret(start);
        Ok(())
    }

    /// Empty `count` lines from the caret's line, keeping one empty line (`cc` without
    /// insert). Stores the removed content line-wise.
    pub fn delete_lines(&mut self, count: usize, register: Option<RegisterName>) -> CommandResult {
        let (first, last) = self.caret_lines(count);
        let snapshot = self.snapshot();
        let (start, end) = (snapshot.line_start(first), snapshot.line_end(last));
        let value = RegisterValue::line_wise(snapshot.slice(start, end));
        self.delete_range(start, end, value, register)
    }

    /// Delete from the caret through the end of the `count`th line, keeping its break (`D`).
    pub fn delete_lines_from_cursor(&mut self, count: usize, register: Option<RegisterName>) -> CommandResult {
        let (_, last) = self.caret_lines(count);
        let start = self.caret().offset;
        let snapshot = self.snapshot();
        let end = snapshot.line_end(last).max(start);
        let value = RegisterValue::character_wise(snapshot.slice(start, end));
        self.delete_range(start, end, value, register)
    }

    /// Delete `count` whole lines with their breaks (`dd`).
    pub fn delete_lines_including_line_break(
        &mut self,
        count: usize,
        register: Option<RegisterName>,
    ) -> CommandResult {
        let tagged = resolve_lines(self.snapshot(), self.caret(), count);
        self.delete_span(tagged, register)
    }

    /// Delete from the caret through the break ending the `count`th line.
    pub fn delete_lines_including_line_break_from_cursor(
        &mut self,
        count: usize,
        register: Option<RegisterName>,
    ) -> CommandResult {
        let (_, last) = self.caret_lines(count);
        let start = self.caret().offset;
        let snapshot = self.snapshot();
        let end = snapshot.line_end_including_break(last).max(start);
        let value = RegisterValue::character_wise(snapshot.slice(start, end));
        self.delete_range(start, end, value, register)
    }

    /// Insert `text` after `point` and return the span it occupies.
    ///
    /// Character-wise text goes after the char at `point` (at `point` on an empty line or at
    /// the line end). Line-wise text goes below the point's line; a missing trailing break is
    /// added. On the last line the break moves in front of the text, and the returned span
    /// covers the text without it.
    pub fn paste_after(&mut self, point: Point, text: &str, kind: OperationKind) -> CommandResult<Span> {
        let snapshot = self.snapshot();
        let line = snapshot.line_of_offset(point.offset);
        let (at, inserted, span_start, span_len) = match kind {
            OperationKind::CharacterWise => {
                let at = if point.offset >= snapshot.line_end(line) {
                    point.offset
                } else {
                    point.offset + 1
                };
                (at, text.to_string(), at, text.chars().count())
            }
            OperationKind::LineWise => {
                let content = text.strip_suffix('\n').unwrap_or(text);
                if line < snapshot.last_line() {
                    let at = snapshot.line_start(line + 1);
                    (at, format!("{content}\n"), at, content.chars().count() + 1)
                } else {
                    let at = snapshot.len();
                    (at, format!("\n{content}"), at + 1, content.chars().count())
                }
            }
        };
        self.insert_at(at, &inserted, span_start, span_len)
    }

    /// Insert `text` before `point` (line-wise: above its line).
    pub fn paste_before(&mut self, point: Point, text: &str, kind: OperationKind) -> CommandResult<Span> {
        let snapshot = self.snapshot();
        match kind {
            OperationKind::CharacterWise => {
                let at = point.offset.min(snapshot.len());
                self.insert_at(at, text, at, text.chars().count())
            }
            OperationKind::LineWise => {
                let at = snapshot.line_start(snapshot.line_of_offset(point.offset));
                let content = text.strip_suffix('\n').unwrap_or(text);
                self.insert_at(at, &format!("{content}\n"), at, content.chars().count() + 1)
            }
        }
    }

    fn insert_at(&mut self, at: usize, text: &str, span_start: usize, span_len: usize) -> CommandResult<Span> {
        let mut edit = TextEdit::new(self.snapshot());
        edit.insert(at, text);
        self.commit(edit)?;
        debug!(target: "actions.ops", at, len = span_len, "paste");
        Ok(Span::from_offsets(self.snapshot(), span_start, span_start + span_len))
    }

    /// `p`: put `count` copies of `register` after the caret.
    pub fn put_after(&mut self, register: Option<RegisterName>, count: usize) -> CommandResult {
        self.put(register, count, false)
    }

    /// `P`
    pub fn put_before(&mut self, register: Option<RegisterName>, count: usize) -> CommandResult {
        self.put(register, count, true)
    }

    fn put(&mut self, register: Option<RegisterName>, count: usize, before: bool) -> CommandResult {
        let name = register.unwrap_or(RegisterName::Unnamed);
        let Some(value) = self.data.registers.get(name).cloned() else {
            debug!(target: "actions.ops", register = %name.as_char(), "put_from_empty_register");
            return Ok(());
        };
        let text = match value.kind {
            OperationKind::CharacterWise => value.text.repeat(count.max(1)),
            OperationKind::LineWise => {
                let content = value.text.strip_suffix('\n').unwrap_or(&value.text);
                format!("{content}\n").repeat(count.max(1))
            }
        };
        let caret = self.caret();
        let span = if before {
            self.paste_before(caret, &text, value.kind)?
        } else {
            self.paste_after(caret, &text, value.kind)?
        };
        let snapshot = self.snapshot();
        let caret = match value.kind {
            OperationKind::LineWise => snapshot.first_non_blank(snapshot.line_of_offset(span.start.offset)),
            OperationKind::CharacterWise => span.end.offset.saturating_sub(1).max(span.start.offset),
        };
        self.set_normal_caret(caret);
        Ok(())
    }

    /// Lines touched by `span`; an exclusive end at a line start does not count.
    fn span_lines(snapshot: &Snapshot, span: Span) -> (usize, usize) {
        let first = snapshot.line_of_offset(span.start.offset);
        let last = snapshot.line_of_offset(span.end.offset.saturating_sub(1).max(span.start.offset));
        (first, last)
    }

    pub fn shift_span_right(&mut self, span: Span) -> CommandResult {
        let (first, last) = Self::span_lines(self.snapshot(), span);
        self.shift(first, last, true)
    }

    pub fn shift_span_left(&mut self, span: Span) -> CommandResult {
        let (first, last) = Self::span_lines(self.snapshot(), span);
        self.shift(first, last, false)
    }

    /// `>>`
    pub fn shift_lines_right(&mut self, count: usize) -> CommandResult {
        let (first, last) = self.caret_lines(count);
        self.shift(first, last, true)
    }

    /// `<<`
    pub fn shift_lines_left(&mut self, count: usize) -> CommandResult {
        let (first, last) = self.caret_lines(count);
        self.shift(first, last, false)
    }

    /// Right shifts skip empty lines; left shifts skip blank lines and remove at most
    /// `shift_width` leading whitespace chars.
    fn shift(&mut self, first: usize, last: usize, right: bool) -> CommandResult {
        let snapshot = self.snapshot().clone();
        let width = self.data.settings.shift_width;
        let mut edit = TextEdit::new(&snapshot);
        for line in first..=last {
            let start = snapshot.line_start(line);
            let content = snapshot.line_text(line);
            if right {
                if !content.is_empty() {
                    edit.insert(start, &" ".repeat(width));
                }
                continue;
            }
            let indent = content.chars().take_while(|c| matches!(c, ' ' | '\t')).count();
            if indent == content.chars().count() {
                continue;
            }
            let remove = indent.min(width);
            if remove > 0 {
                edit.delete(start, start + remove);
            }
        }
        if !edit.is_empty() {
            self.commit(edit)?;
        }
        debug!(target: "actions.ops", first, last, right, width, "shift");
        let caret = self.snapshot().first_non_blank(first);
        self.set_normal_caret(caret);
        Ok(())
    }

    /// `g~`: swap the case of every letter in `span`.
    pub fn change_letter_case(&mut self, span: Span) -> CommandResult {
        self.map_case(span, toggle_case)
    }

    pub fn make_lowercase(&mut self, span: Span) -> CommandResult {
        self.map_case(span, |c| c.to_lowercase().collect())
    }

    pub fn make_uppercase(&mut self, span: Span) -> CommandResult {
        self.map_case(span, |c| c.to_uppercase().collect())
    }

    fn map_case(&mut self, span: Span, f: impl Fn(char) -> String) -> CommandResult {
        let snapshot = self.snapshot();
        let (start, end) = (span.start.offset, span.end.offset);
        let original = snapshot.slice(start, end);
        let changed: String = original.chars().map(f).collect();
        if changed == original {
            return Ok(());
        }
        let caret = self.caret().offset;
        let mut edit = TextEdit::new(snapshot);
        edit.replace(start, end, &changed);
        self.commit(edit)?;
        // Replacing the range would drag a caret inside it to the end.
        self.set_normal_caret(caret);
        Ok(())
    }

    /// `~`: swap the case of `count` chars from the caret and step past them.
    pub fn toggle_case_chars(&mut self, count: usize) -> CommandResult {
        let snapshot = self.snapshot();
        let caret = self.caret().offset;
        let line = snapshot.line_of_offset(caret);
        let end = (caret + count.max(1)).min(snapshot.line_end(line));
        if end <= caret {
            return Ok(());
        }
        let span = Span::from_offsets(snapshot, caret, end);
        self.change_letter_case(span)?;
        self.set_normal_caret(end);
        Ok(())
    }

    /// Run `op` over the operator range of `tagged`.
    pub fn apply_operator(
        &mut self,
        op: OperatorKind,
        tagged: TaggedSpan,
        register: Option<RegisterName>,
    ) -> CommandResult {
        let span = tagged.operator_span(self.snapshot());
        match op {
            OperatorKind::Delete => return self.delete_span(tagged, register),
            OperatorKind::Yank => return self.yank(tagged, register),
            OperatorKind::ShiftLeft => return self.shift_span_left(span),
            OperatorKind::ShiftRight => return self.shift_span_right(span),
            OperatorKind::ToggleCase => self.change_letter_case(span)?,
            OperatorKind::Lowercase => self.make_lowercase(span)?,
            OperatorKind::Uppercase => self.make_uppercase(span)?,
        }
        if tagged.operation_kind == OperationKind::CharacterWise {
            self.set_normal_caret(span.start.offset);
        }
        Ok(())
    }

    /// Run `op` over a block selection given as one `[start, end)` range per line.
    pub fn apply_block_operator(
        &mut self,
        op: OperatorKind,
        ranges: &[(usize, usize)],
        register: Option<RegisterName>,
    ) -> CommandResult {
        let Some(&(first_start, _)) = ranges.first() else {
            return Ok(());
        };
        let snapshot = self.snapshot().clone();
        let first_line = snapshot.line_of_offset(first_start);
        let last_line = ranges.last().map_or(first_line, |&(s, _)| snapshot.line_of_offset(s));
        let mut edit = TextEdit::new(&snapshot);
        match op {
            OperatorKind::ShiftLeft | OperatorKind::ShiftRight => {
                return self.shift(first_line, last_line, op == OperatorKind::ShiftRight);
            }
            OperatorKind::Yank | OperatorKind::Delete => {
                let text = ranges
                    .iter()
                    .map(|&(s, e)| snapshot.slice(s, e))
                    .collect::<Vec<_>>()
                    .join("\n");
                let value = RegisterValue::character_wise(text);
                if op == OperatorKind::Yank {
                    self.data.registers.record_yank(register, value);
                    self.set_normal_caret(first_start);
                    return Ok(());
                }
                if self.buffer.is_read_only() {
                    return Err(CommandError::Edit(EditError::ReadOnly));
                }
                self.data.registers.record_delete(register, value);
                for &(s, e) in ranges {
                    edit.delete(s, e);
                }
            }
            OperatorKind::ToggleCase | OperatorKind::Lowercase | OperatorKind::Uppercase => {
                for &(s, e) in ranges {
                    let original = snapshot.slice(s, e);
                    let changed: String = match op {
                        OperatorKind::ToggleCase => original.chars().map(toggle_case).collect(),
                        OperatorKind::Lowercase => original.to_lowercase(),
                        _ => original.to_uppercase(),
                    };
                    if changed != original {
                        edit.replace(s, e, &changed);
                    }
                }
            }
        }
        if !edit.is_empty() {
            self.commit(edit)?;
        }
        debug!(target: "actions.ops", ?op, lines = ranges.len(), "block_operator");
        self.set_normal_caret(first_start);
        Ok(())
    }

    /// Move the primary caret. Vertical motions notify the host once per line moved.
    pub fn move_caret(&mut self, motion: Motion, count: usize, options: MotionOptions) -> MotionOutcome {
        self.host.reset_selection();
        let outcome = move_point(self.snapshot(), self.caret(), motion, count, options);
        for _ in 0..outcome.steps {
            match motion {
                Motion::Up => self.host.move_line_up(),
                Motion::Down | Motion::DownToFirstNonWhitespace => self.host.move_line_down(),
                _ => break,
            }
        }
        self.set_caret(outcome.point.offset);
        outcome
    }

    /// `<C-d>` / `<C-u>`: scroll and move the caret `count` lines. A count of 0 uses the
    /// `scroll` setting.
    pub fn scroll_lines(&mut self, direction: ScrollDirection, count: usize) {
        let count = if count == 0 {
            self.data.settings.effective_scroll()
        } else {
            count
        };
        self.host.reset_selection();
        self.host.scroll_lines(direction, count);
        self.move_lines(direction, count);
    }

    /// `<C-f>` / `<C-b>`: ask the host for `count` page scrolls, then follow with the caret.
    pub fn scroll_pages(&mut self, direction: ScrollDirection, count: usize) {
        self.host.reset_selection();
        let mut pages = 0;
        for _ in 0..count.max(1) {
            let scrolled = match direction {
                ScrollDirection::Up => self.host.scroll_page_up(),
                ScrollDirection::Down => self.host.scroll_page_down(),
            };
            if !scrolled {
                break;
            }
            pages += 1;
        }
        self.move_lines(direction, pages * self.data.settings.window_lines);
    }

    fn move_lines(&mut self, direction: ScrollDirection, lines: usize) {
        if lines == 0 {
            return;
        }
        let snapshot = self.snapshot();
        let (line, column) = snapshot.line_column(self.caret().offset);
        let target = match direction {
            ScrollDirection::Up => line.saturating_sub(lines),
            ScrollDirection::Down => (line + lines).min(snapshot.last_line()),
        };
        let offset = snapshot.point_at(target, column).offset;
        self.set_normal_caret(offset);
    }

    /// `gd`. Needs a keyword under or after the caret on its line; records a jump on success.
    pub fn go_to_definition(&mut self) -> CommandResult {
        let caret = self.caret();
        let snapshot = self.snapshot();
        let word = word::keyword_at_or_after(snapshot, caret.offset).ok_or(CommandError::NoWordUnderCursor)?;
        let name = snapshot.text_of(&word);
        if !self.host.go_to_definition() {
            return Err(CommandError::DefinitionNotFound(name));
        }
        self.jumps.add(self.buffer.id(), caret);
        Ok(())
    }

    /// `m{name}` at the caret.
    pub fn set_mark(&mut self, name: char) -> CommandResult {
        let caret = self.caret();
        self.data.marks.set(self.buffer.id(), caret, name)?;
        Ok(())
    }

    /// `` `{name} `` (exact) or `'{name}` (first non-blank of the mark's line).
    pub fn jump_to_mark(&mut self, name: char, exact: bool) -> CommandResult {
        let id = self.buffer.id();
        let target = self.data.marks.get(id, name)?.ok_or(CommandError::MarkNotSet(name))?;
        let before = self.caret();
        if target.buffer != id {
            if !self.host.navigate_to(target.buffer, target.point) {
                warn!(target: "actions.ops", mark = %name, buffer = target.buffer.0, "mark_navigation_failed");
                return Err(CommandError::MarkNavigationFailed(name));
            }
            self.jumps.add(id, before);
            return Ok(());
        }
        let snapshot = self.snapshot();
        let offset = if exact {
            snapshot.clamp_caret(target.point.offset)
        } else {
            snapshot.first_non_blank(snapshot.line_of_offset(target.point.offset))
        };
        let fold = Span::from_offsets(snapshot, offset, offset);
        self.host.expand_folds(fold);
        self.jumps.add(id, before);
        self.set_normal_caret(offset);
        Ok(())
    }

    /// `<C-o>`
    pub fn jump_back(&mut self, count: usize) -> CommandResult {
        let current = JumpEntry {
            buffer: self.buffer.id(),
            point: self.caret(),
        };
        match self.jumps.move_older(count, current) {
            Some(entry) => self.go_to_entry(entry),
            None => Ok(()),
        }
    }

    /// `<C-i>`
    pub fn jump_forward(&mut self, count: usize) -> CommandResult {
        match self.jumps.move_newer(count) {
            Some(entry) => self.go_to_entry(entry),
            None => Ok(()),
        }
    }

    fn go_to_entry(&mut self, entry: JumpEntry) -> CommandResult {
        if entry.buffer == self.buffer.id() {
            let fold = Span::from_offsets(self.snapshot(), entry.point.offset, entry.point.offset);
            self.host.expand_folds(fold);
            self.set_normal_caret(entry.point.offset);
        } else if !self.host.navigate_to(entry.buffer, entry.point) {
            warn!(target: "actions.ops", buffer = entry.buffer.0, "jump_navigation_failed");
        }
        Ok(())
    }
}

fn toggle_case(c: char) -> String {
    if c.is_lowercase() {
        c.to_uppercase().collect()
    } else if c.is_uppercase() {
        c.to_lowercase().collect()
    } else {
        c.to_string()
    }
}
