//! Multi-selection coordinator.
//!
//! The host owns the primary selection; the coordinator owns the secondary ones and keeps
//! them in document order. Every multi-caret edit is one batch [`TextEdit`] built from all
//! selections of the same snapshot, so the buffer either takes every caret's change or none.
//! After the edit each selection is re-resolved through the translation.

use core_config::SelectionInclusivity;
use core_state::SelectedSpan;
use core_text::{
    Motion, MotionOptions, Point, Snapshot, TextBuffer, TextEdit, Tracking, Translation, VirtualPoint,
    move_point,
};
use tracing::{debug, warn};

use crate::VerticalDirection;
use crate::error::CommandResult;
use crate::host::Host;

#[derive(Debug, Default, Clone)]
pub struct SelectionCoordinator {
    secondaries: Vec<SelectedSpan>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_secondaries(&self) -> bool {
        !self.secondaries.is_empty()
    }

    pub fn secondaries(&self) -> &[SelectedSpan] {
        &self.secondaries
    }

    /// Primary first, then the secondaries in document order. The primary keeps the front
    /// slot even when a secondary precedes it in the buffer (after adding a caret above),
    /// so callers that need pure document order sort by [`SelectedSpan::start`].
    pub fn selections(&self, host: &dyn Host) -> Vec<SelectedSpan> {
        let mut all = Vec::with_capacity(self.secondaries.len() + 1);
        all.push(host.primary_selection());
        all.extend_from_slice(&self.secondaries);
        all
    }

    /// Replace every selection. The first span becomes the primary; the rest are dropped
    /// with a warning when the host cannot show multiple selections. Duplicate carets and
    /// selections overlapping an earlier one are merged away.
    pub fn set_selections(&mut self, host: &mut dyn Host, spans: Vec<SelectedSpan>) {
        let mut spans = spans.into_iter();
        let Some(primary) = spans.next() else {
            return;
        };
        let mut rest: Vec<SelectedSpan> = spans.collect();
        if !rest.is_empty() && !host.supports_multiple_selections() {
            warn!(target: "actions.multisel", dropped = rest.len(), "multiple_selections_unsupported");
            rest.clear();
        }
        let mut kept: Vec<SelectedSpan> = Vec::with_capacity(rest.len());
        for span in rest {
            if overlaps(&primary, &span) || kept.iter().any(|k| overlaps(k, &span)) {
                continue;
            }
            kept.push(span);
        }
        kept.sort_by_key(|s| (s.start(), s.end()));
        host.set_primary_selection(primary);
        let changed = kept != self.secondaries;
        self.secondaries = kept;
        if changed {
            host.secondary_selections_changed(&self.secondaries);
        }
    }

    pub fn clear_secondary(&mut self, host: &mut dyn Host) {
        if self.secondaries.is_empty() {
            return;
        }
        self.secondaries.clear();
        host.secondary_selections_changed(&self.secondaries);
        debug!(target: "actions.multisel", "secondary_cleared");
    }

    /// Add a caret one line above the topmost or below the bottommost caret, at the same
    /// column. Returns false when there is no such line or the host lacks support.
    pub fn add_caret(
        &mut self,
        host: &mut dyn Host,
        snapshot: &Snapshot,
        direction: VerticalDirection,
        options: MotionOptions,
    ) -> bool {
        if !host.supports_multiple_selections() {
            warn!(target: "actions.multisel", "multiple_selections_unsupported");
            return false;
        }
        let all = self.selections(host);
        let edge = match direction {
            VerticalDirection::Up => all.iter().min_by_key(|s| s.caret_offset()),
            VerticalDirection::Down => all.iter().max_by_key(|s| s.caret_offset()),
        };
        let Some(edge) = edge else {
            return false;
        };
        let motion = match direction {
            VerticalDirection::Up => Motion::Up,
            VerticalDirection::Down => Motion::Down,
        };
        let outcome = move_point(snapshot, snapshot.point(edge.caret_offset()), motion, 1, options);
        if outcome.steps == 0 || all.iter().any(|s| s.caret_offset() == outcome.point.offset) {
            return false;
        }
        let mut spans = all;
        spans.push(SelectedSpan::caret(outcome.point));
        self.set_selections(host, spans);
        debug!(target: "actions.multisel", offset = outcome.point.offset, carets = self.secondaries.len() + 1, "caret_added");
        true
    }

    /// Re-resolve the secondaries after an edit the coordinator did not perform.
    pub fn map_through(&mut self, translation: &Translation, snapshot: &Snapshot, host: &mut dyn Host) {
        if self.secondaries.is_empty() {
            return;
        }
        for span in &mut self.secondaries {
            *span = span.translate(translation, snapshot);
        }
        host.secondary_selections_changed(&self.secondaries);
    }

    /// Collapse every selection onto its caret.
    pub fn collapse_all(&mut self, host: &mut dyn Host) {
        let spans = self.selections(host).iter().map(SelectedSpan::collapse).collect();
        self.set_selections(host, spans);
    }

    /// Move every caret by `motion`, dropping any selection.
    pub fn move_all(
        &mut self,
        host: &mut dyn Host,
        snapshot: &Snapshot,
        motion: Motion,
        count: usize,
        options: MotionOptions,
    ) {
        let spans = self
            .selections(host)
            .iter()
            .map(|s| {
                let outcome = move_point(snapshot, snapshot.point(s.caret_offset()), motion, count, options);
                SelectedSpan::caret(outcome.point)
            })
            .collect();
        self.set_selections(host, spans);
    }

    /// Move every caret by `motion` while each anchor stays put.
    pub fn extend_all(
        &mut self,
        host: &mut dyn Host,
        snapshot: &Snapshot,
        motion: Motion,
        count: usize,
        options: MotionOptions,
    ) {
        let spans = self
            .selections(host)
            .iter()
            .map(|s| {
                let outcome = move_point(snapshot, snapshot.point(s.caret_offset()), motion, count, options);
                SelectedSpan::new(s.anchor, VirtualPoint::from(outcome.point))
            })
            .collect();
        self.set_selections(host, spans);
    }

    /// Insert-mode typing: `text` goes in at every caret, replacing any selected text.
    pub fn insert_text(
        &mut self,
        buffer: &mut TextBuffer,
        host: &mut dyn Host,
        text: &str,
    ) -> CommandResult<Translation> {
        self.edit_each(buffer, host, false, |_, span| Some((span.start(), span.end(), text.to_string())))
    }

    /// Select-mode typing: `text` replaces the target range of every selection.
    pub fn replace_selections(
        &mut self,
        buffer: &mut TextBuffer,
        host: &mut dyn Host,
        text: &str,
        inclusivity: SelectionInclusivity,
    ) -> CommandResult<Translation> {
        self.edit_each(buffer, host, false, |snapshot, span| {
            let (start, end) = selection_range(snapshot, span, inclusivity);
            Some((start, end, text.to_string()))
        })
    }

    /// Insert-mode `<BS>`: delete every selection, or the char before each bare caret.
    pub fn backspace(&mut self, buffer: &mut TextBuffer, host: &mut dyn Host) -> CommandResult<Translation> {
        self.edit_each(buffer, host, false, |_, span| {
            if span.is_empty() {
                let caret = span.caret_offset();
                return (caret > 0).then(|| (caret - 1, caret, String::new()));
            }
            Some((span.start(), span.end(), String::new()))
        })
    }

    /// Select-mode `<BS>`: delete the target range of every selection.
    pub fn delete_selections(
        &mut self,
        buffer: &mut TextBuffer,
        host: &mut dyn Host,
        inclusivity: SelectionInclusivity,
    ) -> CommandResult<Translation> {
        self.edit_each(buffer, host, false, |snapshot, span| {
            let (start, end) = selection_range(snapshot, span, inclusivity);
            (start < end).then(|| (start, end, String::new()))
        })
    }

    /// `o` / `O` at every caret: open an empty line below (or above) and put the caret on it.
    pub fn open_lines(&mut self, buffer: &mut TextBuffer, host: &mut dyn Host, below: bool) -> CommandResult<Translation> {
        self.edit_each(buffer, host, !below, |snapshot, span| {
            let line = snapshot.line_of_offset(span.caret_offset());
            let at = if below {
                snapshot.line_end(line)
            } else {
                snapshot.line_start(line)
            };
            Some((at, at, "\n".to_string()))
        })
    }

    /// Build one replacement per selection, apply them as a single batch and leave a bare
    /// caret after each replacement (or at its start). Inclusive selections can widen into a
    /// neighbour; overlapping ranges are merged into one replacement whose carets coincide.
    /// Nothing changes when the buffer rejects the batch.
    fn edit_each(
        &mut self,
        buffer: &mut TextBuffer,
        host: &mut dyn Host,
        caret_at_start: bool,
        mut build: impl FnMut(&Snapshot, &SelectedSpan) -> Option<(usize, usize, String)>,
    ) -> CommandResult<Translation> {
        let spans = self.selections(host);
        let snapshot = buffer.snapshot().clone();
        let mut built: Vec<(usize, usize, usize, String)> = spans
            .iter()
            .enumerate()
            .filter_map(|(index, span)| build(&snapshot, span).map(|(start, end, text)| (index, start, end, text)))
            .collect();
        built.sort_by_key(|&(_, start, end, _)| (start, end));

        let mut merged: Vec<(usize, usize, String)> = Vec::with_capacity(built.len());
        let mut groups: Vec<Option<usize>> = vec![None; spans.len()];
        for (index, start, end, text) in built {
            match merged.last_mut() {
                Some(last) if start < last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end, text)),
            }
            groups[index] = Some(merged.len() - 1);
        }

        let mut edit = TextEdit::new(&snapshot);
        for (start, end, text) in &merged {
            edit.replace(*start, *end, text);
        }
        let translation = buffer.apply(edit)?;
        let snapshot = buffer.snapshot();
        let carets = spans
            .iter()
            .zip(groups)
            .map(|(span, group)| {
                let offset = match group.map(|g| &merged[g]) {
                    Some((start, _, _)) if caret_at_start => translation.map_offset(*start, Tracking::Negative),
                    Some((_, end, _)) => translation.map_offset(*end, Tracking::Positive),
                    None => translation.map_offset(span.caret_offset(), Tracking::Positive),
                };
                SelectedSpan::caret(Point::new(offset, snapshot.version()))
            })
            .collect();
        self.set_selections(host, carets);
        debug!(target: "actions.multisel", carets = spans.len(), changes = merged.len(), version = snapshot.version(), "batch_edit");
        Ok(translation)
    }
}

/// Range a Select-mode selection covers. Inclusive selections also own the char at their
/// far end, so even an empty one covers the char under the caret.
pub fn selection_range(
    snapshot: &Snapshot,
    span: &SelectedSpan,
    inclusivity: SelectionInclusivity,
) -> (usize, usize) {
    let (start, end) = (span.start(), span.end());
    if inclusivity == SelectionInclusivity::Exclusive {
        return (start, end);
    }
    let line_end = snapshot.line_end(snapshot.line_of_offset(end));
    (start, (end + 1).min(line_end).max(end))
}

fn overlaps(a: &SelectedSpan, b: &SelectedSpan) -> bool {
    if a.caret_offset() == b.caret_offset() {
        return true;
    }
    a.start() < b.end() && b.start() < a.end()
}
