//! Operators and the remaining primary-caret commands.
//!
//! None of these run with secondary carets present; they fail with
//! `UnsupportedInMultiSelection` and leave every caret where it was.

use core_config::SelectionInclusivity;
use core_state::{Mode, RegisterName, VisualKind};
use core_text::{Motion, MotionKind, OperationKind, Snapshot, Span, TaggedSpan};

use super::Ctx;
use super::motion::clamp_carets;
use crate::error::CommandResult;
use crate::operations::CommonOperations;
use crate::span_resolver::{resolve_lines, resolve_motion_span};
use crate::{Action, OperatorKind};

pub(super) fn handle_primary_command(ctx: &mut Ctx<'_>, action: Action) -> CommandResult {
    ctx.require_single_caret()?;
    if let Action::SelectionOperator { op, register } = action {
        return selection_operator(ctx, op, register);
    }
    let mut ops = ctx.ops();
    match action {
        Action::Operator {
            op,
            motion,
            count,
            register,
        } => match resolve_motion_span(ops.snapshot(), ops.caret(), motion, count) {
            Some(tagged) => ops.apply_operator(op, tagged, register),
            None => Ok(()),
        },
        Action::LinewiseOperator { op, count, register } => match op {
            OperatorKind::Delete => ops.delete_lines_including_line_break(count, register),
            OperatorKind::ShiftLeft => ops.shift_lines_left(count),
            OperatorKind::ShiftRight => ops.shift_lines_right(count),
            _ => {
                let tagged = resolve_lines(ops.snapshot(), ops.caret(), count);
                ops.apply_operator(op, tagged, register)
            }
        },
        Action::DeleteChar { count, register } => delete_by_motion(&mut ops, Motion::Right, count, register),
        Action::DeleteCharBefore { count, register } => delete_by_motion(&mut ops, Motion::Left, count, register),
        Action::DeleteToEnd { count, register } => ops.delete_lines_from_cursor(count, register),
        Action::Join { count, kind } => ops.join(count, kind),
        Action::Put {
            before,
            count,
            register,
        } => {
            if before {
                ops.put_before(register, count)
            } else {
                ops.put_after(register, count)
            }
        }
        Action::ToggleCaseChars { count } => ops.toggle_case_chars(count),
        Action::JumpToMark { name, exact } => ops.jump_to_mark(name, exact),
        Action::JumpOlder(count) => ops.jump_back(count),
        Action::JumpNewer(count) => ops.jump_forward(count),
        Action::ScrollLines { direction, count } => {
            ops.scroll_lines(direction, count);
            Ok(())
        }
        Action::ScrollPages { direction, count } => {
            ops.scroll_pages(direction, count);
            Ok(())
        }
        Action::GoToDefinition => ops.go_to_definition(),
        Action::SelectionOperator { .. }
        | Action::Motion { .. }
        | Action::SpecialMotion { .. }
        | Action::ShiftedMotion { .. }
        | Action::AddCaret(_)
        | Action::ModeChange(_)
        | Action::InsertText(_)
        | Action::InsertNewline
        | Action::Backspace
        | Action::SetMark(_) => Ok(()),
    }
}

fn delete_by_motion(
    ops: &mut CommonOperations<'_>,
    motion: Motion,
    count: usize,
    register: Option<RegisterName>,
) -> CommandResult {
    match resolve_motion_span(ops.snapshot(), ops.caret(), motion, count) {
        Some(tagged) => ops.delete_span(tagged, register),
        None => Ok(()),
    }
}

/// Apply `op` to the Visual selection, then return to Normal mode.
fn selection_operator(
    ctx: &mut Ctx<'_>,
    op: OperatorKind,
    register: Option<RegisterName>,
) -> CommandResult {
    let Mode::Visual(kind) = *ctx.mode else {
        return Ok(());
    };
    let selection = ctx.host.primary_selection();
    let inclusive = ctx.data.settings.selection == SelectionInclusivity::Inclusive;
    let snapshot = ctx.snapshot().clone();
    let span = Span::from_offsets(&snapshot, selection.start(), selection.end());
    {
        let mut ops = ctx.ops();
        match kind {
            VisualKind::Character => {
                let motion_kind = if inclusive {
                    MotionKind::Inclusive
                } else {
                    MotionKind::Exclusive
                };
                ops.apply_operator(op, TaggedSpan::new(span, motion_kind, OperationKind::CharacterWise), register)?;
            }
            VisualKind::Line => {
                ops.apply_operator(op, TaggedSpan::new(span, MotionKind::Inclusive, OperationKind::LineWise), register)?;
            }
            VisualKind::Block => {
                let ranges = block_ranges(&snapshot, selection.anchor.offset(), selection.active.offset(), inclusive);
                ops.apply_block_operator(op, &ranges, register)?;
            }
        }
    }
    // Yanks leave the selection in place; the caret returns to its start.
    if !ctx.host.primary_selection().is_empty() {
        ctx.ops().set_caret(span.start.offset);
    }
    ctx.selections.collapse_all(&mut *ctx.host);
    clamp_carets(ctx);
    ctx.set_mode(Mode::Normal);
    Ok(())
}

/// One `[start, end)` range per line of a block selection, clipped to each line's content.
fn block_ranges(snapshot: &Snapshot, anchor: usize, active: usize, inclusive: bool) -> Vec<(usize, usize)> {
    let (anchor_line, anchor_col) = snapshot.line_column(anchor);
    let (active_line, active_col) = snapshot.line_column(active);
    let left = anchor_col.min(active_col);
    let right = anchor_col.max(active_col) + usize::from(inclusive);
    (anchor_line.min(active_line)..=anchor_line.max(active_line))
        .map(|line| {
            let start = snapshot.line_start(line);
            let end = snapshot.line_end(line);
            ((start + left).min(end), (start + right).min(end))
        })
        .collect()
}
