//! Caret movement, selection extension and caret addition.
//!
//! With a single caret in Normal mode motions go through the operator engine so the host
//! sees one `move_line_up/down` per line. Every other case moves all carets together.

use core_config::{KeyModelOptions, SelectModeOptions, SelectionInclusivity};
use core_state::{Mode, VisualKind};
use core_text::{Motion, MotionOptions};

use super::Ctx;
use crate::VerticalDirection;

fn normal_options() -> MotionOptions {
    MotionOptions::default()
}

/// Insert carets and exclusive selections may rest after the last char of a line.
fn options_for(ctx: &Ctx<'_>, mode: Mode) -> MotionOptions {
    let allow_past_end = match mode {
        Mode::Insert => true,
        Mode::Select => ctx.data.settings.selection == SelectionInclusivity::Exclusive,
        Mode::Normal | Mode::Visual(_) => false,
    };
    MotionOptions { allow_past_end }
}

pub(super) fn handle_motion(ctx: &mut Ctx<'_>, motion: Motion, count: usize) {
    let mode = *ctx.mode;
    if mode.is_visual() || mode == Mode::Select {
        extend(ctx, motion, count);
        return;
    }
    move_carets(ctx, motion, count, options_for(ctx, mode));
}

fn move_carets(ctx: &mut Ctx<'_>, motion: Motion, count: usize, options: MotionOptions) {
    if ctx.selections.has_secondaries() {
        let snapshot = ctx.buffer.snapshot();
        ctx.selections.move_all(&mut *ctx.host, snapshot, motion, count, options);
    } else {
        ctx.ops().move_caret(motion, count, options);
    }
}

fn extend(ctx: &mut Ctx<'_>, motion: Motion, count: usize) {
    let options = options_for(ctx, *ctx.mode);
    let snapshot = ctx.buffer.snapshot();
    ctx.selections.extend_all(&mut *ctx.host, snapshot, motion, count, options);
}

/// Arrows and Home/End without shift. With `stopsel` they end a Select or Visual selection.
pub(super) fn handle_special_motion(ctx: &mut Ctx<'_>, motion: Motion, count: usize) {
    let mode = *ctx.mode;
    let stop = ctx
        .data
        .settings
        .key_model
        .contains(KeyModelOptions::STOP_SELECTION);
    match mode {
        Mode::Select | Mode::Visual(_) if stop => {
            ctx.selections.collapse_all(&mut *ctx.host);
            ctx.set_mode(Mode::Normal);
            clamp_carets(ctx);
            move_carets(ctx, motion, count, normal_options());
        }
        _ => handle_motion(ctx, motion, count),
    }
}

/// Shifted special keys. With `startsel` they open a selection at every caret first: Select
/// mode when `selectmode` has `key`, Visual mode otherwise.
pub(super) fn handle_shifted_motion(ctx: &mut Ctx<'_>, motion: Motion, count: usize) {
    let mode = *ctx.mode;
    if matches!(mode, Mode::Normal | Mode::Insert) {
        let settings = &ctx.data.settings;
        if !settings.key_model.contains(KeyModelOptions::START_SELECTION) {
            handle_motion(ctx, motion, count);
            return;
        }
        let target = if settings.select_mode.contains(SelectModeOptions::KEY) {
            Mode::Select
        } else {
            Mode::Visual(VisualKind::Character)
        };
        ctx.selections.collapse_all(&mut *ctx.host);
        ctx.set_mode(target);
    }
    extend(ctx, motion, count);
}

pub(super) fn handle_add_caret(ctx: &mut Ctx<'_>, direction: VerticalDirection) {
    let options = options_for(ctx, *ctx.mode);
    let snapshot = ctx.buffer.snapshot();
    ctx.selections.add_caret(&mut *ctx.host, snapshot, direction, options);
}

/// Pull every caret back onto a char a Normal-mode caret may rest on.
pub(super) fn clamp_carets(ctx: &mut Ctx<'_>) {
    let snapshot = ctx.buffer.snapshot();
    let spans = ctx
        .selections
        .selections(&*ctx.host)
        .iter()
        .map(|s| core_state::SelectedSpan::caret(snapshot.point(snapshot.clamp_caret(s.caret_offset()))))
        .collect();
    ctx.selections.set_selections(&mut *ctx.host, spans);
}
