//! Mode transitions.
//!
//! Insert entries reposition every caret first (`a`, `A`, `I`, `o`, `O`). Leaving Insert steps
//! each caret back one char; leaving Visual or Select collapses selections onto their carets.
//! `<Esc>` in Normal mode drops the secondary carets.

use core_state::Mode;
use core_text::{Motion, MotionOptions};

use super::Ctx;
use super::motion::clamp_carets;
use crate::ModeChange;
use crate::error::CommandResult;

pub(super) fn handle_mode_change(ctx: &mut Ctx<'_>, change: ModeChange) -> CommandResult {
    let insert = MotionOptions {
        allow_past_end: true,
    };
    match change {
        ModeChange::Normal => {
            match *ctx.mode {
                Mode::Normal => ctx.selections.clear_secondary(&mut *ctx.host),
                Mode::Insert => {
                    move_all(ctx, Motion::Left, MotionOptions::default());
                    clamp_carets(ctx);
                }
                Mode::Visual(_) | Mode::Select => {
                    ctx.selections.collapse_all(&mut *ctx.host);
                    clamp_carets(ctx);
                }
            }
            ctx.set_mode(Mode::Normal);
        }
        ModeChange::InsertBefore => ctx.set_mode(Mode::Insert),
        ModeChange::InsertAfter => {
            move_all(ctx, Motion::Right, insert);
            ctx.set_mode(Mode::Insert);
        }
        ModeChange::InsertLineEnd => {
            move_all(ctx, Motion::LineEnd, insert);
            ctx.set_mode(Mode::Insert);
        }
        ModeChange::InsertLineStart => {
            move_all(ctx, Motion::FirstNonWhitespace, insert);
            ctx.set_mode(Mode::Insert);
        }
        ModeChange::OpenLineBelow | ModeChange::OpenLineAbove => {
            let below = change == ModeChange::OpenLineBelow;
            let translation = ctx
                .selections
                .open_lines(&mut *ctx.buffer, &mut *ctx.host, below)?;
            ctx.track(&translation);
            ctx.set_mode(Mode::Insert);
        }
        ModeChange::Visual(kind) => match *ctx.mode {
            Mode::Visual(current) if current == kind => {
                ctx.selections.collapse_all(&mut *ctx.host);
                clamp_carets(ctx);
                ctx.set_mode(Mode::Normal);
            }
            Mode::Visual(_) => ctx.set_mode(Mode::Visual(kind)),
            _ => {
                ctx.selections.collapse_all(&mut *ctx.host);
                ctx.set_mode(Mode::Visual(kind));
            }
        },
        ModeChange::Select => {
            ctx.selections.collapse_all(&mut *ctx.host);
            ctx.set_mode(Mode::Select);
        }
    }
    Ok(())
}

/// Move every caret (a lone primary included) without host line notifications.
fn move_all(ctx: &mut Ctx<'_>, motion: Motion, options: MotionOptions) {
    let snapshot = ctx.buffer.snapshot();
    ctx.selections.move_all(&mut *ctx.host, snapshot, motion, 1, options);
}

