//! Insert and Select mode typing.
//!
//! Text goes in at every caret as one batch. In Select mode the first typed key replaces
//! each selection and switches to Insert mode.

use core_state::Mode;

use super::Ctx;
use crate::error::CommandResult;

pub(super) fn handle_insert_text(ctx: &mut Ctx<'_>, text: &str) -> CommandResult {
    let translation = match *ctx.mode {
        Mode::Insert => ctx
            .selections
            .insert_text(&mut *ctx.buffer, &mut *ctx.host, text)?,
        Mode::Select => {
            let inclusivity = ctx.data.settings.selection;
            let translation =
                ctx.selections
                    .replace_selections(&mut *ctx.buffer, &mut *ctx.host, text, inclusivity)?;
            ctx.set_mode(Mode::Insert);
            translation
        }
        Mode::Normal | Mode::Visual(_) => return Ok(()),
    };
    ctx.track(&translation);
    Ok(())
}

pub(super) fn handle_backspace(ctx: &mut Ctx<'_>) -> CommandResult {
    let translation = match *ctx.mode {
        Mode::Insert => ctx.selections.backspace(&mut *ctx.buffer, &mut *ctx.host)?,
        Mode::Select => {
            let inclusivity = ctx.data.settings.selection;
            let translation =
                ctx.selections
                    .delete_selections(&mut *ctx.buffer, &mut *ctx.host, inclusivity)?;
            ctx.set_mode(Mode::Insert);
            translation
        }
        Mode::Normal | Mode::Visual(_) => return Ok(()),
    };
    ctx.track(&translation);
    Ok(())
}
