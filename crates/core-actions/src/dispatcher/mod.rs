//! Mode state machine: applies [`Action`]s to one buffer.
//!
//! [`VimBuffer`] owns the buffer-local state (text, mode, pending keys, secondary carets,
//! jump list). Session-wide state arrives as [`VimData`] and the embedding editor as a
//! [`Host`]; both are passed into every call. Handling is split by concern:
//! * `motion`   - caret movement, selection extension, caret addition
//! * `mode`     - mode transitions
//! * `edit`     - Insert and Select mode typing
//! * `operator` - operators and the rest of the primary-caret commands
//!
//! A failed command leaves the mode and pending keys reset and reports the error.

use core_events::{KeyEvent, parse_notation};
use core_state::{JumpList, Mode};
use core_text::{Snapshot, TextBuffer, Translation};
use tracing::debug;

use crate::error::{CommandError, CommandResult};
use crate::host::Host;
use crate::key_translator::KeyTranslator;
use crate::multi_selection::SelectionCoordinator;
use crate::operations::CommonOperations;
use crate::{Action, VimData};

mod edit;
mod mode;
mod motion;
mod operator;

/// Outcome of processing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub mode: Mode,
    /// The buffer moved to a new snapshot.
    pub buffer_changed: bool,
    /// A multi-key command is still incomplete.
    pub pending: bool,
}

pub struct VimBuffer {
    buffer: TextBuffer,
    mode: Mode,
    translator: KeyTranslator,
    selections: SelectionCoordinator,
    jumps: JumpList,
}

impl VimBuffer {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            mode: Mode::Normal,
            translator: KeyTranslator::new(),
            selections: SelectionCoordinator::new(),
            jumps: JumpList::default(),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.buffer.snapshot()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn jumps(&self) -> &JumpList {
        &self.jumps
    }

    pub fn selections(&self) -> &SelectionCoordinator {
        &self.selections
    }

    /// Every selection, primary first.
    pub fn all_selections(&self, host: &dyn Host) -> Vec<core_state::SelectedSpan> {
        self.selections.selections(host)
    }

    /// Operator engine bound to this buffer, for commands issued outside key processing.
    pub fn operations<'a>(&'a mut self, host: &'a mut dyn Host, data: &'a mut VimData) -> CommonOperations<'a> {
        CommonOperations::new(
            &mut self.buffer,
            host,
            data,
            &mut self.jumps,
            &mut self.selections,
        )
    }

    /// Feed one key.
    pub fn process(
        &mut self,
        key: &KeyEvent,
        host: &mut dyn Host,
        data: &mut VimData,
    ) -> CommandResult<DispatchResult> {
        let version = self.buffer.snapshot().version();
        if let Some(action) = self.translator.translate(self.mode, key) {
            self.dispatch(action, host, data)?;
        }
        Ok(DispatchResult {
            mode: self.mode,
            buffer_changed: self.buffer.snapshot().version() != version,
            pending: self.translator.is_pending(),
        })
    }

    /// Feed a key script such as `d2w` or `gh<C-S-Right>xxx<Esc>`. Stops at the first error.
    pub fn process_notation(
        &mut self,
        script: &str,
        host: &mut dyn Host,
        data: &mut VimData,
    ) -> CommandResult<DispatchResult> {
        let keys = parse_notation(script)?;
        let version = self.buffer.snapshot().version();
        let mut result = DispatchResult {
            mode: self.mode,
            buffer_changed: false,
            pending: self.translator.is_pending(),
        };
        for key in &keys {
            result = self.process(key, host, data)?;
        }
        result.buffer_changed = self.buffer.snapshot().version() != version;
        Ok(result)
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action, host: &mut dyn Host, data: &mut VimData) -> CommandResult {
        let mut ctx = Ctx {
            buffer: &mut self.buffer,
            mode: &mut self.mode,
            selections: &mut self.selections,
            jumps: &mut self.jumps,
            host,
            data,
        };
        let result = match action {
            Action::Motion { motion, count } => {
                motion::handle_motion(&mut ctx, motion, count);
                Ok(())
            }
            Action::SpecialMotion { motion, count } => {
                motion::handle_special_motion(&mut ctx, motion, count);
                Ok(())
            }
            Action::ShiftedMotion { motion, count } => {
                motion::handle_shifted_motion(&mut ctx, motion, count);
                Ok(())
            }
            Action::AddCaret(direction) => {
                motion::handle_add_caret(&mut ctx, direction);
                Ok(())
            }
            Action::ModeChange(change) => mode::handle_mode_change(&mut ctx, change),
            Action::InsertText(text) => edit::handle_insert_text(&mut ctx, &text),
            Action::InsertNewline => edit::handle_insert_text(&mut ctx, "\n"),
            Action::Backspace => edit::handle_backspace(&mut ctx),
            Action::SetMark(name) => ctx.ops().set_mark(name),
            other => operator::handle_primary_command(&mut ctx, other),
        };
        if let Err(err) = &result {
            debug!(target: "actions.mode", mode = self.mode.as_str(), error = %err, "command_failed");
        }
        result
    }
}

/// Split borrows of everything a handler may touch.
pub(crate) struct Ctx<'a> {
    buffer: &'a mut TextBuffer,
    mode: &'a mut Mode,
    selections: &'a mut SelectionCoordinator,
    jumps: &'a mut JumpList,
    host: &'a mut dyn Host,
    data: &'a mut VimData,
}

impl Ctx<'_> {
    fn ops(&mut self) -> CommonOperations<'_> {
        CommonOperations::new(
            &mut *self.buffer,
            &mut *self.host,
            &mut *self.data,
            &mut *self.jumps,
            &mut *self.selections,
        )
    }

    fn snapshot(&self) -> &Snapshot {
        self.buffer.snapshot()
    }

    /// Re-resolve marks and jump entries after an edit made by the coordinator.
    fn track(&mut self, translation: &Translation) {
        let id = self.buffer.id();
        self.data.marks.map_through(id, translation);
        self.jumps.map_through(id, translation);
    }

    fn set_mode(&mut self, mode: Mode) {
        if *self.mode != mode {
            debug!(target: "actions.mode", from = self.mode.as_str(), to = mode.as_str(), "mode_change");
            *self.mode = mode;
        }
    }

    /// Commands that only make sense for one caret refuse to run with secondaries.
    fn require_single_caret(&self) -> CommandResult {
        if self.selections.has_secondaries() {
            return Err(CommandError::UnsupportedInMultiSelection);
        }
        Ok(())
    }
}
