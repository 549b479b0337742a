//! Failure kinds surfaced to the caller as status messages.
//!
//! Boundary clamps and no-op shifts are not errors; they succeed with unchanged state.

use core_events::NotationError;
use core_state::MarkError;
use core_text::EditError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid mark name '{0}'")]
    InvalidMarkName(char),
    #[error("mark '{0}' not set")]
    MarkNotSet(char),
    #[error("could not navigate to mark '{0}'")]
    MarkNavigationFailed(char),
    #[error("no word under cursor")]
    NoWordUnderCursor,
    #[error("could not find definition of '{0}'")]
    DefinitionNotFound(String),
    #[error("command is not supported with multiple carets")]
    UnsupportedInMultiSelection,
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),
    #[error(transparent)]
    Notation(#[from] NotationError),
}

impl From<MarkError> for CommandError {
    fn from(err: MarkError) -> Self {
        match err {
            MarkError::InvalidName(c) => CommandError::InvalidMarkName(c),
        }
    }
}

pub type CommandResult<T = ()> = Result<T, CommandError>;
