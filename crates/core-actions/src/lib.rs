//! Vim editing engine: operators, multi-caret editing and the mode state machine.
//!
//! Keys flow through [`KeyTranslator`] into an [`Action`]; [`VimBuffer`] dispatches the
//! action against the buffer, the shared [`VimData`] (settings, registers, marks) and the
//! embedding editor reached through the [`Host`] trait. Every text change is a single
//! atomic batch edit; positions held across it are re-resolved right after.

use core_config::Settings;
use core_state::{MarkMap, RegisterMap, RegisterName};
use core_text::Motion;

pub mod dispatcher;
pub mod error;
pub mod host;
pub mod key_translator;
pub mod multi_selection;
pub mod operations;
pub mod span_resolver;

pub use dispatcher::{DispatchResult, VimBuffer};
pub use error::{CommandError, CommandResult};
pub use host::{Host, ScrollDirection};
pub use key_translator::KeyTranslator;
pub use multi_selection::SelectionCoordinator;
pub use operations::{CommonOperations, JoinKind};
pub use span_resolver::resolve_motion_span;

/// State shared by every buffer of one editing session.
///
/// Built once and handed by reference to each operator call.
#[derive(Debug, Default)]
pub struct VimData {
    pub settings: Settings,
    pub registers: RegisterMap,
    pub marks: MarkMap,
}

impl VimData {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registers: RegisterMap::new(),
            marks: MarkMap::new(),
        }
    }
}

/// Operators that take a motion, a visual selection or a doubled key (`dd`, `>>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Delete,
    Yank,
    ShiftLeft,
    ShiftRight,
    ToggleCase,
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeChange {
    /// `i`
    InsertBefore,
    /// `a`
    InsertAfter,
    /// `A`
    InsertLineEnd,
    /// `I`
    InsertLineStart,
    /// `o`
    OpenLineBelow,
    /// `O`
    OpenLineAbove,
    Visual(core_state::VisualKind),
    /// `gh`
    Select,
    /// `<Esc>`
    Normal,
}

/// One resolved command, independent of the keys that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion {
        motion: Motion,
        count: usize,
    },
    /// Shifted special key: starts or extends a selection depending on `'keymodel'`.
    ShiftedMotion {
        motion: Motion,
        count: usize,
    },
    /// Unshifted special key (arrows, Home, End).
    SpecialMotion {
        motion: Motion,
        count: usize,
    },
    Operator {
        op: OperatorKind,
        motion: Motion,
        count: usize,
        register: Option<RegisterName>,
    },
    /// Doubled operator over `count` lines.
    LinewiseOperator {
        op: OperatorKind,
        count: usize,
        register: Option<RegisterName>,
    },
    /// Operator applied to the active visual selection.
    SelectionOperator {
        op: OperatorKind,
        register: Option<RegisterName>,
    },
    /// `x`
    DeleteChar {
        count: usize,
        register: Option<RegisterName>,
    },
    /// `X`
    DeleteCharBefore {
        count: usize,
        register: Option<RegisterName>,
    },
    /// `D`
    DeleteToEnd {
        count: usize,
        register: Option<RegisterName>,
    },
    Join {
        count: usize,
        kind: JoinKind,
    },
    Put {
        before: bool,
        count: usize,
        register: Option<RegisterName>,
    },
    /// `~` in Normal mode.
    ToggleCaseChars {
        count: usize,
    },
    SetMark(char),
    JumpToMark {
        name: char,
        exact: bool,
    },
    JumpOlder(usize),
    JumpNewer(usize),
    ScrollLines {
        direction: ScrollDirection,
        count: usize,
    },
    ScrollPages {
        direction: ScrollDirection,
        count: usize,
    },
    GoToDefinition,
    AddCaret(VerticalDirection),
    ModeChange(ModeChange),
    InsertText(String),
    InsertNewline,
    Backspace,
}

