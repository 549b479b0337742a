//! KeyTranslator: stateful key->Action translation.
//!
//! State machine:
//! * Idle: optional `pending_count` accumulating prefix digits. A leading `0` is the
//!   `LineStart` motion, not a count.
//! * `"x` captures a register for the next operator or put.
//! * OperatorPending(op): may accumulate a post-operator count; the following motion emits
//!   `Operator { count = prefix * post }`, the operator's own key again emits
//!   `LinewiseOperator` (`dd`, `>>`, `g~~`, `guu`, `gUU`).
//! * Prefixes `g`, `m`, `` ` `` and `'` wait for one more key.
//! * `<Esc>` while anything is pending cancels it silently.
//!
//! Insert and Select mode keys map one to one. Counts are clamped to 999_999.

use crate::{Action, JoinKind, ModeChange, OperatorKind, ScrollDirection, VerticalDirection};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{Mode, RegisterName, VisualKind};
use core_text::{Motion, WordKind};

const MAX_COUNT: usize = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    G,
    Mark,
    JumpExact,
    JumpLine,
}

#[derive(Debug, Default)]
pub struct KeyTranslator {
    /// Count typed before an operator or motion (`12d`, `12w`).
    pending_count: Option<usize>,
    /// Operator awaiting its motion, with the key that repeats it line-wise.
    pending_operator: Option<(OperatorKind, char)>,
    /// Count typed after the operator (`d3w`).
    post_op_count: Option<usize>,
    pending_register: Option<RegisterName>,
    awaiting_register: bool,
    prefix: Option<Prefix>,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True while a multi-key command is incomplete.
    pub fn is_pending(&self) -> bool {
        self.pending_count.is_some()
            || self.pending_operator.is_some()
            || self.pending_register.is_some()
            || self.awaiting_register
            || self.prefix.is_some()
    }

    pub fn translate(&mut self, mode: Mode, key: &KeyEvent) -> Option<Action> {
        tracing::trace!(target: "actions.translate", mode = mode.as_str(), key = %key, pending = self.is_pending(), "translate_key");
        match mode {
            Mode::Insert => {
                self.reset();
                translate_insert(key)
            }
            Mode::Select => {
                self.reset();
                translate_select(key)
            }
            Mode::Normal | Mode::Visual(_) => self.translate_command(mode, key),
        }
    }

    fn translate_command(&mut self, mode: Mode, key: &KeyEvent) -> Option<Action> {
        let visual = mode.is_visual();
        if key.code == KeyCode::Esc {
            let was_pending = self.is_pending();
            self.reset();
            return (!was_pending).then_some(Action::ModeChange(ModeChange::Normal));
        }
        if let Some(prefix) = self.prefix.take() {
            return self.finish_prefix(prefix, visual, key);
        }
        if key.mods.contains(KeyModifiers::CTRL | KeyModifiers::ALT) {
            let direction = match key.code {
                KeyCode::Up => Some(VerticalDirection::Up),
                KeyCode::Down => Some(VerticalDirection::Down),
                _ => None,
            };
            self.reset();
            return direction.map(Action::AddCaret);
        }
        if key.code.is_navigation() {
            return self.navigation(key);
        }
        if key.mods.contains(KeyModifiers::CTRL) {
            return self.control(key);
        }
        match key.code {
            KeyCode::Tab => {
                let count = self.take_count();
                return Some(Action::JumpNewer(count));
            }
            KeyCode::Enter => return self.motion(Motion::DownToFirstNonWhitespace),
            KeyCode::Backspace => return self.motion(Motion::Left),
            _ => {}
        }
        let KeyCode::Char(c) = key.code else {
            self.reset();
            return None;
        };

        if self.awaiting_register {
            self.awaiting_register = false;
            self.pending_register = RegisterName::from_char(c);
            return None;
        }
        if c == '"' && self.pending_operator.is_none() {
            self.awaiting_register = true;
            self.pending_register = None;
            return None;
        }
        if c.is_ascii_digit() && (c != '0' || self.has_count()) {
            let slot = if self.pending_operator.is_some() {
                &mut self.post_op_count
            } else {
                &mut self.pending_count
            };
            let digit = (c as u8 - b'0') as usize;
            *slot = Some(slot.unwrap_or(0).saturating_mul(10).saturating_add(digit).min(MAX_COUNT));
            return None;
        }
        if let Some((_, repeat)) = self.pending_operator {
            if c == 'g' {
                self.prefix = Some(Prefix::G);
                return None;
            }
            if c == repeat {
                return self.linewise_operator();
            }
            return match motion_for_char(c) {
                Some(motion) => self.motion(motion),
                None => {
                    self.reset();
                    None
                }
            };
        }
        if let Some(motion) = motion_for_char(c) {
            return self.motion(motion);
        }
        if visual {
            self.visual_key(c)
        } else {
            self.normal_key(c)
        }
    }

    fn has_count(&self) -> bool {
        if self.pending_operator.is_some() {
            self.post_op_count.is_some()
        } else {
            self.pending_count.is_some()
        }
    }

    /// Combined prefix and post-operator count, defaulting to 1.
    fn take_count(&mut self) -> usize {
        self.take_explicit_count().unwrap_or(1)
    }

    fn take_explicit_count(&mut self) -> Option<usize> {
        let prefix = self.pending_count.take();
        let post = self.post_op_count.take();
        match (prefix, post) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(1).saturating_mul(b.unwrap_or(1)).min(MAX_COUNT)),
        }
    }

    fn motion(&mut self, motion: Motion) -> Option<Action> {
        let count = self.take_count();
        let action = match self.pending_operator.take() {
            Some((op, _)) => Action::Operator {
                op,
                motion,
                count,
                register: self.pending_register.take(),
            },
            None => Action::Motion { motion, count },
        };
        self.reset();
        Some(action)
    }

    fn linewise_operator(&mut self) -> Option<Action> {
        let (op, _) = self.pending_operator.take()?;
        let count = self.take_count();
        let register = self.pending_register.take();
        self.reset();
        Some(Action::LinewiseOperator { op, count, register })
    }

    /// Start an operator in Normal mode, or apply it to the selection in Visual mode.
    fn operator(&mut self, op: OperatorKind, repeat: char, visual: bool) -> Option<Action> {
        if visual {
            let register = self.pending_register.take();
            self.reset();
            return Some(Action::SelectionOperator { op, register });
        }
        self.pending_operator = Some((op, repeat));
        self.post_op_count = None;
        None
    }

    fn navigation(&mut self, key: &KeyEvent) -> Option<Action> {
        let count = self.take_count();
        self.reset();
        navigation_action(key, count)
    }

    fn control(&mut self, key: &KeyEvent) -> Option<Action> {
        let KeyCode::Char(c) = key.code else {
            self.reset();
            return None;
        };
        let explicit = self.take_explicit_count();
        let count = explicit.unwrap_or(1);
        self.reset();
        Some(match c.to_ascii_lowercase() {
            'o' => Action::JumpOlder(count),
            'i' => Action::JumpNewer(count),
            'd' => Action::ScrollLines {
                direction: ScrollDirection::Down,
                count: explicit.unwrap_or(0),
            },
            'u' => Action::ScrollLines {
                direction: ScrollDirection::Up,
                count: explicit.unwrap_or(0),
            },
            'f' => Action::ScrollPages {
                direction: ScrollDirection::Down,
                count,
            },
            'b' => Action::ScrollPages {
                direction: ScrollDirection::Up,
                count,
            },
            'v' => Action::ModeChange(ModeChange::Visual(VisualKind::Block)),
            _ => return None,
        })
    }

    fn finish_prefix(&mut self, prefix: Prefix, visual: bool, key: &KeyEvent) -> Option<Action> {
        let Some(c) = key.printable() else {
            self.reset();
            return None;
        };
        match prefix {
            Prefix::Mark => {
                self.reset();
                Some(Action::SetMark(c))
            }
            Prefix::JumpExact | Prefix::JumpLine => {
                self.reset();
                Some(Action::JumpToMark {
                    name: c,
                    exact: prefix == Prefix::JumpExact,
                })
            }
            Prefix::G => {
                let op = match c {
                    '~' => Some(OperatorKind::ToggleCase),
                    'u' => Some(OperatorKind::Lowercase),
                    'U' => Some(OperatorKind::Uppercase),
                    _ => None,
                };
                if let Some(op) = op {
                    if let Some((pending, repeat)) = self.pending_operator {
                        // `g~g~` repeats just like `g~~`.
                        if pending == op && repeat == c {
                            return self.linewise_operator();
                        }
                        self.reset();
                        return None;
                    }
                    return self.operator(op, c, visual);
                }
                if self.pending_operator.is_some() {
                    self.reset();
                    return None;
                }
                let count = self.take_count();
                self.reset();
                match (c, visual) {
                    ('h', false) => Some(Action::ModeChange(ModeChange::Select)),
                    ('J', false) => Some(Action::Join {
                        count,
                        kind: JoinKind::KeepEmptySpaces,
                    }),
                    ('d', false) => Some(Action::GoToDefinition),
                    _ => None,
                }
            }
        }
    }

    fn normal_key(&mut self, c: char) -> Option<Action> {
        let action = match c {
            'd' => return self.operator(OperatorKind::Delete, 'd', false),
            'y' => return self.operator(OperatorKind::Yank, 'y', false),
            '>' => return self.operator(OperatorKind::ShiftRight, '>', false),
            '<' => return self.operator(OperatorKind::ShiftLeft, '<', false),
            'g' => {
                self.prefix = Some(Prefix::G);
                return None;
            }
            'm' => {
                self.prefix = Some(Prefix::Mark);
                return None;
            }
            '`' => {
                self.prefix = Some(Prefix::JumpExact);
                return None;
            }
            '\'' => {
                self.prefix = Some(Prefix::JumpLine);
                return None;
            }
            'x' => Action::DeleteChar {
                count: self.take_count(),
                register: self.pending_register.take(),
            },
            'X' => Action::DeleteCharBefore {
                count: self.take_count(),
                register: self.pending_register.take(),
            },
            'D' => Action::DeleteToEnd {
                count: self.take_count(),
                register: self.pending_register.take(),
            },
            'J' => Action::Join {
                count: self.take_count(),
                kind: JoinKind::RemoveEmptySpaces,
            },
            'p' | 'P' => Action::Put {
                before: c == 'P',
                count: self.take_count(),
                register: self.pending_register.take(),
            },
            '~' => Action::ToggleCaseChars {
                count: self.take_count(),
            },
            'i' => Action::ModeChange(ModeChange::InsertBefore),
            'a' => Action::ModeChange(ModeChange::InsertAfter),
            'A' => Action::ModeChange(ModeChange::InsertLineEnd),
            'I' => Action::ModeChange(ModeChange::InsertLineStart),
            'o' => Action::ModeChange(ModeChange::OpenLineBelow),
            'O' => Action::ModeChange(ModeChange::OpenLineAbove),
            'v' => Action::ModeChange(ModeChange::Visual(VisualKind::Character)),
            'V' => Action::ModeChange(ModeChange::Visual(VisualKind::Line)),
            _ => {
                self.reset();
                return None;
            }
        };
        self.reset();
        Some(action)
    }

    fn visual_key(&mut self, c: char) -> Option<Action> {
        let op = match c {
            'd' | 'x' => OperatorKind::Delete,
            'y' => OperatorKind::Yank,
            '>' => OperatorKind::ShiftRight,
            '<' => OperatorKind::ShiftLeft,
            '~' => OperatorKind::ToggleCase,
            'u' => OperatorKind::Lowercase,
            'U' => OperatorKind::Uppercase,
            'g' => {
                self.prefix = Some(Prefix::G);
                return None;
            }
            'v' => return self.mode_change(ModeChange::Visual(VisualKind::Character)),
            'V' => return self.mode_change(ModeChange::Visual(VisualKind::Line)),
            _ => {
                self.reset();
                return None;
            }
        };
        self.operator(op, c, true)
    }

    fn mode_change(&mut self, change: ModeChange) -> Option<Action> {
        self.reset();
        Some(Action::ModeChange(change))
    }
}

fn motion_for_char(c: char) -> Option<Motion> {
    Some(match c {
        'h' => Motion::Left,
        'l' | ' ' => Motion::Right,
        'j' => Motion::Down,
        'k' => Motion::Up,
        'w' => Motion::WordForward(WordKind::NormalWord),
        'W' => Motion::WordForward(WordKind::BigWord),
        'b' => Motion::WordBackward(WordKind::NormalWord),
        'B' => Motion::WordBackward(WordKind::BigWord),
        '0' => Motion::LineStart,
        '^' => Motion::FirstNonWhitespace,
        '$' => Motion::LineEnd,
        '+' => Motion::DownToFirstNonWhitespace,
        _ => return None,
    })
}

/// Arrows, Home, End and the page keys. Control turns horizontal arrows into word motions;
/// shift asks for a selection.
fn navigation_action(key: &KeyEvent, count: usize) -> Option<Action> {
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let motion = match key.code {
        KeyCode::Left if ctrl => Motion::WordBackward(WordKind::NormalWord),
        KeyCode::Right if ctrl => Motion::WordForward(WordKind::NormalWord),
        KeyCode::Left => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Home => Motion::LineStart,
        KeyCode::End => Motion::LineEnd,
        KeyCode::PageUp | KeyCode::PageDown => {
            let direction = if key.code == KeyCode::PageUp {
                ScrollDirection::Up
            } else {
                ScrollDirection::Down
            };
            return Some(Action::ScrollPages { direction, count });
        }
        _ => return None,
    };
    Some(if key.mods.contains(KeyModifiers::SHIFT) {
        Action::ShiftedMotion { motion, count }
    } else {
        Action::SpecialMotion { motion, count }
    })
}

fn translate_insert(key: &KeyEvent) -> Option<Action> {
    if key.code.is_navigation() {
        return navigation_action(key, 1);
    }
    match key.code {
        KeyCode::Esc => Some(Action::ModeChange(ModeChange::Normal)),
        KeyCode::Enter => Some(Action::InsertNewline),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::InsertText("\t".into())),
        _ => key.printable().map(|c| Action::InsertText(c.to_string())),
    }
}

fn translate_select(key: &KeyEvent) -> Option<Action> {
    // Select mode shares Insert's keys: typing replaces the selection.
    translate_insert(key)
}
