//! Register store.
//!
//! Semantics:
//! - Every yank or delete writes the unnamed register in addition to any explicit target.
//! - Lowercase `a`-`z` replace, uppercase `A`-`Z` append to the same slot. An append turns the
//!   slot line-wise when either side is line-wise.
//! - Yanks without an explicit register also land in `0`.
//! - Deletes without an explicit register shift the numbered ring `1`-`9` when the text spans
//!   lines, otherwise they land in the small-delete register `-`.
//! - The black hole register `_` discards writes and leaves every other slot untouched.

use core_text::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterName {
    Unnamed,
    /// `a`-`z`, stored lowercase.
    Named(char),
    /// `A`-`Z`: appends to the lowercase slot.
    Append(char),
    /// `0`-`9`.
    Numbered(u8),
    SmallDelete,
    BlackHole,
}

impl RegisterName {
    /// Parse the char following `"`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Self::Unnamed),
            'a'..='z' => Some(Self::Named(c)),
            'A'..='Z' => Some(Self::Append(c.to_ascii_lowercase())),
            '0'..='9' => Some(Self::Numbered(c as u8 - b'0')),
            '-' => Some(Self::SmallDelete),
            '_' => Some(Self::BlackHole),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Unnamed => '"',
            Self::Named(c) => c,
            Self::Append(c) => c.to_ascii_uppercase(),
            Self::Numbered(n) => (b'0' + n) as char,
            Self::SmallDelete => '-',
            Self::BlackHole => '_',
        }
    }
}

/// Text held by a register together with how it was captured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterValue {
    pub text: String,
    pub kind: OperationKind,
}

impl RegisterValue {
    pub fn new(text: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn character_wise(text: impl Into<String>) -> Self {
        Self::new(text, OperationKind::CharacterWise)
    }

    pub fn line_wise(text: impl Into<String>) -> Self {
        Self::new(text, OperationKind::LineWise)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegisterMap {
    unnamed: Option<RegisterValue>,
    named: [Option<RegisterValue>; 26],
    numbered: [Option<RegisterValue>; 10],
    small_delete: Option<RegisterValue>,
}

impl RegisterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a register. Unknown or never-written registers yield `None`.
    pub fn get(&self, name: RegisterName) -> Option<&RegisterValue> {
        match name {
            RegisterName::Unnamed => self.unnamed.as_ref(),
            RegisterName::Named(c) | RegisterName::Append(c) => {
                named_index(c).and_then(|i| self.named[i].as_ref())
            }
            RegisterName::Numbered(n) => self.numbered.get(n as usize).and_then(Option::as_ref),
            RegisterName::SmallDelete => self.small_delete.as_ref(),
            RegisterName::BlackHole => None,
        }
    }

    /// Write one slot directly. `Append` extends the existing value.
    pub fn set(&mut self, name: RegisterName, value: RegisterValue) {
        match name {
            RegisterName::Unnamed => self.unnamed = Some(value),
            RegisterName::Named(c) => {
                if let Some(i) = named_index(c) {
                    self.named[i] = Some(value);
                }
            }
            RegisterName::Append(c) => {
                if let Some(i) = named_index(c) {
                    let merged = match self.named[i].take() {
                        Some(mut existing) => {
                            existing.text.push_str(&value.text);
                            if value.kind == OperationKind::LineWise {
                                existing.kind = OperationKind::LineWise;
                            }
                            existing
                        }
                        None => value,
                    };
                    self.named[i] = Some(merged);
                }
            }
            RegisterName::Numbered(n) => {
                if let Some(slot) = self.numbered.get_mut(n as usize) {
                    *slot = Some(value);
                }
            }
            RegisterName::SmallDelete => self.small_delete = Some(value),
            RegisterName::BlackHole => {}
        }
    }

    /// Record a yank into `target` (or only the default slots when `None`).
    pub fn record_yank(&mut self, target: Option<RegisterName>, value: RegisterValue) {
        if self.write_target(target, &value) {
            return;
        }
        if is_default(target) {
            self.numbered[0] = Some(value.clone());
        }
        self.finish_write(target, value, "yank");
    }

    /// Record deleted text into `target` (or only the default slots when `None`).
    pub fn record_delete(&mut self, target: Option<RegisterName>, value: RegisterValue) {
        if self.write_target(target, &value) {
            return;
        }
        if is_default(target) {
            if value.kind == OperationKind::LineWise || value.text.contains('\n') {
                self.numbered[1..].rotate_right(1);
                self.numbered[1] = Some(value.clone());
            } else {
                self.small_delete = Some(value.clone());
            }
        }
        self.finish_write(target, value, "delete");
    }

    /// Returns true when the write was swallowed by the black hole.
    fn write_target(&mut self, target: Option<RegisterName>, value: &RegisterValue) -> bool {
        match target {
            Some(RegisterName::BlackHole) => true,
            Some(name) if !is_default(target) => {
                self.set(name, value.clone());
                false
            }
            _ => false,
        }
    }

    fn finish_write(&mut self, target: Option<RegisterName>, value: RegisterValue, op: &str) {
        // The unnamed register mirrors the full content of an appended slot.
        let unnamed = match target {
            Some(RegisterName::Append(c)) => self.get(RegisterName::Named(c)).cloned().unwrap_or(value),
            _ => value,
        };
        tracing::trace!(
            target: "state.registers",
            op,
            register = %target.map(RegisterName::as_char).unwrap_or('"'),
            len = unnamed.text.chars().count(),
            "register_write"
        );
        self.unnamed = Some(unnamed);
    }
}

fn is_default(target: Option<RegisterName>) -> bool {
    matches!(target, None | Some(RegisterName::Unnamed))
}

fn named_index(c: char) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| (c.to_ascii_lowercase() as u8 - b'a') as usize)
}
