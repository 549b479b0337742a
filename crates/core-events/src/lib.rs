//! Key events and Vim key notation.
//!
//! [`parse_notation`] turns a script such as `gh<C-S-Right>xxx<Esc>` into the key events a
//! terminal would have delivered. Special keys are written `<Name>` with optional `C-`
//! (control), `A-`/`M-` (alt) and `S-` (shift) prefixes; `<lt>` is a literal `<`. A `<` that
//! never closes is taken literally.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Printable char with no control/alt modifier.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => Some(c),
            _ => None,
        }
    }
}

/// KeyCode enumerates normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

impl KeyCode {
    /// Keys that `'keymodel'` treats as special (arrows and friends).
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        )
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            KeyCode::Char(_) => return None,
            KeyCode::Enter => "CR",
            KeyCode::Esc => "Esc",
            KeyCode::Backspace => "BS",
            KeyCode::Tab => "Tab",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Delete => "Del",
        })
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

/// Formats in the same notation [`parse_notation`] reads.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain_char = match self.code {
            KeyCode::Char(' ') => None,
            KeyCode::Char('<') if self.mods.is_empty() => return f.write_str("<lt>"),
            KeyCode::Char(c) => Some(c),
            _ => None,
        };
        if let (Some(c), true) = (plain_char, self.mods.is_empty()) {
            return write!(f, "{c}");
        }
        f.write_str("<")?;
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match (self.code.name(), self.code) {
            (Some(name), _) => f.write_str(name)?,
            (None, KeyCode::Char(' ')) => f.write_str("Space")?,
            (None, KeyCode::Char(c)) => write!(f, "{c}")?,
            (None, _) => {}
        }
        f.write_str(">")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("unknown key name <{0}>")]
    UnknownKey(String),
}

/// Parse a key script into events.
pub fn parse_notation(script: &str) -> Result<Vec<KeyEvent>, NotationError> {
    let mut keys = Vec::new();
    let mut rest = script;
    while let Some(c) = rest.chars().next() {
        let close = rest
            .find('>')
            .filter(|&close| c == '<' && close > 1 && !rest[1..close].contains('<'));
        if let Some(close) = close {
            keys.push(parse_bracketed(&rest[1..close])?);
            rest = &rest[close + 1..];
            continue;
        }
        keys.push(match c {
            '\n' => KeyEvent::plain(KeyCode::Enter),
            '\t' => KeyEvent::plain(KeyCode::Tab),
            _ => KeyEvent::char(c),
        });
        rest = &rest[c.len_utf8()..];
    }
    Ok(keys)
}

fn parse_bracketed(inner: &str) -> Result<KeyEvent, NotationError> {
    let mut mods = KeyModifiers::empty();
    let mut name = inner;
    loop {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(m), Some('-')) if name.len() > 2 => {
                mods |= match m.to_ascii_uppercase() {
                    'C' => KeyModifiers::CTRL,
                    'A' | 'M' => KeyModifiers::ALT,
                    'S' => KeyModifiers::SHIFT,
                    _ => return Err(NotationError::UnknownKey(inner.to_string())),
                };
                name = &name[2..];
            }
            _ => break,
        }
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "bs" | "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "del" | "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        "bar" => KeyCode::Char('|'),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(NotationError::UnknownKey(inner.to_string())),
            }
        }
    };
    // Shifted letters are just the uppercase letter.
    if let KeyCode::Char(c) = code {
        if mods.contains(KeyModifiers::SHIFT) && c.is_ascii_alphabetic() {
            mods.remove(KeyModifiers::SHIFT);
            return Ok(KeyEvent::new(KeyCode::Char(c.to_ascii_uppercase()), mods));
        }
    }
    Ok(KeyEvent::new(code, mods))
}
