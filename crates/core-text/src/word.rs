//! Character classification for word motions and word lookup.

use crate::{Snapshot, Span};

/// Normal words break at every class transition; big words only at whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordKind {
    #[default]
    NormalWord,
    BigWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Whitespace,
    Keyword,
    Punctuation,
}

pub fn is_keyword(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Classify a char. Under `BigWord` every non-whitespace char is one class.
pub fn classify(c: char, kind: WordKind) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if kind == WordKind::BigWord || is_keyword(c) {
        CharClass::Keyword
    } else {
        CharClass::Punctuation
    }
}

/// Keyword span under or after `offset`, limited to the offset's line.
pub fn keyword_at_or_after(snapshot: &Snapshot, offset: usize) -> Option<Span> {
    let line = snapshot.line_of_offset(offset);
    let line_start = snapshot.line_start(line);
    let end = snapshot.line_end(line);
    let mut start = (offset..end).find(|&o| snapshot.char_at(o).is_some_and(is_keyword))?;
    // Back up to the word's start when the caret is in the middle of it.
    while start > line_start && snapshot.char_at(start - 1).is_some_and(is_keyword) {
        start -= 1;
    }
    let stop = (start..end)
        .find(|&o| !snapshot.char_at(o).is_some_and(is_keyword))
        .unwrap_or(end);
    Some(Span::from_offsets(snapshot, start, stop))
}

/// Start of the next word after `offset`, crossing lines. Empty lines count as words.
/// Returns the snapshot length when no further word exists.
pub fn next_word_start(snapshot: &Snapshot, offset: usize, kind: WordKind) -> usize {
    let len = snapshot.len();
    let mut pos = offset;
    let Some(first) = snapshot.char_at(pos) else {
        return len;
    };
    let class = classify(first, kind);
    if class != CharClass::Whitespace {
        while snapshot
            .char_at(pos)
            .is_some_and(|c| classify(c, kind) == class)
        {
            pos += 1;
        }
    }
    let mut crossed_break = false;
    while let Some(c) = snapshot.char_at(pos) {
        if c == '\n' {
            if crossed_break && is_empty_line_at(snapshot, pos) {
                return pos;
            }
            crossed_break = true;
        } else if !c.is_whitespace() {
            return pos;
        }
        pos += 1;
    }
    len
}

/// Start of the word at or before `offset`: the current word's start from inside it, the
/// previous word's start from a word start. Crosses lines backwards and stops at empty lines.
pub fn previous_word_start(snapshot: &Snapshot, offset: usize, kind: WordKind) -> usize {
    if offset == 0 {
        return 0;
    }
    let mut pos = offset.min(snapshot.len()) - 1;
    loop {
        let Some(c) = snapshot.char_at(pos) else {
            return 0;
        };
        if !c.is_whitespace() {
            break;
        }
        if is_empty_line_at(snapshot, pos) {
            return pos;
        }
        if pos == 0 {
            return 0;
        }
        pos -= 1;
    }
    let class = snapshot
        .char_at(pos)
        .map_or(CharClass::Whitespace, |c| classify(c, kind));
    while pos > 0
        && snapshot
            .char_at(pos - 1)
            .is_some_and(|c| classify(c, kind) == class)
    {
        pos -= 1;
    }
    pos
}

/// True when `offset` holds the break of an empty line.
fn is_empty_line_at(snapshot: &Snapshot, offset: usize) -> bool {
    snapshot.char_at(offset) == Some('\n') && (offset == 0 || snapshot.char_at(offset - 1) == Some('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferId;

    fn snap(text: &str) -> Snapshot {
        Snapshot::new(BufferId(0), text)
    }

    #[test]
    fn classes() {
        assert_eq!(classify('a', WordKind::NormalWord), CharClass::Keyword);
        assert_eq!(classify('_', WordKind::NormalWord), CharClass::Keyword);
        assert_eq!(classify('.', WordKind::NormalWord), CharClass::Punctuation);
        assert_eq!(classify('.', WordKind::BigWord), CharClass::Keyword);
        assert_eq!(classify('\t', WordKind::BigWord), CharClass::Whitespace);
    }

    #[test]
    fn forward_stops_at_class_transition() {
        let s = snap("foo.bar baz");
        assert_eq!(next_word_start(&s, 0, WordKind::NormalWord), 3);
        assert_eq!(next_word_start(&s, 3, WordKind::NormalWord), 4);
        assert_eq!(next_word_start(&s, 0, WordKind::BigWord), 8);
        assert_eq!(next_word_start(&s, 8, WordKind::NormalWord), s.len());
    }

    #[test]
    fn forward_from_line_end_reaches_next_line() {
        let s = snap("foo bar\nbaz\n\nqux");
        assert_eq!(next_word_start(&s, 7, WordKind::NormalWord), 8);
        assert_eq!(next_word_start(&s, 8, WordKind::NormalWord), 12);
        assert_eq!(next_word_start(&s, 12, WordKind::NormalWord), 13);
    }

    #[test]
    fn backward_semantics() {
        let s = snap("foo bar\nbaz");
        assert_eq!(previous_word_start(&s, 7, WordKind::NormalWord), 4);
        assert_eq!(previous_word_start(&s, 5, WordKind::NormalWord), 4);
        assert_eq!(previous_word_start(&s, 4, WordKind::NormalWord), 0);
        assert_eq!(previous_word_start(&s, 8, WordKind::NormalWord), 4);
        assert_eq!(previous_word_start(&s, 0, WordKind::NormalWord), 0);
    }

    #[test]
    fn backward_stops_at_empty_line() {
        let s = snap("foo\n\nbar");
        assert_eq!(previous_word_start(&s, 5, WordKind::NormalWord), 4);
        assert_eq!(previous_word_start(&s, 4, WordKind::NormalWord), 0);
    }

    #[test]
    fn keyword_lookup_on_line() {
        let s = snap("  foo bar\nbaz");
        let span = keyword_at_or_after(&s, 0).unwrap();
        assert_eq!(s.text_of(&span), "foo");
        let inside = keyword_at_or_after(&s, 7).unwrap();
        assert_eq!(s.text_of(&inside), "bar");
        assert!(keyword_at_or_after(&s, 9).is_none());
        assert!(keyword_at_or_after(&snap("  ++"), 0).is_none());
    }
}
