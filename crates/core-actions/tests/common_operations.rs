mod common;
use common::*;

use core_actions::{CommandError, JoinKind};
use core_config::Settings;
use core_state::Mode;
use core_text::{EditError, OperationKind, Span};
use pretty_assertions::assert_eq;

#[test]
fn join_inserts_single_space() {
    let mut h = Harness::new("foo\nbar");
    h.keys("J");
    assert_eq!(h.text(), "foo bar");
    assert_eq!(h.caret(), 4);
}

#[test]
fn join_drops_indentation_of_next_line() {
    let mut h = Harness::new("foo\n    bar");
    h.keys("J");
    assert_eq!(h.text(), "foo bar");
    assert_eq!(h.caret(), 4);
}

#[test]
fn join_with_count_joins_that_many_lines() {
    let mut h = Harness::new("a\nb\nc\nd");
    h.keys("3J");
    assert_eq!(h.text(), "a b c\nd");
    assert_eq!(h.caret(), 4);
}

#[test]
fn join_three_words() {
    let mut h = Harness::new("foo\nbar\nbaz");
    h.keys("3J");
    assert_eq!(h.text(), "foo bar baz");
    assert_eq!(h.caret(), 8);
}

#[test]
fn join_keep_spaces_removes_only_break() {
    let mut h = Harness::new("foo\n  bar");
    h.keys("gJ");
    assert_eq!(h.text(), "foo  bar");
    assert_eq!(h.caret(), 3);

    let mut direct = Harness::new("foo\nbar");
    direct.ops().join(2, JoinKind::KeepEmptySpaces).unwrap();
    assert_eq!(direct.text(), "foobar");
}

#[test]
fn join_on_last_line_is_noop() {
    let mut h = Harness::new("foo\nbar").at(1, 0);
    let result = h.keys("J");
    assert!(!result.buffer_changed);
    assert_eq!(h.text(), "foo\nbar");
}

#[test]
fn paste_after_char_and_line_wise() {
    let mut h = Harness::new("foo\nbar");
    let point = h.vim.snapshot().point(0);
    let span = h.ops().paste_after(point, "xy", OperationKind::CharacterWise).unwrap();
    assert_eq!(h.text(), "fxyoo\nbar");
    assert_eq!((span.start.offset, span.end.offset), (1, 3));

    let mut h = Harness::new("foo\nbar");
    let point = h.vim.snapshot().point(1);
    let span = h.ops().paste_after(point, "baz\n", OperationKind::LineWise).unwrap();
    assert_eq!(h.text(), "foo\nbaz\nbar");
    assert_eq!((span.start.offset, span.end.offset), (4, 8));
}

#[test]
fn paste_after_last_line_moves_break_in_front() {
    let mut h = Harness::new("foo\nbar");
    let point = h.vim.snapshot().point(5);
    let span = h.ops().paste_after(point, "baz", OperationKind::LineWise).unwrap();
    assert_eq!(h.text(), "foo\nbar\nbaz");
    assert_eq!((span.start.offset, span.end.offset), (8, 11));
}

#[test]
fn paste_before_line_wise_goes_above() {
    let mut h = Harness::new("foo\nbar");
    let point = h.vim.snapshot().point(5);
    let span = h.ops().paste_before(point, "baz", OperationKind::LineWise).unwrap();
    assert_eq!(h.text(), "foo\nbaz\nbar");
    assert_eq!((span.start.offset, span.end.offset), (4, 8));
}

#[test]
fn yank_line_and_put_below() {
    let mut h = Harness::new("foo\nbar");
    h.keys("yyp");
    assert_eq!(h.text(), "foo\nfoo\nbar");
    assert_eq!(h.caret_lc(), (1, 0));
    assert_eq!(h.unnamed(), Some(("foo\n".to_string(), OperationKind::LineWise)));
    assert_eq!(h.register('0'), Some(("foo\n".to_string(), OperationKind::LineWise)));
}

#[test]
fn put_char_wise_lands_on_last_pasted_char() {
    let mut h = Harness::new("abc");
    h.keys("xp");
    assert_eq!(h.text(), "bac");
    assert_eq!(h.caret(), 1);

    let mut h = Harness::new("ab");
    h.keys("yl3P");
    assert_eq!(h.text(), "aaaab");
    assert_eq!(h.caret(), 2);
}

#[test]
fn put_from_empty_register_does_nothing() {
    let mut h = Harness::new("abc");
    let result = h.keys("\"qp");
    assert!(!result.buffer_changed);
    assert_eq!(h.text(), "abc");
}

#[test]
fn shift_right_skips_empty_lines() {
    let mut h = Harness::new("foo\n\nbar");
    h.keys("3>>");
    assert_eq!(h.text(), "  foo\n\n  bar");
    assert_eq!(h.caret(), 2);
}

#[test]
fn shift_left_removes_at_most_shiftwidth() {
    let mut h = Harness::new("   foo\n\tbar\nbaz");
    h.keys("3<lt><lt>");
    assert_eq!(h.text(), " foo\nbar\nbaz");
    assert_eq!(h.caret(), 1);
}

#[test]
fn shift_left_leaves_blank_lines_alone() {
    let mut h = Harness::new("  \n  x");
    h.keys("2<lt><lt>");
    assert_eq!(h.text(), "  \nx");
}

#[test]
fn shift_with_motion_and_custom_width() {
    let settings = Settings {
        shift_width: 4,
        ..Settings::default()
    };
    let mut h = Harness::with_settings("a\nb\nc", settings);
    h.keys(">j");
    assert_eq!(h.text(), "    a\n    b\nc");
}

#[test]
fn delete_lines_keeps_empty_line() {
    let mut h = Harness::new("foo\nbar\nbaz").at(0, 1);
    h.ops().delete_lines(1, None).unwrap();
    assert_eq!(h.text(), "\nbar\nbaz");
    assert_eq!(h.caret(), 0);
    assert_eq!(h.unnamed(), Some(("foo".to_string(), OperationKind::LineWise)));
}

#[test]
fn delete_to_line_end_from_cursor() {
    let mut h = Harness::new("foo\nbar\nbaz").at(0, 1);
    h.ops().delete_lines_from_cursor(1, None).unwrap();
    assert_eq!(h.text(), "f\nbar\nbaz");
    assert_eq!(h.caret(), 0);
    assert_eq!(h.unnamed(), Some(("oo".to_string(), OperationKind::CharacterWise)));
    assert_eq!(h.register('-'), Some(("oo".to_string(), OperationKind::CharacterWise)));
}

#[test]
fn delete_lines_including_break() {
    let mut h = Harness::new("foo\nbar\nbaz").at(0, 1);
    h.ops().delete_lines_including_line_break(2, None).unwrap();
    assert_eq!(h.text(), "baz");
    assert_eq!(h.unnamed(), Some(("foo\nbar\n".to_string(), OperationKind::LineWise)));
    assert_eq!(h.register('1'), Some(("foo\nbar\n".to_string(), OperationKind::LineWise)));
}

#[test]
fn delete_from_cursor_including_break() {
    let mut h = Harness::new("foo\nbar\nbaz").at(0, 1);
    h.ops().delete_lines_including_line_break_from_cursor(1, None).unwrap();
    assert_eq!(h.text(), "fbar\nbaz");
    assert_eq!(h.unnamed(), Some(("oo\n".to_string(), OperationKind::CharacterWise)));
}

#[test]
fn dd_on_last_line_takes_preceding_break() {
    let mut h = Harness::new("foo\n  bar").at(1, 3);
    h.keys("dd");
    assert_eq!(h.text(), "foo");
    assert_eq!(h.caret(), 0);
    assert_eq!(h.unnamed(), Some(("  bar\n".to_string(), OperationKind::LineWise)));
}

#[test]
fn line_deletes_rotate_numbered_registers() {
    let mut h = Harness::new("a\nb\nc");
    h.keys("dddd");
    assert_eq!(h.text(), "c");
    assert_eq!(h.register('1'), Some(("b\n".to_string(), OperationKind::LineWise)));
    assert_eq!(h.register('2'), Some(("a\n".to_string(), OperationKind::LineWise)));
}

#[test]
fn black_hole_delete_keeps_registers() {
    let mut h = Harness::new("a\nb");
    h.keys("\"_dd");
    assert_eq!(h.text(), "b");
    assert_eq!(h.unnamed(), None);
}

#[test]
fn named_register_round_trip() {
    let mut h = Harness::new("foo");
    h.keys("\"ayy\"ap");
    assert_eq!(h.text(), "foo\nfoo");
    assert_eq!(h.register('a'), Some(("foo\n".to_string(), OperationKind::LineWise)));
}

#[test]
fn word_and_char_deletes() {
    let mut h = Harness::new("foo bar");
    h.keys("dw");
    assert_eq!(h.text(), "bar");
    assert_eq!(h.register('-'), Some(("foo ".to_string(), OperationKind::CharacterWise)));

    let mut h = Harness::new("a b c");
    h.keys("d2w");
    assert_eq!(h.text(), "c");

    let mut h = Harness::new("abc").at(0, 2);
    h.keys("x");
    assert_eq!(h.text(), "ab");
    assert_eq!(h.caret(), 1);

    let mut h = Harness::new("abc").at(0, 2);
    h.keys("X");
    assert_eq!(h.text(), "ac");
    assert_eq!(h.caret(), 1);

    let mut h = Harness::new("foo bar").at(0, 3);
    h.keys("D");
    assert_eq!(h.text(), "foo");
    assert_eq!(h.caret(), 2);
}

#[test]
fn case_operators() {
    let mut h = Harness::new("fOo");
    h.keys("g~~");
    assert_eq!(h.text(), "FoO");

    let mut h = Harness::new("f12o");
    h.keys("gUgU");
    assert_eq!(h.text(), "F12O");

    let mut h = Harness::new("ABC def");
    h.keys("guw");
    assert_eq!(h.text(), "abc def");
    assert_eq!(h.caret(), 0);
}

fn whole(h: &Harness) -> Span {
    let s = h.vim.snapshot();
    Span::from_offsets(s, 0, s.len())
}

#[test]
fn toggle_case_is_an_involution() {
    let mut h = Harness::new("Hello, World 42");
    let span = whole(&h);
    h.ops().change_letter_case(span).unwrap();
    assert_eq!(h.text(), "hELLO, wORLD 42");
    let span = whole(&h);
    h.ops().change_letter_case(span).unwrap();
    assert_eq!(h.text(), "Hello, World 42");
}

#[test]
fn upper_and_lower_case_are_idempotent() {
    let mut h = Harness::new("Hello, World 42");
    for _ in 0..2 {
        let span = whole(&h);
        h.ops().make_uppercase(span).unwrap();
        assert_eq!(h.text(), "HELLO, WORLD 42");
    }
    for _ in 0..2 {
        let span = whole(&h);
        h.ops().make_lowercase(span).unwrap();
        assert_eq!(h.text(), "hello, world 42");
    }
}

#[test]
fn tilde_toggles_and_advances() {
    let mut h = Harness::new("abc");
    h.keys("2~");
    assert_eq!(h.text(), "ABc");
    assert_eq!(h.caret(), 2);
}

#[test]
fn right_stops_on_last_char() {
    let mut h = Harness::new("abc");
    h.keys("lllll");
    assert_eq!(h.caret(), 2);
}

#[test]
fn vertical_moves_notify_host_per_line() {
    let mut h = Harness::new("a\nb\nc");
    h.keys("jj");
    assert_eq!(h.caret_lc(), (2, 0));
    assert_eq!(h.host.lines_down, 2);

    h.keys("j");
    assert_eq!(h.host.lines_down, 2);

    h.keys("5k");
    assert_eq!(h.caret_lc(), (0, 0));
    assert_eq!(h.host.lines_up, 2);
}

#[test]
fn read_only_buffer_rejects_edits_and_keeps_registers() {
    let mut h = Harness::new("foo\nbar");
    h.vim.buffer_mut().set_read_only(true);
    let err = h
        .vim
        .process_notation("dd", &mut h.host, &mut h.data)
        .unwrap_err();
    assert_eq!(err, CommandError::Edit(EditError::ReadOnly));
    assert_eq!(h.text(), "foo\nbar");
    assert_eq!(h.unnamed(), None);
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn scroll_lines_uses_half_window_by_default() {
    let text = vec!["x"; 30].join("\n");
    let mut h = Harness::new(&text);
    h.keys("<C-d>");
    assert_eq!(h.host.scrolled_lines, vec![(core_actions::ScrollDirection::Down, 12)]);
    assert_eq!(h.caret_lc(), (12, 0));

    h.keys("3<C-u>");
    assert_eq!(h.caret_lc(), (9, 0));
}

#[test]
fn scroll_pages_stop_at_document_edge() {
    let text = vec!["x"; 60].join("\n");
    let mut host = MockHost::new();
    host.pages_left = 1;
    let mut h = Harness::with_host(&text, Settings::default(), host);
    h.keys("2<C-f>");
    assert_eq!(h.host.pages_scrolled, 1);
    assert_eq!(h.caret_lc(), (24, 0));

    h.keys("<C-b>");
    assert_eq!(h.caret_lc(), (24, 0));
}

#[test]
fn go_to_definition_needs_a_word() {
    let mut h = Harness::new("   \nfoo");
    let err = h.vim.process_notation("gd", &mut h.host, &mut h.data).unwrap_err();
    assert_eq!(err, CommandError::NoWordUnderCursor);
    assert_eq!(h.host.definition_requests, 0);

    let mut h = Harness::new("  foo bar");
    h.keys("gd");
    assert_eq!(h.host.definition_requests, 1);
    assert_eq!(h.vim.jumps().len(), 1);

    h.host.definition_found = false;
    let err = h.vim.process_notation("gd", &mut h.host, &mut h.data).unwrap_err();
    assert_eq!(err, CommandError::DefinitionNotFound("foo".to_string()));
}
