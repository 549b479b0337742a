mod common;
use common::*;

use core_actions::CommandError;
use core_config::Settings;
use core_state::Mode;
use core_text::EditError;
use pretty_assertions::assert_eq;

fn three_carets() -> Harness {
    let mut h = Harness::new("abc\nabc\nabc").at(0, 1);
    h.keys("<C-A-Down><C-A-Down>");
    h
}

#[test]
fn add_caret_below_and_above() {
    let h = three_carets();
    assert_eq!(h.carets(), vec![1, 5, 9]);
    assert_eq!(h.host.secondaries.len(), 2);

    let mut h = Harness::new("abc\nabc\nabc").at(1, 2);
    h.keys("<C-A-Up>");
    assert_eq!(h.carets(), vec![6, 2]);
    // No line above the topmost caret.
    h.keys("<C-A-Up>");
    assert_eq!(h.carets(), vec![6, 2]);
}

#[test]
fn insert_lands_at_every_caret_in_one_edit() {
    let mut h = three_carets();
    let version = h.vim.snapshot().version();
    h.keys("ix");
    assert_eq!(h.text(), "axbc\naxbc\naxbc");
    assert_eq!(h.vim.snapshot().version(), version + 1);
    assert_eq!(h.carets(), vec![2, 7, 12]);

    h.keys("<Esc>");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.carets(), vec![1, 6, 11]);
}

#[test]
fn rejected_batch_leaves_every_caret_in_place() {
    let mut h = three_carets();
    h.keys("i");
    h.vim.buffer_mut().set_read_only(true);
    let version = h.vim.snapshot().version();
    let err = h.vim.process_notation("x", &mut h.host, &mut h.data).unwrap_err();
    assert_eq!(err, CommandError::Edit(EditError::ReadOnly));
    assert_eq!(h.text(), "abc\nabc\nabc");
    assert_eq!(h.vim.snapshot().version(), version);
    assert_eq!(h.carets(), vec![1, 5, 9]);
    assert_eq!(h.host.secondaries.len(), 2);
}

#[test]
fn backspace_at_every_caret() {
    let mut h = three_carets();
    h.keys("a<BS>");
    assert_eq!(h.text(), "ac\nac\nac");
    assert_eq!(h.carets(), vec![1, 4, 7]);
}

#[test]
fn open_line_below_every_caret() {
    let mut h = Harness::new("a\nb");
    h.keys("<C-A-Down>ox");
    assert_eq!(h.text(), "a\nx\nb\nx");
    assert_eq!(h.mode(), Mode::Insert);
}

#[test]
fn motions_move_every_caret() {
    let mut h = three_carets();
    h.keys("l");
    assert_eq!(h.carets(), vec![2, 6, 10]);
    h.keys("0");
    assert_eq!(h.carets(), vec![0, 4, 8]);
}

#[test]
fn primary_only_commands_refuse_secondaries() {
    let mut h = three_carets();
    let before = h.selections();
    let err = h.vim.process_notation("dd", &mut h.host, &mut h.data).unwrap_err();
    assert_eq!(err, CommandError::UnsupportedInMultiSelection);
    assert_eq!(h.text(), "abc\nabc\nabc");
    assert_eq!(h.selections(), before);
    assert_eq!(h.mode(), Mode::Normal);

    let err = h.vim.process_notation("J", &mut h.host, &mut h.data).unwrap_err();
    assert_eq!(err, CommandError::UnsupportedInMultiSelection);
}

#[test]
fn escape_in_normal_mode_drops_secondaries() {
    let mut h = three_carets();
    h.keys("<Esc>");
    assert_eq!(h.carets(), vec![1]);
    assert!(h.host.secondaries.is_empty());
}

#[test]
fn host_without_multiple_selections_keeps_one_caret() {
    let mut h = Harness::with_host("abc\nabc", Settings::default(), MockHost::single_selection()).at(0, 1);
    h.keys("<C-A-Down>");
    assert_eq!(h.carets(), vec![1]);
    assert!(!h.vim.selections().has_secondaries());
}

#[test]
fn carets_merge_when_they_meet() {
    let mut h = Harness::new("ab\nab").at(0, 1);
    h.keys("<C-A-Down>");
    assert_eq!(h.carets(), vec![1, 4]);
    h.keys("k");
    assert_eq!(h.carets(), vec![1]);
    assert!(h.host.secondaries.is_empty());
}
