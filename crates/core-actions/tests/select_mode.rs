mod common;
use common::*;

use core_config::{KeyModelOptions, SelectModeOptions, SelectionInclusivity, Settings};
use core_state::{Mode, VisualKind};
use pretty_assertions::assert_eq;

fn exclusive() -> Settings {
    Settings {
        selection: SelectionInclusivity::Exclusive,
        select_mode: SelectModeOptions::MOUSE | SelectModeOptions::KEY,
        key_model: KeyModelOptions::START_SELECTION | KeyModelOptions::STOP_SELECTION,
        ..Settings::default()
    }
}

/// Two carets at column 4 of a two-line buffer.
fn word_grid() -> Harness {
    let mut h = Harness::with_settings("abc def ghi\njkl mno pqr", exclusive()).at(0, 4);
    h.keys("<C-A-Down>");
    assert_eq!(h.carets(), vec![4, 16]);
    h
}

#[test]
fn shifted_arrow_starts_select_mode_at_every_caret() {
    let mut h = Harness::with_settings("abc\ndef", exclusive());
    h.keys("<C-A-Down><S-Right>");
    assert_eq!(h.mode(), Mode::Select);
    assert_eq!(h.selections(), vec![(0, 1), (4, 5)]);
}

#[test]
fn select_by_word_and_type_over() {
    let mut h = word_grid();
    h.keys("gh<C-S-Right>");
    assert_eq!(h.mode(), Mode::Select);
    assert_eq!(h.selections(), vec![(4, 8), (16, 20)]);

    h.keys("xxx ");
    assert_eq!(h.text(), "abc xxx ghi\njkl xxx pqr");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.carets(), vec![8, 20]);
}

#[test]
fn select_backwards_by_word() {
    let mut h = word_grid();
    h.keys("w");
    assert_eq!(h.carets(), vec![8, 20]);
    h.keys("gh<C-S-Left>");
    assert_eq!(h.selections(), vec![(8, 4), (20, 16)]);
}

#[test]
fn backspace_deletes_selections() {
    let mut h = word_grid();
    h.keys("gh<C-S-Right><BS>");
    assert_eq!(h.text(), "abc ghi\njkl pqr");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.carets(), vec![4, 12]);
}

#[test]
fn unshifted_arrow_stops_selection() {
    let mut h = word_grid();
    h.keys("gh<C-S-Right><Right>");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.selections(), vec![(9, 9), (21, 21)]);
}

#[test]
fn inclusive_selection_replaces_char_under_caret() {
    let mut h = Harness::new("abc def");
    h.keys("gh<S-Right>");
    assert_eq!(h.selections(), vec![(0, 1)]);
    h.keys("X");
    assert_eq!(h.text(), "Xc def");
    assert_eq!(h.caret(), 1);
}

#[test]
fn without_startsel_shifted_arrow_just_moves() {
    let settings = Settings {
        key_model: KeyModelOptions::empty(),
        ..exclusive()
    };
    let mut h = Harness::with_settings("abc", settings);
    h.keys("<S-Right>");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.selections(), vec![(1, 1)]);
}

#[test]
fn without_key_in_selectmode_shifted_arrow_starts_visual() {
    let settings = Settings {
        select_mode: SelectModeOptions::MOUSE,
        ..exclusive()
    };
    let mut h = Harness::with_settings("abc", settings);
    h.keys("<S-Right>");
    assert_eq!(h.mode(), Mode::Visual(VisualKind::Character));
    assert_eq!(h.selections(), vec![(0, 1)]);
}

#[test]
fn escape_leaves_select_mode() {
    let mut h = word_grid();
    h.keys("gh<C-S-Right><Esc>");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.selections(), vec![(8, 8), (20, 20)]);
}

#[test]
fn widened_inclusive_selections_merge_into_one_replacement() {
    let mut h = Harness::new("ab\ncd ef");
    h.keys("<C-A-Down>gh<C-S-Right>");
    assert_eq!(h.selections(), vec![(0, 3), (3, 6)]);
    h.keys("X");
    assert_eq!(h.text(), "Xf");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.carets(), vec![1]);
}
