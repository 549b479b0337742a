//! Boundary to the embedding editor.
//!
//! The engine owns no view. It reads and writes the primary selection, asks for navigation
//! and viewport scrolling, and reports secondary carets for rendering through this trait.

use core_state::SelectedSpan;
use core_text::{BufferId, Point, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

pub trait Host {
    /// The primary caret and its selection.
    fn primary_selection(&self) -> SelectedSpan;

    fn set_primary_selection(&mut self, span: SelectedSpan);

    /// Secondary carets changed; `spans` excludes the primary.
    fn secondary_selections_changed(&mut self, _spans: &[SelectedSpan]) {}

    fn supports_multiple_selections(&self) -> bool {
        false
    }

    /// Open `buffer` (if needed) and place its caret on `point`. False when it could not.
    fn navigate_to(&mut self, buffer: BufferId, point: Point) -> bool;

    /// Run the language service's go-to-definition for the caret. False when nothing was found.
    fn go_to_definition(&mut self) -> bool {
        false
    }

    /// Make sure no collapsed region hides `span`.
    fn expand_folds(&mut self, _span: Span) {}

    fn reset_selection(&mut self) {}

    /// Viewport follow-up for a caret moved one line up.
    fn move_line_up(&mut self) {}

    fn move_line_down(&mut self) {}

    /// Scroll the viewport by `count` lines without moving the caret.
    fn scroll_lines(&mut self, _direction: ScrollDirection, _count: usize) {}

    /// False once the viewport cannot scroll further.
    fn scroll_page_up(&mut self) -> bool {
        false
    }

    fn scroll_page_down(&mut self) -> bool {
        false
    }
}
