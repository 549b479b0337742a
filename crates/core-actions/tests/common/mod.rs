#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{CommonOperations, DispatchResult, Host, ScrollDirection, VimBuffer, VimData};
use core_config::Settings;
use core_state::{Mode, SelectedSpan};
use core_text::{BufferId, Point, Span, TextBuffer};

/// Recording host: holds the primary selection and counts every viewport request.
#[derive(Debug)]
pub struct MockHost {
    pub primary: SelectedSpan,
    pub secondaries: Vec<SelectedSpan>,
    pub multiple: bool,
    pub lines_up: usize,
    pub lines_down: usize,
    pub scrolled_lines: Vec<(ScrollDirection, usize)>,
    /// Page scrolls the host still accepts before reporting the edge of the document.
    pub pages_left: usize,
    pub pages_scrolled: usize,
    pub folds_expanded: Vec<Span>,
    pub navigate_result: bool,
    pub navigations: Vec<(BufferId, Point)>,
    pub definition_found: bool,
    pub definition_requests: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            primary: SelectedSpan::caret(Point::new(0, 0)),
            secondaries: Vec::new(),
            multiple: true,
            lines_up: 0,
            lines_down: 0,
            scrolled_lines: Vec::new(),
            pages_left: 0,
            pages_scrolled: 0,
            folds_expanded: Vec::new(),
            navigate_result: true,
            navigations: Vec::new(),
            definition_found: true,
            definition_requests: 0,
        }
    }

    pub fn single_selection() -> Self {
        Self {
            multiple: false,
            ..Self::new()
        }
    }

    pub fn caret(&self) -> usize {
        self.primary.caret_offset()
    }
}

impl Host for MockHost {
    fn primary_selection(&self) -> SelectedSpan {
        self.primary
    }

    fn set_primary_selection(&mut self, span: SelectedSpan) {
        self.primary = span;
    }

    fn secondary_selections_changed(&mut self, spans: &[SelectedSpan]) {
        self.secondaries = spans.to_vec();
    }

    fn supports_multiple_selections(&self) -> bool {
        self.multiple
    }

    fn navigate_to(&mut self, buffer: BufferId, point: Point) -> bool {
        self.navigations.push((buffer, point));
        self.navigate_result
    }

    fn go_to_definition(&mut self) -> bool {
        self.definition_requests += 1;
        self.definition_found
    }

    fn expand_folds(&mut self, span: Span) {
        self.folds_expanded.push(span);
    }

    fn move_line_up(&mut self) {
        self.lines_up += 1;
    }

    fn move_line_down(&mut self) {
        self.lines_down += 1;
    }

    fn scroll_lines(&mut self, direction: ScrollDirection, count: usize) {
        self.scrolled_lines.push((direction, count));
    }

    fn scroll_page_up(&mut self) -> bool {
        self.page()
    }

    fn scroll_page_down(&mut self) -> bool {
        self.page()
    }
}

impl MockHost {
    fn page(&mut self) -> bool {
        if self.pages_left == 0 {
            return false;
        }
        self.pages_left -= 1;
        self.pages_scrolled += 1;
        true
    }
}

/// Buffer, host and session data wired together for one scenario.
pub struct Harness {
    pub vim: VimBuffer,
    pub host: MockHost,
    pub data: VimData,
}

impl Harness {
    pub fn new(text: &str) -> Self {
        Self::with_settings(text, Settings::default())
    }

    pub fn with_settings(text: &str, settings: Settings) -> Self {
        Self::with_host(text, settings, MockHost::new())
    }

    pub fn with_host(text: &str, settings: Settings, host: MockHost) -> Self {
        Self {
            vim: VimBuffer::new(TextBuffer::new(BufferId(1), text)),
            host,
            data: VimData::new(settings),
        }
    }

    /// Place the primary caret at `(line, column)`.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.set_caret(line, column);
        self
    }

    pub fn set_caret(&mut self, line: usize, column: usize) {
        let point = self.vim.snapshot().point_at(line, column);
        self.host.primary = SelectedSpan::caret(point);
    }

    pub fn keys(&mut self, script: &str) -> DispatchResult {
        self.vim
            .process_notation(script, &mut self.host, &mut self.data)
            .unwrap_or_else(|err| panic!("keys {script:?} failed: {err}"))
    }

    pub fn ops(&mut self) -> CommonOperations<'_> {
        self.vim.operations(&mut self.host, &mut self.data)
    }

    pub fn text(&self) -> String {
        self.vim.snapshot().text()
    }

    pub fn mode(&self) -> Mode {
        self.vim.mode()
    }

    pub fn caret(&self) -> usize {
        self.host.caret()
    }

    /// Caret as `(line, column)`.
    pub fn caret_lc(&self) -> (usize, usize) {
        self.vim.snapshot().line_column(self.caret())
    }

    /// Every caret offset, primary first.
    pub fn carets(&self) -> Vec<usize> {
        self.vim
            .all_selections(&self.host)
            .iter()
            .map(SelectedSpan::caret_offset)
            .collect()
    }

    /// `(anchor, active)` of every selection, primary first.
    pub fn selections(&self) -> Vec<(usize, usize)> {
        self.vim
            .all_selections(&self.host)
            .iter()
            .map(|s| (s.anchor.offset(), s.active.offset()))
            .collect()
    }

    pub fn unnamed(&self) -> Option<(String, core_text::OperationKind)> {
        self.register('"')
    }

    pub fn register(&self, name: char) -> Option<(String, core_text::OperationKind)> {
        let name = core_state::RegisterName::from_char(name)?;
        self.data
            .registers
            .get(name)
            .map(|v| (v.text.clone(), v.kind))
    }
}
