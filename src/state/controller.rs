//! Interactive selection state machine.
//!
//! The controller owns the query, the match window and the highlight cursor.
//! It consumes abstract [`KeyAction`]s and draws through a [`ScreenSurface`];
//! it knows nothing about terminals or key codes.

use super::query_edit::{delete_last_char, is_insertable, strip_last_word};
use crate::model::{Action, ActionName, KeyAction, Selection};
use crate::search::{LineMatcher, MatchResult, SubstringMatcher};
use crate::source::LineStore;
use crate::view::surface::{ScreenSurface, StyleRole, SurfaceSize};
use std::borrow::Cow;
use std::io;
use tracing::debug;
use unicode_width::UnicodeWidthChar;

/// Rows above the match window: the query row and the status row.
pub const RESERVED_ROWS: u16 = 2;

const QUERY_ROW: u16 = 0;
const STATUS_ROW: u16 = 1;
const QUERY_PROMPT: &str = "> ";
const TAB_EXPANSION: &str = "    ";

/// Behaviour switches fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    /// Tab ends the selection instead of being ignored.
    pub tab_exits: bool,
    /// Count every match for the status row, not only the visible ones.
    pub extended_status: bool,
}

/// Interactive selection controller.
///
/// # Invariants
///
/// - `window.len() <= rows - RESERVED_ROWS` for the last known size.
/// - `highlight` is `Some(i)` with `i < window.len()` whenever the window is
///   non-empty, and `None` otherwise.
/// - `matched_total` is `Some` exactly in extended-status mode.
#[derive(Debug)]
pub struct Controller<M = SubstringMatcher> {
    store: LineStore,
    matcher: M,
    query: String,
    options: ControllerOptions,
    size: SurfaceSize,
    window: Vec<MatchResult>,
    highlight: Option<usize>,
    matched_total: Option<usize>,
}

impl<M: LineMatcher> Controller<M> {
    /// Create a controller. Nothing is matched until [`setup`](Self::setup).
    pub fn new(
        store: LineStore,
        matcher: M,
        initial_query: impl Into<String>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            store,
            matcher,
            query: initial_query.into(),
            options,
            size: SurfaceSize::default(),
            window: Vec::new(),
            highlight: None,
            matched_total: None,
        }
    }

    /// Record the initial surface size and compute the first match window.
    pub fn setup(&mut self, size: SurfaceSize) {
        self.size = size;
        self.rematch();
    }

    /// React to a surface size change. Re-matches only if the size differs.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size == self.size {
            return;
        }
        debug!(rows = size.rows, cols = size.cols, "Surface resized");
        self.size = size;
        self.rematch();
    }

    /// Apply one input.
    ///
    /// Returns a [`Selection`] when the input ends the run.
    pub fn process_input(&mut self, action: KeyAction) -> Option<Selection> {
        match action {
            KeyAction::Insert(c) => {
                if is_insertable(c) {
                    self.query.push(c);
                    self.rematch();
                }
                None
            }
            KeyAction::DeleteChar => {
                if delete_last_char(&mut self.query) {
                    self.rematch();
                }
                None
            }
            KeyAction::DeleteWord => {
                self.query = strip_last_word(&self.query);
                self.rematch();
                None
            }
            KeyAction::NextCandidate => {
                self.move_highlight(1);
                None
            }
            KeyAction::PrevCandidate => {
                self.move_highlight(-1);
                None
            }
            KeyAction::Finish(ActionName::Tab) if !self.options.tab_exits => None,
            KeyAction::Finish(name) => Some(Selection::new(Action::new(name), self.selected_text())),
        }
    }

    /// Draw the current state.
    ///
    /// Pure with respect to the controller: rendering twice without an
    /// intervening input produces identical output.
    pub fn render<S: ScreenSurface + ?Sized>(&self, surface: &mut S) -> io::Result<()> {
        surface.erase();

        for (offset, result) in self.window.iter().enumerate() {
            let row = RESERVED_ROWS.saturating_add(offset as u16);
            self.render_match(surface, row, offset, result);
        }

        let width = self.width();
        let status = self.status_text();
        let status = format!("{status:>width$}");
        draw_text(surface, width, STATUS_ROW, 0, &status, StyleRole::Status);

        let query_line = format!("{QUERY_PROMPT}{}", self.query);
        draw_text(surface, width, QUERY_ROW, 0, &query_line, StyleRole::Default);

        surface.flush()
    }

    fn render_match<S: ScreenSurface + ?Sized>(
        &self,
        surface: &mut S,
        row: u16,
        offset: usize,
        result: &MatchResult,
    ) {
        let width = self.width();
        let line = self.store.get(result.line_index);

        if self.highlight == Some(offset) {
            let padded = pad_to_width(&expand_tabs(line), width);
            draw_text(surface, width, row, 0, &padded, StyleRole::Selected);
            return;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut col = 0;
        let mut last = 0;
        for range in &result.ranges {
            let before: String = chars[last..range.start].iter().collect();
            col = draw_text(surface, width, row, col, &before, StyleRole::Default);
            let matched: String = chars[range.start..range.end].iter().collect();
            col = draw_text(surface, width, row, col, &matched, StyleRole::Highlight);
            last = range.end;
        }
        let rest: String = chars[last..].iter().collect();
        draw_text(surface, width, row, col, &rest, StyleRole::Default);
    }

    /// Text for the status row, before right-justification.
    pub fn status_text(&self) -> String {
        let visible = format_count(self.window.len());
        let total = format_count(self.store.count());
        match self.matched_total {
            Some(matched) => format!(
                "{visible} of {} matches among {total} lines ",
                format_count(matched)
            ),
            None => format!("{visible} of {total} lines "),
        }
    }

    /// Highlighted candidate, else the first candidate, else the raw query.
    pub fn selected_text(&self) -> String {
        self.highlight
            .and_then(|index| self.window.get(index))
            .or_else(|| self.window.first())
            .map(|result| self.store.get(result.line_index).to_string())
            .unwrap_or_else(|| self.query.clone())
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matches shown on screen, at most one per candidate row.
    pub fn window(&self) -> &[MatchResult] {
        &self.window
    }

    /// Index into [`window`](Self::window) of the highlighted candidate.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Total match count, kept only with extended status.
    pub fn matched_total(&self) -> Option<usize> {
        self.matched_total
    }

    /// Surface size used for the last layout.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// The candidate lines.
    pub fn store(&self) -> &LineStore {
        &self.store
    }

    fn width(&self) -> usize {
        usize::from(self.size.cols)
    }

    fn window_capacity(&self) -> usize {
        usize::from(self.size.rows.saturating_sub(RESERVED_ROWS))
    }

    fn rematch(&mut self) {
        let capacity = self.window_capacity();
        let mut matches = self.matcher.search(&self.store, &self.query);

        self.window = matches.by_ref().take(capacity).collect();
        self.matched_total = if self.options.extended_status {
            Some(self.window.len() + matches.count())
        } else {
            None
        };
        self.highlight = if self.window.is_empty() { None } else { Some(0) };

        debug!(
            query = %self.query,
            visible = self.window.len(),
            matched = ?self.matched_total,
            "Re-matched"
        );
    }

    fn move_highlight(&mut self, delta: isize) {
        let len = self.window.len();
        if len == 0 {
            return;
        }
        let current = self.highlight.unwrap_or(0);
        let next = if delta >= 0 {
            (current + 1) % len
        } else if current == 0 {
            len - 1
        } else {
            current - 1
        };
        self.highlight = Some(next);
    }
}

// ===== Text helpers =====

/// Draw `text` at `(row, col)`, clipped to `width`.
///
/// Tabs expand to four spaces. Returns the column just past the text as if
/// it had not been clipped. Draws starting at or past the edge are no-ops.
fn draw_text<S: ScreenSurface + ?Sized>(
    surface: &mut S,
    width: usize,
    row: u16,
    col: usize,
    text: &str,
    role: StyleRole,
) -> usize {
    if col >= width {
        return col;
    }
    let expanded = expand_tabs(text);
    let visible = truncate_to_width(&expanded, width - col);
    if !visible.is_empty() {
        surface.write(row, col as u16, visible, role);
    }
    col + display_width(&expanded)
}

fn expand_tabs(text: &str) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', TAB_EXPANSION))
    } else {
        Cow::Borrowed(text)
    }
}

/// Columns taken by `c`; control characters take none.
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Columns taken by `text`, summed with [`char_width`].
fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Longest prefix of `text` that fits in `max_width` columns.
fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (byte_index, c) in text.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            return &text[..byte_index];
        }
        used += w;
    }
    text
}

fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(current));
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    padded
}

/// Format a count with `,` thousands separators.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
