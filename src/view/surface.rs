//! Abstract drawing contract used by the controller.
//!
//! The controller never talks to a terminal directly: it erases, writes
//! style-tagged text at `(row, col)` and flushes. Styles are resolved to
//! colours by the surface, not by the caller.

use std::io;

/// Semantic style of a drawn span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleRole {
    /// Plain text.
    #[default]
    Default,
    /// Matched characters of a candidate line.
    Highlight,
    /// The candidate under the highlight cursor.
    Selected,
    /// The status row.
    Status,
}

/// Size of a drawing surface in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    /// Height.
    pub rows: u16,
    /// Width.
    pub cols: u16,
}

impl SurfaceSize {
    /// Size of `rows` by `cols` cells.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// A screen the controller can draw on.
///
/// Writes are buffered until [`flush`](ScreenSurface::flush). Text that
/// would extend past the right or bottom edge is clipped by the surface.
pub trait ScreenSurface {
    /// Current size.
    fn size(&mut self) -> io::Result<SurfaceSize>;

    /// Discard everything written since the last flush and blank the screen.
    fn erase(&mut self);

    /// Draw `text` starting at `(row, col)` in `role`.
    fn write(&mut self, row: u16, col: u16, text: &str, role: StyleRole);

    /// Make pending writes visible.
    fn flush(&mut self) -> io::Result<()>;
}

// ===== RecordingSurface =====

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// [`ScreenSurface::erase`]
    Erase,
    /// [`ScreenSurface::write`]
    Write {
        /// Row of the first cell.
        row: u16,
        /// Column of the first cell.
        col: u16,
        /// Text as passed in, before clipping.
        text: String,
        /// Style role.
        role: StyleRole,
    },
}

/// In-memory surface that records every call.
///
/// Each flush moves the ops written since the previous flush into a frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    pending: Vec<DrawOp>,
    frames: Vec<Vec<DrawOp>>,
}

impl RecordingSurface {
    /// Empty recording of a `rows` by `cols` surface.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            size: SurfaceSize::new(rows, cols),
            ..Self::default()
        }
    }

    /// Change the size reported by the next `size()` call.
    pub fn set_size(&mut self, rows: u16, cols: u16) {
        self.size = SurfaceSize::new(rows, cols);
    }

    /// Flushed frames, oldest first.
    pub fn frames(&self) -> &[Vec<DrawOp>] {
        &self.frames
    }

    /// The most recently flushed frame.
    pub fn last_frame(&self) -> Option<&[DrawOp]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Text written to `row` in the last frame, concatenated in write order.
    pub fn row_text(&self, row: u16) -> String {
        self.last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Write { row: r, text, .. } if *r == row => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Writes to `row` in the last frame as `(col, text, role)`.
    pub fn row_spans(&self, row: u16) -> Vec<(u16, String, StyleRole)> {
        self.last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Write {
                    row: r,
                    col,
                    text,
                    role,
                } if *r == row => Some((*col, text.clone(), *role)),
                _ => None,
            })
            .collect()
    }
}

impl ScreenSurface for RecordingSurface {
    fn size(&mut self) -> io::Result<SurfaceSize> {
        Ok(self.size)
    }

    fn erase(&mut self) {
        self.pending.clear();
        self.pending.push(DrawOp::Erase);
    }

    fn write(&mut self, row: u16, col: u16, text: &str, role: StyleRole) {
        self.pending.push(DrawOp::Write {
            row,
            col,
            text: text.to_string(),
            role,
        });
    }

    fn flush(&mut self) -> io::Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}
