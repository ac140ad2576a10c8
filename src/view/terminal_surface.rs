//! `ScreenSurface` backed by a ratatui `Terminal`.
//!
//! Used for both the fullscreen and the inline viewport. The inline viewport
//! is a fixed area anchored to the bottom rows of the screen, recomputed from
//! the screen size on every size query. Nothing here asks the terminal for
//! the cursor position, so stdout is never written to.

use super::styles::Palette;
use super::surface::{ScreenSurface, StyleRole, SurfaceSize};
use ratatui::backend::Backend;
use ratatui::layout::{Rect, Size};
use ratatui::Terminal;
use std::io;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct PendingWrite {
    row: u16,
    col: u16,
    text: String,
    role: StyleRole,
}

/// Area of an inline viewport of `height` rows on a screen of `screen` size.
///
/// The area spans the full width and sits on the bottom rows. It is clamped
/// to the screen height.
pub fn inline_area(screen: Size, height: u16) -> Rect {
    let height = height.min(screen.height);
    Rect::new(0, screen.height - height, screen.width, height)
}

/// Buffers writes and paints them in one `Terminal::draw` on flush.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
    pending: Vec<PendingWrite>,
    /// Rows of the bottom-anchored viewport; `None` follows the terminal's
    /// own viewport.
    inline_height: Option<u16>,
}

impl<B: Backend> TerminalSurface<B> {
    /// Surface over the terminal's own viewport.
    pub fn new(terminal: Terminal<B>, palette: Palette) -> Self {
        Self {
            terminal,
            palette,
            pending: Vec::new(),
            inline_height: None,
        }
    }

    /// Surface over the bottom `height` rows of the screen.
    ///
    /// `terminal` should use a `Viewport::Fixed` area; it is moved to
    /// [`inline_area`] whenever the screen size changes.
    pub fn inline(terminal: Terminal<B>, palette: Palette, height: u16) -> Self {
        Self {
            inline_height: Some(height),
            ..Self::new(terminal, palette)
        }
    }

    /// The wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Blank the viewport and park the cursor at its top-left corner.
    ///
    /// Used when leaving the inline viewport so the prompt reappears where
    /// the selector was.
    pub fn clear_viewport(&mut self) -> io::Result<()> {
        self.pending.clear();
        // An empty frame overwrites every cell drawn by the previous one.
        self.terminal.draw(|_| {})?;
        let area = self.terminal.get_frame().area();
        self.terminal.set_cursor_position((area.x, area.y))?;
        self.terminal.show_cursor()
    }

    fn sync_viewport(&mut self) -> io::Result<()> {
        match self.inline_height {
            Some(height) => {
                let area = inline_area(self.terminal.size()?, height);
                if area != self.terminal.get_frame().area() {
                    debug!(?area, "Moving inline viewport");
                    self.terminal.resize(area)?;
                }
                Ok(())
            }
            None => self.terminal.autoresize(),
        }
    }
}

impl<B: Backend> ScreenSurface for TerminalSurface<B> {
    fn size(&mut self) -> io::Result<SurfaceSize> {
        self.sync_viewport()?;
        let area = self.terminal.get_frame().area();
        Ok(SurfaceSize::new(area.height, area.width))
    }

    fn erase(&mut self) {
        // Every draw starts from an empty buffer, so dropping pending writes
        // is enough.
        self.pending.clear();
    }

    fn write(&mut self, row: u16, col: u16, text: &str, role: StyleRole) {
        self.pending.push(PendingWrite {
            row,
            col,
            text: text.to_string(),
            role,
        });
    }

    fn flush(&mut self) -> io::Result<()> {
        let pending = std::mem::take(&mut self.pending);
        let palette = self.palette;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            for write in &pending {
                if write.row >= area.height || write.col >= area.width {
                    trace!(
                        row = write.row,
                        col = write.col,
                        "Clipped draw outside surface"
                    );
                    continue;
                }

                let max_width = usize::from(area.width - write.col);
                buf.set_stringn(
                    area.x + write.col,
                    area.y + write.row,
                    &write.text,
                    max_width,
                    palette.style_for(write.role),
                );
            }
        })?;

        Ok(())
    }
}
