//! Terminal management and the interactive event loop (impure shell)

pub mod styles;
pub mod surface;
pub mod terminal_surface;

pub use styles::{ColorConfig, Palette};
pub use surface::{DrawOp, RecordingSurface, ScreenSurface, StyleRole, SurfaceSize};
pub use terminal_surface::{inline_area, TerminalSurface};

use crate::config::{Backend, KeyBindings};
use crate::model::Selection;
use crate::search::LineMatcher;
use crate::state::Controller;
use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, layout::Size, Terminal, TerminalOptions, Viewport};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

// ===== TtyWriter =====

/// Output stream for drawing.
///
/// Stdout carries the selection, so drawing goes to the controlling terminal,
/// or to stderr where no `/dev/tty` can be opened.
#[derive(Debug)]
pub enum TtyWriter {
    /// The controlling terminal opened read-write.
    Tty(File),
    /// Fallback when there is no controlling terminal.
    Stderr(io::Stderr),
}

impl TtyWriter {
    /// Open `/dev/tty`, falling back to stderr.
    pub fn open() -> Self {
        match OpenOptions::new().read(true).write(true).open("/dev/tty") {
            Ok(file) => Self::Tty(file),
            Err(err) => {
                debug!(error = %err, "No controlling terminal, drawing to stderr");
                Self::Stderr(io::stderr())
            }
        }
    }
}

impl Write for TtyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tty(file) => file.write(buf),
            Self::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tty(file) => file.flush(),
            Self::Stderr(stderr) => stderr.flush(),
        }
    }
}

// ===== TerminalSession =====

/// Scoped terminal acquisition.
///
/// Raw mode (and the alternate screen for the fullscreen backend) stay active
/// while the guard lives. Dropping it restores the terminal on every exit
/// path, including errors and unwinding panics.
#[derive(Debug)]
pub struct TerminalSession {
    backend: Backend,
}

impl TerminalSession {
    /// Enter raw mode, plus the alternate screen for the fullscreen backend.
    pub fn acquire(backend: Backend, writer: &mut TtyWriter) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        // Constructed before the next fallible step so Drop undoes raw mode.
        let session = Self { backend };
        if backend == Backend::Fullscreen {
            execute!(writer, EnterAlternateScreen)?;
        }
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "Failed to disable raw mode");
        }
        let mut writer = TtyWriter::open();
        if self.backend == Backend::Fullscreen {
            if let Err(err) = execute!(writer, LeaveAlternateScreen) {
                warn!(error = %err, "Failed to leave alternate screen");
            }
        }
        if let Err(err) = execute!(writer, Show) {
            warn!(error = %err, "Failed to show cursor");
        }
    }
}

// ===== Event loop =====

/// How the interactive run draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Fullscreen or inline drawing.
    pub backend: Backend,
    /// Rows of the inline viewport; ignored for fullscreen.
    pub inline_height: u16,
    /// Styles for the highlight and selection roles.
    pub palette: Palette,
}

/// Acquire the terminal and run the selector until it yields a selection.
pub fn run_interactive<M: LineMatcher>(
    controller: &mut Controller<M>,
    options: &RunOptions,
) -> Result<Selection, TuiError> {
    let mut writer = TtyWriter::open();
    let _session = TerminalSession::acquire(options.backend, &mut writer)?;

    let mut surface = match options.backend {
        Backend::Fullscreen => {
            TerminalSurface::new(Terminal::new(CrosstermBackend::new(writer))?, options.palette)
        }
        Backend::Inline => {
            // Window size comes from an ioctl on the tty; the cursor position
            // is never queried, since crossterm would ask for it on stdout.
            let (cols, rows) = terminal::size()?;
            let area = inline_area(Size::new(cols, rows), options.inline_height);
            reserve_inline_rows(&mut writer, rows, area.height)?;

            let terminal = Terminal::with_options(
                CrosstermBackend::new(writer),
                TerminalOptions {
                    viewport: Viewport::Fixed(area),
                },
            )?;
            TerminalSurface::inline(terminal, options.palette, options.inline_height)
        }
    };
    let bindings = KeyBindings::default();

    info!(backend = %options.backend, "Starting interactive selection");
    let result = event_loop(controller, &mut surface, &bindings, event::read);

    if options.backend == Backend::Inline {
        if let Err(err) = surface.clear_viewport() {
            warn!(error = %err, "Failed to clear inline viewport");
        }
    }

    result
}

/// Scroll the screen up by `height` rows so the inline viewport at the
/// bottom does not cover existing output.
fn reserve_inline_rows<W: Write>(writer: &mut W, screen_rows: u16, height: u16) -> io::Result<()> {
    queue!(writer, MoveTo(0, screen_rows.saturating_sub(1)))?;
    for _ in 0..height {
        queue!(writer, Print('\n'))?;
    }
    writer.flush()
}

/// Render, read an event, feed it to the controller; repeat until a
/// selection is made.
///
/// `next_event` is `crossterm::event::read` in production and a scripted
/// source in tests.
pub fn event_loop<M, S, F>(
    controller: &mut Controller<M>,
    surface: &mut S,
    bindings: &KeyBindings,
    mut next_event: F,
) -> Result<Selection, TuiError>
where
    M: LineMatcher,
    S: ScreenSurface + ?Sized,
    F: FnMut() -> io::Result<Event>,
{
    let size = surface.size()?;
    controller.setup(size);

    loop {
        controller.render(surface)?;

        match next_event()? {
            Event::Key(key) => {
                let Some(action) = bindings.translate(key) else {
                    continue;
                };
                if let Some(selection) = controller.process_input(action) {
                    info!(
                        action = %selection.action.name,
                        abort = selection.action.abort,
                        "Selection finished"
                    );
                    return Ok(selection);
                }
            }
            Event::Resize(..) => {
                let size = surface.size()?;
                controller.resize(size);
            }
            _ => {}
        }
    }
}
