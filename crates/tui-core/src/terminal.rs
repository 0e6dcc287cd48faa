//! Terminal abstraction: the [`Backend`] contract, a real [`CrosstermBackend`],
//! an in-memory [`TestBackend`], and the [`Terminal`] struct that drives the
//! frame pipeline described in the design notes (query size, swap buffers,
//! diff, draw, flush).

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, ScrollDown, ScrollUp},
};

use tracing::{debug, trace};

use crate::buffer::{Buffer, CellChange};
use crate::error::Result;
use crate::geometry::{Position, Rect, Size};
use crate::renderer::Renderer;

/// Level of color support a [`Backend`] renders with.
///
/// Respected by [`crate::renderer::Renderer`] when downgrading [`crate::color::Color`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSupport {
    /// No color; all colors render as [`crate::color::Color::Reset`].
    NoColor,
    /// The 16 classic ANSI colors.
    Basic16,
    /// The 256-color indexed palette.
    Extended256,
    /// 24-bit RGB.
    TrueColor,
}

/// Where on the terminal the engine's drawing area lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Viewport {
    /// The alternate screen, covering the whole terminal.
    Fullscreen,
    /// `h` rows reserved below the cursor at construction time.
    Inline(u16),
    /// An explicit, static region; no alternate screen is used.
    Fixed(Rect),
}

/// The minimal set of operations the engine needs from a terminal.
///
/// Any type implementing this faithfully (real TTY, test double, a
/// different terminal library) can drive the frame pipeline.
pub trait Backend {
    /// Current terminal size in cells.
    fn size(&self) -> Result<Size>;
    /// Write `updates` to the terminal. Callers pass them in row-major
    /// scan order, as produced by [`Buffer::diff`].
    fn draw(&mut self, updates: &[CellChange]) -> Result<()>;
    /// Commit buffered output.
    fn flush(&mut self) -> Result<()>;
    /// Clear the whole screen.
    fn clear(&mut self) -> Result<()>;
    /// Show the cursor.
    fn show_cursor(&mut self) -> Result<()>;
    /// Hide the cursor.
    fn hide_cursor(&mut self) -> Result<()>;
    /// Move the cursor to a 0-based position.
    fn set_cursor_position(&mut self, position: Position) -> Result<()>;
    /// Enter the alternate screen.
    fn enter_alternate_screen(&mut self) -> Result<()>;
    /// Leave the alternate screen.
    fn leave_alternate_screen(&mut self) -> Result<()>;
    /// Enable raw input mode.
    fn enable_raw_mode(&mut self) -> Result<()>;
    /// Disable raw input mode.
    fn disable_raw_mode(&mut self) -> Result<()>;
    /// Enable mouse event reporting.
    fn enable_mouse_capture(&mut self) -> Result<()>;
    /// Disable mouse event reporting.
    fn disable_mouse_capture(&mut self) -> Result<()>;
    /// Scroll the viewport up by `lines`.
    fn scroll_up(&mut self, lines: u16) -> Result<()>;
    /// Scroll the viewport down by `lines`.
    fn scroll_down(&mut self, lines: u16) -> Result<()>;
}

/// A [`Backend`] writing real ANSI escape sequences to an arbitrary
/// [`Write`]r (`io::stdout()` in production).
///
/// Holds exclusive responsibility for restoring terminal mode (raw mode,
/// alternate screen) on drop, per the resource policy: whatever state this
/// backend entered, it leaves on drop regardless of how the program exits.
pub struct CrosstermBackend<W: Write> {
    writer: W,
    renderer: Renderer,
    raw_mode: bool,
    alternate_screen: bool,
}

impl CrosstermBackend<io::Stdout> {
    /// Create a backend writing to standard output, detecting color
    /// support from the environment.
    pub fn new(color_support: ColorSupport) -> Self {
        Self::with_writer(io::stdout(), color_support)
    }
}

impl<W: Write> CrosstermBackend<W> {
    /// Create a backend writing to an arbitrary writer.
    pub fn with_writer(writer: W, color_support: ColorSupport) -> Self {
        Self {
            writer,
            renderer: Renderer::new(color_support, false),
            raw_mode: false,
            alternate_screen: false,
        }
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn size(&self) -> Result<Size> {
        let (w, h) = terminal::size()?;
        Ok(Size::new(w, h))
    }

    fn draw(&mut self, updates: &[CellChange]) -> Result<()> {
        let output = self.renderer.render_optimized(updates);
        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.writer, Clear(ClearType::All))?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        execute!(self.writer, Show)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        execute!(self.writer, Hide)?;
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Position) -> Result<()> {
        execute!(self.writer, MoveTo(position.x, position.y))?;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        if !self.alternate_screen {
            execute!(self.writer, EnterAlternateScreen)?;
            self.alternate_screen = true;
        }
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        if self.alternate_screen {
            execute!(self.writer, LeaveAlternateScreen)?;
            self.alternate_screen = false;
        }
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode {
            terminal::enable_raw_mode()?;
            self.raw_mode = true;
        }
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.writer, EnableMouseCapture)?;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.writer, DisableMouseCapture)?;
        Ok(())
    }

    fn scroll_up(&mut self, lines: u16) -> Result<()> {
        execute!(self.writer, ScrollUp(lines))?;
        Ok(())
    }

    fn scroll_down(&mut self, lines: u16) -> Result<()> {
        execute!(self.writer, ScrollDown(lines))?;
        Ok(())
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
        if self.alternate_screen {
            let _ = execute!(self.writer, LeaveAlternateScreen);
        }
        let _ = execute!(self.writer, Show);
    }
}

/// An in-memory [`Backend`] for tests: records every operation instead of
/// touching a real TTY.
pub struct TestBackend {
    size: Size,
    output: String,
    cursor: Position,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
    draw_calls: usize,
}

impl TestBackend {
    /// Create a test backend reporting a fixed `(width, height)` size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            output: String::new(),
            cursor: Position::new(0, 0),
            cursor_visible: false,
            raw_mode: false,
            alternate_screen: false,
            mouse_capture: false,
            draw_calls: 0,
        }
    }

    /// The concatenation of every string this backend has rendered so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Simulate a terminal resize.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
    }

    /// Whether the cursor is currently visible.
    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// The last position [`Backend::set_cursor_position`] was called with.
    pub fn cursor_position(&self) -> Position {
        self.cursor
    }

    /// Whether raw mode is currently "enabled" on this fake backend.
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    /// Whether the alternate screen is currently "entered".
    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    /// Whether mouse capture is currently "enabled".
    pub fn is_mouse_capture_enabled(&self) -> bool {
        self.mouse_capture
    }

    /// Number of times [`Backend::draw`] has been called.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}

impl Backend for TestBackend {
    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn draw(&mut self, updates: &[CellChange]) -> Result<()> {
        self.draw_calls += 1;
        for update in updates {
            self.output.push_str(&update.cell.grapheme);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.output.clear();
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.cursor_visible = false;
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Position) -> Result<()> {
        self.cursor = position;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        self.mouse_capture = true;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        self.mouse_capture = false;
        Ok(())
    }

    fn scroll_up(&mut self, _lines: u16) -> Result<()> {
        Ok(())
    }

    fn scroll_down(&mut self, _lines: u16) -> Result<()> {
        Ok(())
    }
}

/// Owns a [`Backend`] and the double-buffered [current, previous] cell
/// grids, and drives the draw pipeline in [`Terminal::draw`].
///
/// Not `Send`/`Sync`: buffer, cache, and backend state are all
/// render-thread-affine, per the concurrency model.
pub struct Terminal<B: Backend> {
    backend: B,
    viewport: Viewport,
    area: Rect,
    current: Buffer,
    previous: Buffer,
    clear_on_close: bool,
}

impl<B: Backend> Terminal<B> {
    /// Construct a terminal over `backend` with the given [`Viewport`]
    /// policy, performing the one-time viewport setup (entering the
    /// alternate screen for [`Viewport::Fullscreen`], reserving rows for
    /// [`Viewport::Inline`]).
    pub fn new(mut backend: B, viewport: Viewport) -> Result<Self> {
        let size = backend.size()?;
        let area = match viewport {
            Viewport::Fullscreen => {
                backend.enter_alternate_screen()?;
                Rect::new(0, 0, size.width, size.height)
            }
            Viewport::Inline(height) => Rect::new(0, 0, size.width, height.min(size.height)),
            Viewport::Fixed(rect) => rect,
        };
        Ok(Self {
            backend,
            viewport,
            area,
            current: Buffer::empty(area),
            previous: Buffer::empty(area),
            clear_on_close: false,
        })
    }

    /// Whether the viewport area should be cleared when this terminal is
    /// torn down (only meaningful for [`Viewport::Inline`]).
    #[must_use]
    pub fn clear_on_close(mut self, clear: bool) -> Self {
        self.clear_on_close = clear;
        self
    }

    /// The area this terminal currently draws into.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// A reference to the backend, for operations the pipeline doesn't cover.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Render one frame.
    ///
    /// 1. Query the backend's current size; a change reallocates both
    ///    buffers at the new size and forces a full-screen clear.
    /// 2. Reset `current` to empty and hand it to `render`.
    /// 3. Diff `current` against `previous` and write the (minimal) result
    ///    to the backend.
    /// 4. Apply cursor policy, flush, and swap buffers.
    ///
    /// The swap only happens if every step up to the backend write
    /// succeeds: a failure during `render` or the backend write leaves
    /// `previous` untouched, so the next call redraws from scratch.
    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut crate::frame::Frame<'_>),
    {
        self.resize_if_needed()?;

        self.current.clear();
        let mut frame = crate::frame::Frame::new(&mut self.current, self.area);
        render(&mut frame);
        let cursor = frame.take_cursor_position();

        let updates = self.current.diff(&self.previous)?;
        trace!(changed_cells = updates.len(), area = ?self.area, "drawing frame");
        self.backend.draw(&updates)?;

        match cursor {
            Some(position) => {
                self.backend.set_cursor_position(Position::new(
                    self.area.position.x.saturating_add(position.x),
                    self.area.position.y.saturating_add(position.y),
                ))?;
                self.backend.show_cursor()?;
            }
            None => self.backend.hide_cursor()?,
        }

        self.backend.flush()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    fn resize_if_needed(&mut self) -> Result<()> {
        if matches!(self.viewport, Viewport::Fixed(_)) {
            return Ok(());
        }
        let size = self.backend.size()?;
        let new_area = match self.viewport {
            Viewport::Fullscreen => Rect::new(0, 0, size.width, size.height),
            Viewport::Inline(height) => Rect::new(0, 0, size.width, height.min(size.height)),
            Viewport::Fixed(rect) => rect,
        };
        if new_area.size != self.area.size {
            debug!(from = ?self.area.size, to = ?new_area.size, "terminal resized, forcing full repaint");
            self.area = new_area;
            self.current = Buffer::empty(new_area);
            self.previous = Buffer::empty(new_area);
            self.backend.clear()?;
        }
        Ok(())
    }

    /// Tear down the terminal: leave the alternate screen, restore the
    /// cursor, and clear the viewport area if requested. Safe to call more
    /// than once.
    pub fn close(&mut self) -> Result<()> {
        if self.clear_on_close && matches!(self.viewport, Viewport::Inline(_)) {
            self.backend.clear()?;
        }
        self.backend.leave_alternate_screen()?;
        self.backend.show_cursor()?;
        self.backend.flush()
    }
}
