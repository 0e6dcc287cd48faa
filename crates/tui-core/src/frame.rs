//! Per-frame rendering surface.
//!
//! A [`Frame`] is handed to the render callback passed to
//! [`crate::terminal::Terminal::draw`]. It wraps the current frame's
//! [`Buffer`] together with the viewport [`Rect`] and the cursor position
//! request for this frame, and exposes the [`Widget`]/[`StatefulWidget`]
//! rendering capability described in the design notes.

use crate::buffer::Buffer;
use crate::geometry::{Position, Rect};

/// A widget that renders itself into an area of a [`Buffer`].
///
/// This is the minimal rendering capability: `render(area, buffer) -> ()`.
/// Widgets that need to carry render-time state implement
/// [`StatefulWidget`] instead.
pub trait Widget {
    /// Render this widget into `area` of `buf`. Implementations must not
    /// write outside `area`.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A widget whose rendering depends on externally-owned state (scroll
/// offset, selection, animation phase) that outlives any single frame.
pub trait StatefulWidget {
    /// The state type this widget reads and updates while rendering.
    type State;

    /// Render this widget into `area` of `buf`, reading and updating `state`.
    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

/// The per-frame rendering surface passed to the render callback.
///
/// Borrows the terminal's current [`Buffer`] for the duration of one
/// frame; nothing written through a `Frame` is visible until
/// [`crate::terminal::Terminal::draw`] diffs and flushes it.
pub struct Frame<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    cursor_position: Option<Position>,
    context_keys: Vec<(String, String)>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        Self {
            buffer,
            area,
            cursor_position: None,
            context_keys: Vec::new(),
        }
    }

    /// The full area available to render into this frame.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Direct mutable access to the frame's buffer, for callers that don't
    /// go through [`Widget`].
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Render a [`Widget`] into `area`.
    ///
    /// If any context keys are active (see [`Frame::push_context_key`]),
    /// every cell `widget` writes in `area` is tagged with them via
    /// [`crate::style::Style::extensions`], so downstream code can later
    /// query which semantic region a cell belongs to.
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        widget.render(area, self.buffer);
        self.tag_context_keys(area);
    }

    /// Render a [`StatefulWidget`] into `area`, threading `state` through.
    pub fn render_stateful_widget<W: StatefulWidget>(&mut self, widget: W, area: Rect, state: &mut W::State) {
        widget.render(area, self.buffer, state);
        self.tag_context_keys(area);
    }

    /// Push a `(key, value)` tag that will be attached to every cell
    /// subsequently rendered through [`Frame::render_widget`] or
    /// [`Frame::render_stateful_widget`], until popped. Tags nest: a widget
    /// rendered while multiple keys are pushed carries all of them.
    pub fn push_context_key(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.context_keys.push((key.into(), value.into()));
    }

    /// Pop the most recently pushed context key. A no-op if the stack is empty.
    pub fn pop_context_key(&mut self) {
        self.context_keys.pop();
    }

    fn tag_context_keys(&mut self, area: Rect) {
        if self.context_keys.is_empty() {
            return;
        }
        let mut style = crate::style::Style::default();
        for (key, value) in &self.context_keys {
            style.extensions.insert(key.clone(), value.clone());
        }
        self.buffer.set_style(area, style);
    }

    /// Request that the terminal cursor be placed at `position`
    /// (frame-local coordinates) once this frame is drawn. If never
    /// called during a frame, the cursor is hidden for that frame.
    pub fn set_cursor_position(&mut self, position: Position) {
        self.cursor_position = Some(position);
    }

    pub(crate) fn take_cursor_position(&self) -> Option<Position> {
        self.cursor_position
    }
}
