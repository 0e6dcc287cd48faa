//! tui-core: an exact-rational Cassowary layout solver and cell-buffer
//! compositor for terminal user interfaces.
//!
//! This crate computes terminal layouts with the [Cassowary constraint
//! solving algorithm](crate::solver), renders widget trees into a diffable
//! [cell buffer](crate::buffer), and drives the frame pipeline that turns a
//! buffer diff into minimal ANSI output on a [`terminal::Backend`].

pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod fraction;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod renderer;
pub mod segment;
pub mod solver;
pub mod style;
pub mod terminal;

#[cfg(test)]
mod test_env;

pub use buffer::{Buffer, CellChange};
pub use cell::Cell;
pub use color::{Color, NamedColor};
pub use error::{Result, TuiError};
pub use event::{Event, FocusDirection, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
pub use fraction::Fraction;
pub use frame::{Frame, StatefulWidget, Widget};
pub use geometry::{Margin, Position, Rect, Size};
pub use layout::{Constraint, Direction, Flex, Layout, LayoutCache, LayoutSolver};
pub use renderer::{
    ColorMapper, DeltaBatch, Renderer, batch_changes, build_sgr_sequence, rgb_to_16, rgb_to_256, rgb_to_named,
};
pub use segment::Segment;
pub use style::{Modifier, ModifierSet, Style};
pub use terminal::{Backend, ColorSupport, CrosstermBackend, TestBackend, Terminal, Viewport};
