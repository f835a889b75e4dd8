//! Terminal presenter module.
//!
//! Presenters take a finished [`Frame`](crate::core::Frame) and put it on a
//! display. The engine never talks to the terminal directly; it hands frames to
//! a [`Presenter`] and the presenter owns every escape sequence.
//!
//! - [`TerminalRenderer`]: alternate screen, hidden cursor, diff redraws
//! - [`PlainPresenter`]: full redraw of every frame to any `Write`

pub mod plain;
pub mod renderer;

pub use tui_spin_core as core;
pub use tui_spin_types as types;

pub use plain::PlainPresenter;
pub use renderer::{
    encode_diff_into, encode_full_into, encode_restore_into, restore_terminal, TerminalRenderer,
    DEFAULT_COLOR,
};

use anyhow::Result;

use crate::core::Frame;

/// Sink for finished frames.
pub trait Presenter {
    /// Show one complete frame.
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Put the display back into its default state (colour, cursor).
    ///
    /// Must be safe to call more than once.
    fn restore(&mut self) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        (**self).present(frame)
    }

    fn restore(&mut self) -> Result<()> {
        (**self).restore()
    }
}
