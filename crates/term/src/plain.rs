//! PlainPresenter: streams whole frames to any writer.
//!
//! No raw mode and no alternate screen. The screen is cleared once, then every
//! frame homes the cursor and rewrites all rows, each ending in `\n`. Useful
//! when stdout is not a terminal or when the alternate screen is unwanted.

use std::io::Write;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::Frame;
use crate::renderer::DEFAULT_COLOR;
use crate::Presenter;

pub struct PlainPresenter<W: Write> {
    out: W,
    color: Color,
    cleared: bool,
}

impl<W: Write> PlainPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: DEFAULT_COLOR,
            cleared: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        if !self.cleared {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.cleared = true;
        }
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(SetForegroundColor(self.color))?;
        for row in frame.rows() {
            for &ch in row {
                self.out.queue(Print(ch))?;
            }
            self.out.queue(Print('\n'))?;
        }
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(cursor::Show)?;
        self.out.flush()?;
        Ok(())
    }
}
