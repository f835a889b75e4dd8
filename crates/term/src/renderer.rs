//! TerminalRenderer: flushes frames to a real terminal.
//!
//! The first frame is drawn in full; later frames only rewrite the runs of
//! cells that changed since the previous one. The previous frame is kept in a
//! shadow buffer that is overwritten in place, so steady-state presenting does
//! not allocate.

use std::io::{self, Write};

use anyhow::Result;
use log::debug;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::Frame;
use crate::Presenter;

/// Yellow foreground (`ESC[33m`).
pub const DEFAULT_COLOR: Color = Color::DarkYellow;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
    color: Color,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            color: DEFAULT_COLOR,
            active: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        debug!("terminal renderer entered alternate screen");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        encode_restore_into(&mut self.buf)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        debug!("terminal renderer restored display");
        Ok(())
    }

    /// Draw a frame, diffing against the previously drawn one.
    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) if prev.width() == frame.width() && prev.height() == frame.height() => {
                encode_diff_into(prev, frame, self.color, &mut self.buf)?;
                prev.copy_from(frame);
            }
            _ => {
                encode_full_into(frame, self.color, &mut self.buf)?;
                self.last = Some(frame.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalRenderer {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame)
    }

    fn restore(&mut self) -> Result<()> {
        self.exit()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &Frame, color: Color, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(SetForegroundColor(color))?;
    for y in 0..frame.height() {
        for &ch in frame.row(y) {
            out.queue(Print(ch))?;
        }
        if y + 1 < frame.height() {
            out.queue(Print("\r\n"))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &Frame, next: &Frame, color: Color, out: &mut Vec<u8>) -> Result<()> {
    out.queue(SetForegroundColor(color))?;
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for &ch in &next.row(y)[x as usize..(x + len) as usize] {
            out.queue(Print(ch))?;
        }
        Ok(())
    })?;
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode the commands that put the display back into its default state.
pub fn encode_restore_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    Ok(())
}

/// Best-effort display restore straight to stdout.
///
/// For paths that cannot reach the renderer, such as a panic hook.
pub fn restore_terminal() {
    let mut buf = Vec::new();
    if encode_restore_into(&mut buf).is_ok() && buf.queue(terminal::LeaveAlternateScreen).is_ok() {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(&buf);
        let _ = stdout.flush();
    }
    let _ = terminal::disable_raw_mode();
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ between
/// the two frames. Frames of different size count as fully changed.
fn for_each_changed_run(
    prev: &Frame,
    next: &Frame,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let resized = prev.width() != next.width() || prev.height() != next.height();
    for (y, row) in (0u16..).zip(next.rows()) {
        if resized {
            f(0, y, next.width())?;
            continue;
        }
        let mut run_start: Option<u16> = None;
        for (x, (old, new)) in (0u16..).zip(prev.row(y).iter().zip(row)) {
            match (old != new, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    f(start, y, x - start)?;
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            f(start, y, next.width() - start)?;
        }
    }
    Ok(())
}
