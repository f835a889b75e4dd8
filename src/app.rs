//! Frame loop: render, present, wait, repeat.
//!
//! The loop is generic over the presenter and over how it waits, so the same
//! code drives the terminal, the plain stream and the tests.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, trace};

use crate::core::{Engine, Pacer};
use crate::signal;
use crate::term::Presenter;

/// Longest single wait before the interrupt flag is checked again.
const SIGNAL_POLL: Duration = Duration::from_millis(10);

/// What the wait step decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Totals for one run of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub frames: u64,
    /// Time spent rendering and presenting
    pub busy: Duration,
    /// Frames whose render + present took longer than the tick
    pub overruns: u64,
}

impl RunStats {
    pub fn mean_frame_time(&self) -> Duration {
        if self.frames == 0 {
            return Duration::ZERO;
        }
        self.busy / self.frames as u32
    }
}

/// Drive `engine` until `max_frames` frames were shown (0 = no limit), the
/// wait step asks to quit, or an interrupt arrives.
pub fn run<P, W>(
    engine: &mut Engine,
    presenter: &mut P,
    pacer: &mut Pacer,
    max_frames: u64,
    mut wait: W,
) -> Result<RunStats>
where
    P: Presenter + ?Sized,
    W: FnMut(Duration) -> Result<Control>,
{
    let mut stats = RunStats::default();
    loop {
        if signal::interrupted() {
            info!("interrupted after {} frames", stats.frames);
            break;
        }
        if max_frames != 0 && stats.frames >= max_frames {
            break;
        }

        let started = Instant::now();
        let rotation = pacer.tick();
        presenter.present(engine.render(rotation))?;
        let elapsed = started.elapsed();

        stats.frames += 1;
        stats.busy += elapsed;
        if elapsed > pacer.period() {
            stats.overruns += 1;
            trace!("frame {} overran tick: {:?}", stats.frames, elapsed);
        }

        if wait(pacer.remaining(elapsed))? == Control::Quit {
            break;
        }
    }
    Ok(stats)
}

/// Cleanup path: release engine resources and restore the display.
pub fn shutdown<P: Presenter + ?Sized>(engine: &mut Engine, presenter: &mut P) -> Result<()> {
    engine.release();
    presenter.restore()
}

/// Keys that end the animation: `q`, `Esc`, `Ctrl-C`.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Wait for `timeout`, watching the keyboard and the interrupt flag.
pub fn poll_input(timeout: Duration) -> Result<Control> {
    let deadline = Instant::now() + timeout;
    loop {
        if signal::interrupted() {
            return Ok(Control::Quit);
        }
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Ok(Control::Continue);
        }
        if event::poll(left.min(SIGNAL_POLL))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(Control::Quit);
                }
            }
        }
    }
}

/// Wait for `timeout` without reading input, watching the interrupt flag.
pub fn sleep_until_tick(timeout: Duration) -> Result<Control> {
    let deadline = Instant::now() + timeout;
    loop {
        if signal::interrupted() {
            return Ok(Control::Quit);
        }
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Ok(Control::Continue);
        }
        std::thread::sleep(left.min(SIGNAL_POLL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(should_quit(key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(should_quit(key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(should_quit(key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!should_quit(key(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn mean_frame_time_handles_zero_frames() {
        assert_eq!(RunStats::default().mean_frame_time(), Duration::ZERO);
        let stats = RunStats {
            frames: 4,
            busy: Duration::from_millis(8),
            overruns: 0,
        };
        assert_eq!(stats.mean_frame_time(), Duration::from_millis(2));
    }
}
