//! Interrupt handling. Kept in its own test binary since the flag is global,
//! and kept to a single test so nothing else races on it.
#![cfg(unix)]

use nix::sys::signal::{raise, Signal};

use tui_spin::app::{run, Control};
use tui_spin::core::{Engine, GlyphGrid, Pacer};
use tui_spin::signal;
use tui_spin::term::PlainPresenter;
use tui_spin::types::EngineConfig;

fn engine() -> Engine {
    Engine::sprite(EngineConfig::default(), GlyphGrid::banana().unwrap()).unwrap()
}

#[test]
fn interrupts_end_the_loop() {
    signal::install().unwrap();
    signal::reset();

    // SIGINT before the loop starts means no frame at all.
    raise(Signal::SIGINT).unwrap();
    assert!(signal::interrupted());
    let mut presenter = PlainPresenter::new(Vec::new());
    let stats = run(&mut engine(), &mut presenter, &mut Pacer::default(), 10, |_| {
        Ok(Control::Continue)
    })
    .unwrap();
    assert_eq!(stats.frames, 0);
    assert!(presenter.into_inner().is_empty());
    signal::reset();

    // SIGTERM during the wait ends the loop before the next frame.
    let mut presenter = PlainPresenter::new(Vec::new());
    let mut pacer = Pacer::from_millis(0, Default::default());
    let stats = run(&mut engine(), &mut presenter, &mut pacer, 0, |_| {
        raise(Signal::SIGTERM)?;
        Ok(Control::Continue)
    })
    .unwrap();
    assert!(signal::interrupted());
    assert_eq!(stats.frames, 1);
    signal::reset();
}
