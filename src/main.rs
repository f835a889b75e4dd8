//! Terminal spinner runner (default binary).
//!
//! Builds the engine from the command line, then drives it at a fixed tick
//! through either the alternate-screen renderer or the plain stream.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tui_spin::app::{poll_input, run, shutdown, sleep_until_tick, RunStats};
use tui_spin::cli::Cli;
use tui_spin::core::{Engine, Pacer};
use tui_spin::signal;
use tui_spin::term::{restore_terminal, PlainPresenter, TerminalRenderer};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    signal::install()?;

    // Everything is allocated here; a failure ends the process before any frame.
    let source = cli.load_source()?;
    let config = cli.engine_config();
    let mut engine = Engine::new(config, source).context("starting engine")?;
    let mut pacer = Pacer::from_millis(cli.tick_ms, cli.angle_step());
    info!(
        "starting: mode={} variant={} tick={}ms step={:?}",
        config.mode.as_str(),
        cli.variant.as_str(),
        cli.tick_ms,
        pacer.step()
    );

    let (result, cleanup) = if cli.plain {
        let mut presenter = PlainPresenter::new(io::stdout().lock());
        let result = run(&mut engine, &mut presenter, &mut pacer, cli.frames, sleep_until_tick);
        (result, shutdown(&mut engine, &mut presenter))
    } else {
        install_panic_hook();
        let mut term = TerminalRenderer::new();
        term.enter()?;
        let result = run(&mut engine, &mut term, &mut pacer, cli.frames, poll_input);
        (result, shutdown(&mut engine, &mut term))
    };

    let stats: RunStats = result?;
    cleanup?;
    info!(
        "stopped after {} frames, mean frame time {:?}, {} overruns",
        stats.frames,
        stats.mean_frame_time(),
        stats.overruns
    );
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

/// Restore the display before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}
