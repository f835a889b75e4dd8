//! Interrupt trapping.
//!
//! SIGINT, SIGTERM and SIGHUP only raise a flag. The frame loop polls the flag
//! between frames and while waiting, then leaves through the normal cleanup
//! path so the display is always restored.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_signal(_: nix::libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the handlers. Call once at startup.
#[cfg(unix)]
pub fn install() -> Result<()> {
    use anyhow::Context;
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    let action = SigAction::new(
        SigHandler::Handler(on_signal),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for sig in [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP] {
        // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
        unsafe { sigaction(sig, &action) }
            .with_context(|| format!("installing {sig} handler"))?;
    }
    log::debug!("signal handlers installed");
    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> Result<()> {
    Ok(())
}

/// Whether one of the trapped signals arrived since the last reset.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Lower the flag.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}
