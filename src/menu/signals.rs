//! Termination signals.
//!
//! A signal can arrive while a read holds the terminal in raw mode, and the
//! read never returns to drop its guard. A watcher thread puts the terminal
//! back, says goodbye and exits.

use std::io::Write;

use tracing::error;

use super::input::TerminalMode;
use super::write_clear;

/// SIGINT, the only signal that still counts as a clean quit.
const SIGINT: i32 = 2;

/// Exit status for the process after `signal` was delivered.
#[must_use]
pub fn exit_code_for(signal: i32) -> i32 {
    if signal == SIGINT {
        0
    } else {
        128 + signal
    }
}

/// Leave raw mode if it is on, print the farewell and pick an exit status.
pub fn finish_after_signal<M, W>(mode: &M, out: &mut W, signal: i32) -> i32
where
    M: TerminalMode + ?Sized,
    W: Write,
{
    match mode.is_raw() {
        Ok(false) => {}
        Ok(true) => {
            if let Err(e) = mode.disable_raw() {
                error!(error = %e, signal, "Failed to restore terminal mode");
            }
        }
        Err(e) => error!(error = %e, signal, "Failed to query terminal mode"),
    }

    let farewell = write_clear(out)
        .and_then(|()| writeln!(out, "Goodbye!"))
        .and_then(|()| out.flush());
    if let Err(e) = farewell {
        error!(error = %e, "Failed to write farewell");
    }

    exit_code_for(signal)
}

/// Watch for SIGINT, SIGTERM and SIGHUP on a background thread.
#[cfg(unix)]
pub fn install_signal_handlers() -> crate::error::Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use tracing::debug;

    use crate::error::HistoryError;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])
        .map_err(|e| HistoryError::terminal("Failed to register signal handlers", e))?;

    std::thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                debug!(signal, "Received termination signal");
                let mut stdout = std::io::stdout();
                let code = finish_after_signal(&super::input::CrosstermMode, &mut stdout, signal);
                std::process::exit(code);
            }
        })
        .map_err(|e| HistoryError::io("Failed to spawn signal thread", e))?;

    Ok(())
}

/// Signals are left at their defaults off Unix.
#[cfg(not(unix))]
pub fn install_signal_handlers() -> crate::error::Result<()> {
    Ok(())
}
