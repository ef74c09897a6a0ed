//! Ctrl+C handling
//!
//! SIGINT only sets a flag. The plot loop checks it between lines, so the
//! chart and the serial port are released through their normal `Drop`.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Flag raised by the SIGINT handler
pub fn flag() -> &'static AtomicBool {
    &INTERRUPTED
}

#[cfg(unix)]
extern "C" fn handle_sigint(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install the SIGINT handler
#[cfg(unix)]
pub fn install() -> io::Result<()> {
    // The handler only touches an atomic, which is async-signal-safe
    let previous = unsafe { libc::signal(libc::SIGINT, handle_sigint as libc::sighandler_t) };
    if previous == libc::SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// No handler on this platform; Ctrl+C terminates the process directly
#[cfg(not(unix))]
pub fn install() -> io::Result<()> {
    Ok(())
}
