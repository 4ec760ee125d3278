//! Signal plumbing. `HUP, PIPE, INT, QUIT, ABRT, TRAP, TERM, TSTP, ALRM` are
//! trapped; `CHLD` is left at its default (ignored is not the default, but
//! nothing here reaps children); `KILL, STOP, SEGV` are never touched, per
//! POSIX and per `signal-hook`'s own refusal to let callers register them.
//!
//! The fork-based "parent signals child, closes the socket once, exits
//! `128+signo`" design becomes, with threads: this watcher thread sets the
//! shared stop flag and reports the signal number back to the main thread,
//! which owns the exit path and the one `Arc<RawSocket>` the whole process
//! shares.

use signal_hook::consts::{
    SIGABRT, SIGALRM, SIGHUP, SIGINT, SIGPIPE, SIGQUIT, SIGTERM, SIGTRAP, SIGTSTP,
};
use signal_hook::iterator::Signals;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

pub const TRAPPED: &[i32] = &[
    SIGHUP, SIGPIPE, SIGINT, SIGQUIT, SIGABRT, SIGTRAP, SIGTERM, SIGTSTP, SIGALRM,
];

/// Spawn the watcher thread. On the first trapped signal it flips `stop` and
/// sends the signal number down `report`, then exits: a second signal is the
/// caller's problem (the process is already on its way down).
pub fn spawn_watcher(stop: Arc<AtomicBool>, report: Sender<i32>) {
    thread::spawn(move || {
        let mut signals = match Signals::new(TRAPPED) {
            Ok(s) => s,
            Err(_) => return,
        };
        if let Some(signo) = signals.forever().next() {
            stop.store(true, Ordering::Relaxed);
            let _ = report.send(signo);
        }
    });
}
