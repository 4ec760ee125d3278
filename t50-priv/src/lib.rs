//! The only crate in this workspace allowed to call raw `libc` functions
//! directly. Everything else (`t50-core`, `t50`) forbids `unsafe_code`
//! outright; the two syscalls here — `setpriority` and `geteuid` — have no
//! safe wrapper in a higher-level crate, so they live in their own
//! minimal, auditable surface instead of being scattered through the
//! engine.

use std::io;

/// Raise the calling process's scheduling priority. `nice` follows
/// `setpriority(2)` convention: negative values are more favourable.
pub fn set_priority(nice: i32) -> io::Result<()> {
    // SAFETY: `setpriority` takes plain integers and has no aliasing or
    // lifetime requirements; `PRIO_PROCESS` with pid 0 targets the calling
    // process.
    let rc = unsafe { libc::setpriority(libc::PRIO_PROCESS, 0, nice) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Whether the calling process's effective UID is root.
pub fn is_effective_root() -> bool {
    // SAFETY: `geteuid` takes no arguments and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_effective_root_does_not_panic() {
        let _ = is_effective_root();
    }
}
