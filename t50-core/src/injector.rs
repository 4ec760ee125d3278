//! The injection loop: per-iteration destination
//! randomisation, protocol selection, builder invocation, transmission,
//! threshold accounting, and the optional two-worker turbo fan-out.

use crate::buffer::PacketBuffer;
use crate::cidr::CidrBlock;
use crate::config::{Config, ProtocolSelector};
use crate::error::T50Error;
use crate::modules::ModuleTable;
use crate::priority;
use crate::rng::Prng;
use crate::socket::RawSocket;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// Outcome of one worker's run: packets actually transmitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub sent: u64,
}

impl std::ops::Add for Stats {
    type Output = Stats;
    fn add(self, other: Stats) -> Stats {
        Stats {
            sent: self.sent + other.sent,
        }
    }
}

/// `> 1` for a single protocol, `> ModuleTable::len()` in mixed mode — both
/// ensure every rotation gets at least one packet per worker.
fn turbo_eligible(cfg: &Config, modules: &ModuleTable) -> bool {
    if !cfg.pacing.turbo {
        return false;
    }
    let floor = match cfg.ip.protocol {
        ProtocolSelector::Single(_) => 1,
        ProtocolSelector::Mixed => modules.len() as i32,
    };
    cfg.pacing.threshold > floor
}

/// Run the injection loop to completion (or until `stop` is set). Spawns a
/// second worker thread when turbo is eligible; both share `socket` but
/// each owns a private [`PacketBuffer`] and [`Prng`].
pub fn run(cfg: &Config, socket: Arc<RawSocket>, stop: Arc<AtomicBool>) -> Result<Stats, T50Error> {
    let modules = Arc::new(ModuleTable::new());
    let cidr = CidrBlock::new(cfg.target.bits, u32::from(cfg.target.daddr));
    let turbo = turbo_eligible(cfg, &modules);
    info!(turbo, threshold = cfg.pacing.threshold, flood = cfg.pacing.flood, "starting injection loop");

    if !turbo {
        let stats = worker_loop(*cfg, cidr, Arc::clone(&modules), Arc::clone(&socket), stop, None);
        info!(?stats, "injection loop finished");
        return stats;
    }

    let (parent_threshold, child_threshold) = if cfg.pacing.flood {
        (0, 0) // unused when flooding: both workers just run until `stop`
    } else {
        let child = cfg.pacing.threshold / 2;
        let parent = cfg.pacing.threshold - child;
        (parent, child)
    };

    let child_cfg = *cfg;
    let child_modules = Arc::clone(&modules);
    let child_socket = Arc::clone(&socket);
    let child_stop = Arc::clone(&stop);
    let child_handle = thread::spawn(move || {
        worker_loop(
            child_cfg,
            cidr,
            child_modules,
            child_socket,
            child_stop,
            Some(child_threshold),
        )
    });

    let parent_stats = worker_loop(*cfg, cidr, modules, socket, Arc::clone(&stop), Some(parent_threshold));

    let child_stats = child_handle.join().map_err(|_| T50Error::WorkerPanicked)?;

    let total = parent_stats? + child_stats?;
    info!(?total, "turbo injection loop finished");
    Ok(total)
}

/// `threshold_override` is `Some(n)` for a turbo split worker (its share of
/// the total), `None` for the single-worker path (uses `cfg.pacing`
/// directly).
fn worker_loop(
    mut cfg: Config,
    cidr: CidrBlock,
    modules: Arc<ModuleTable>,
    socket: Arc<RawSocket>,
    stop: Arc<AtomicBool>,
    threshold_override: Option<i32>,
) -> Result<Stats, T50Error> {
    if cfg.pacing.turbo {
        priority::raise_priority(priority::TURBO_NICE)?;
    }

    let mut rng = Prng::from_time();
    let mut buf = PacketBuffer::new();
    let mut cursor = 0usize;
    let mut remaining = threshold_override.unwrap_or(cfg.pacing.threshold);
    let mut sent = 0u64;

    loop {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if !cfg.pacing.flood && remaining <= 0 {
            break;
        }

        let daddr_host = cidr.random_destination(&mut rng);
        let daddr = Ipv4Addr::from(daddr_host);
        cfg.target.daddr = daddr;

        let entry = match cfg.ip.protocol {
            ProtocolSelector::Single(id) => modules.find(id),
            ProtocolSelector::Mixed => modules.get(cursor),
        };

        let len = (entry.builder)(&cfg, &mut buf, &mut rng);
        if let Err(err) = socket.send(buf.as_slice(len), daddr) {
            warn!(%err, protocol = entry.id.name(), %daddr, "send failed, aborting worker");
            return Err(err);
        }
        debug!(protocol = entry.id.name(), %daddr, len, "packet sent");
        sent += 1;

        if matches!(cfg.ip.protocol, ProtocolSelector::Mixed) {
            cursor = (cursor + 1) % modules.len();
        }
        if !cfg.pacing.flood {
            remaining -= 1;
        }
    }

    Ok(Stats { sent })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;

    #[test]
    fn turbo_ineligible_below_floor_for_single_protocol() {
        let mut cfg = default_config();
        cfg.pacing.turbo = true;
        cfg.pacing.threshold = 1;
        let modules = ModuleTable::new();
        assert!(!turbo_eligible(&cfg, &modules));
    }

    #[test]
    fn turbo_eligible_above_floor_for_single_protocol() {
        let mut cfg = default_config();
        cfg.pacing.turbo = true;
        cfg.pacing.threshold = 2;
        let modules = ModuleTable::new();
        assert!(turbo_eligible(&cfg, &modules));
    }

    #[test]
    fn turbo_in_mixed_mode_needs_more_than_module_count() {
        let mut cfg = default_config();
        cfg.pacing.turbo = true;
        cfg.ip.protocol = ProtocolSelector::Mixed;
        let modules = ModuleTable::new();
        cfg.pacing.threshold = modules.len() as i32;
        assert!(!turbo_eligible(&cfg, &modules));
        cfg.pacing.threshold = modules.len() as i32 + 1;
        assert!(turbo_eligible(&cfg, &modules));
    }

    #[test]
    fn mixed_mode_rotates_every_module_exactly_once_per_pass() {
        let mut cfg = default_config();
        cfg.ip.protocol = ProtocolSelector::Mixed;
        cfg.target.bits = 32;
        let modules = Arc::new(ModuleTable::new());
        let n = modules.len();
        cfg.pacing.threshold = n as i32 * 2;

        let mut cursor = 0usize;
        let mut counts = vec![0u32; n];
        for _ in 0..cfg.pacing.threshold {
            counts[cursor] += 1;
            cursor = (cursor + 1) % n;
        }
        assert!(counts.iter().all(|&c| c == 2));
    }
}
