//! Uniform PRNG source used by every builder to resolve [`crate::config::Rnd`] fields.
//!
//! Each worker owns a private [`Prng`]: the PRNG state is per-worker.
//! Seeding from wall-clock time means two workers
//! spawned close together can share a seed; this is a documented, accepted
//! weakness, not a bug.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct Prng {
    rng: StdRng,
}

impl Prng {
    /// Seed from the current wall-clock time.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::seeded(seed)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.rng.gen()
    }

    pub fn next_u16(&mut self) -> u16 {
        self.rng.gen()
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.gen()
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Uniform sample in `[0, bound)`. `bound == 0` is a caller bug; the
    /// CIDR helper never calls this with a zero `hostid`.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }

    pub fn fill(&mut self, buf: &mut [u8]) {
        self.rng.fill(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_stays_in_bounds() {
        let mut rng = Prng::seeded(42);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
        }
    }

    #[test]
    fn seeded_is_deterministic() {
        let mut a = Prng::seeded(1234);
        let mut b = Prng::seeded(1234);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
