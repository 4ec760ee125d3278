//! The "0 means randomise" sentinel convention, reified as an explicit
//! sum type; the resolver at build time produces the concrete value.

use crate::rng::Prng;
use std::net::Ipv4Addr;

/// A numeric field that is either pinned to a caller-supplied value or
/// resolved fresh from the PRNG on every builder invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rnd<T> {
    Fixed(T),
    Random,
}

impl<T> Rnd<T> {
    pub fn fixed_or(value: T, is_random: bool) -> Self {
        if is_random {
            Rnd::Random
        } else {
            Rnd::Fixed(value)
        }
    }
}

pub trait Randomizable: Sized + Copy {
    fn sample(rng: &mut Prng) -> Self;
}

impl Randomizable for u8 {
    fn sample(rng: &mut Prng) -> Self {
        rng.next_u8()
    }
}

impl Randomizable for u16 {
    fn sample(rng: &mut Prng) -> Self {
        rng.next_u16()
    }
}

impl Randomizable for u32 {
    fn sample(rng: &mut Prng) -> Self {
        rng.next_u32()
    }
}

impl Randomizable for u64 {
    fn sample(rng: &mut Prng) -> Self {
        rng.next_u64()
    }
}

impl<T: Randomizable> Rnd<T> {
    pub fn resolve(self, rng: &mut Prng) -> T {
        match self {
            Rnd::Fixed(v) => v,
            Rnd::Random => T::sample(rng),
        }
    }
}

/// `INADDR_RND`: an address field that randomises to any 32-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RndAddr {
    Fixed(Ipv4Addr),
    Random,
}

impl RndAddr {
    pub fn resolve(self, rng: &mut Prng) -> Ipv4Addr {
        match self {
            RndAddr::Fixed(a) => a,
            RndAddr::Random => Ipv4Addr::from(rng.next_u32()),
        }
    }
}

/// `NETMASK_RND`: like [`RndAddr`], but randomisation is coerced to a valid
/// contiguous-run-of-ones mask rather than an arbitrary 32-bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RndNetmask {
    Fixed(Ipv4Addr),
    Random,
}

impl RndNetmask {
    pub fn resolve(self, rng: &mut Prng) -> Ipv4Addr {
        match self {
            RndNetmask::Fixed(a) => a,
            RndNetmask::Random => {
                let prefix_len = rng.below(33) as u8; // 0..=32
                let bits = if prefix_len == 0 {
                    0
                } else {
                    u32::MAX << (32 - prefix_len)
                };
                Ipv4Addr::from(bits)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_resolves_to_itself() {
        let mut rng = Prng::seeded(1);
        assert_eq!(Rnd::Fixed(42u16).resolve(&mut rng), 42);
    }

    #[test]
    fn random_u64_resolves_without_panicking() {
        let mut rng = Prng::seeded(1);
        let _: u64 = Rnd::<u64>::Random.resolve(&mut rng);
    }

    #[test]
    fn random_netmask_is_always_contiguous() {
        let mut rng = Prng::seeded(99);
        for _ in 0..1000 {
            let mask = u32::from(RndNetmask::Random.resolve(&mut rng));
            // A valid mask is `1^k 0^(32-k)`: `mask | (mask >> 1).wrapping_add(...)`
            // simpler check: `!mask + 1` is a power of two or zero.
            let inverted = !mask;
            assert!(
                inverted == 0 || (inverted & inverted.wrapping_add(1)) == 0,
                "{mask:#034b} is not a contiguous mask"
            );
        }
    }
}
