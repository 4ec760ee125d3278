//! IPv4 header encoding, shared by the outer header every builder writes
//! and the inner header `gre::encapsulate` writes when GRE is enabled.

use crate::checksum::internet_checksum;
use crate::config::{Config, IpConfig, Rnd};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;
use std::net::Ipv4Addr;

pub const BASE_LEN: usize = 20;

/// Header length in bytes including IP options, before any write happens —
/// builders need this up front to size the packet buffer.
pub fn header_len(ip: &IpConfig) -> usize {
    BASE_LEN + ip.options.as_slice().len()
}

/// Resolved fields written into an IPv4 header. Returned so transport
/// builders can read back `saddr`/`daddr` for the pseudo-header without
/// re-deriving randomised values.
#[derive(Debug, Clone, Copy)]
pub struct WrittenIpHeader {
    pub saddr: u32,
    pub daddr: u32,
    pub header_len: usize,
}

/// Write a complete IPv4 header (options included) at the start of `buf`.
/// `payload_len` is everything after this header: GRE + inner datagram, or
/// the transport header + payload, whichever this header precedes.
#[allow(clippy::too_many_arguments)]
pub fn write_header(
    buf: &mut [u8],
    ip: &IpConfig,
    saddr: Ipv4Addr,
    daddr: u32,
    protocol: u8,
    payload_len: usize,
    rng: &mut Prng,
) -> WrittenIpHeader {
    let options = ip.options.as_slice();
    let ihl_words = 5 + (options.len() / 4) as u8;
    let header_len = ihl_words as usize * 4;
    let total_len = (header_len + payload_len) as u16;
    let saddr_u32 = u32::from(saddr);

    let tos = ip.tos.resolve(rng);
    let ttl = ip.ttl.resolve(rng);
    let id = ip.id.resolve(rng);
    let flags_frag = ip.frag_flags_offset.resolve(rng);

    let mut cursor = Cursor::new(&mut buf[..header_len]);
    cursor
        .put_u8(0x40 | ihl_words)
        .put_u8(tos)
        .put_u16(total_len)
        .put_u16(id)
        .put_u16(flags_frag)
        .put_u8(ttl)
        .put_u8(protocol)
        .put_u16(0) // checksum placeholder
        .put_u32(saddr_u32)
        .put_u32(daddr);
    if !options.is_empty() {
        cursor.put_bytes(options);
    }

    let csum = internet_checksum(&buf[..header_len]);
    buf[10..12].copy_from_slice(&csum.to_be_bytes());

    WrittenIpHeader {
        saddr: saddr_u32,
        daddr,
        header_len,
    }
}

/// Resolve the source address for a builder: `saddr == 0` (the CLI default)
/// requests randomisation, matching `INADDR_RND` semantics for the one IP
/// field that isn't modeled as `Rnd`/`RndAddr` directly because it also
/// doubles as "unset" in the CLI layer.
pub fn resolve_source(cfg: &Config, rng: &mut Prng) -> Ipv4Addr {
    cfg.target.saddr.resolve(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;

    #[test]
    fn header_checksums_to_zero() {
        let cfg = default_config();
        let mut rng = Prng::seeded(11);
        let mut buf = [0u8; BASE_LEN];
        let written = write_header(
            &mut buf,
            &cfg.ip,
            Ipv4Addr::new(10, 0, 0, 1),
            u32::from(Ipv4Addr::new(10, 0, 0, 2)),
            17,
            8,
            &mut rng,
        );
        assert_eq!(written.header_len, BASE_LEN);
        assert_eq!(internet_checksum(&buf), 0);
    }

    #[test]
    fn total_len_covers_header_plus_payload() {
        let cfg = default_config();
        let mut rng = Prng::seeded(2);
        let mut buf = [0u8; BASE_LEN];
        write_header(
            &mut buf,
            &cfg.ip,
            Ipv4Addr::new(10, 0, 0, 1),
            u32::from(Ipv4Addr::new(10, 0, 0, 2)),
            6,
            40,
            &mut rng,
        );
        let total_len = u16::from_be_bytes([buf[2], buf[3]]);
        assert_eq!(total_len as usize, BASE_LEN + 40);
    }

    #[test]
    fn options_extend_ihl_and_total_len() {
        let mut cfg = default_config();
        cfg.ip.options.len = 4;
        cfg.ip.options.bytes[0..4].copy_from_slice(&[0x01, 0x01, 0x01, 0x00]);
        let mut rng = Prng::seeded(2);
        let mut buf = [0u8; BASE_LEN + 4];
        let written = write_header(
            &mut buf,
            &cfg.ip,
            Ipv4Addr::new(10, 0, 0, 1),
            u32::from(Ipv4Addr::new(10, 0, 0, 2)),
            6,
            0,
            &mut rng,
        );
        assert_eq!(written.header_len, BASE_LEN + 4);
        assert_eq!(buf[0] & 0x0f, 6);
        assert_eq!(internet_checksum(&buf), 0);
    }
}
