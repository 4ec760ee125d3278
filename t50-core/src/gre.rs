//! GRE encapsulation: an outer IP + GRE header wrapped
//! around the inner IP datagram when `cfg.gre.encapsulated` is set, per
//! RFC 2784 (base GRE) and RFC 2890 (key and sequence number extensions).

use crate::checksum::internet_checksum;
use crate::config::types::GreOptions;
use crate::config::Config;
use crate::rng::Prng;
use crate::wire::cursor::Cursor;
use crate::wire::ipv4;
use std::net::Ipv4Addr;

pub const GRE_BASE_LEN: usize = 4;
const ETHERTYPE_IPV4: u16 = 0x0800;
const FLAG_CHECKSUM: u16 = 0x8000;
const FLAG_KEY: u16 = 0x2000;
const FLAG_SEQ: u16 = 0x1000;

/// GRE option length: 0 when GRE is disabled, else the fixed
/// 4-byte header plus 4 bytes per enabled option.
pub fn opt_len(options: &GreOptions, encapsulated: bool) -> usize {
    if !encapsulated {
        return 0;
    }
    let mut len = GRE_BASE_LEN;
    if options.checksum {
        len += 4;
    }
    if options.key.is_some() {
        len += 4;
    }
    if options.sequence.is_some() {
        len += 4;
    }
    len
}

/// Layout pass result: where the inner IP header starts and its resolved
/// address fields, so builders can reuse them for the transport
/// pseudo-header.
#[derive(Debug, Clone, Copy)]
pub struct Encapsulation {
    pub inner_header: ipv4::WrittenIpHeader,
    pub gre_offset: usize,
}

/// Write the outer header's GRE payload: the GRE header itself, then an
/// inner IPv4 header covering `inner_payload_len` bytes of transport
/// header + payload that follows it. Returns `None` when GRE is disabled;
/// callers fall back to the outer IP header in that case.
#[allow(clippy::too_many_arguments)]
pub fn encapsulate(
    buf: &mut [u8],
    gre_offset: usize,
    cfg: &Config,
    inner_saddr: Ipv4Addr,
    inner_daddr: u32,
    inner_protocol: u8,
    inner_payload_len: usize,
    rng: &mut Prng,
) -> Option<Encapsulation> {
    if !cfg.gre.encapsulated {
        return None;
    }

    let options = &cfg.gre.options;
    let mut flags_ver: u16 = 0;
    if options.checksum {
        flags_ver |= FLAG_CHECKSUM;
    }
    if options.key.is_some() {
        flags_ver |= FLAG_KEY;
    }
    if options.sequence.is_some() {
        flags_ver |= FLAG_SEQ;
    }

    let mut cursor = Cursor::at(buf, gre_offset);
    cursor.put_u16(flags_ver).put_u16(ETHERTYPE_IPV4);
    if options.checksum {
        // Checksum + reserved1, both zero until `gre_checksum` patches them.
        cursor.put_u16(0).put_u16(0);
    }
    if let Some(key) = options.key {
        cursor.put_u32(key);
    }
    if let Some(seq) = options.sequence {
        cursor.put_u32(seq);
    }

    let inner_offset = cursor.position();
    let inner_header = ipv4::write_header(
        &mut buf[inner_offset..],
        &cfg.ip,
        inner_saddr,
        inner_daddr,
        inner_protocol,
        inner_payload_len,
        rng,
    );

    Some(Encapsulation {
        inner_header,
        gre_offset,
    })
}

/// Fill pass: patch the GRE checksum option (if enabled) by summing over
/// the GRE header through the end of the datagram, after the L4 checksum
/// has already been written.
pub fn checksum(buf: &mut [u8], cfg: &Config, gre_offset: usize, total_len: usize) {
    if !cfg.gre.encapsulated || !cfg.gre.options.checksum {
        return;
    }
    let csum = internet_checksum(&buf[gre_offset..total_len]);
    // Checksum field sits right after the 4-byte fixed GRE header.
    buf[gre_offset + 4..gre_offset + 6].copy_from_slice(&csum.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;

    #[test]
    fn opt_len_is_zero_when_disabled() {
        assert_eq!(opt_len(&GreOptions::default(), false), 0);
    }

    #[test]
    fn opt_len_grows_per_option() {
        let opts = GreOptions {
            checksum: true,
            key: Some(1),
            sequence: Some(1),
        };
        assert_eq!(opt_len(&opts, true), 4 + 4 + 4 + 4);
    }

    #[test]
    fn encapsulate_returns_none_when_disabled() {
        let cfg = default_config();
        let mut buf = [0u8; 64];
        let mut rng = Prng::seeded(1);
        assert!(encapsulate(
            &mut buf,
            0,
            &cfg,
            Ipv4Addr::new(10, 0, 0, 1),
            u32::from(Ipv4Addr::new(10, 0, 0, 2)),
            6,
            0,
            &mut rng,
        )
        .is_none());
    }

    #[test]
    fn checksum_patches_checksum_field_only_when_enabled() {
        let mut cfg = default_config();
        cfg.gre.encapsulated = true;
        cfg.gre.options.checksum = true;
        let mut buf = [0u8; 64];
        let mut rng = Prng::seeded(1);
        let enc = encapsulate(
            &mut buf,
            0,
            &cfg,
            Ipv4Addr::new(10, 0, 0, 1),
            u32::from(Ipv4Addr::new(10, 0, 0, 2)),
            6,
            0,
            &mut rng,
        )
        .unwrap();
        let total_len = enc.inner_header.header_len + enc.gre_offset + GRE_BASE_LEN + 4;
        checksum(&mut buf, &cfg, 0, total_len);
        let recomputed = internet_checksum(&buf[0..total_len]);
        assert_eq!(recomputed, 0);
    }
}
