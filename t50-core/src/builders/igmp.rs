//! IGMPv1 (RFC 1112) and IGMPv3 membership report (RFC 3376) builders.
//! Both checksum their own header + payload; IGMP has no pseudo-header.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const V1_HEADER_LEN: usize = 8;

pub fn build_v1(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Igmp1, V1_HEADER_LEN);
    let igmp = &cfg.protocols.igmp1;

    let igmp_type = igmp.igmp_type.resolve(rng);
    let group = u32::from(igmp.group_address.resolve(rng));

    Cursor::at(buf.as_mut(layout.transport_offset + V1_HEADER_LEN), layout.transport_offset)
        .put_u8(igmp_type)
        .put_u8(0) // unused in IGMPv1
        .put_u16(0) // checksum placeholder, patched below
        .put_u32(group);

    support::own_checksum_and_finish(cfg, buf, &layout, V1_HEADER_LEN, layout.transport_offset + 2, rng)
}

const V3_GROUP_RECORD_HEADER_LEN: usize = 8;

/// Single group record, no auxiliary data, `num_sources` source addresses
/// drawn fresh from the PRNG each call.
pub fn build_v3(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let igmp = &cfg.protocols.igmp3;
    let record_len = V3_GROUP_RECORD_HEADER_LEN + igmp.num_sources as usize * 4;
    let header_len = 8 + record_len;

    let layout = support::layout(cfg, buf, rng, ProtocolId::Igmp3, header_len);
    let group = u32::from(igmp.group_address.resolve(rng));

    let mut cursor = Cursor::at(buf.as_mut(layout.transport_offset + header_len), layout.transport_offset);
    cursor
        .put_u8(0x22) // membership report
        .put_u8(0)
        .put_u16(0) // checksum placeholder, patched below
        .put_u16(0) // reserved
        .put_u16(1) // one group record
        .put_u8(0) // record type: mode-is-include stub
        .put_u8(0) // aux data len
        .put_u16(igmp.num_sources)
        .put_u32(group);
    for _ in 0..igmp.num_sources {
        cursor.put_u32(rng.next_u32());
    }

    support::own_checksum_and_finish(cfg, buf, &layout, header_len, layout.transport_offset + 2, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::internet_checksum;
    use crate::config::test_support::default_config;
    use crate::wire::ipv4;

    #[test]
    fn v1_builds_checksum_valid_report() {
        let cfg = default_config();
        let mut rng = Prng::seeded(2);
        let mut buf = PacketBuffer::new();
        let len = build_v1(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + V1_HEADER_LEN);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }

    #[test]
    fn v3_sizes_body_by_source_count() {
        let mut cfg = default_config();
        cfg.protocols.igmp3.num_sources = 3;
        let mut rng = Prng::seeded(2);
        let mut buf = PacketBuffer::new();
        let len = build_v3(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + 8 + V3_GROUP_RECORD_HEADER_LEN + 3 * 4);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }
}
