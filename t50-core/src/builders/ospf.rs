//! OSPFv2 (RFC 2328) builder. The 24-byte common header is always emitted;
//! the body varies by packet type. HELLO (§A.3.2) is modeled in full since
//! it is the type most commonly exercised; DD, LSR, LSU
//! and LSAck bodies are reduced to their fixed-size prefix with no
//! variable-length LSA/TLV payload, since the injector never carries a
//! real adjacency to populate one.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, OspfPacketType, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const COMMON_HEADER_LEN: usize = 24;
const OSPF_VERSION: u8 = 2;

fn body_len(packet_type: OspfPacketType) -> usize {
    match packet_type {
        OspfPacketType::Hello => 20,
        OspfPacketType::DatabaseDescription => 8,
        OspfPacketType::LinkStateRequest => 0,
        OspfPacketType::LinkStateUpdate => 4,
        OspfPacketType::LinkStateAck => 0,
    }
}

fn type_code(packet_type: OspfPacketType) -> u8 {
    match packet_type {
        OspfPacketType::Hello => 1,
        OspfPacketType::DatabaseDescription => 2,
        OspfPacketType::LinkStateRequest => 3,
        OspfPacketType::LinkStateUpdate => 4,
        OspfPacketType::LinkStateAck => 5,
    }
}

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let ospf = &cfg.protocols.ospf;
    let header_len = COMMON_HEADER_LEN + body_len(ospf.packet_type);

    let layout = support::layout(cfg, buf, rng, ProtocolId::Ospf, header_len);

    let router_id = u32::from(ospf.router_id.resolve(rng));
    let area_id = u32::from(ospf.area_id.resolve(rng));

    let mut cursor = Cursor::at(buf.as_mut(layout.transport_offset + header_len), layout.transport_offset);
    cursor
        .put_u8(OSPF_VERSION)
        .put_u8(type_code(ospf.packet_type))
        .put_u16(header_len as u16)
        .put_u32(router_id)
        .put_u32(area_id)
        .put_u16(0) // checksum placeholder, patched below
        .put_u16(0) // AuType: null authentication
        .put_u64(0); // authentication data

    match ospf.packet_type {
        OspfPacketType::Hello => {
            cursor
                .put_u32(0xffff_ff00) // network mask, /24 stand-in
                .put_u16(10) // hello interval, seconds
                .put_u8(0x02) // options: E-bit set
                .put_u8(1) // router priority
                .put_u32(40) // router dead interval, seconds
                .put_u32(0) // designated router: none yet
                .put_u32(0); // backup designated router: none yet
        }
        OspfPacketType::DatabaseDescription => {
            cursor
                .put_u16(1500) // interface MTU
                .put_u8(0x02) // options: E-bit set
                .put_u8(0x07) // flags: I/M/MS all set
                .put_u32(rng.next_u32()); // DD sequence number
        }
        OspfPacketType::LinkStateUpdate => {
            cursor.put_u32(0); // number of LSAs: none, injector carries no real LSAs
        }
        OspfPacketType::LinkStateRequest | OspfPacketType::LinkStateAck => {
            // No fixed-size body beyond the common header.
        }
    }

    support::own_checksum_and_finish(cfg, buf, &layout, header_len, layout.transport_offset + 12, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::internet_checksum;
    use crate::config::test_support::default_config;
    use crate::wire::ipv4;

    #[test]
    fn hello_builds_checksum_valid_packet() {
        let cfg = default_config();
        let mut rng = Prng::seeded(51);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + COMMON_HEADER_LEN + 20);
        assert_eq!(buf.as_slice(len)[ipv4::BASE_LEN], OSPF_VERSION);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }

    #[test]
    fn link_state_ack_has_no_body() {
        let mut cfg = default_config();
        cfg.protocols.ospf.packet_type = OspfPacketType::LinkStateAck;
        let mut rng = Prng::seeded(51);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + COMMON_HEADER_LEN);
    }
}
