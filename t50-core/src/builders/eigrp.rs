//! EIGRP header (Cisco proprietary, no formal RFC). Fixed 20-byte header;
//! flags/sequence/ack are not exposed as configuration (the EIGRP
//! sub-record only carries `opcode` and `as_number`) so each is drawn
//! fresh from the PRNG every call.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 20;
const EIGRP_VERSION: u8 = 2;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Eigrp, HEADER_LEN);
    let eigrp = &cfg.protocols.eigrp;

    let opcode = eigrp.opcode.resolve(rng);
    let as_number = eigrp.as_number.resolve(rng);

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u8(EIGRP_VERSION)
        .put_u8(opcode)
        .put_u16(0) // checksum placeholder, patched below
        .put_u32(rng.next_u32()) // flags
        .put_u32(rng.next_u32()) // sequence
        .put_u32(rng.next_u32()) // ack
        .put_u32(as_number);

    support::own_checksum_and_finish(cfg, buf, &layout, HEADER_LEN, layout.transport_offset + 2, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::internet_checksum;
    use crate::config::test_support::default_config;
    use crate::wire::ipv4;

    #[test]
    fn builds_checksum_valid_header() {
        let cfg = default_config();
        let mut rng = Prng::seeded(41);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + HEADER_LEN);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }
}
