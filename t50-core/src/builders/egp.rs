//! EGP builder (RFC 888). Only the common header fields shared by every EGP
//! message type are modeled — Neighbor Acquisition / Reachability /
//! Routing Update bodies are out of scope, matching the injector's
//! one-shot, non-conversational design.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 8;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Egp, HEADER_LEN);
    let egp = &cfg.protocols.egp;

    let egp_type = egp.egp_type.resolve(rng);
    let code = egp.code.resolve(rng);
    let as_number = egp.as_number.resolve(rng);
    let sequence = egp.sequence.resolve(rng);

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u8(egp_type)
        .put_u8(code)
        .put_u16(0) // checksum placeholder, patched below
        .put_u16(as_number)
        .put_u16(sequence);

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
        let mut rng = Prng::seeded(13);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + HEADER_LEN);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }
}
