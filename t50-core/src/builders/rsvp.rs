//! RSVP common header (RFC 2205 §A.1). Only the fixed 8-byte common header
//! is emitted — object bodies (SESSION, HOP, TIME_VALUES, …) are out of
//! scope; the injector never carries on a real reservation.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 8;
const RSVP_VERSION: u8 = 1;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Rsvp, HEADER_LEN);
    let rsvp = &cfg.protocols.rsvp;

    let msg_type = rsvp.msg_type.resolve(rng);
    let flags = rsvp.flags.resolve(rng);
    let ttl = rsvp.ttl.resolve(rng);

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u8((RSVP_VERSION << 4) | (flags & 0x0f))
        .put_u8(msg_type)
        .put_u16(0) // checksum placeholder, patched below
        .put_u8(ttl)
        .put_u8(0) // reserved
        .put_u16(HEADER_LEN as u16);

    support::own_checksum_and_finish(cfg, buf, &layout, HEADER_LEN, layout.transport_offset + 2, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::internet_checksum;
    use crate::config::test_support::default_config;
    use crate::wire::ipv4;

    #[test]
    fn builds_checksum_valid_common_header() {
        let cfg = default_config();
        let mut rng = Prng::seeded(17);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + HEADER_LEN);
        assert_eq!(buf.as_slice(len)[ipv4::BASE_LEN] >> 4, RSVP_VERSION);
        assert_eq!(internet_checksum(&buf.as_slice(len)[ipv4::BASE_LEN..len]), 0);
    }
}
