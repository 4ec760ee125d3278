//! UDP builder (RFC 768).

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 8;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Udp, HEADER_LEN);

    let source_port = cfg.protocols.udp.source_port.resolve(rng);
    let dest_port = cfg.protocols.udp.dest_port.resolve(rng);

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u16(source_port)
        .put_u16(dest_port)
        .put_u16(HEADER_LEN as u16)
        .put_u16(0); // checksum placeholder, patched below

    support::checksum_and_finish(
        cfg,
        buf,
        &layout,
        HEADER_LEN,
        layout.transport_offset + 6,
        ProtocolId::Udp.ip_protocol_number(),
        rng,
    )
}
