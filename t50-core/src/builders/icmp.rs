//! ICMP builder (RFC 792). Checksums its own header + payload; ICMP has no
//! pseudo-header.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 8;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Icmp, HEADER_LEN);
    let icmp = &cfg.protocols.icmp;

    let icmp_type = icmp.icmp_type.resolve(rng);
    let code = icmp.code.resolve(rng);
    let id = icmp.id.resolve(rng);
    let sequence = icmp.sequence.resolve(rng);

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u8(icmp_type)
        .put_u8(code)
        .put_u16(0) // checksum placeholder, patched below
        .put_u16(id)
        .put_u16(sequence);

    support::own_checksum_and_finish(cfg, buf, &layout, HEADER_LEN, layout.transport_offset + 2, rng)
}
