//! TCP builder. Always emits the fixed 20-byte header — no options — since
//! the injector never negotiates a real connection or handshake.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 20;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Tcp, HEADER_LEN);
    let tcp = &cfg.protocols.tcp;

    let source_port = tcp.source_port.resolve(rng);
    let dest_port = tcp.dest_port.resolve(rng);
    let sequence = tcp.sequence.resolve(rng);
    let ack_seq = tcp.ack_seq.resolve(rng);
    let window = tcp.window.resolve(rng);
    let urg_ptr = tcp.urg_ptr.resolve(rng);

    const DATA_OFFSET_WORDS: u8 = (HEADER_LEN / 4) as u8;

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u16(source_port)
        .put_u16(dest_port)
        .put_u32(sequence)
        .put_u32(ack_seq)
        .put_u8(DATA_OFFSET_WORDS << 4)
        .put_u8(tcp.flags.to_byte())
        .put_u16(window)
        .put_u16(0) // checksum placeholder, patched below
        .put_u16(urg_ptr);

    support::checksum_and_finish(
        cfg,
        buf,
        &layout,
        HEADER_LEN,
        layout.transport_offset + 16,
        ProtocolId::Tcp.ip_protocol_number(),
        rng,
    )
}
