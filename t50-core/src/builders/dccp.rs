//! DCCP generic header (RFC 4340 §5.1), short form (`X = 0`, 24-bit
//! sequence number — no extended sequence number field). Rides directly on
//! IP like TCP/UDP and uses the transport pseudo-header for its checksum.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const HEADER_LEN: usize = 12;
const DATA_OFFSET_WORDS: u8 = (HEADER_LEN / 4) as u8;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Dccp, HEADER_LEN);
    let dccp = &cfg.protocols.dccp;

    let source_port = dccp.source_port.resolve(rng);
    let dest_port = dccp.dest_port.resolve(rng);
    let sequence24 = dccp.sequence.resolve(rng) & 0x00ff_ffff;
    let seq_hi = ((sequence24 >> 16) & 0xff) as u8;
    let seq_lo = (sequence24 & 0xffff) as u16;

    Cursor::at(buf.as_mut(layout.transport_offset + HEADER_LEN), layout.transport_offset)
        .put_u16(source_port)
        .put_u16(dest_port)
        .put_u8(DATA_OFFSET_WORDS)
        .put_u8(0) // CCVal/CsCov, both left at zero
        .put_u16(0) // checksum placeholder, patched below
        .put_u8((dccp.packet_type & 0x0f) << 1) // Type in bits 1-4, X bit clear
        .put_u8(seq_hi)
        .put_u16(seq_lo);

    support::checksum_and_finish(
        cfg,
        buf,
        &layout,
        HEADER_LEN,
        layout.transport_offset + 6,
        ProtocolId::Dccp.ip_protocol_number(),
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::internet_checksum;
    use crate::config::test_support::default_config;
    use crate::wire::{ipv4, pseudo};

    #[test]
    fn builds_checksum_valid_header() {
        let cfg = default_config();
        let mut rng = Prng::seeded(21);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + HEADER_LEN);

        let saddr = u32::from_be_bytes(buf.as_slice(len)[12..16].try_into().unwrap());
        let daddr = u32::from_be_bytes(buf.as_slice(len)[16..20].try_into().unwrap());
        let mut span = buf.as_slice(len)[ipv4::BASE_LEN..len].to_vec();
        let mut pseudo_buf = [0u8; pseudo::LEN];
        pseudo::write(&mut pseudo_buf, 0, saddr, daddr, 33, HEADER_LEN as u16);
        span.extend_from_slice(&pseudo_buf);
        assert_eq!(internet_checksum(&span), 0);
    }
}
