//! RIPv1 (RFC 1058) and RIPv2 (RFC 1388/2453, with the RFC 2082 MD5
//! authentication trailer) builders. Both ride on UDP port 520 and use the
//! transport pseudo-header for their checksum.
//!
//! The MD5 trailer here is `RIP_AUTH_LENGTH` bytes of fresh random data, not
//! a real HMAC-MD5 digest over the datagram — this is a documented
//! limitation: the tool never speaks the protocol, it only
//! forges datagrams shaped like it.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const IPPORT_RIP: u16 = 520;
const RIP_HEADER_LEN: usize = 4;
const RIP_ENTRY_LEN: usize = 20;
const RIP_AUTH_ENTRY_LEN: usize = 20;
const RIP_AUTH_LENGTH: usize = 16; // MD5 digest length (RFC 2082)

pub fn build_v1(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let udp_len = RIP_HEADER_LEN + RIP_ENTRY_LEN;
    build(cfg, buf, rng, ProtocolId::Rip1, udp_len, |cursor, cfg, rng| {
        let rip = &cfg.protocols.rip;
        cursor
            .put_u16(rip.family.resolve(rng))
            .put_u16(0) // route tag: must be zero in RIPv1
            .put_u32(u32::from(rip.address.resolve(rng)))
            .put_u32(0) // subnet mask: must be zero in RIPv1
            .put_u32(0) // next hop: must be zero in RIPv1
            .put_u32(rip.metric.resolve(rng));
    })
}

pub fn build_v2(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let rip = &cfg.protocols.rip;
    let auth_trailer_len = if rip.auth { 4 + RIP_AUTH_LENGTH } else { 0 };
    let auth_entry_len = if rip.auth { RIP_AUTH_ENTRY_LEN } else { 0 };
    let udp_len = RIP_HEADER_LEN + auth_entry_len + RIP_ENTRY_LEN + auth_trailer_len;

    build(cfg, buf, rng, ProtocolId::Rip2, udp_len, |cursor, cfg, rng| {
        let rip = &cfg.protocols.rip;

        if rip.auth {
            // RFC 2082 authentication header entry.
            cursor
                .put_u16(0xffff)
                .put_u16(0x0003) // authentication type: cryptographic
                .put_u16((RIP_HEADER_LEN + RIP_AUTH_ENTRY_LEN + RIP_ENTRY_LEN) as u16)
                .put_u8(rip.key_id)
                .put_u8(RIP_AUTH_LENGTH as u8)
                .put_u32(rip.sequence.resolve(rng))
                .put_u32(0)
                .put_u32(0);
        }

        cursor
            .put_u16(rip.family.resolve(rng))
            .put_u16(rip.tag.resolve(rng))
            .put_u32(u32::from(rip.address.resolve(rng)))
            .put_u32(u32::from(rip.netmask.resolve(rng)))
            .put_u32(u32::from(rip.next_hop.resolve(rng)))
            .put_u32(rip.metric.resolve(rng));

        if rip.auth {
            cursor.put_u16(0xffff).put_u16(0x0001); // authentication data trailer marker
            cursor.put_random(RIP_AUTH_LENGTH, rng);
        }
    })
}

fn build(
    cfg: &Config,
    buf: &mut PacketBuffer,
    rng: &mut Prng,
    id: ProtocolId,
    udp_payload_len: usize,
    write_body: impl FnOnce(&mut Cursor<'_>, &Config, &mut Prng),
) -> usize {
    let total_udp_len = 8 + udp_payload_len;
    let layout = support::layout(cfg, buf, rng, id, total_udp_len);

    let mut cursor = Cursor::at(buf.as_mut(layout.transport_offset + total_udp_len), layout.transport_offset);
    cursor
        .put_u16(IPPORT_RIP)
        .put_u16(IPPORT_RIP)
        .put_u16(total_udp_len as u16)
        .put_u16(0); // checksum placeholder, patched below

    cursor.put_u8(cfg.protocols.rip.command).put_u8(if id == ProtocolId::Rip1 { 1 } else { 2 });
    cursor.put_u16(cfg.protocols.rip.domain.resolve(rng));
    write_body(&mut cursor, cfg, rng);

    support::checksum_and_finish(cfg, buf, &layout, total_udp_len, layout.transport_offset + 6, 17, rng)
}
