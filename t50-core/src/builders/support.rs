//! Shared layout/fill passes every builder runs before writing its own
//! transport header.

use crate::buffer::PacketBuffer;
use crate::checksum::internet_checksum;
use crate::config::{Config, ProtocolId};
use crate::gre;
use crate::rng::Prng;
use crate::wire::{ipv4, pseudo};

pub struct Layout {
    /// Offset at which the builder should write its transport header.
    pub transport_offset: usize,
    /// Source/destination to use for this transport's pseudo-header: the
    /// inner pair when GRE-encapsulated, the outer pair otherwise
    /// header when GRE is disabled.
    pub saddr: u32,
    pub daddr: u32,
    /// Byte offset of the GRE header, for the later checksum fill pass.
    /// `None` when GRE is disabled.
    pub gre_offset: Option<usize>,
}

/// Size the buffer, write the outer IP header, and — when GRE is enabled
/// — the GRE header and inner IP header. `transport_and_payload_len` is
/// the size of the transport header plus its payload (excluding any
/// pseudo-header, which is never transmitted).
pub fn layout(
    cfg: &Config,
    buf: &mut PacketBuffer,
    rng: &mut Prng,
    protocol_id: ProtocolId,
    transport_and_payload_len: usize,
) -> Layout {
    layout_with_protocol(cfg, buf, rng, protocol_id.ip_protocol_number(), transport_and_payload_len)
}

/// Like [`layout`], but takes the IP protocol number directly instead of
/// deriving it from a [`ProtocolId`] — for the bare-IP builder, whose
/// protocol number is a configured/randomised field rather than one fixed
/// by the transport it carries.
pub fn layout_with_protocol(
    cfg: &Config,
    buf: &mut PacketBuffer,
    rng: &mut Prng,
    protocol_number: u8,
    transport_and_payload_len: usize,
) -> Layout {
    let greoptlen = gre::opt_len(&cfg.gre.options, cfg.gre.encapsulated);
    let ip_len = ipv4::header_len(&cfg.ip);
    let inner_len = if cfg.gre.encapsulated { ip_len } else { 0 };
    let total = ip_len + greoptlen + inner_len + transport_and_payload_len;
    buf.ensure(total);

    let daddr = u32::from(cfg.target.daddr);
    let outer_saddr = ipv4::resolve_source(cfg, rng);

    let (outer_protocol, outer_payload_len) = if cfg.gre.encapsulated {
        (47u8, greoptlen + inner_len + transport_and_payload_len)
    } else {
        (protocol_number, transport_and_payload_len)
    };

    let outer = ipv4::write_header(
        &mut buf.as_mut(total)[..],
        &cfg.ip,
        outer_saddr,
        daddr,
        outer_protocol,
        outer_payload_len,
        rng,
    );

    // Each IP header write resolves its own randomised fields
    // independently, so the inner source address can legitimately differ
    // from the outer one when `saddr` is randomised — this mirrors the
    // original, which calls the header writer once per layer.
    let inner_saddr = ipv4::resolve_source(cfg, rng);

    match gre::encapsulate(
        buf.as_mut(total),
        outer.header_len,
        cfg,
        inner_saddr,
        daddr,
        protocol_number,
        transport_and_payload_len,
        rng,
    ) {
        Some(enc) => Layout {
            transport_offset: outer.header_len + greoptlen + enc.inner_header.header_len,
            saddr: enc.inner_header.saddr,
            daddr: enc.inner_header.daddr,
            gre_offset: Some(outer.header_len),
        },
        None => Layout {
            transport_offset: outer.header_len,
            saddr: outer.saddr,
            daddr: outer.daddr,
            gre_offset: None,
        },
    }
}

/// Fill pass: patch the GRE checksum option once the transport checksum
/// has already been written. No-op when GRE is
/// disabled or the checksum option isn't set.
pub fn finish_gre(buf: &mut PacketBuffer, cfg: &Config, gre_offset: Option<usize>, total_len: usize) {
    if let Some(offset) = gre_offset {
        gre::checksum(buf.as_mut(total_len), cfg, offset, total_len);
    }
}

/// Append the pseudo-header, checksum `[transport header | payload | pseudo]`,
/// and patch the checksum field of the transport header — or, with
/// `cfg.bogus_csum` set, a fresh random value instead.
/// Returns the total on-wire length (pseudo-header excluded) and runs the
/// GRE checksum fill pass before returning it.
pub fn checksum_and_finish(
    cfg: &Config,
    buf: &mut PacketBuffer,
    layout: &Layout,
    transport_len: usize,
    checksum_field_offset: usize,
    protocol_number: u8,
    rng: &mut Prng,
) -> usize {
    let total_len = layout.transport_offset + transport_len;
    let with_pseudo = total_len + pseudo::LEN;
    buf.ensure(with_pseudo);
    pseudo::write(
        buf.as_mut(with_pseudo),
        total_len,
        layout.saddr,
        layout.daddr,
        protocol_number,
        transport_len as u16,
    );

    let csum = if cfg.bogus_csum {
        rng.next_u16()
    } else {
        internet_checksum(&buf.as_slice(with_pseudo)[layout.transport_offset..with_pseudo])
    };
    buf.as_mut(with_pseudo)[checksum_field_offset..checksum_field_offset + 2]
        .copy_from_slice(&csum.to_be_bytes());

    finish_gre(buf, cfg, layout.gre_offset, total_len);
    total_len
}

/// Like [`checksum_and_finish`], for protocols that checksum only their own
/// header plus payload — no pseudo-header (ICMP, IGMP, EGP, RSVP, EIGRP,
/// OSPF all follow this shape).
pub fn own_checksum_and_finish(
    cfg: &Config,
    buf: &mut PacketBuffer,
    layout: &Layout,
    transport_len: usize,
    checksum_field_offset: usize,
    rng: &mut Prng,
) -> usize {
    let total_len = layout.transport_offset + transport_len;
    let csum = if cfg.bogus_csum {
        rng.next_u16()
    } else {
        internet_checksum(&buf.as_slice(total_len)[layout.transport_offset..total_len])
    };
    buf.as_mut(total_len)[checksum_field_offset..checksum_field_offset + 2]
        .copy_from_slice(&csum.to_be_bytes());

    finish_gre(buf, cfg, layout.gre_offset, total_len);
    total_len
}
