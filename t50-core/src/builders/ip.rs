//! Bare IPv4 builder: writes only the IP header (plus GRE encapsulation,
//! if enabled) with no recognised transport segment behind it. Unlike
//! every other builder, the protocol number is a configured/randomised
//! field rather than one implied by the transport being carried.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::Config;
use crate::rng::Prng;

pub fn build(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let protocol_number = cfg.protocols.ip.protocol.resolve(rng);
    let layout = support::layout_with_protocol(cfg, buf, rng, protocol_number, 0);
    layout.transport_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;
    use crate::config::Rnd;
    use crate::wire::ipv4;

    #[test]
    fn writes_only_an_ip_header() {
        let mut cfg = default_config();
        cfg.protocols.ip.protocol = Rnd::Fixed(253);
        let mut rng = Prng::seeded(1);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN);
        assert_eq!(buf.as_slice(len)[9], 253, "protocol number stamped into the header");
    }

    #[test]
    fn gre_encapsulation_wraps_the_bare_datagram() {
        let mut cfg = default_config();
        cfg.gre.encapsulated = true;
        cfg.protocols.ip.protocol = Rnd::Fixed(17);
        let mut rng = Prng::seeded(2);
        let mut buf = PacketBuffer::new();
        let len = build(&cfg, &mut buf, &mut rng);
        assert_eq!(buf.as_slice(len)[9], 47, "outer IP protocol is GRE");
        let inner_offset = ipv4::BASE_LEN + 4;
        assert_eq!(buf.as_slice(len)[inner_offset + 9], 17, "inner protocol number stamped through");
        assert_eq!(len, inner_offset + ipv4::BASE_LEN);
    }
}
