pub mod randomize;
pub mod types;
pub mod validate;

pub use randomize::{Randomizable, Rnd, RndAddr, RndNetmask};
pub use types::*;
pub use validate::validate;

/// A fully-resolved, sensible-default `Config`: single-protocol UDP against
/// a `/32`, every unspecified field set to randomise. Not meant as CLI
/// guidance — it exists so unit tests and the `criterion` benches in
/// `benches/` don't each hand-roll a `Config` literal.
pub fn sample_config() -> Config {
    use std::net::Ipv4Addr;

    Config {
        target: TargetConfig {
            daddr: Ipv4Addr::new(192, 0, 2, 1),
            bits: 32,
            saddr: RndAddr::Random,
        },
        pacing: PacingConfig {
            threshold: 1,
            flood: false,
            turbo: false,
        },
        ip: IpConfig {
            protocol: ProtocolSelector::Single(ProtocolId::Udp),
            tos: Rnd::Random,
            ttl: Rnd::Random,
            id: Rnd::Random,
            frag_flags_offset: Rnd::Fixed(0),
            options: IpOptions::default(),
        },
        gre: GreConfig::default(),
        bogus_csum: false,
        protocols: ProtocolConfigs {
            ip: RawIpConfig {
                protocol: Rnd::Random,
            },
            tcp: TcpConfig {
                source_port: Rnd::Random,
                dest_port: Rnd::Random,
                sequence: Rnd::Random,
                ack_seq: Rnd::Random,
                flags: TcpFlags::default(),
                window: Rnd::Random,
                urg_ptr: Rnd::Fixed(0),
            },
            udp: UdpConfig {
                source_port: Rnd::Random,
                dest_port: Rnd::Random,
            },
            icmp: IcmpConfig {
                icmp_type: Rnd::Fixed(8),
                code: Rnd::Fixed(0),
                id: Rnd::Random,
                sequence: Rnd::Random,
            },
            igmp1: Igmp1Config {
                igmp_type: Rnd::Fixed(0x11),
                group_address: RndAddr::Random,
            },
            igmp3: Igmp3Config {
                group_address: RndAddr::Random,
                num_sources: 0,
            },
            egp: EgpConfig {
                egp_type: Rnd::Random,
                code: Rnd::Random,
                as_number: Rnd::Random,
                sequence: Rnd::Random,
            },
            rip: RipConfig {
                command: 2,
                domain: Rnd::Fixed(0),
                family: Rnd::Fixed(2),
                tag: Rnd::Random,
                address: RndAddr::Random,
                netmask: RndNetmask::Random,
                next_hop: RndAddr::Fixed(Ipv4Addr::UNSPECIFIED),
                metric: Rnd::Fixed(1),
                auth: false,
                key_id: 0,
                sequence: Rnd::Random,
            },
            dccp: DccpConfig {
                source_port: Rnd::Random,
                dest_port: Rnd::Random,
                packet_type: 0,
                sequence: Rnd::Random,
            },
            rsvp: RsvpConfig {
                msg_type: Rnd::Random,
                flags: Rnd::Fixed(0),
                ttl: Rnd::Random,
            },
            ah: AhConfig {
                spi: Rnd::Random,
                sequence: Rnd::Random,
            },
            esp: EspConfig {
                spi: Rnd::Random,
                sequence: Rnd::Random,
            },
            eigrp: EigrpConfig {
                opcode: Rnd::Fixed(5),
                as_number: Rnd::Random,
            },
            ospf: OspfConfig {
                packet_type: OspfPacketType::Hello,
                router_id: RndAddr::Random,
                area_id: RndAddr::Fixed(Ipv4Addr::UNSPECIFIED),
            },
        },
    }
}

/// Test-only alias kept so every colocated `#[cfg(test)]` module can write
/// `use crate::config::test_support::default_config;` without reaching
/// into the public API surface directly.
#[cfg(test)]
pub(crate) mod test_support {
    pub use super::sample_config as default_config;
}
