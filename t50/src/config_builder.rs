//! Turns a parsed [`Cli`] into a validated [`t50_core::Config`]: build the
//! data model first, then run [`t50_core::config::validate`] as a separate
//! pass before any socket is touched.

use crate::cli::Cli;
use std::net::Ipv4Addr;
use t50_core::config::{
    AhConfig, DccpConfig, EgpConfig, EigrpConfig, EspConfig, GreConfig, GreOptions, Igmp1Config,
    Igmp3Config, IcmpConfig, IpConfig, IpOptions, OspfConfig, OspfPacketType, PacingConfig,
    ProtocolConfigs, ProtocolId, ProtocolSelector, RawIpConfig, Rnd, RipConfig, RndAddr,
    RndNetmask, RsvpConfig, TargetConfig, TcpConfig, TcpFlags, UdpConfig,
};
use t50_core::resolver::resolve_ipv4;
use t50_core::{Config, ConfigError};

fn rnd<T: Default + PartialEq + Copy>(v: T) -> Rnd<T> {
    if v == T::default() {
        Rnd::Random
    } else {
        Rnd::Fixed(v)
    }
}

fn opt_rnd<T: Default + PartialEq + Copy>(v: Option<T>) -> Rnd<T> {
    match v {
        None => Rnd::Random,
        Some(v) => rnd(v),
    }
}

fn rnd_addr(v: Option<Ipv4Addr>) -> RndAddr {
    match v {
        None | Some(Ipv4Addr::UNSPECIFIED) => RndAddr::Random,
        Some(a) => RndAddr::Fixed(a),
    }
}

fn rnd_netmask(v: Option<Ipv4Addr>) -> RndNetmask {
    match v {
        None | Some(Ipv4Addr::UNSPECIFIED) => RndNetmask::Random,
        Some(a) => RndNetmask::Fixed(a),
    }
}

/// Parse `A.B.C.D[/bits]` (or `hostname[/bits]`) into a resolved address
/// and CIDR prefix length. A bare address is `/32`.
fn parse_target(dest: &str) -> Result<(Ipv4Addr, u8), ConfigError> {
    let (host, bits) = match dest.split_once('/') {
        Some((host, bits)) => {
            let bits: u8 = bits.parse().map_err(|_| ConfigError::InvalidCidrBits(255))?;
            (host, bits)
        }
        None => (dest, 32u8),
    };
    if bits > 32 {
        return Err(ConfigError::InvalidCidrBits(bits));
    }
    let addr = resolve_ipv4(host)?;
    Ok((addr, bits))
}

fn build_protocol_selector(name: &str) -> Result<ProtocolSelector, ConfigError> {
    if name.eq_ignore_ascii_case("T50") {
        return Ok(ProtocolSelector::Mixed);
    }
    ProtocolId::from_name(name)
        .map(ProtocolSelector::Single)
        .ok_or_else(|| ConfigError::UnknownProtocol(name.to_string()))
}

/// Parse a hex string into [`IpOptions`]. Every byte is two hex digits, so
/// the string length must be a multiple of 8 (a 4-byte IP-option word) and
/// at most 80 (40 bytes, the IHL field's limit).
fn build_ip_options(hex: &str) -> Result<IpOptions, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidField {
        field: "ip-options",
        reason,
    };
    if hex.len() % 8 != 0 || hex.len() > 80 {
        return Err(invalid(format!(
            "length must be a multiple of 8 hex digits and at most 80, got {}",
            hex.len()
        )));
    }
    let mut options = IpOptions::default();
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let byte_str = std::str::from_utf8(chunk).map_err(|_| invalid("not valid UTF-8".into()))?;
        options.bytes[i] =
            u8::from_str_radix(byte_str, 16).map_err(|_| invalid(format!("invalid hex byte {byte_str:?}")))?;
    }
    options.len = (hex.len() / 2) as u8;
    Ok(options)
}

fn build_ospf_packet_type(name: &str) -> Result<OspfPacketType, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "hello" => Ok(OspfPacketType::Hello),
        "dd" => Ok(OspfPacketType::DatabaseDescription),
        "lsr" => Ok(OspfPacketType::LinkStateRequest),
        "lsu" => Ok(OspfPacketType::LinkStateUpdate),
        "lsack" => Ok(OspfPacketType::LinkStateAck),
        _ => Err(ConfigError::InvalidField {
            field: "ospf-type",
            reason: format!("unknown OSPF packet type {name:?}"),
        }),
    }
}

pub fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let (daddr, bits) = parse_target(&cli.target.dest)?;
    let protocol = build_protocol_selector(&cli.ip.protocol)?;
    let ospf_packet_type = build_ospf_packet_type(&cli.ospf.ospf_type)?;
    let ip_options = match &cli.ip.ip_options {
        Some(hex) => build_ip_options(hex)?,
        None => IpOptions::default(),
    };

    let gre_encapsulated =
        cli.gre.gre || cli.gre.gre_sum || cli.gre.gre_seq.is_some() || cli.gre.gre_key.is_some();

    let tcp_flags = TcpFlags {
        fin: cli.tcp.tcp_fin,
        syn: cli.tcp.tcp_syn,
        rst: cli.tcp.tcp_rst,
        psh: cli.tcp.tcp_psh,
        ack: cli.tcp.tcp_ack,
        urg: cli.tcp.tcp_urg,
        ece: cli.tcp.tcp_ece,
        cwr: cli.tcp.tcp_cwr,
    };

    let cfg = Config {
        target: TargetConfig {
            daddr,
            bits,
            saddr: rnd_addr(cli.target.saddr),
        },
        pacing: PacingConfig {
            threshold: cli.pacing.threshold,
            flood: cli.pacing.flood,
            turbo: cli.pacing.turbo,
        },
        ip: IpConfig {
            protocol,
            tos: rnd(cli.ip.tos),
            ttl: rnd(cli.ip.ttl),
            id: rnd(cli.ip.id),
            frag_flags_offset: rnd(cli.ip.frag),
            options: ip_options,
        },
        gre: GreConfig {
            encapsulated: gre_encapsulated,
            options: GreOptions {
                checksum: cli.gre.gre_sum,
                key: cli.gre.gre_key,
                sequence: cli.gre.gre_seq,
            },
        },
        bogus_csum: cli.bogus_csum,
        protocols: ProtocolConfigs {
            ip: RawIpConfig {
                protocol: rnd(cli.ip.ip_protocol),
            },
            tcp: TcpConfig {
                source_port: opt_rnd(cli.tcp.tcp_source_port),
                dest_port: opt_rnd(cli.tcp.tcp_dest_port),
                sequence: opt_rnd(cli.tcp.tcp_sequence),
                ack_seq: opt_rnd(cli.tcp.tcp_ack_seq),
                flags: tcp_flags,
                window: opt_rnd(cli.tcp.tcp_window),
                urg_ptr: opt_rnd(cli.tcp.tcp_urg_ptr),
            },
            udp: UdpConfig {
                source_port: opt_rnd(cli.udp.source_port),
                dest_port: opt_rnd(cli.udp.dest_port),
            },
            icmp: IcmpConfig {
                icmp_type: rnd(cli.icmp.icmp_type),
                code: rnd(cli.icmp.icmp_code),
                id: opt_rnd(cli.icmp.icmp_id),
                sequence: opt_rnd(cli.icmp.icmp_sequence),
            },
            igmp1: Igmp1Config {
                igmp_type: Rnd::Fixed(0x11),
                group_address: rnd_addr(cli.igmp.igmp_group),
            },
            igmp3: Igmp3Config {
                group_address: rnd_addr(cli.igmp.igmp_group),
                num_sources: cli.igmp.igmp_num_sources,
            },
            egp: EgpConfig {
                egp_type: opt_rnd(cli.egp.egp_type),
                code: opt_rnd(cli.egp.egp_code),
                as_number: opt_rnd(cli.egp.egp_as),
                sequence: opt_rnd(cli.egp.egp_sequence),
            },
            rip: RipConfig {
                command: cli.rip.rip_command,
                domain: opt_rnd(cli.rip.rip_domain),
                family: rnd(cli.rip.rip_family),
                tag: opt_rnd(cli.rip.rip_tag),
                address: rnd_addr(cli.rip.rip_address),
                netmask: rnd_netmask(cli.rip.rip_netmask),
                next_hop: rnd_addr(cli.rip.rip_next_hop),
                metric: rnd(cli.rip.rip_metric),
                auth: cli.rip.rip_auth,
                key_id: cli.rip.rip_key_id,
                sequence: opt_rnd(cli.rip.rip_auth_sequence),
            },
            dccp: DccpConfig {
                source_port: opt_rnd(cli.dccp.dccp_source_port),
                dest_port: opt_rnd(cli.dccp.dccp_dest_port),
                packet_type: cli.dccp.dccp_type,
                sequence: opt_rnd(cli.dccp.dccp_sequence),
            },
            rsvp: RsvpConfig {
                msg_type: opt_rnd(cli.rsvp.rsvp_type),
                flags: rnd(cli.rsvp.rsvp_flags),
                ttl: opt_rnd(cli.rsvp.rsvp_ttl),
            },
            ah: AhConfig {
                spi: opt_rnd(cli.ipsec.ipsec_spi),
                sequence: opt_rnd(cli.ipsec.ipsec_sequence),
            },
            esp: EspConfig {
                spi: opt_rnd(cli.ipsec.ipsec_spi),
                sequence: opt_rnd(cli.ipsec.ipsec_sequence),
            },
            eigrp: EigrpConfig {
                opcode: opt_rnd(cli.eigrp.eigrp_opcode),
                as_number: opt_rnd(cli.eigrp.eigrp_as),
            },
            ospf: OspfConfig {
                packet_type: ospf_packet_type,
                router_id: rnd_addr(cli.ospf.ospf_router_id),
                area_id: rnd_addr(cli.ospf.ospf_area_id),
            },
        },
    };

    t50_core::config::validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["t50"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn minimal_udp_invocation_builds_a_valid_config() {
        let cli = parse(&[
            "--dest",
            "192.0.2.1/32",
            "--protocol",
            "UDP",
            "--threshold",
            "1",
            "--source-port",
            "1000",
            "--dest-port",
            "2000",
        ]);
        let cfg = build_config(&cli).unwrap();
        assert_eq!(cfg.target.daddr, Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(cfg.target.bits, 32);
        assert_eq!(cfg.ip.protocol, ProtocolSelector::Single(ProtocolId::Udp));
        assert_eq!(cfg.protocols.udp.source_port, Rnd::Fixed(1000));
        assert_eq!(cfg.protocols.udp.dest_port, Rnd::Fixed(2000));
    }

    #[test]
    fn bare_address_defaults_to_slash_32() {
        let cli = parse(&["--dest", "198.51.100.1", "--protocol", "ICMP"]);
        let cfg = build_config(&cli).unwrap();
        assert_eq!(cfg.target.bits, 32);
    }

    #[test]
    fn t50_mode_selects_mixed_rotation() {
        let cli = parse(&["--dest", "198.51.100.0/24", "--protocol", "T50"]);
        let cfg = build_config(&cli).unwrap();
        assert_eq!(cfg.ip.protocol, ProtocolSelector::Mixed);
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let cli = parse(&["--dest", "198.51.100.1", "--protocol", "CARRIER_PIGEON"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn gre_suboption_implies_gre() {
        let cli = parse(&[
            "--dest",
            "10.0.0.1",
            "--protocol",
            "TCP",
            "--gre-sum",
            "--tcp-syn",
        ]);
        let cfg = build_config(&cli).unwrap();
        assert!(cfg.gre.encapsulated);
        assert!(cfg.gre.options.checksum);
        assert!(cfg.protocols.tcp.flags.syn);
    }

    #[test]
    fn bare_ip_protocol_selects_the_ip_builder() {
        let cli = parse(&[
            "--dest",
            "192.0.2.1",
            "--protocol",
            "IP",
            "--ip-protocol",
            "137",
        ]);
        let cfg = build_config(&cli).unwrap();
        assert_eq!(cfg.ip.protocol, ProtocolSelector::Single(ProtocolId::Ip));
        assert_eq!(cfg.protocols.ip.protocol, Rnd::Fixed(137));
    }

    #[test]
    fn ip_options_hex_string_is_decoded() {
        let cli = parse(&[
            "--dest",
            "192.0.2.1",
            "--protocol",
            "UDP",
            "--ip-options",
            "0102030400000000",
        ]);
        let cfg = build_config(&cli).unwrap();
        assert_eq!(cfg.ip.options.len, 8);
        assert_eq!(cfg.ip.options.as_slice(), &[1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn ip_options_with_bad_length_is_rejected() {
        let cli = parse(&[
            "--dest",
            "192.0.2.1",
            "--protocol",
            "UDP",
            "--ip-options",
            "0102",
        ]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn rip_auth_with_key_id_survives_into_config() {
        let cli = parse(&[
            "--dest",
            "198.51.100.0/24",
            "--protocol",
            "RIPv2",
            "--flood",
            "--rip-auth",
            "--rip-key-id",
            "7",
        ]);
        let cfg = build_config(&cli).unwrap();
        assert!(cfg.protocols.rip.auth);
        assert_eq!(cfg.protocols.rip.key_id, 7);
        assert_eq!(cfg.protocols.udp.source_port, Rnd::Random);
    }
}
