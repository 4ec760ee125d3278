//! The `Config` data model.

use crate::config::randomize::{Rnd, RndAddr, RndNetmask};
use std::net::Ipv4Addr;

/// Which protocol(s) a single builder invocation targets. Replaces the
/// magic `IPPROTO_T50` sentinel with an explicit variant
/// rather than overloading an integer-width union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolSelector {
    Single(ProtocolId),
    /// "T50 mode": rotate through every registered module.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolId {
    /// Bare IPv4 datagram carrying no recognised transport header — the
    /// protocol number itself is the payload under test.
    Ip,
    Icmp,
    Igmp1,
    Igmp3,
    Tcp,
    Udp,
    Egp,
    Rip1,
    Rip2,
    Dccp,
    Rsvp,
    Ah,
    Esp,
    Eigrp,
    Ospf,
}

impl ProtocolId {
    pub const ALL: [ProtocolId; 15] = [
        ProtocolId::Ip,
        ProtocolId::Icmp,
        ProtocolId::Igmp1,
        ProtocolId::Igmp3,
        ProtocolId::Tcp,
        ProtocolId::Udp,
        ProtocolId::Egp,
        ProtocolId::Rip1,
        ProtocolId::Rip2,
        ProtocolId::Dccp,
        ProtocolId::Rsvp,
        ProtocolId::Ah,
        ProtocolId::Esp,
        ProtocolId::Eigrp,
        ProtocolId::Ospf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProtocolId::Ip => "IP",
            ProtocolId::Icmp => "ICMP",
            ProtocolId::Igmp1 => "IGMPv1",
            ProtocolId::Igmp3 => "IGMPv3",
            ProtocolId::Tcp => "TCP",
            ProtocolId::Udp => "UDP",
            ProtocolId::Egp => "EGP",
            ProtocolId::Rip1 => "RIPv1",
            ProtocolId::Rip2 => "RIPv2",
            ProtocolId::Dccp => "DCCP",
            ProtocolId::Rsvp => "RSVP",
            ProtocolId::Ah => "AH",
            ProtocolId::Esp => "ESP",
            ProtocolId::Eigrp => "EIGRP",
            ProtocolId::Ospf => "OSPF",
        }
    }

    /// IANA IP protocol number carried in the outer/inner IP header.
    pub fn ip_protocol_number(self) -> u8 {
        match self {
            // Never read: the bare-IP builder carries its own protocol
            // number in `RawIpConfig` rather than deriving one here.
            ProtocolId::Ip => 0,
            ProtocolId::Icmp => 1,
            ProtocolId::Igmp1 | ProtocolId::Igmp3 => 2,
            ProtocolId::Tcp => 6,
            ProtocolId::Udp => 17,
            ProtocolId::Egp => 8,
            ProtocolId::Rip1 | ProtocolId::Rip2 => 17, // RIP rides on UDP
            ProtocolId::Dccp => 33,
            ProtocolId::Rsvp => 46,
            ProtocolId::Ah => 51,
            ProtocolId::Esp => 50,
            ProtocolId::Eigrp => 88,
            ProtocolId::Ospf => 89,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ProtocolId::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TargetConfig {
    /// Destination network address, host byte order, before CIDR expansion.
    pub daddr: Ipv4Addr,
    /// CIDR prefix length, `0..=32`.
    pub bits: u8,
    pub saddr: RndAddr,
}

#[derive(Debug, Clone, Copy)]
pub struct PacingConfig {
    /// Remaining packets to send. Ignored entirely when `flood` is set.
    pub threshold: i32,
    pub flood: bool,
    pub turbo: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct IpConfig {
    pub protocol: ProtocolSelector,
    pub tos: Rnd<u8>,
    pub ttl: Rnd<u8>,
    pub id: Rnd<u16>,
    /// Raw 16-bit flags+fragment-offset field as it appears on the wire.
    pub frag_flags_offset: Rnd<u16>,
    pub options: IpOptions,
}

/// Raw IPv4 options, stored inline so `Config` stays `Copy`. `len` must be a
/// multiple of 4 (words) and at most 40 (IHL is a 4-bit word count).
#[derive(Debug, Clone, Copy)]
pub struct IpOptions {
    pub len: u8,
    pub bytes: [u8; 40],
}

impl Default for IpOptions {
    fn default() -> Self {
        Self {
            len: 0,
            bytes: [0; 40],
        }
    }
}

impl IpOptions {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreOptions {
    pub checksum: bool,
    pub key: Option<u32>,
    pub sequence: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreConfig {
    pub encapsulated: bool,
    pub options: GreOptions,
}

#[derive(Debug, Clone, Copy)]
pub struct TcpConfig {
    pub source_port: Rnd<u16>,
    pub dest_port: Rnd<u16>,
    pub sequence: Rnd<u32>,
    pub ack_seq: Rnd<u32>,
    pub flags: TcpFlags,
    pub window: Rnd<u16>,
    pub urg_ptr: Rnd<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcpFlags {
    pub fin: bool,
    pub syn: bool,
    pub rst: bool,
    pub psh: bool,
    pub ack: bool,
    pub urg: bool,
    pub ece: bool,
    pub cwr: bool,
}

impl TcpFlags {
    pub fn to_byte(self) -> u8 {
        (self.fin as u8)
            | (self.syn as u8) << 1
            | (self.rst as u8) << 2
            | (self.psh as u8) << 3
            | (self.ack as u8) << 4
            | (self.urg as u8) << 5
            | (self.ece as u8) << 6
            | (self.cwr as u8) << 7
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UdpConfig {
    pub source_port: Rnd<u16>,
    pub dest_port: Rnd<u16>,
}

#[derive(Debug, Clone, Copy)]
pub struct IcmpConfig {
    pub icmp_type: Rnd<u8>,
    pub code: Rnd<u8>,
    pub id: Rnd<u16>,
    pub sequence: Rnd<u16>,
}

#[derive(Debug, Clone, Copy)]
pub struct Igmp1Config {
    pub igmp_type: Rnd<u8>,
    pub group_address: RndAddr,
}

#[derive(Debug, Clone, Copy)]
pub struct Igmp3Config {
    pub group_address: RndAddr,
    pub num_sources: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct EgpConfig {
    pub egp_type: Rnd<u8>,
    pub code: Rnd<u8>,
    pub as_number: Rnd<u16>,
    pub sequence: Rnd<u16>,
}

#[derive(Debug, Clone, Copy)]
pub struct RipConfig {
    pub command: u8,
    pub domain: Rnd<u16>,
    pub family: Rnd<u16>,
    pub tag: Rnd<u16>,
    pub address: RndAddr,
    pub netmask: RndNetmask,
    pub next_hop: RndAddr,
    pub metric: Rnd<u32>,
    /// RFC 2082 MD5 authentication trailer (RIPv2 only).
    pub auth: bool,
    pub key_id: u8,
    pub sequence: Rnd<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct DccpConfig {
    pub source_port: Rnd<u16>,
    pub dest_port: Rnd<u16>,
    pub packet_type: u8,
    pub sequence: Rnd<u64>,
}

#[derive(Debug, Clone, Copy)]
pub struct RsvpConfig {
    pub msg_type: Rnd<u8>,
    pub flags: Rnd<u8>,
    pub ttl: Rnd<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct AhConfig {
    pub spi: Rnd<u32>,
    pub sequence: Rnd<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct EspConfig {
    pub spi: Rnd<u32>,
    pub sequence: Rnd<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct EigrpConfig {
    pub opcode: Rnd<u8>,
    pub as_number: Rnd<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OspfPacketType {
    Hello,
    DatabaseDescription,
    LinkStateRequest,
    LinkStateUpdate,
    LinkStateAck,
}

#[derive(Debug, Clone, Copy)]
pub struct OspfConfig {
    pub packet_type: OspfPacketType,
    pub router_id: RndAddr,
    pub area_id: RndAddr,
}

/// Config for the bare-IP builder: the only field it needs beyond the
/// shared [`IpConfig`] layer is the protocol number to stamp into the
/// header, since it writes no transport segment of its own.
#[derive(Debug, Clone, Copy)]
pub struct RawIpConfig {
    pub protocol: Rnd<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProtocolConfigs {
    pub ip: RawIpConfig,
    pub tcp: TcpConfig,
    pub udp: UdpConfig,
    pub icmp: IcmpConfig,
    pub igmp1: Igmp1Config,
    pub igmp3: Igmp3Config,
    pub egp: EgpConfig,
    pub rip: RipConfig,
    pub dccp: DccpConfig,
    pub rsvp: RsvpConfig,
    pub ah: AhConfig,
    pub esp: EspConfig,
    pub eigrp: EigrpConfig,
    pub ospf: OspfConfig,
}

/// Immutable-per-iteration bundle consumed by every builder.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub target: TargetConfig,
    pub pacing: PacingConfig,
    pub ip: IpConfig,
    pub gre: GreConfig,
    pub bogus_csum: bool,
    pub protocols: ProtocolConfigs,
}
