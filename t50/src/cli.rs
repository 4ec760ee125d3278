//! Command-line surface: one `#[derive(Parser)]` struct per logical flag
//! group, composed with `#[command(flatten)]` into a single top-level
//! [`Cli`]. Keeping each protocol's flags in its own struct lets
//! [`crate::config_builder`] validate and convert one group at a time.

use clap::Parser;
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "T50 mixed-protocol packet injector",
    long_about = "Synthesises RFC-accurate datagrams for a selection of \
                  network protocols and transmits them at high rate against \
                  an address range, either as a single protocol or as a \
                  round-robin of all supported protocols (T50 mode)."
)]
pub struct Cli {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub pacing: PacingArgs,

    #[command(flatten)]
    pub ip: IpArgs,

    #[command(flatten)]
    pub gre: GreArgs,

    /// Replace the transport checksum with a random 16-bit value instead of
    /// a correctly computed one.
    #[arg(long)]
    pub bogus_csum: bool,

    #[command(flatten)]
    pub tcp: TcpArgs,

    #[command(flatten)]
    pub udp: UdpArgs,

    #[command(flatten)]
    pub icmp: IcmpArgs,

    #[command(flatten)]
    pub igmp: IgmpArgs,

    #[command(flatten)]
    pub egp: EgpArgs,

    #[command(flatten)]
    pub rip: RipArgs,

    #[command(flatten)]
    pub dccp: DccpArgs,

    #[command(flatten)]
    pub rsvp: RsvpArgs,

    #[command(flatten)]
    pub ipsec: IpsecArgs,

    #[command(flatten)]
    pub eigrp: EigrpArgs,

    #[command(flatten)]
    pub ospf: OspfArgs,
}

#[derive(Parser, Debug)]
pub struct TargetArgs {
    /// Destination address, optionally with a CIDR prefix (`A.B.C.D[/bits]`).
    /// A bare address is treated as `/32`. Hostnames are resolved to an
    /// IPv4 address.
    #[arg(long, value_name = "ADDR[/BITS]")]
    pub dest: String,

    /// Source address; omitted or zero means randomise per datagram.
    #[arg(long)]
    pub saddr: Option<Ipv4Addr>,
}

#[derive(Parser, Debug)]
pub struct PacingArgs {
    /// Number of datagrams to send. Ignored when `--flood` is set.
    #[arg(long, default_value_t = 1000)]
    pub threshold: i32,

    /// Ignore `--threshold` and send until interrupted.
    #[arg(long)]
    pub flood: bool,

    /// Split the run across two worker threads.
    #[arg(long)]
    pub turbo: bool,
}

#[derive(Parser, Debug)]
pub struct IpArgs {
    /// Protocol to inject, or `T50` to rotate through every registered
    /// protocol each iteration.
    #[arg(long, default_value = "T50")]
    pub protocol: String,

    /// IP protocol number to stamp into a bare `--protocol IP` datagram; 0
    /// randomises. Ignored for every other protocol.
    #[arg(long, default_value_t = 0)]
    pub ip_protocol: u8,

    /// Type of service; 0 randomises.
    #[arg(long, default_value_t = 0)]
    pub tos: u8,

    /// Time to live; 0 randomises.
    #[arg(long, default_value_t = 0)]
    pub ttl: u8,

    /// IP identification field; 0 randomises.
    #[arg(long, default_value_t = 0)]
    pub id: u16,

    /// Raw flags+fragment-offset field as it appears on the wire; 0
    /// randomises.
    #[arg(long, default_value_t = 0)]
    pub frag: u16,

    /// IPv4 options as a hex string (e.g. `0102030400000000`); length must
    /// be a multiple of 8 hex digits (4 bytes) and at most 80 digits (40
    /// bytes). Omitted means no options.
    #[arg(long)]
    pub ip_options: Option<String>,
}

#[derive(Parser, Debug)]
pub struct GreArgs {
    /// Wrap the datagram in an outer IP + GRE header.
    #[arg(long)]
    pub gre: bool,

    /// Set the GRE sequence number option; implies `--gre`.
    #[arg(long)]
    pub gre_seq: Option<u32>,

    /// Set the GRE key option; implies `--gre`.
    #[arg(long)]
    pub gre_key: Option<u32>,

    /// Enable the GRE checksum option; implies `--gre`.
    #[arg(long)]
    pub gre_sum: bool,
}

#[derive(Parser, Debug)]
pub struct TcpArgs {
    #[arg(long)]
    pub tcp_source_port: Option<u16>,
    #[arg(long)]
    pub tcp_dest_port: Option<u16>,
    #[arg(long)]
    pub tcp_sequence: Option<u32>,
    #[arg(long)]
    pub tcp_ack_seq: Option<u32>,
    #[arg(long)]
    pub tcp_window: Option<u16>,
    #[arg(long)]
    pub tcp_urg_ptr: Option<u16>,
    #[arg(long)]
    pub tcp_fin: bool,
    #[arg(long)]
    pub tcp_syn: bool,
    #[arg(long)]
    pub tcp_rst: bool,
    #[arg(long)]
    pub tcp_psh: bool,
    #[arg(long)]
    pub tcp_ack: bool,
    #[arg(long)]
    pub tcp_urg: bool,
    #[arg(long)]
    pub tcp_ece: bool,
    #[arg(long)]
    pub tcp_cwr: bool,
}

#[derive(Parser, Debug)]
pub struct UdpArgs {
    #[arg(long)]
    pub source_port: Option<u16>,
    #[arg(long)]
    pub dest_port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct IcmpArgs {
    #[arg(long, default_value_t = 8)]
    pub icmp_type: u8,
    #[arg(long, default_value_t = 0)]
    pub icmp_code: u8,
    #[arg(long)]
    pub icmp_id: Option<u16>,
    #[arg(long)]
    pub icmp_sequence: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct IgmpArgs {
    /// Use IGMPv3 membership-report framing instead of IGMPv1.
    #[arg(long)]
    pub igmp_v3: bool,
    #[arg(long)]
    pub igmp_group: Option<Ipv4Addr>,
    /// IGMPv3 only: number of fabricated source addresses per group record.
    #[arg(long, default_value_t = 0)]
    pub igmp_num_sources: u16,
}

#[derive(Parser, Debug)]
pub struct EgpArgs {
    #[arg(long)]
    pub egp_type: Option<u8>,
    #[arg(long)]
    pub egp_code: Option<u8>,
    #[arg(long)]
    pub egp_as: Option<u16>,
    #[arg(long)]
    pub egp_sequence: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct RipArgs {
    /// RIP command: 1 = request, 2 = response.
    #[arg(long, default_value_t = 2)]
    pub rip_command: u8,
    #[arg(long)]
    pub rip_domain: Option<u16>,
    #[arg(long, default_value_t = 2)]
    pub rip_family: u16,
    #[arg(long)]
    pub rip_tag: Option<u16>,
    #[arg(long)]
    pub rip_address: Option<Ipv4Addr>,
    #[arg(long)]
    pub rip_netmask: Option<Ipv4Addr>,
    #[arg(long)]
    pub rip_next_hop: Option<Ipv4Addr>,
    #[arg(long, default_value_t = 1)]
    pub rip_metric: u32,
    /// RIPv2 only: append an RFC 2082 authentication trailer.
    #[arg(long)]
    pub rip_auth: bool,
    #[arg(long, default_value_t = 0)]
    pub rip_key_id: u8,
    #[arg(long)]
    pub rip_auth_sequence: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct DccpArgs {
    #[arg(long)]
    pub dccp_source_port: Option<u16>,
    #[arg(long)]
    pub dccp_dest_port: Option<u16>,
    /// DCCP packet type, 4-bit field (0 = Request, 1 = Response, ...).
    #[arg(long, default_value_t = 0)]
    pub dccp_type: u8,
    #[arg(long)]
    pub dccp_sequence: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct RsvpArgs {
    #[arg(long)]
    pub rsvp_type: Option<u8>,
    #[arg(long, default_value_t = 0)]
    pub rsvp_flags: u8,
    #[arg(long)]
    pub rsvp_ttl: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct IpsecArgs {
    /// Shared SPI/sequence used whichever of `--protocol AH` / `--protocol
    /// ESP` is selected.
    #[arg(long)]
    pub ipsec_spi: Option<u32>,
    #[arg(long)]
    pub ipsec_sequence: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct EigrpArgs {
    #[arg(long)]
    pub eigrp_opcode: Option<u8>,
    #[arg(long)]
    pub eigrp_as: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct OspfArgs {
    /// OSPF packet type: hello, dd, lsr, lsu, lsack.
    #[arg(long, default_value = "hello")]
    pub ospf_type: String,
    #[arg(long)]
    pub ospf_router_id: Option<Ipv4Addr>,
    #[arg(long)]
    pub ospf_area_id: Option<Ipv4Addr>,
}
