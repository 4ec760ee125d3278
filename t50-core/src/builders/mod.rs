//! Per-protocol packet builders. Every builder shares
//! the same signature — `fn(&Config, &mut PacketBuffer, &mut Prng) -> usize`
//! — so [`crate::modules::ModuleTable`] can dispatch to any of them
//! uniformly.

pub mod support;

pub mod dccp;
pub mod egp;
pub mod eigrp;
pub mod icmp;
pub mod igmp;
pub mod ip;
pub mod ipsec;
pub mod ospf;
pub mod rip;
pub mod rsvp;
pub mod tcp;
pub mod udp;
