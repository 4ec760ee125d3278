//! The modules table: an ordered, append-only registry
//! mapping protocol tag to builder. Registration order defines T50-mode
//! rotation order. A sentinel `builder == nil` marker entry is
//! replaced by `Vec::len()`; nothing else about the contract changes.

use crate::buffer::PacketBuffer;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;

pub type BuilderFn = fn(&Config, &mut PacketBuffer, &mut Prng) -> usize;

#[derive(Clone, Copy)]
pub struct ModuleEntry {
    pub id: ProtocolId,
    pub builder: BuilderFn,
}

/// Stable, registration-order table driving mixed-mode rotation.
pub struct ModuleTable {
    entries: Vec<ModuleEntry>,
}

impl ModuleTable {
    /// Registration order here is the on-wire rotation order for T50 mode
    /// and must not be reshuffled casually — T50-mode rotation depends on
    /// it being stable across releases.
    pub fn new() -> Self {
        use crate::builders::*;

        let entries = vec![
            ModuleEntry {
                id: ProtocolId::Ip,
                builder: ip::build,
            },
            ModuleEntry {
                id: ProtocolId::Icmp,
                builder: icmp::build,
            },
            ModuleEntry {
                id: ProtocolId::Igmp1,
                builder: igmp::build_v1,
            },
            ModuleEntry {
                id: ProtocolId::Igmp3,
                builder: igmp::build_v3,
            },
            ModuleEntry {
                id: ProtocolId::Tcp,
                builder: tcp::build,
            },
            ModuleEntry {
                id: ProtocolId::Udp,
                builder: udp::build,
            },
            ModuleEntry {
                id: ProtocolId::Egp,
                builder: egp::build,
            },
            ModuleEntry {
                id: ProtocolId::Rip1,
                builder: rip::build_v1,
            },
            ModuleEntry {
                id: ProtocolId::Rip2,
                builder: rip::build_v2,
            },
            ModuleEntry {
                id: ProtocolId::Dccp,
                builder: dccp::build,
            },
            ModuleEntry {
                id: ProtocolId::Rsvp,
                builder: rsvp::build,
            },
            ModuleEntry {
                id: ProtocolId::Ah,
                builder: ipsec::build_ah,
            },
            ModuleEntry {
                id: ProtocolId::Esp,
                builder: ipsec::build_esp,
            },
            ModuleEntry {
                id: ProtocolId::Eigrp,
                builder: eigrp::build,
            },
            ModuleEntry {
                id: ProtocolId::Ospf,
                builder: ospf::build,
            },
        ];

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &ModuleEntry {
        &self.entries[index % self.entries.len()]
    }

    pub fn find(&self, id: ProtocolId) -> &ModuleEntry {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .expect("every ProtocolId is registered exactly once")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.iter()
    }
}

impl Default for ModuleTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_protocol_exactly_once() {
        let table = ModuleTable::new();
        assert_eq!(table.len(), ProtocolId::ALL.len());
        for id in ProtocolId::ALL {
            assert_eq!(table.find(id).id, id);
        }
    }

    #[test]
    fn get_wraps_around() {
        let table = ModuleTable::new();
        let n = table.len();
        assert_eq!(table.get(0).id, table.get(n).id);
    }
}
