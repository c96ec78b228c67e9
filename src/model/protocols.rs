//! Routing protocol state carried by each device.

use std::fmt;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

/// Every device runs in the same autonomous system
pub const DEFAULT_ASN: u32 = 65000;

/// OSPF process identifier, area 0 throughout
pub const OSPF_INSTANCE_ID: u32 = 0;

/// An OSPF instance.
///
/// Each network is advertised into area 0 of the link-state database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OspfInstance {
    pub instance_id: u32,
    pub networks: Vec<Ipv4Net>,
}

impl OspfInstance {
    /// Start an instance that advertises only the device loopback
    pub fn with_loopback(loopback: Ipv4Net) -> Self {
        OspfInstance {
            instance_id: OSPF_INSTANCE_ID,
            networks: vec![loopback],
        }
    }
}

/// BGP peer-group names, keyed on by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PeerGroup {
    /// Sessions towards tier-1 devices (route-reflector clients)
    T1,
    /// Sessions towards tier-2 devices (route reflectors)
    T2,
}

impl PeerGroup {
    /// Peer-group used by a device in `tier` for sessions to the opposite tier.
    ///
    /// Only tiers 1 and 2 exist; any other tier has no opposite.
    pub fn facing(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(PeerGroup::T2),
            2 => Some(PeerGroup::T1),
            _ => None,
        }
    }

    /// Tier-1 peers are reflected to by tier 2
    pub fn is_route_reflector_client(&self) -> bool {
        matches!(self, PeerGroup::T1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeerGroup::T1 => "T1",
            PeerGroup::T2 => "T2",
        }
    }
}

impl fmt::Display for PeerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single BGP session, addressed at the peer's router-id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpNeighbor {
    pub ip_address: Ipv4Addr,
    pub peer_group: PeerGroup,
    pub route_reflector_client: bool,
}

impl BgpNeighbor {
    pub fn new(ip_address: Ipv4Addr, peer_group: PeerGroup) -> Self {
        BgpNeighbor {
            ip_address,
            peer_group,
            route_reflector_client: peer_group.is_route_reflector_client(),
        }
    }
}

/// A BGP routing instance on a network device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BgpInstance {
    pub asn: u32,
    pub neighbors: Vec<BgpNeighbor>,
    /// External networks advertised by this device
    pub networks: Vec<Ipv4Net>,
}

impl Default for BgpInstance {
    fn default() -> Self {
        BgpInstance {
            asn: DEFAULT_ASN,
            neighbors: Vec::new(),
            networks: Vec::new(),
        }
    }
}
