//! Network interface definitions.

use ipnet::Ipv4Net;
use serde::Serialize;

/// Name of the loopback interface present on every device
pub const LOOPBACK_INTERFACE: &str = "lo";

/// Description attached to the loopback interface
pub const LOOPBACK_DESCRIPTION: &str = "loopback used for RID";

/// An interface on a network device.
///
/// Data interfaces start unallocated and are consumed by at most one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Interface name, `eth<N>` for data interfaces or `lo`
    #[serde(rename = "interface")]
    pub name: String,
    /// Address with its prefix length, once assigned
    pub ip_address: Option<Ipv4Net>,
    /// Human-readable description naming both ends of a link
    pub description: String,
    /// Whether the interface has been consumed
    pub allocated: bool,
    /// Whether interface-level OSPF settings apply
    pub ospf_enabled: bool,
}

impl Interface {
    /// Create an unallocated data interface
    pub fn new(name: impl Into<String>) -> Self {
        Interface {
            name: name.into(),
            ip_address: None,
            description: String::new(),
            allocated: false,
            ospf_enabled: false,
        }
    }

    /// Create the allocated loopback interface carrying `address`
    pub fn loopback(address: Ipv4Net) -> Self {
        Interface {
            name: LOOPBACK_INTERFACE.to_string(),
            ip_address: Some(address),
            description: LOOPBACK_DESCRIPTION.to_string(),
            allocated: true,
            ospf_enabled: false,
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.name == LOOPBACK_INTERFACE
    }
}
