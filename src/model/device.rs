//! Network device definitions.
//!
//! A device owns a fixed interface inventory: `interface_count` data
//! interfaces named `eth0..` followed by the loopback. Its router-id is the
//! first host address of the loopback subnet.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

use super::interface::Interface;
use super::protocols::{BgpInstance, OspfInstance};
use crate::topology::TopologyError;

/// A network router with interfaces and routing protocol state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub hostname: String,
    pub router_id: Ipv4Addr,
    pub interfaces: Vec<Interface>,
    pub ospf: OspfInstance,
    pub bgp: BgpInstance,
}

/// First usable host address of `net`; a /32 or /31 starts at its network address
pub fn first_host(net: &Ipv4Net) -> Ipv4Addr {
    net.hosts().next().unwrap_or_else(|| net.network())
}

impl Device {
    pub fn new(hostname: impl Into<String>, interface_count: usize, loopback: Ipv4Net) -> Self {
        let mut interfaces: Vec<Interface> = (0..interface_count)
            .map(|i| Interface::new(format!("eth{}", i)))
            .collect();
        interfaces.push(Interface::loopback(loopback));

        Device {
            hostname: hostname.into(),
            router_id: first_host(&loopback),
            interfaces,
            ospf: OspfInstance::with_loopback(loopback),
            bgp: BgpInstance::default(),
        }
    }

    /// Claim the first unallocated interface in creation order.
    ///
    /// The interface is marked allocated before it is returned.
    pub fn next_available_interface(&mut self) -> Result<&mut Interface, TopologyError> {
        match self.interfaces.iter_mut().find(|iface| !iface.allocated) {
            Some(iface) => {
                iface.allocated = true;
                Ok(iface)
            }
            None => Err(TopologyError::NoInterfaceAvailable {
                hostname: self.hostname.clone(),
            }),
        }
    }

    pub fn loopback(&self) -> Option<&Interface> {
        self.interfaces.iter().find(|iface| iface.is_loopback())
    }

    /// Interfaces other than the loopback
    pub fn data_interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.iter().filter(|iface| !iface.is_loopback())
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|iface| iface.name == name)
    }
}
