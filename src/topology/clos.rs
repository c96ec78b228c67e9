//! Two-tier Clos fabric construction.
//!
//! [`TwoTierClos::new`] is the only way to obtain a fabric. It runs a private
//! builder through fixed phases, each exactly once:
//!
//! 1. carve the supernets and allocate both tiers (tier 1 first)
//! 2. wire the full mesh, outer loop over tier 2, inner loop over tier 1
//! 3. derive BGP peers between the tiers
//! 4. attach external networks to tier-1 edge devices
//! 5. finalize and compute statistics
//!
//! Later phases read what earlier ones wrote, and the loop nesting fixes the
//! interface and OSPF network order on every device. Any failure discards the
//! whole fabric; a partially built one is never returned.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

use super::error::TopologyError;
use super::stats::ArchitectureStats;
use crate::config::ExternalNetworks;
use crate::ip::{AddressPool, PoolKind};
use crate::model::{BgpNeighbor, ClosTier, Device, PeerGroup};

/// A Clos architecture with t1 and t2 layers
#[derive(Debug, Serialize)]
pub struct TwoTierClos {
    width: usize,
    t1: ClosTier,
    t2: ClosTier,
    connections: usize,
    external_networks: ExternalNetworks,
    stats: ArchitectureStats,
    #[serde(skip)]
    pool: AddressPool,
}

impl TwoTierClos {
    /// Build a complete fabric.
    ///
    /// External networks are attached in the map's iteration order, which is
    /// the order they appeared in the input.
    ///
    /// # Arguments
    /// * `width` - Devices per tier, at least 1
    /// * `internal_supernet` - CIDR carved into /31 link subnets
    /// * `loopback_supernet` - CIDR carved into /32 loopbacks
    /// * `external_networks` - Network CIDR to the hostnames that advertise it
    ///
    /// The construction phases are not reachable from outside this module:
    ///
    /// ```compile_fail
    /// use closgen::topology::clos::ClosBuilder;
    /// ```
    pub fn new(
        width: usize,
        internal_supernet: &str,
        loopback_supernet: &str,
        external_networks: ExternalNetworks,
    ) -> Result<Self, TopologyError> {
        let mut builder =
            ClosBuilder::allocate_tiers(width, internal_supernet, loopback_supernet, external_networks)?;
        builder.wire_mesh()?;
        builder.derive_bgp_peers()?;
        builder.attach_external_networks()?;
        let clos = builder.finalize();
        clos.stats.log();
        Ok(clos)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn t1(&self) -> &ClosTier {
        &self.t1
    }

    pub fn t2(&self) -> &ClosTier {
        &self.t2
    }

    /// Both tiers, tier 1 first
    pub fn tiers(&self) -> [&ClosTier; 2] {
        [&self.t1, &self.t2]
    }

    /// Every device, tier 1 then tier 2, each in hostname order
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.t1.devices.iter().chain(self.t2.devices.iter())
    }

    pub fn device(&self, hostname: &str) -> Option<&Device> {
        self.t1.device(hostname).or_else(|| self.t2.device(hostname))
    }

    /// Tier number of the device named `hostname`
    pub fn tier_of(&self, hostname: &str) -> Option<u8> {
        self.tiers()
            .into_iter()
            .find(|tier| tier.contains(hostname))
            .map(|tier| tier.tier_number)
    }

    pub fn connections(&self) -> usize {
        self.connections
    }

    pub fn external_networks(&self) -> &ExternalNetworks {
        &self.external_networks
    }

    pub fn stats(&self) -> &ArchitectureStats {
        &self.stats
    }

    /// Subnets of `kind` left in the pool after construction
    pub fn remaining(&self, kind: PoolKind) -> usize {
        self.pool.remaining(kind)
    }
}

/// In-progress fabric; only `finalize` turns it into a [`TwoTierClos`]
#[derive(Debug)]
struct ClosBuilder {
    width: usize,
    pool: AddressPool,
    t1: ClosTier,
    t2: ClosTier,
    connections: usize,
    external_networks: ExternalNetworks,
}

impl ClosBuilder {
    /// Carve the supernets, check they can cover the whole fabric, then build
    /// tier 1 followed by tier 2.
    fn allocate_tiers(
        width: usize,
        internal_supernet: &str,
        loopback_supernet: &str,
        external_networks: ExternalNetworks,
    ) -> Result<Self, TopologyError> {
        if width == 0 {
            return Err(TopologyError::InvalidArchitecture(
                "width must be at least 1".to_string(),
            ));
        }
        let links = width.checked_mul(width).ok_or_else(|| {
            TopologyError::InvalidArchitecture(format!("width {} is too large", width))
        })?;

        let mut pool = AddressPool::from_cidrs(internal_supernet, loopback_supernet)?;
        pool.ensure_capacity(
            PoolKind::Loopback,
            width * 2,
            &format!("two tiers of width {}", width),
        )?;
        pool.ensure_capacity(
            PoolKind::PointToPoint,
            links,
            &format!("full mesh of {} links", links),
        )?;

        let t1 = ClosTier::new(1, width, &mut pool)?;
        let t2 = ClosTier::new(2, width, &mut pool)?;
        log::debug!("Allocated tiers: {:?} / {:?}", t1.hostnames(), t2.hostnames());

        Ok(ClosBuilder {
            width,
            pool,
            t1,
            t2,
            connections: 0,
            external_networks,
        })
    }

    /// Connect every tier-2 device to every tier-1 device
    fn wire_mesh(&mut self) -> Result<(), TopologyError> {
        for t2_device in self.t2.devices.iter_mut() {
            for t1_device in self.t1.devices.iter_mut() {
                let link = format!("{} -- {}", t2_device.hostname, t1_device.hostname);
                let subnet = self.pool.allocate_point_to_point(&link)?;
                connect(t2_device, t1_device, subnet)?;
                log::debug!("Wired {} over {}", link, subnet);
                self.connections += 1;
            }
        }
        Ok(())
    }

    /// Peer every tier-1 device with every tier-2 router-id and vice versa
    fn derive_bgp_peers(&mut self) -> Result<(), TopologyError> {
        let t1_peers: Vec<Ipv4Addr> = self.t1.devices.iter().map(|d| d.router_id).collect();
        let t2_peers: Vec<Ipv4Addr> = self.t2.devices.iter().map(|d| d.router_id).collect();

        add_peers(&mut self.t1, &t2_peers)?;
        add_peers(&mut self.t2, &t1_peers)
    }

    /// Advertise each external network from the tier-1 devices it names.
    ///
    /// Tier-2 hostnames are not edge attachment points and are skipped.
    fn attach_external_networks(&mut self) -> Result<(), TopologyError> {
        for (network, hostnames) in &self.external_networks {
            let net = parse_external_network(network)?;

            for hostname in hostnames {
                if self.t2.contains(hostname) {
                    log::debug!("Skipping {} on tier-2 device {}", network, hostname);
                } else if !self.t1.contains(hostname) {
                    log::warn!(
                        "External network {} names unknown device '{}', ignoring",
                        network, hostname
                    );
                }
            }

            for device in self.t1.devices.iter_mut() {
                if hostnames.iter().any(|h| *h == device.hostname) {
                    device.bgp.networks.push(net);
                }
            }
        }
        Ok(())
    }

    fn finalize(self) -> TwoTierClos {
        let data_interfaces = self
            .t1
            .devices
            .first()
            .map(|d| d.data_interfaces().count())
            .unwrap_or(0);

        let stats = ArchitectureStats {
            width: self.width,
            connections: self.connections,
            unused_point_to_point: self.pool.remaining(PoolKind::PointToPoint),
            unused_loopbacks: self.pool.remaining(PoolKind::Loopback),
            client_facing_ports: data_interfaces * self.t1.devices.len() / 2,
        };

        TwoTierClos {
            width: self.width,
            t1: self.t1,
            t2: self.t2,
            connections: self.connections,
            external_networks: self.external_networks,
            stats,
            pool: self.pool,
        }
    }
}

/// Wire one link: the tier-2 side takes the first host of `subnet`, the
/// tier-1 side the second.
fn connect(t2_device: &mut Device, t1_device: &mut Device, subnet: Ipv4Net) -> Result<(), TopologyError> {
    let t2_hostname = t2_device.hostname.clone();
    let t1_hostname = t1_device.hostname.clone();
    let (t2_address, t1_address) = link_addresses(&subnet)?;

    let t2_interface = t2_device.next_available_interface()?;
    let t1_interface = t1_device.next_available_interface()?;

    t2_interface.description = format!(
        "{} {} -- {} {}",
        t2_hostname, t2_interface.name, t1_interface.name, t1_hostname
    );
    t1_interface.description = format!(
        "{} {} -- {} {}",
        t1_hostname, t1_interface.name, t2_interface.name, t2_hostname
    );

    t2_interface.ip_address = Some(t2_address);
    t1_interface.ip_address = Some(t1_address);

    t2_interface.ospf_enabled = true;
    t1_interface.ospf_enabled = true;

    t2_device.ospf.networks.push(subnet);
    t1_device.ospf.networks.push(subnet);

    Ok(())
}

/// The two host addresses of a point-to-point subnet, keeping its prefix length
fn link_addresses(subnet: &Ipv4Net) -> Result<(Ipv4Net, Ipv4Net), TopologyError> {
    let mut hosts = subnet.hosts();
    match (hosts.next(), hosts.next()) {
        (Some(first), Some(second)) => Ok((
            with_prefix(first, subnet)?,
            with_prefix(second, subnet)?,
        )),
        _ => Err(TopologyError::InvalidArchitecture(format!(
            "{} does not hold two host addresses",
            subnet
        ))),
    }
}

fn with_prefix(address: Ipv4Addr, subnet: &Ipv4Net) -> Result<Ipv4Net, TopologyError> {
    Ipv4Net::new(address, subnet.prefix_len())
        .map_err(|e| TopologyError::InvalidArchitecture(format!("{}: {}", subnet, e)))
}

fn add_peers(tier: &mut ClosTier, peers: &[Ipv4Addr]) -> Result<(), TopologyError> {
    let peer_group = PeerGroup::facing(tier.tier_number).ok_or_else(|| {
        TopologyError::InvalidArchitecture(format!("tier {} has no opposite tier", tier.tier_number))
    })?;
    for device in tier.devices.iter_mut() {
        device
            .bgp
            .neighbors
            .extend(peers.iter().map(|peer| BgpNeighbor::new(*peer, peer_group)));
    }
    Ok(())
}

fn parse_external_network(network: &str) -> Result<Ipv4Net, TopologyError> {
    let net: Ipv4Net = network.trim().parse().map_err(|e| TopologyError::InvalidExternalNetwork {
        network: network.to_string(),
        reason: format!("{}", e),
    })?;
    if net != net.trunc() {
        return Err(TopologyError::InvalidExternalNetwork {
            network: network.to_string(),
            reason: format!("host bits set (expected {})", net.trunc()),
        });
    }
    Ok(net)
}
