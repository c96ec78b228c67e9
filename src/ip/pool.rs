//! Subnet pool allocation.
//!
//! Supernets are split into fixed-size subnets in ascending address order and
//! handed out front to back. A subnet leaves the pool exactly once; running
//! dry is reported as [`TopologyError::ResourceExhausted`] naming the pool.
//!
//! Pools are cursors over the supernet: each subnet is computed from its index
//! when it is handed out, so a `0.0.0.0/0` loopback supernet costs no more
//! memory than a `/24`.

use std::fmt;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::topology::TopologyError;

/// Prefix length of a link subnet between two devices
pub const POINT_TO_POINT_PREFIX: u8 = 31;

/// Prefix length of a device loopback
pub const LOOPBACK_PREFIX: u8 = 32;

/// Which of the two subnet queues an allocation is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    PointToPoint,
    Loopback,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolKind::PointToPoint => write!(f, "point-to-point"),
            PoolKind::Loopback => write!(f, "loopback"),
        }
    }
}

/// Parse a CIDR string into an IPv4 supernet.
///
/// Host bits must be zero, so `10.0.0.1/24` is rejected rather than silently
/// truncated.
pub fn parse_supernet(cidr: &str) -> Result<Ipv4Net, TopologyError> {
    let net: Ipv4Net = cidr.trim().parse().map_err(|e| {
        TopologyError::InvalidArchitecture(format!("'{}' is not an IPv4 CIDR: {}", cidr, e))
    })?;

    if net != net.trunc() {
        return Err(TopologyError::InvalidArchitecture(format!(
            "'{}' has host bits set (expected {})",
            cidr,
            net.trunc()
        )));
    }

    Ok(net)
}

/// Split `supernet` into every subnet of `prefix_len`, in ascending order.
///
/// Nothing is materialized up front; the returned cursor yields subnets as it
/// is advanced.
pub fn carve(supernet: Ipv4Net, prefix_len: u8) -> Result<SubnetCursor, TopologyError> {
    SubnetCursor::new(supernet, prefix_len)
}

/// Position within the ascending sequence of equal-size subnets of a supernet
#[derive(Debug, Clone)]
pub struct SubnetCursor {
    base: u32,
    prefix_len: u8,
    next: u64,
    count: u64,
}

impl SubnetCursor {
    fn new(supernet: Ipv4Net, prefix_len: u8) -> Result<Self, TopologyError> {
        let supernet = supernet.trunc();
        if prefix_len < supernet.prefix_len() || prefix_len > 32 {
            return Err(TopologyError::InvalidArchitecture(format!(
                "supernet {} cannot be carved into /{} subnets",
                supernet, prefix_len
            )));
        }

        Ok(SubnetCursor {
            base: u32::from(supernet.network()),
            prefix_len,
            next: 0,
            count: 1u64 << (prefix_len - supernet.prefix_len()),
        })
    }

    /// Subnets not yet yielded
    pub fn remaining(&self) -> u64 {
        self.count - self.next
    }

    fn subnet_at(&self, index: u64) -> Option<Ipv4Net> {
        let step = 1u64 << (32 - self.prefix_len);
        let addr = u32::try_from(u64::from(self.base) + index * step).ok()?;
        Ipv4Net::new(Ipv4Addr::from(addr), self.prefix_len).ok()
    }
}

impl Iterator for SubnetCursor {
    type Item = Ipv4Net;

    fn next(&mut self) -> Option<Ipv4Net> {
        if self.next >= self.count {
            return None;
        }
        let subnet = self.subnet_at(self.next)?;
        self.next += 1;
        Some(subnet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Ordered, destructively consumed supply of link and loopback subnets
#[derive(Debug)]
pub struct AddressPool {
    point_to_point: SubnetCursor,
    loopbacks: SubnetCursor,
}

impl AddressPool {
    /// Carve the internal supernet into /31s and the loopback supernet into /32s
    pub fn new(internal_supernet: Ipv4Net, loopback_supernet: Ipv4Net) -> Result<Self, TopologyError> {
        let point_to_point = carve(internal_supernet, POINT_TO_POINT_PREFIX)?;
        let loopbacks = carve(loopback_supernet, LOOPBACK_PREFIX)?;

        log::debug!(
            "Carved {} into {} point-to-point subnets and {} into {} loopbacks",
            internal_supernet,
            point_to_point.remaining(),
            loopback_supernet,
            loopbacks.remaining()
        );

        Ok(AddressPool { point_to_point, loopbacks })
    }

    /// Parse both supernets from CIDR strings and carve them
    pub fn from_cidrs(internal_supernet: &str, loopback_supernet: &str) -> Result<Self, TopologyError> {
        Self::new(parse_supernet(internal_supernet)?, parse_supernet(loopback_supernet)?)
    }

    /// Remove and return the first remaining subnet of the given kind.
    ///
    /// `requested_by` names the device or link asking, and is carried in the
    /// error when the pool is empty.
    pub fn allocate(&mut self, kind: PoolKind, requested_by: &str) -> Result<Ipv4Net, TopologyError> {
        self.cursor_mut(kind)
            .next()
            .ok_or_else(|| TopologyError::ResourceExhausted {
                pool: kind,
                requested_by: requested_by.to_string(),
            })
    }

    pub fn allocate_point_to_point(&mut self, requested_by: &str) -> Result<Ipv4Net, TopologyError> {
        self.allocate(PoolKind::PointToPoint, requested_by)
    }

    pub fn allocate_loopback(&mut self, requested_by: &str) -> Result<Ipv4Net, TopologyError> {
        self.allocate(PoolKind::Loopback, requested_by)
    }

    /// Number of subnets of the given kind not yet handed out.
    ///
    /// Saturates at `usize::MAX` on targets where the count does not fit.
    pub fn remaining(&self, kind: PoolKind) -> usize {
        let cursor = match kind {
            PoolKind::PointToPoint => &self.point_to_point,
            PoolKind::Loopback => &self.loopbacks,
        };
        usize::try_from(cursor.remaining()).unwrap_or(usize::MAX)
    }

    /// Fail up front when the pool cannot cover `needed` allocations of `kind`
    pub fn ensure_capacity(&self, kind: PoolKind, needed: usize, requested_by: &str) -> Result<(), TopologyError> {
        let available = self.remaining(kind);
        if available < needed {
            log::debug!(
                "{} pool holds {} subnets but {} needs {}",
                kind, available, requested_by, needed
            );
            return Err(TopologyError::ResourceExhausted {
                pool: kind,
                requested_by: requested_by.to_string(),
            });
        }
        Ok(())
    }

    fn cursor_mut(&mut self, kind: PoolKind) -> &mut SubnetCursor {
        match kind {
            PoolKind::PointToPoint => &mut self.point_to_point,
            PoolKind::Loopback => &mut self.loopbacks,
        }
    }
}
