//! Clos tier definitions.
//!
//! A tier holds `width` devices named `t<tier>-r1` through `t<tier>-r<width>`.
//! Loopbacks are drawn from the pool in device order, so the same inputs
//! always map the same loopback to the same hostname.

use serde::Serialize;

use super::device::Device;
use crate::ip::AddressPool;
use crate::topology::TopologyError;

/// A tier or layer of network devices in a Clos architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosTier {
    pub tier_number: u8,
    pub width: usize,
    pub devices: Vec<Device>,
}

/// Hostname of the `index`-th device (1-based) in `tier_number`
pub fn hostname(tier_number: u8, index: usize) -> String {
    format!("t{}-r{}", tier_number, index)
}

impl ClosTier {
    /// Build the tier, popping one loopback per device from `pool`.
    ///
    /// Each device gets `2 * width` data interfaces so it can form one link
    /// to every device of the opposite tier.
    pub fn new(tier_number: u8, width: usize, pool: &mut AddressPool) -> Result<Self, TopologyError> {
        let interface_count = width * 2;
        let mut devices = Vec::with_capacity(width);

        for index in 1..=width {
            let name = hostname(tier_number, index);
            let loopback = pool.allocate_loopback(&name)?;
            log::debug!("Allocated loopback {} to {}", loopback, name);
            devices.push(Device::new(name, interface_count, loopback));
        }

        Ok(ClosTier {
            tier_number,
            width,
            devices,
        })
    }

    pub fn device(&self, hostname: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.hostname == hostname)
    }

    pub fn device_mut(&mut self, hostname: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.hostname == hostname)
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.device(hostname).is_some()
    }

    pub fn hostnames(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.hostname.as_str()).collect()
    }
}
