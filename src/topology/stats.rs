//! Allocation statistics reported once a fabric is complete.

use serde::Serialize;

/// Summary of what a finished fabric consumed and what it left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchitectureStats {
    pub width: usize,
    /// Tier-1 to tier-2 links built, always `width * width`
    pub connections: usize,
    pub unused_point_to_point: usize,
    pub unused_loopbacks: usize,
    /// Data interfaces per device times tier-1 devices, halved
    pub client_facing_ports: usize,
}

impl ArchitectureStats {
    /// Log the statistics block at info level
    pub fn log(&self) {
        log::info!("#### Architecture Stats ####");
        log::info!("Clos Width: {}", self.width);
        log::info!("Total Internal Connections: {}", self.connections);
        log::info!("Total Unused Internal Subnets: {}", self.unused_point_to_point);
        log::info!("Total Unused Loopbacks: {}", self.unused_loopbacks);
        log::info!("Total Client Facing Ports: {}", self.client_facing_ports);
    }
}
