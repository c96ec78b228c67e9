//! Network topology module.
//!
//! This module builds complete fabrics from validated inputs: architecture
//! selection, the two-tier Clos builder and its allocation statistics.

pub mod architecture;
pub mod clos;
pub mod error;
pub mod stats;

// Re-export key types and functions for easier access
pub use architecture::{build_architecture, Architecture};
pub use clos::TwoTierClos;
pub use error::TopologyError;
pub use stats::ArchitectureStats;
