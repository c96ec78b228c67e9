//! Device model module.
//!
//! This module contains the per-device network model: interfaces, OSPF and
//! BGP protocol state, and the tiers that group devices together.

pub mod device;
pub mod interface;
pub mod protocols;
pub mod tier;

// Re-export key types for easier access
pub use device::Device;
pub use interface::{Interface, LOOPBACK_INTERFACE};
pub use protocols::{BgpInstance, BgpNeighbor, OspfInstance, PeerGroup, DEFAULT_ASN, OSPF_INSTANCE_ID};
pub use tier::ClosTier;
