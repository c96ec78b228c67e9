//! IP address allocation and management module.
//!
//! This module carves the input supernets into the point-to-point and
//! loopback subnets consumed while the fabric is built.

pub mod pool;

// Re-export commonly used types
pub use pool::{
    carve, parse_supernet, AddressPool, PoolKind, SubnetCursor, LOOPBACK_PREFIX, POINT_TO_POINT_PREFIX,
};
