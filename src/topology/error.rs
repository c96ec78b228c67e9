//! Errors raised while building a fabric.

use crate::ip::PoolKind;

/// Failures during fabric construction.
///
/// Every variant is fatal to the topology being built; the only recovery is
/// to resize the inputs and build again from scratch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("Could not allocate all {pool} subnets required (exhausted while serving {requested_by})")]
    ResourceExhausted { pool: PoolKind, requested_by: String },

    #[error("No interface available on {hostname}: interface inventory exhausted")]
    NoInterfaceAvailable { hostname: String },

    #[error("Invalid external network '{network}': {reason}")]
    InvalidExternalNetwork { network: String, reason: String },
}
