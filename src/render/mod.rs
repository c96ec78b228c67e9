//! FRR configuration rendering module.
//!
//! This module turns a completed fabric into per-device FRR configuration
//! text (zebra, ospfd, bgpd and the integrated frr.conf). Rendering only
//! reads the model.

pub mod frr;
pub mod templates;

pub use frr::{generate_frr_configs, write_configs, DeviceConfigs, FrrRenderer, RenderError};
