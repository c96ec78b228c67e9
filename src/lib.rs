//! # Closgen - Two-tier Clos fabric modeling and FRR configuration generator
//!
//! This library turns a handful of high-level inputs into a fully specified
//! per-device model of a leaf-spine network, and renders that model as FRR
//! configuration text.
//!
//! ## Overview
//!
//! Given a tier width, an internal supernet, a loopback supernet and a map of
//! external networks to edge devices, closgen allocates interfaces and
//! addresses, wires a full mesh between tier 1 and tier 2, and derives OSPF
//! and BGP state from that connectivity.
//!
//! ## Key Features
//!
//! - **Deterministic Allocation**: Subnets are carved in ascending order and
//!   consumed front to back, so identical inputs give identical fabrics
//! - **Exhaustion Detection**: Undersized supernets fail with a typed error
//!   naming the exhausted pool
//! - **Full Mesh Wiring**: Every tier-1 device links to every tier-2 device
//!   over its own /31
//! - **Routing State**: OSPF area 0 networks per link, iBGP with tier 2 as
//!   route reflectors for tier 1
//! - **FRR Output**: zebra, ospfd, bgpd and integrated configs per device
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Input document structures and validation
//! - `config_loader`: Input file loading
//! - `ip`: Subnet carving and the address pool
//! - `model`: Devices, interfaces, protocol instances and tiers
//! - `topology`: Architecture selection and fabric construction
//! - `render`: FRR configuration rendering
//! - `utils`: Validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use closgen::{config_loader, render, topology};
//! use std::path::Path;
//!
//! // Load the input document
//! let config = config_loader::load_config(Path::new("network.yaml"))?;
//!
//! // Build the fabric
//! let clos = topology::build_architecture(&config)?;
//!
//! // Write <hostname>_frr.conf and friends for every device
//! render::generate_frr_configs(&clos, Path::new("frr_output"))?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Input Format
//!
//! ```yaml
//! architecture: TwoTierClos
//! width: 4
//! internal_supernet: 10.0.0.0/24
//! loopback_supernet: 10.255.0.0/24
//! external_networks:
//!   8.8.8.0/24:
//!     - t1-r1
//! ```
//!
//! ## Error Handling
//!
//! Fabric construction returns [`topology::TopologyError`]; rendering returns
//! [`render::RenderError`]. File loading and the binary use `color_eyre` for
//! error reporting with context.

pub mod config;
pub mod config_loader;

pub mod ip;
pub mod model;
pub mod render;
pub mod topology;
pub mod utils;
