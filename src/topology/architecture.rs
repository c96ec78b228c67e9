//! Architecture selection.
//!
//! The input document names the fabric design to build. Only the two-tier
//! Clos is implemented; any other name is rejected with the list of
//! supported ones.

use std::fmt;
use std::str::FromStr;

use super::clos::TwoTierClos;
use super::error::TopologyError;
use crate::config::InputConfig;

/// Supported fabric architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    TwoTierClos,
}

impl Architecture {
    pub const ALL: &'static [Architecture] = &[Architecture::TwoTierClos];

    pub fn name(&self) -> &'static str {
        match self {
            Architecture::TwoTierClos => "TwoTierClos",
        }
    }

    fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.name()).collect()
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Architecture {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| {
                TopologyError::InvalidArchitecture(format!(
                    "Architecture unsupported: {}. Please choose from: {:?}",
                    s,
                    Self::supported_names()
                ))
            })
    }
}

/// Build the fabric named by `config.architecture`
pub fn build_architecture(config: &InputConfig) -> Result<TwoTierClos, TopologyError> {
    let architecture: Architecture = config.architecture.parse()?;
    log::info!("Building {} architecture of width {}", architecture, config.width);

    match architecture {
        Architecture::TwoTierClos => TwoTierClos::new(
            config.width,
            &config.internal_supernet,
            &config.loopback_supernet,
            config.external_networks.clone(),
        ),
    }
}
