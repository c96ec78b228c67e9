use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::validation::{is_valid_hostname, validate_external_network};

/// External network CIDR to the hostnames advertising it, in document order
pub type ExternalNetworks = IndexMap<String, Vec<String>>;

/// Input document describing the fabric to model, mirroring the YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Architecture to build (only "TwoTierClos" is supported)
    pub architecture: String,
    /// Devices per tier
    pub width: usize,
    /// Supernet carved into /31 point-to-point link subnets
    pub internal_supernet: String,
    /// Supernet carved into /32 device loopbacks
    pub loopback_supernet: String,
    /// External network CIDR mapped to the tier-1 hostnames advertising it.
    /// Document order is kept; it decides advertisement order on each device.
    #[serde(default)]
    pub external_networks: ExternalNetworks,
}

impl InputConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.architecture.trim().is_empty() {
            return Err(ValidationError::InvalidArchitecture(
                "architecture cannot be empty".to_string(),
            ));
        }

        if self.width == 0 {
            return Err(ValidationError::InvalidWidth(
                "width must be a positive integer".to_string(),
            ));
        }

        if self.internal_supernet.trim().is_empty() {
            return Err(ValidationError::InvalidSupernet(
                "internal_supernet cannot be empty".to_string(),
            ));
        }
        if self.loopback_supernet.trim().is_empty() {
            return Err(ValidationError::InvalidSupernet(
                "loopback_supernet cannot be empty".to_string(),
            ));
        }

        for (network, hostnames) in &self.external_networks {
            validate_external_network(network).map_err(ValidationError::InvalidExternalNetwork)?;

            if hostnames.is_empty() {
                log::warn!("External network {} is not attached to any device", network);
            }
            for hostname in hostnames {
                if !is_valid_hostname(hostname) {
                    log::warn!(
                        "External network {} names '{}', which is not a t<tier>-r<index> hostname",
                        network, hostname
                    );
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),
    #[error("Invalid width: {0}")]
    InvalidWidth(String),
    #[error("Invalid supernet: {0}")]
    InvalidSupernet(String),
    #[error("Invalid external network: {0}")]
    InvalidExternalNetwork(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> InputConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_full_document() {
        let config = parse(
            r#"
architecture: TwoTierClos
width: 4
internal_supernet: 10.0.0.0/24
loopback_supernet: 10.255.0.0/24
external_networks:
  8.8.8.0/24:
    - t1-r1
    - t1-r2
  1.1.1.0/24:
    - t1-r4
"#,
        );

        assert_eq!(config.architecture, "TwoTierClos");
        assert_eq!(config.width, 4);
        assert_eq!(config.external_networks.len(), 2);
        assert_eq!(config.external_networks["8.8.8.0/24"], vec!["t1-r1", "t1-r2"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_external_networks_keep_document_order() {
        let config = parse(
            r#"
architecture: TwoTierClos
width: 1
internal_supernet: 10.0.0.0/24
loopback_supernet: 10.255.0.0/24
external_networks:
  8.8.8.0/24: [t1-r1]
  10.0.0.0/8: [t1-r1]
  1.1.1.0/24: [t1-r1]
"#,
        );
        let keys: Vec<&str> = config.external_networks.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["8.8.8.0/24", "10.0.0.0/8", "1.1.1.0/24"]);
    }

    #[test]
    fn test_external_networks_optional_and_unknown_keys_ignored() {
        let config = parse(
            r#"
architecture: TwoTierClos
width: 2
device_interface_count: 8
internal_supernet: 10.0.0.0/24
loopback_supernet: 10.255.0.0/24
"#,
        );
        assert!(config.external_networks.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = parse(
            r#"
architecture: TwoTierClos
width: 2
internal_supernet: 10.0.0.0/24
loopback_supernet: 10.255.0.0/24
"#,
        );

        config.width = 0;
        assert!(matches!(config.validate(), Err(ValidationError::InvalidWidth(_))));
        config.width = 2;

        config.loopback_supernet = " ".to_string();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSupernet(_))));
        config.loopback_supernet = "10.255.0.0/24".to_string();

        config
            .external_networks
            .insert("not-a-network".to_string(), vec!["t1-r1".to_string()]);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidExternalNetwork(_))
        ));
    }

    #[test]
    fn test_negative_width_fails_to_parse() {
        let result: Result<InputConfig, _> = serde_yaml::from_str(
            r#"
architecture: TwoTierClos
width: -1
internal_supernet: 10.0.0.0/24
loopback_supernet: 10.255.0.0/24
"#,
        );
        assert!(result.is_err());
    }
}
