//! FRR configuration generation.
//!
//! Devices are rendered in parallel; results keep fabric order (tier 1 then
//! tier 2), so the output only depends on the model.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tera::{Context, Tera};

use super::templates::{BGPD, BGPD_TEMPLATE, OSPFD, OSPFD_TEMPLATE, ZEBRA, ZEBRA_TEMPLATE};
use crate::model::{Device, PeerGroup};
use crate::topology::TwoTierClos;

/// Errors that can occur while rendering or writing configurations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template {name} failed: {source}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Device {hostname} sits in tier {tier}, which has no opposite tier")]
    UnknownTier { hostname: String, tier: u8 },

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rendered configuration text for a single device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfigs {
    pub hostname: String,
    pub zebra: String,
    pub ospfd: String,
    pub bgpd: String,
}

impl DeviceConfigs {
    /// Zebra, ospfd and bgpd combined into an integrated FRR config
    pub fn integrated(&self) -> String {
        [self.zebra.as_str(), self.ospfd.as_str(), self.bgpd.as_str()].join("\n")
    }
}

/// Renders devices with the bundled FRR templates
#[derive(Debug)]
pub struct FrrRenderer {
    tera: Tera,
}

impl FrrRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        for (name, content) in [
            (ZEBRA, ZEBRA_TEMPLATE),
            (OSPFD, OSPFD_TEMPLATE),
            (BGPD, BGPD_TEMPLATE),
        ] {
            tera.add_raw_template(name, content)
                .map_err(|source| RenderError::Template {
                    name: name.to_string(),
                    source,
                })?;
        }
        Ok(FrrRenderer { tera })
    }

    /// Render all three daemon configs for `device`, which sits in `tier`
    pub fn render_device(&self, device: &Device, tier: u8) -> Result<DeviceConfigs, RenderError> {
        let peer_group = PeerGroup::facing(tier).ok_or_else(|| RenderError::UnknownTier {
            hostname: device.hostname.clone(),
            tier,
        })?;
        let route_reflector_client = device.bgp.neighbors.iter().any(|n| n.route_reflector_client);
        let peer_description = if route_reflector_client {
            format!("{} Route-Reflector Clients", peer_group)
        } else {
            format!("{} Route-Reflector Peers", peer_group)
        };

        let mut context = Context::new();
        context.insert("device", device);
        context.insert("tier", &tier);
        context.insert("peer_group", peer_group.as_str());
        context.insert("peer_description", &peer_description);
        context.insert("route_reflector_client", &route_reflector_client);

        Ok(DeviceConfigs {
            hostname: device.hostname.clone(),
            zebra: self.render(ZEBRA, &context)?,
            ospfd: self.render(OSPFD, &context)?,
            bgpd: self.render(BGPD, &context)?,
        })
    }

    /// Render every device of the fabric, tier 1 first
    pub fn render_fabric(&self, clos: &TwoTierClos) -> Result<Vec<DeviceConfigs>, RenderError> {
        let devices: Vec<(&Device, u8)> = clos
            .tiers()
            .into_iter()
            .flat_map(|tier| tier.devices.iter().map(move |d| (d, tier.tier_number)))
            .collect();

        devices
            .par_iter()
            .map(|(device, tier)| self.render_device(device, *tier))
            .collect()
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, RenderError> {
        self.tera
            .render(name, context)
            .map_err(|source| RenderError::Template {
                name: name.to_string(),
                source,
            })
    }
}

/// Write `<hostname>_{zebra,ospfd,bgpd,frr}.conf` for each device.
///
/// Returns the written paths in order.
pub fn write_configs(configs: &[DeviceConfigs], output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    fs::create_dir_all(output_dir).map_err(|source| RenderError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(configs.len() * 4);
    for config in configs {
        for (suffix, content) in [
            ("zebra", config.zebra.clone()),
            ("ospfd", config.ospfd.clone()),
            ("bgpd", config.bgpd.clone()),
            ("frr", config.integrated()),
        ] {
            let path = output_dir.join(format!("{}_{}.conf", config.hostname, suffix));
            log::info!("Writing configurations to {}", path.display());
            fs::write(&path, content).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
    }

    Ok(written)
}

/// Render the whole fabric and write it to `output_dir`
pub fn generate_frr_configs(clos: &TwoTierClos, output_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let renderer = FrrRenderer::new()?;
    let configs = renderer.render_fabric(clos)?;
    write_configs(&configs, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn fabric() -> TwoTierClos {
        let mut externals = IndexMap::new();
        externals.insert(
            "8.8.8.0/24".to_string(),
            vec!["t1-r1".to_string()],
        );
        externals.insert(
            "1.1.1.0/24".to_string(),
            vec!["t1-r1".to_string()],
        );
        TwoTierClos::new(2, "10.0.0.0/24", "10.255.0.0/24", externals).unwrap()
    }

    fn render(hostname: &str) -> DeviceConfigs {
        let clos = fabric();
        let renderer = FrrRenderer::new().unwrap();
        let tier = clos.tier_of(hostname).unwrap();
        renderer.render_device(clos.device(hostname).unwrap(), tier).unwrap()
    }

    #[test]
    fn test_zebra_config() {
        let configs = render("t1-r1");
        let zebra = &configs.zebra;

        assert!(zebra.starts_with("hostname t1-r1\n"));
        assert!(zebra.contains("interface eth0\n  ip address 10.0.0.1/31\n  description t1-r1 eth0 -- eth0 t2-r1\n"));
        assert!(zebra.contains("interface lo\n  ip address 10.255.0.0/32\n  description loopback used for RID\n"));
        assert_eq!(zebra.matches("ip ospf network point-to-point").count(), 2);
        // Unallocated interfaces are not rendered
        assert!(!zebra.contains("interface eth2"));
    }

    #[test]
    fn test_ospfd_config() {
        let configs = render("t2-r2");
        assert_eq!(
            configs.ospfd,
            "router ospf\n  max-metric router-lsa on-startup 60\n  network 10.255.0.3/32 area 0\n  network 10.0.0.4/31 area 0\n  network 10.0.0.6/31 area 0\n"
        );
    }

    #[test]
    fn test_tier_one_bgpd_config() {
        let configs = render("t1-r1");
        let bgpd = &configs.bgpd;

        // Sequence numbers follow input order, not address order
        assert!(bgpd.contains("ip prefix-list EXTERNAL-NETWORKS seq 10 permit 8.8.8.0/24 le 24\n"));
        assert!(bgpd.contains("ip prefix-list EXTERNAL-NETWORKS seq 20 permit 1.1.1.0/24 le 24\n"));
        assert!(bgpd.contains("ip prefix-list EXTERNAL-NETWORKS seq 1000 deny any\n"));
        assert!(bgpd.contains("route-map RM-T2-OUT permit 10\n"));
        assert!(bgpd.contains("router bgp 65000\n  bgp router-id 10.255.0.0\n"));
        assert!(bgpd.contains("  neighbor T2 description T2 Route-Reflector Peers\n"));
        assert!(!bgpd.contains("route-reflector-client"));
        assert!(bgpd.contains("  neighbor 10.255.0.2 peer-group T2\n"));
        assert!(bgpd.contains("  neighbor 10.255.0.3 peer-group T2\n"));
        assert!(bgpd.contains("  network 8.8.8.0/24\n"));
        assert!(!bgpd.contains("RM-T1"));
    }

    #[test]
    fn test_tier_two_bgpd_config() {
        let configs = render("t2-r1");
        let bgpd = &configs.bgpd;

        assert!(!bgpd.contains("EXTERNAL-NETWORKS"));
        assert!(bgpd.contains("route-map RM-T1-OUT permit 10\n"));
        assert!(bgpd.contains("  neighbor T1 route-reflector-client\n"));
        assert!(bgpd.contains("  neighbor T1 description T1 Route-Reflector Clients\n"));
        assert!(bgpd.contains("  neighbor T1 route-map RM-T1-IN in\n"));
        assert!(bgpd.contains("  neighbor 10.255.0.0 peer-group T1\n"));
        assert!(bgpd.contains("  neighbor 10.255.0.1 peer-group T1\n"));
        assert!(!bgpd.contains("  network "));
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let clos = fabric();
        let renderer = FrrRenderer::new().unwrap();
        let result = renderer.render_device(clos.device("t1-r1").unwrap(), 3);
        assert!(matches!(
            result,
            Err(RenderError::UnknownTier { ref hostname, tier: 3 }) if hostname == "t1-r1"
        ));
    }

    #[test]
    fn test_render_fabric_order() {
        let clos = fabric();
        let configs = FrrRenderer::new().unwrap().render_fabric(&clos).unwrap();
        let hostnames: Vec<&str> = configs.iter().map(|c| c.hostname.as_str()).collect();
        assert_eq!(hostnames, vec!["t1-r1", "t1-r2", "t2-r1", "t2-r2"]);
    }

    #[test]
    fn test_write_configs() {
        let clos = fabric();
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("frr");

        let written = generate_frr_configs(&clos, &output_dir).unwrap();
        assert_eq!(written.len(), 16);

        let integrated = fs::read_to_string(output_dir.join("t1-r2_frr.conf")).unwrap();
        let zebra = fs::read_to_string(output_dir.join("t1-r2_zebra.conf")).unwrap();
        assert!(integrated.starts_with(&zebra));
        assert!(integrated.contains("router ospf"));
        assert!(integrated.contains("router bgp 65000"));
    }
}
