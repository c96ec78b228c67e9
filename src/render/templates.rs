//! Tera templates for FRR daemon configuration.
//!
//! Each template is rendered with `device` (the serialized device) in
//! context. The bgpd template also reads `tier`, `peer_group`,
//! `peer_description` and `route_reflector_client`.

pub const ZEBRA: &str = "zebra.conf";
pub const OSPFD: &str = "ospfd.conf";
pub const BGPD: &str = "bgpd.conf";

pub const ZEBRA_TEMPLATE: &str = r#"hostname {{ device.hostname }}
{% for iface in device.interfaces %}{% if iface.allocated %}
interface {{ iface.interface }}
  ip address {{ iface.ip_address }}
  description {{ iface.description }}
{% if iface.ospf_enabled %}  ip ospf network point-to-point
  ip ospf hello-interval 1
  ip ospf dead-interval 4
  ip ospf cost 10
{% endif %}{% endif %}{% endfor %}"#;

pub const OSPFD_TEMPLATE: &str = r#"router ospf
  max-metric router-lsa on-startup 60
{% for network in device.ospf.networks %}  network {{ network }} area 0
{% endfor %}"#;

pub const BGPD_TEMPLATE: &str = r#"ip prefix-list ANY permit 0.0.0.0/0 le 32
{% if tier == 1 %}{% for network in device.bgp.networks %}ip prefix-list EXTERNAL-NETWORKS seq {{ loop.index * 10 }} permit {{ network }} le 24
{% endfor %}ip prefix-list EXTERNAL-NETWORKS seq 1000 deny any
route-map RM-T2-OUT permit 10
 match ip address prefix-list EXTERNAL-NETWORKS
route-map RM-T2-IN permit 10
 match ip address prefix-list ANY
{% else %}route-map RM-T1-OUT permit 10
 match ip address prefix-list ANY
route-map RM-T1-IN permit 10
 match ip address prefix-list ANY
{% endif %}router bgp {{ device.bgp.asn }}
  bgp router-id {{ device.router_id }}
  neighbor {{ peer_group }} peer-group
  neighbor {{ peer_group }} update-source lo
  neighbor {{ peer_group }} remote-as {{ device.bgp.asn }}
  neighbor {{ peer_group }} description {{ peer_description }}
  neighbor {{ peer_group }} soft-reconfiguration inbound
{% if route_reflector_client %}  neighbor {{ peer_group }} route-reflector-client
{% endif %}  neighbor {{ peer_group }} route-map RM-{{ peer_group }}-IN in
  neighbor {{ peer_group }} route-map RM-{{ peer_group }}-OUT out
{% for neighbor in device.bgp.neighbors %}  neighbor {{ neighbor.ip_address }} peer-group {{ neighbor.peer_group }}
{% endfor %}{% for network in device.bgp.networks %}  network {{ network }}
{% endfor %}"#;
