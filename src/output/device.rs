//! Per-device diagram file.

use super::d2::{attribute, close_block, open_block};
use crate::models::{DeviceModel, InterfaceRecord, InterfaceStatus};
use crate::processing::resolve_device_kind;

/// Bandwidth attribute for every interface; configs do not state it.
const DEFAULT_BANDWIDTH: &str = "1Gbps";
const DEFAULT_OSPF_COST: &str = "10";
const DEFAULT_OSPF_NETWORK_TYPE: &str = "point-to-point";

/// Management address: the canonical loopback's address, never another interface.
pub fn management_address(device: &DeviceModel) -> Option<String> {
    device
        .canonical_loopback()
        .and_then(|lo| lo.address.as_ref())
        .map(|address| address.address_text())
}

/// OSPF area of an interface, when its network matches a `network` statement exactly.
pub fn ospf_area<'a>(device: &'a DeviceModel, interface: &InterfaceRecord) -> Option<&'a str> {
    let ospf = device.ospf()?;
    let network = interface.network()?;
    ospf.area_for_network(network.addr)
}

/// Interfaces drawn in the device block: addressed and not `no_ip`.
fn is_emitted(interface: &InterfaceRecord) -> bool {
    interface.address.is_some() && interface.status != InterfaceStatus::NoIp
}

/// Render the diagram file for one device.
pub fn render_device(device: &DeviceModel) -> String {
    let hostname = device.hostname();
    let mut lines = Vec::new();

    if device.model().is_empty() {
        lines.push(format!("# {hostname}"));
    } else {
        lines.push(format!("# {} - {}", hostname, device.model()));
    }
    lines.push(open_block(0, hostname));
    lines.push(attribute(1, "label", hostname));
    lines.push(attribute(1, "type", resolve_device_kind(device)));
    if !device.model().is_empty() {
        lines.push(attribute(1, "model", device.model()));
    }
    if let Some(mgmt_ip) = management_address(device) {
        lines.push(attribute(1, "mgmt_ip", mgmt_ip));
    }

    lines.push(String::new());
    lines.push("  # Interface Configuration".to_string());
    for interface in device.interfaces().iter().filter(|i| is_emitted(i)) {
        render_interface(device, interface, &mut lines);
    }

    if device.has_routing() {
        lines.push(String::new());
        lines.push("  # Routing Configuration".to_string());
    }
    if let Some(bgp) = device.bgp() {
        let neighbors: Vec<String> = bgp
            .neighbors
            .iter()
            .map(|n| format!("{} AS{}", n.address, n.remote_asn))
            .collect();
        lines.push(attribute(1, "bgp_enabled", "true"));
        lines.push(attribute(1, "bgp_as", bgp.asn));
        lines.push(attribute(1, "bgp_neighbors", neighbors.join(", ")));
    }
    if let Some(ospf) = device.ospf() {
        lines.push(attribute(1, "ospf_enabled", "true"));
        lines.push(attribute(1, "ospf_process_id", ospf.process_id));
        lines.push(attribute(
            1,
            "ospf_router_id",
            ospf.router_id.as_deref().unwrap_or_default(),
        ));
        if !ospf.areas().is_empty() {
            lines.push(attribute(1, "ospf_areas", ospf.areas().join(",")));
        }
    }

    lines.push(close_block(0));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_interface(device: &DeviceModel, interface: &InterfaceRecord, lines: &mut Vec<String>) {
    let Some(address) = &interface.address else {
        return;
    };

    lines.push(open_block(1, &interface.name));
    if let Some(description) = &interface.description {
        lines.push(attribute(2, "description", description));
    }
    lines.push(attribute(2, "switchport_mode", "routed"));
    lines.push(attribute(2, "status", interface.status));
    lines.push(attribute(2, "bandwidth", DEFAULT_BANDWIDTH));
    lines.push(attribute(2, "ip_address", address.address_text()));
    lines.push(attribute(2, "subnet_mask", address.mask_text()));

    if interface.is_aggregation() {
        if let Some(protocol) = &interface.aggregation_protocol {
            lines.push(attribute(2, "protocol", protocol));
        }
        lines.push(attribute(2, "port_channel", "true"));
        if let Some(lag_id) = &interface.lag_id {
            lines.push(attribute(2, "lag_id", lag_id));
        }
    }

    if let Some(area) = ospf_area(device, interface) {
        lines.push(attribute(2, "ospf_area", area));
        lines.push(attribute(2, "ospf_cost", DEFAULT_OSPF_COST));
        lines.push(attribute(2, "ospf_network_type", DEFAULT_OSPF_NETWORK_TYPE));
    }
    lines.push(close_block(1));
}
