//! Connection inference from shared IPv4 subnets.
//!
//! Interfaces of distinct devices whose addresses fall in the same canonical
//! network are assumed to be linked. A subnet shared by three or more
//! devices yields every pairwise link rather than a single shared segment;
//! on hub or VLAN segments this overstates point-to-point links.

use crate::models::{DeviceModel, Ipv4};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One side of an inferred link.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    pub device: String,
    pub interface: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.device, self.interface)
    }
}

/// An inferred link between two devices on one subnet.
///
/// Endpoints are stored in ascending order so the same pair always yields
/// the same value regardless of input order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub a: Endpoint,
    pub b: Endpoint,
    pub subnet: Ipv4,
}

impl Connection {
    pub fn new(x: Endpoint, y: Endpoint, subnet: Ipv4) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Connection { a, b, subnet }
    }
}

/// Infer links between all devices of a batch.
///
/// Needs the complete device set: a link can only be found once both
/// devices have been parsed. Output is sorted by subnet, then endpoints.
pub fn infer_connections(devices: &[DeviceModel]) -> Vec<Connection> {
    // Group addressed interfaces by canonical network
    let mut by_subnet: BTreeMap<Ipv4, Vec<Endpoint>> = BTreeMap::new();
    for device in devices {
        for interface in device.interfaces() {
            if let Some(subnet) = interface.network() {
                by_subnet.entry(subnet).or_default().push(Endpoint {
                    device: device.hostname().to_string(),
                    interface: interface.name.clone(),
                });
            }
        }
    }

    let mut connections = Vec::new();
    for (subnet, endpoints) in &by_subnet {
        let devices_on_subnet = endpoints.iter().map(|e| &e.device).unique().count();
        if devices_on_subnet > 2 {
            log::warn!(
                "Subnet {subnet} is shared by {devices_on_subnet} devices, linking every pair"
            );
        }
        let mut links: Vec<Connection> = endpoints
            .iter()
            .tuple_combinations()
            .filter(|(x, y)| x.device != y.device)
            .map(|(x, y)| Connection::new(x.clone(), y.clone(), *subnet))
            .collect();
        links.sort_by(|l, r| (&l.a, &l.b).cmp(&(&r.a, &r.b)));
        connections.extend(links);
    }

    log::info!("Detected {} connections", connections.len());
    connections
}
