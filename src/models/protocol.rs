//! Routing protocol records.

use serde::Serialize;
use std::collections::BTreeSet;

/// A BGP peer as declared by `neighbor <ip> remote-as <asn>`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BgpNeighbor {
    pub address: String,
    pub remote_asn: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BgpRecord {
    pub asn: u32,
    pub neighbors: Vec<BgpNeighbor>,
    /// Redistribution sources, e.g. `connected` or `static`.
    pub redistribute: BTreeSet<String>,
}

impl BgpRecord {
    pub fn new(asn: u32) -> Self {
        BgpRecord {
            asn,
            neighbors: Vec::new(),
            redistribute: BTreeSet::new(),
        }
    }
}

/// A `network <address> <wildcard> area <area>` statement.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OspfNetwork {
    pub network: String,
    pub wildcard: String,
    pub area: String,
}

/// An interface-level `ip ospf <pid> area <area>` assignment.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OspfInterfaceArea {
    pub interface: String,
    pub process_id: u32,
    pub area: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OspfRecord {
    pub process_id: u32,
    pub router_id: Option<String>,
    pub networks: Vec<OspfNetwork>,
    pub interfaces: Vec<OspfInterfaceArea>,
    areas: Vec<String>,
}

impl OspfRecord {
    pub fn new(process_id: u32) -> Self {
        OspfRecord {
            process_id,
            router_id: None,
            networks: Vec::new(),
            interfaces: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Areas in first-seen order, without duplicates.
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn add_area(&mut self, area: &str) {
        if !self.areas.iter().any(|a| a == area) {
            self.areas.push(area.to_string());
        }
    }

    pub fn add_network(&mut self, network: OspfNetwork) {
        self.add_area(&network.area);
        self.networks.push(network);
    }

    /// Merge interface-level area assignments into this record.
    pub fn merge_interface_areas(&mut self, assignments: Vec<OspfInterfaceArea>) {
        for assignment in assignments {
            self.add_area(&assignment.area);
            self.interfaces.push(assignment);
        }
    }

    /// Area of the `network` statement whose address equals `network`.
    pub fn area_for_network(&self, network: std::net::Ipv4Addr) -> Option<&str> {
        self.networks
            .iter()
            .find(|n| n.network.parse::<std::net::Ipv4Addr>().ok() == Some(network))
            .map(|n| n.area.as_str())
    }
}
