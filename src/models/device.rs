//! Parsed device model and the builder that produces it.

use super::{BgpRecord, InterfaceRecord, OspfRecord};
use serde::Serialize;
use std::fmt;

/// Kind of device shown in the diagram.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Router,
    Switch,
    WirelessController,
    Firewall,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Router => "router",
            DeviceKind::Switch => "switch",
            DeviceKind::WirelessController => "wireless_controller",
            DeviceKind::Firewall => "firewall",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured, read-only view of one device configuration file.
///
/// Only [`DeviceBuilder::build`] creates values of this type.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DeviceModel {
    hostname: String,
    filename: String,
    default_kind: Option<DeviceKind>,
    model: String,
    interfaces: Vec<InterfaceRecord>,
    loopbacks: Vec<InterfaceRecord>,
    bgp: Option<BgpRecord>,
    ospf: Option<OspfRecord>,
}

impl DeviceModel {
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Kind assigned by the dialect parser.
    pub fn default_kind(&self) -> Option<DeviceKind> {
        self.default_kind
    }

    /// Hardware or software model, empty when unknown.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn interfaces(&self) -> &[InterfaceRecord] {
        &self.interfaces
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceRecord> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn loopbacks(&self) -> &[InterfaceRecord] {
        &self.loopbacks
    }

    pub fn loopback(&self, name: &str) -> Option<&InterfaceRecord> {
        self.loopbacks.iter().find(|i| i.name == name)
    }

    /// Loopback number zero, whatever the dialect's spelling
    /// (`Loopback0`, `loopback 0`).
    pub fn canonical_loopback(&self) -> Option<&InterfaceRecord> {
        self.loopbacks.iter().find(|l| {
            let name: String = l.name.split_whitespace().collect();
            name.eq_ignore_ascii_case("loopback0")
        })
    }

    pub fn bgp(&self) -> Option<&BgpRecord> {
        self.bgp.as_ref()
    }

    pub fn ospf(&self) -> Option<&OspfRecord> {
        self.ospf.as_ref()
    }

    pub fn has_routing(&self) -> bool {
        self.bgp.is_some() || self.ospf.is_some()
    }

    /// Names of the routing protocols present, e.g. `["bgp", "ospf"]`.
    pub fn protocols(&self) -> Vec<&'static str> {
        let mut protocols = Vec::new();
        if self.bgp.is_some() {
            protocols.push("bgp");
        }
        if self.ospf.is_some() {
            protocols.push("ospf");
        }
        protocols
    }
}

/// Accumulates fields during a single parse pass.
#[derive(Debug, Clone)]
pub struct DeviceBuilder {
    hostname: String,
    filename: String,
    default_kind: Option<DeviceKind>,
    model: String,
    interfaces: Vec<InterfaceRecord>,
    loopbacks: Vec<InterfaceRecord>,
    bgp: Option<BgpRecord>,
    ospf: Option<OspfRecord>,
}

impl DeviceBuilder {
    pub fn new(hostname: impl Into<String>, filename: impl Into<String>) -> Self {
        DeviceBuilder {
            hostname: hostname.into(),
            filename: filename.into(),
            default_kind: None,
            model: String::new(),
            interfaces: Vec::new(),
            loopbacks: Vec::new(),
            bgp: None,
            ospf: None,
        }
    }

    pub fn default_kind(&mut self, kind: DeviceKind) -> &mut Self {
        self.default_kind = Some(kind);
        self
    }

    pub fn model(&mut self, model: impl Into<String>) -> &mut Self {
        self.model = model.into();
        self
    }

    /// Add an interface, replacing any earlier one with the same name.
    pub fn add_interface(&mut self, record: InterfaceRecord) -> &mut Self {
        self.loopbacks.retain(|l| l.name != record.name);
        upsert(&mut self.interfaces, record);
        self
    }

    /// Add a loopback, replacing any earlier one with the same name.
    pub fn add_loopback(&mut self, record: InterfaceRecord) -> &mut Self {
        self.interfaces.retain(|i| i.name != record.name);
        upsert(&mut self.loopbacks, record);
        self
    }

    pub fn bgp(&mut self, record: BgpRecord) -> &mut Self {
        self.bgp = Some(record);
        self
    }

    pub fn ospf(&mut self, record: OspfRecord) -> &mut Self {
        self.ospf = Some(record);
        self
    }

    pub fn ospf_or_insert_with(&mut self, f: impl FnOnce() -> OspfRecord) -> &mut OspfRecord {
        self.ospf.get_or_insert_with(f)
    }

    pub fn build(self) -> DeviceModel {
        DeviceModel {
            hostname: self.hostname,
            filename: self.filename,
            default_kind: self.default_kind,
            model: self.model,
            interfaces: self.interfaces,
            loopbacks: self.loopbacks,
            bgp: self.bgp,
            ospf: self.ospf,
        }
    }
}

fn upsert(records: &mut Vec<InterfaceRecord>, record: InterfaceRecord) {
    match records.iter_mut().find(|r| r.name == record.name) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterfaceStatus;

    #[test]
    fn test_builder_keeps_interface_order_and_replaces_duplicates() {
        let mut builder = DeviceBuilder::new("R1", "r1.conf");
        builder
            .add_interface(InterfaceRecord::new("Gi0/2", InterfaceStatus::Up))
            .add_interface(InterfaceRecord::new("Gi0/10", InterfaceStatus::Up))
            .add_interface(InterfaceRecord::new("Gi0/2", InterfaceStatus::Down));
        let device = builder.build();
        let names: Vec<&str> = device.interfaces().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Gi0/2", "Gi0/10"]);
        assert_eq!(device.interface("Gi0/2").unwrap().status, InterfaceStatus::Down);
    }

    #[test]
    fn test_interface_and_loopback_names_are_disjoint() {
        let mut builder = DeviceBuilder::new("R1", "r1.conf");
        builder
            .add_interface(InterfaceRecord::new("Loopback0", InterfaceStatus::Up))
            .add_loopback(InterfaceRecord::new("Loopback0", InterfaceStatus::Up));
        let device = builder.build();
        assert!(device.interface("Loopback0").is_none());
        assert!(device.loopback("Loopback0").is_some());
    }

    #[test]
    fn test_canonical_loopback_spellings() {
        let mut builder = DeviceBuilder::new("SW1", "sw1.conf");
        builder
            .add_loopback(InterfaceRecord::new("loopback 1", InterfaceStatus::Up))
            .add_loopback(InterfaceRecord::new("loopback 0", InterfaceStatus::Up));
        let device = builder.build();
        assert_eq!(device.canonical_loopback().unwrap().name, "loopback 0");

        let mut builder = DeviceBuilder::new("R1", "r1.conf");
        builder.add_loopback(InterfaceRecord::new("Loopback10", InterfaceStatus::Up));
        assert!(builder.build().canonical_loopback().is_none());
    }

    #[test]
    fn test_protocols() {
        let mut builder = DeviceBuilder::new("R1", "r1.conf");
        assert!(!builder.clone().build().has_routing());
        builder.ospf(OspfRecord::new(1)).bgp(BgpRecord::new(65001));
        let device = builder.build();
        assert!(device.has_routing());
        assert_eq!(device.protocols(), vec!["bgp", "ospf"]);
    }
}
