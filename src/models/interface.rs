//! Interface records extracted from device configurations.

use super::Ipv4;
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Address text recorded for DHCP-assigned interfaces.
pub const DHCP_SENTINEL: &str = "dhcp";

/// Operational status of an interface.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceStatus {
    Up,
    Down,
    /// Explicit "no address configured"; authoritative over any address line.
    NoIp,
}

impl InterfaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceStatus::Up => "up",
            InterfaceStatus::Down => "down",
            InterfaceStatus::NoIp => "no_ip",
        }
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address assigned to an interface.
///
/// Only [`InterfaceAddress::Static`] carries a mask, so an address and mask
/// are always present together or not at all.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InterfaceAddress {
    Static { address: Ipv4Addr, mask: Ipv4Addr },
    Dhcp,
    /// Address literal that could not be parsed, kept verbatim.
    Raw { text: String },
}

impl InterfaceAddress {
    pub fn address_text(&self) -> String {
        match self {
            InterfaceAddress::Static { address, .. } => address.to_string(),
            InterfaceAddress::Dhcp => DHCP_SENTINEL.to_string(),
            InterfaceAddress::Raw { text } => text.clone(),
        }
    }

    /// Dotted mask, empty unless the address is static.
    pub fn mask_text(&self) -> String {
        match self {
            InterfaceAddress::Static { mask, .. } => mask.to_string(),
            _ => String::new(),
        }
    }

    /// Canonical network, when the address is static with a contiguous mask.
    pub fn network(&self) -> Option<Ipv4> {
        match self {
            InterfaceAddress::Static { address, mask } => Ipv4::network_of(*address, *mask).ok(),
            _ => None,
        }
    }
}

/// A single interface (or loopback) and the configuration found in its block.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub name: String,
    pub status: InterfaceStatus,
    pub description: Option<String>,
    pub address: Option<InterfaceAddress>,
    pub negotiation: Option<String>,
    pub lag_member: bool,
    pub lag_id: Option<String>,
    /// Control protocol label of a link-aggregation interface.
    pub aggregation_protocol: Option<String>,
    /// Lines the parser did not recognise, in source order.
    pub other_config: Vec<String>,
}

impl InterfaceRecord {
    pub fn new(name: impl Into<String>, status: InterfaceStatus) -> Self {
        InterfaceRecord {
            name: name.into(),
            status,
            description: None,
            address: None,
            negotiation: None,
            lag_member: false,
            lag_id: None,
            aggregation_protocol: None,
            other_config: Vec::new(),
        }
    }

    pub fn network(&self) -> Option<Ipv4> {
        self.address.as_ref().and_then(InterfaceAddress::network)
    }

    pub fn is_aggregation(&self) -> bool {
        self.lag_member || self.aggregation_protocol.is_some()
    }
}
