//! Domain models for configuration-derived topologies.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`DeviceModel`] and [`DeviceBuilder`] - A parsed device configuration
//! - [`InterfaceRecord`] - Interface and loopback configuration
//! - [`BgpRecord`] and [`OspfRecord`] - Routing protocol state

mod device;
mod interface;
mod ipv4;
mod protocol;

// Re-export public types
pub use device::{DeviceBuilder, DeviceKind, DeviceModel};
pub use interface::{InterfaceAddress, InterfaceRecord, InterfaceStatus, DHCP_SENTINEL};
pub use ipv4::{get_cidr_mask, prefix_to_mask, Ipv4};
pub use protocol::{BgpNeighbor, BgpRecord, OspfInterfaceArea, OspfNetwork, OspfRecord};
