//! Device kind resolution for the diagram.

use crate::models::{DeviceKind, DeviceModel};

const ROUTER_MODELS: &[&str] = &["CSR1000V", "ISR4331", "ISR4321", "ISR4451"];
const SWITCH_MODELS: &[&str] = &["C9300", "C3850", "C2960"];

/// Resolve the kind of a device.
///
/// Precedence: exact model table, model markers, hostname markers, the
/// parser's default, then router if any routing protocol is configured
/// and switch otherwise.
pub fn resolve_device_kind(device: &DeviceModel) -> DeviceKind {
    let model = device.model();
    let hostname = device.hostname().to_lowercase();

    if ROUTER_MODELS.contains(&model) {
        DeviceKind::Router
    } else if SWITCH_MODELS.contains(&model) {
        DeviceKind::Switch
    } else if model.contains("AOS-CX") {
        DeviceKind::Switch
    } else if model.contains("WLC") {
        DeviceKind::WirelessController
    } else if model.to_lowercase().contains("asa") {
        DeviceKind::Firewall
    } else if hostname.contains("wireless") {
        DeviceKind::WirelessController
    } else if hostname.contains("firewall") {
        DeviceKind::Firewall
    } else if let Some(kind) = device.default_kind() {
        kind
    } else if device.has_routing() {
        DeviceKind::Router
    } else {
        DeviceKind::Switch
    }
}
