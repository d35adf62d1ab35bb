//! Shared topology file: site header, device list and every connection.

use super::d2::key;
use crate::config::SiteInfo;
use crate::models::DeviceModel;
use crate::processing::Connection;

/// Block in the topology file listing device hostnames.
pub const DEVICES_BLOCK: &str = "devices: {";

/// Render the shared topology file.
///
/// Connections are declared only here, once each, so device files never
/// repeat an edge. The devices block holds bare hostnames and no braces.
pub fn render_topology(devices: &[DeviceModel], connections: &[Connection], site: &SiteInfo) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {}", site.name));
    lines.push(format!("# Location: {}", site.location));
    lines.push(format!("# Description: {}", site.description));
    if let Some(generated) = &site.generated {
        lines.push(format!("# Generated: {}", generated.format("%Y-%m-%d %H:%M:%S")));
    }
    lines.push(format!("# Device Count: {} devices", devices.len()));
    lines.push(String::new());

    lines.push("# Device List - Individual device configurations are in separate .d2 files".to_string());
    lines.push(DEVICES_BLOCK.to_string());
    let mut hostnames: Vec<String> = devices.iter().map(|d| key(d.hostname())).collect();
    hostnames.sort();
    for hostname in hostnames {
        lines.push(format!("  {hostname}"));
    }
    lines.push("}".to_string());
    lines.push(String::new());

    lines.push("# Connection Topology - All site connections defined here".to_string());
    lines.push("# This prevents duplicate connections across device files".to_string());
    lines.push(String::new());
    for connection in connections {
        lines.push(format!(
            "{}.{} -> {}.{}",
            key(&connection.a.device),
            key(&connection.a.interface),
            key(&connection.b.device),
            key(&connection.b.interface)
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceBuilder, Ipv4};
    use crate::processing::Endpoint;

    fn site() -> SiteInfo {
        SiteInfo {
            name: "Lab".to_string(),
            location: "Rack 4".to_string(),
            description: "Test lab".to_string(),
            generated: None,
        }
    }

    #[test]
    fn test_render_topology() {
        let devices = vec![
            DeviceBuilder::new("R2", "r2.conf").build(),
            DeviceBuilder::new("R1", "r1.conf").build(),
        ];
        let connections = vec![Connection::new(
            Endpoint {
                device: "R2".to_string(),
                interface: "Gi0/1".to_string(),
            },
            Endpoint {
                device: "R1".to_string(),
                interface: "Gi0/0".to_string(),
            },
            Ipv4::new("10.0.0.0/24").unwrap(),
        )];

        let text = render_topology(&devices, &connections, &site());
        let expected = "\
# Lab
# Location: Rack 4
# Description: Test lab
# Device Count: 2 devices

# Device List - Individual device configurations are in separate .d2 files
devices: {
  R1
  R2
}

# Connection Topology - All site connections defined here
# This prevents duplicate connections across device files

R1.Gi0/0 -> R2.Gi0/1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_devices_block_has_no_nested_braces() {
        let devices = vec![DeviceBuilder::new("odd{name}", "x.conf").build()];
        let text = render_topology(&devices, &[], &site());
        assert_eq!(text.matches(DEVICES_BLOCK).count(), 1);
        assert_eq!(text.matches('{').count(), 1);
        assert_eq!(text.matches('}').count(), 1);
        assert!(text.contains("  odd_name_\n"));
    }
}
