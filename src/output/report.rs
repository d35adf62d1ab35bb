//! JSON run report: parsed devices, inferred connections and diagnostics.

use crate::config::SiteInfo;
use crate::models::DeviceModel;
use crate::processing::{Connection, Diagnostics};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

#[derive(Serialize, Debug)]
pub struct RunReport<'a> {
    pub site: &'a SiteInfo,
    pub devices: &'a [DeviceModel],
    pub connections: &'a [Connection],
    pub diagnostics: &'a Diagnostics,
}

/// Serialize the report as pretty JSON to `path`.
pub fn write_report(path: &Path, report: &RunReport) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    log::info!("Writing report to file: {}", path.display());
    std::fs::write(path, json)
        .map_err(|e| format!("Error writing report file {}: {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::models::{DeviceBuilder, Ipv4};
    use crate::processing::{Endpoint, SkipReason};

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let devices = vec![DeviceBuilder::new("R1", "r1.conf").build()];
        let connections = vec![Connection::new(
            Endpoint {
                device: "R1".to_string(),
                interface: "Gi1".to_string(),
            },
            Endpoint {
                device: "R2".to_string(),
                interface: "Gi1".to_string(),
            },
            Ipv4::new("10.0.0.0/30").unwrap(),
        )];
        let mut diagnostics = Diagnostics::new();
        diagnostics.record_parsed("r1.conf", "R1", Dialect::CiscoIos);
        diagnostics.record_skipped("notes.conf", SkipReason::UnknownDialect);

        let site = SiteInfo::default();
        let report = RunReport {
            site: &site,
            devices: &devices,
            connections: &connections,
            diagnostics: &diagnostics,
        };
        write_report(&path, &report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["devices"][0]["hostname"], "R1");
        assert_eq!(json["connections"][0]["subnet"], "10.0.0.0/30");
        assert_eq!(json["diagnostics"]["parsed"][0]["dialect"], "cisco-ios");
        assert_eq!(
            json["diagnostics"]["skipped"][0]["reason"]["reason"],
            "unknown_dialect"
        );
    }
}
