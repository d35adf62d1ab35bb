//! Site metadata written into the topology file header.

use chrono::{DateTime, Local};
use serde::Serialize;

pub const DEFAULT_SITE_NAME: &str = "Network Topology";
pub const DEFAULT_LOCATION: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "Auto-generated from device configurations";

/// Name, location and description of the site being drawn.
///
/// `generated` is the run timestamp; `None` omits the `# Generated:` line,
/// which keeps output byte-stable in tests.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    pub location: String,
    pub description: String,
    pub generated: Option<DateTime<Local>>,
}

impl SiteInfo {
    pub fn new(name: &str, location: &str, description: &str) -> Self {
        SiteInfo {
            name: name.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            generated: None,
        }
    }

    /// Stamp the current local time.
    pub fn generated_now(mut self) -> Self {
        self.generated = Some(Local::now());
        self
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo::new(DEFAULT_SITE_NAME, DEFAULT_LOCATION, DEFAULT_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site() {
        let site = SiteInfo::default();
        assert_eq!(site.name, "Network Topology");
        assert_eq!(site.location, "Unknown");
        assert_eq!(site.description, "Auto-generated from device configurations");
        assert!(site.generated.is_none());
        assert!(site.generated_now().generated.is_some());
    }
}
