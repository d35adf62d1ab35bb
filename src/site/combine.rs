//! Combine a written site into one diagram text.

use crate::output::{DEVICES_DIR, DIAGRAM_EXTENSION, TOPOLOGY_FILE};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// A device file that could not be added to the bundle.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of [`combine_site`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedSite {
    pub content: String,
    /// File names of the device files included, in bundle order.
    pub device_files: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Remove the `devices: { ... }` block from a topology file.
///
/// The opening line is any line starting with `devices:` after trimming.
/// Braces are then counted per line; the block ends on the first line that
/// contains `}` and brings the count to zero or below. Every other line is
/// kept unchanged.
pub fn strip_devices_block(text: &str) -> String {
    let mut kept = Vec::new();
    let mut in_block = false;
    let mut depth: i64 = 0;

    for line in text.split('\n') {
        if line.trim().starts_with("devices:") {
            in_block = true;
            depth = 0;
            continue;
        }
        if in_block {
            depth += line.matches('{').count() as i64 - line.matches('}').count() as i64;
            if depth <= 0 && line.contains('}') {
                in_block = false;
            }
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

/// Build the combined text of the site written to `site_dir`.
///
/// `main.d2` must be readable. A device file that cannot be read is
/// recorded in `failures` and left out.
pub fn combine_site(site_dir: &Path) -> Result<CombinedSite, Box<dyn Error>> {
    let topology_path = site_dir.join(TOPOLOGY_FILE);
    let topology = std::fs::read_to_string(&topology_path)
        .map_err(|e| format!("Error reading {}: {e}", topology_path.display()))?;

    let mut site = CombinedSite::default();
    let mut parts = vec![strip_devices_block(&topology)];

    for path in device_files(&site_dir.join(DEVICES_DIR))? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                parts.push(format!("\n# === {name} ==="));
                parts.push(content);
                site.device_files.push(name);
            }
            Err(e) => {
                log::warn!("Could not read device file {}: {e}", path.display());
                site.failures.push(FileFailure {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    site.content = parts.join("\n");
    log::info!(
        "Combined {TOPOLOGY_FILE} with {} device files: {:?}",
        site.device_files.len(),
        site.device_files
    );
    Ok(site)
}

fn device_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !dir.is_dir() {
        log::debug!("No device directory at {}", dir.display());
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| format!("Error reading device directory {}: {e}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == DIAGRAM_EXTENSION))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_devices_block() {
        let text = "# Site\ndevices: {\n  R1\n  R2\n}\n\nR1.Gi1 -> R2.Gi1\n";
        assert_eq!(strip_devices_block(text), "# Site\n\nR1.Gi1 -> R2.Gi1\n");
    }

    #[test]
    fn test_strip_devices_block_indented_and_missing() {
        let indented = "a\n  devices: {\n    R1\n  }\nb";
        assert_eq!(strip_devices_block(indented), "a\nb");

        let plain = "R1.Gi1 -> R2.Gi1\n";
        assert_eq!(strip_devices_block(plain), plain);
    }

    #[test]
    fn test_strip_empty_devices_block_on_one_line() {
        // the opening line is dropped without counting its braces
        let text = "devices: {}\nR1\n}\nafter";
        assert_eq!(strip_devices_block(text), "after");
    }

    #[test]
    fn test_combine_site() {
        let dir = tempfile::tempdir().unwrap();
        let devices = dir.path().join("devices");
        std::fs::create_dir_all(&devices).unwrap();
        std::fs::write(dir.path().join("main.d2"), "# Lab\ndevices: {\n  R1\n}\nR1.a -> R2.b\n")
            .unwrap();
        std::fs::write(devices.join("R2.d2"), "R2: {}\n").unwrap();
        std::fs::write(devices.join("R1.d2"), "R1: {}\n").unwrap();
        std::fs::write(devices.join("notes.txt"), "ignored").unwrap();

        let site = combine_site(dir.path()).unwrap();
        assert_eq!(site.device_files, vec!["R1.d2", "R2.d2"]);
        assert!(site.failures.is_empty());
        assert_eq!(
            site.content,
            "# Lab\nR1.a -> R2.b\n\n\n# === R1.d2 ===\nR1: {}\n\n\n# === R2.d2 ===\nR2: {}\n"
        );
    }

    #[test]
    fn test_combine_site_reports_unreadable_device_file() {
        let dir = tempfile::tempdir().unwrap();
        let devices = dir.path().join("devices");
        std::fs::create_dir_all(&devices).unwrap();
        std::fs::write(dir.path().join("main.d2"), "# Lab\n").unwrap();
        std::fs::write(devices.join("R1.d2"), "R1: {}\n").unwrap();
        std::fs::write(devices.join("R2.d2"), [0xffu8, 0xfe, 0x00]).unwrap();

        let site = combine_site(dir.path()).unwrap();
        assert_eq!(site.device_files, vec!["R1.d2"]);
        assert_eq!(site.failures.len(), 1);
        assert_eq!(site.failures[0].path, devices.join("R2.d2"));
    }

    #[test]
    fn test_combine_site_without_topology_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(combine_site(dir.path()).is_err());
    }
}
