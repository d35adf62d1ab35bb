//! Write diagram files to the output directory.

use super::d2::key;
use super::{render_device, render_topology};
use crate::config::SiteInfo;
use crate::models::DeviceModel;
use crate::processing::Connection;
use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Shared topology file name inside the output directory.
pub const TOPOLOGY_FILE: &str = "main.d2";
/// Sub-directory holding one file per device.
pub const DEVICES_DIR: &str = "devices";
pub const DIAGRAM_EXTENSION: &str = "d2";

/// Paths written by [`write_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFiles {
    pub topology: PathBuf,
    pub devices: Vec<PathBuf>,
}

/// Write the topology file and every device file.
///
/// Existing files are overwritten in place; a failure part way through can
/// leave the directory partially updated.
pub fn write_site(
    output_dir: &Path,
    devices: &[DeviceModel],
    connections: &[Connection],
    site: &SiteInfo,
) -> Result<SiteFiles, Box<dyn Error>> {
    let devices_dir = output_dir.join(DEVICES_DIR);
    std::fs::create_dir_all(&devices_dir)
        .map_err(|e| format!("Error creating output directory {}: {e}", devices_dir.display()))?;
    log::info!("Output directory: {}", output_dir.display());

    let mut device_files = Vec::with_capacity(devices.len());
    let mut used_stems = HashSet::new();
    for device in devices {
        let mut stem = file_stem(device.hostname());
        if !used_stems.insert(stem.clone()) {
            let base = stem.clone();
            let mut n = 2;
            while !used_stems.insert(format!("{base}-{n}")) {
                n += 1;
            }
            stem = format!("{base}-{n}");
            log::warn!("Device {} written as {stem}.{DIAGRAM_EXTENSION}", device.hostname());
        }
        let path = devices_dir.join(format!("{stem}.{DIAGRAM_EXTENSION}"));
        write_file(&path, &render_device(device))?;
        device_files.push(path);
    }
    log::info!(
        "Generated individual device files: {}",
        devices
            .iter()
            .map(|d| d.hostname())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let topology = output_dir.join(TOPOLOGY_FILE);
    write_file(&topology, &render_topology(devices, connections, site))?;
    log::info!(
        "Generated {} device files and {TOPOLOGY_FILE} in {}",
        devices.len(),
        output_dir.display()
    );

    Ok(SiteFiles {
        topology,
        devices: device_files,
    })
}

/// File name stem for a device: its declaration key with path separators
/// and leading dots replaced, so the file always lands in the devices dir.
pub fn file_stem(hostname: &str) -> String {
    let stem: String = key(hostname)
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    let dots = stem.len() - stem.trim_start_matches('.').len();
    let stem = format!("{}{}", "_".repeat(dots), &stem[dots..]);
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn Error>> {
    log::debug!("Writing {} ({} bytes)", path.display(), content.len());
    std::fs::write(path, content).map_err(|e| format!("Error writing {}: {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceBuilder;

    #[test]
    fn test_write_site_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");
        let devices = vec![
            DeviceBuilder::new("R1", "r1.conf").build(),
            DeviceBuilder::new("R2", "r2.conf").build(),
        ];

        let files = write_site(&out, &devices, &[], &SiteInfo::default()).unwrap();
        assert_eq!(files.topology, out.join("main.d2"));
        assert_eq!(
            files.devices,
            vec![out.join("devices/R1.d2"), out.join("devices/R2.d2")]
        );
        let r1 = std::fs::read_to_string(out.join("devices/R1.d2")).unwrap();
        assert!(r1.starts_with("# R1\nR1: {\n"));

        // second run overwrites
        let files = write_site(&out, &devices[..1], &[], &SiteInfo::default()).unwrap();
        assert_eq!(files.devices.len(), 1);
        let main = std::fs::read_to_string(files.topology).unwrap();
        assert!(main.contains("# Device Count: 1 devices"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("R1"), "R1");
        assert_eq!(file_stem("lab/R2"), "lab_R2");
        assert_eq!(file_stem("../../escaped"), "___.._escaped");
        assert_eq!(file_stem("..\\win"), "___win");
        assert_eq!(file_stem(".hidden"), "_hidden");
        assert_eq!(file_stem("sw.core.1"), "sw.core.1");
    }

    #[test]
    fn test_hostnames_with_path_characters_stay_in_devices_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");
        let devices = vec![
            DeviceBuilder::new("R1", "a.conf").build(),
            DeviceBuilder::new("lab/R2", "b.conf").build(),
            DeviceBuilder::new("../../escaped", "c.conf").build(),
        ];

        let files = write_site(&out, &devices, &[], &SiteInfo::default()).unwrap();
        assert!(files.topology.is_file());
        assert_eq!(
            files.devices,
            vec![
                out.join("devices/R1.d2"),
                out.join("devices/lab_R2.d2"),
                out.join("devices/___.._escaped.d2"),
            ]
        );
        for path in &files.devices {
            assert!(path.is_file());
            assert_eq!(path.parent(), Some(out.join("devices").as_path()));
        }
        assert!(!dir.path().join("escaped.d2").exists());
    }

    #[test]
    fn test_colliding_file_stems_get_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let devices = vec![
            DeviceBuilder::new("lab_R2", "a.conf").build(),
            DeviceBuilder::new("lab/R2", "b.conf").build(),
        ];

        let files = write_site(dir.path(), &devices, &[], &SiteInfo::default()).unwrap();
        assert_eq!(
            files.devices,
            vec![
                dir.path().join("devices/lab_R2.d2"),
                dir.path().join("devices/lab_R2-2.d2"),
            ]
        );
        let second = std::fs::read_to_string(&files.devices[1]).unwrap();
        assert!(second.starts_with("# lab/R2\n"));
    }
}
