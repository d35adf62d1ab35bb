//! Parse every configuration file in a directory.

use super::diagnostics::{Diagnostics, SkipReason};
use crate::dialect::{detect_dialect, Dialect, ParserRegistry};
use crate::models::DeviceModel;
use std::error::Error;
use std::path::{Path, PathBuf};

/// File extension of device configuration files.
pub const CONFIG_EXTENSION: &str = "conf";

/// Devices parsed from one input directory, with per-file diagnostics.
#[derive(Debug, Default)]
pub struct Batch {
    pub devices: Vec<DeviceModel>,
    pub diagnostics: Diagnostics,
}

/// Detect the dialect of `text` and parse it with the registered parser.
pub fn parse_config_text(
    text: &str,
    filename: &str,
    registry: &ParserRegistry,
) -> Result<(Dialect, DeviceModel), SkipReason> {
    let dialect = detect_dialect(text).ok_or(SkipReason::UnknownDialect)?;
    let parser = registry
        .get(dialect)
        .ok_or(SkipReason::UnsupportedDialect { dialect })?;
    let device = parser.parse(text, filename)?;
    Ok((dialect, device))
}

/// Parse all `*.conf` files in `dir`, in file name order.
///
/// A file that cannot be read, detected or parsed is recorded in the
/// diagnostics and skipped; it never fails the batch. Only a missing or
/// unreadable directory is an error.
pub fn parse_directory(dir: &Path, registry: &ParserRegistry) -> Result<Batch, Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("Config directory not found: {}", dir.display()).into());
    }
    log::info!("Parsing configurations from: {}", dir.display());

    let mut batch = Batch::default();
    for path in config_files(dir)? {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                batch.diagnostics.record_skipped(
                    &filename,
                    SkipReason::Unreadable {
                        message: e.to_string(),
                    },
                );
                continue;
            }
        };

        match parse_config_text(&text, &filename, registry) {
            Ok((dialect, device)) => {
                if let Some(first) = batch
                    .devices
                    .iter()
                    .find(|d| d.hostname() == device.hostname())
                {
                    let reason = SkipReason::DuplicateHostname {
                        hostname: device.hostname().to_string(),
                        first_file: first.filename().to_string(),
                    };
                    batch.diagnostics.record_skipped(&filename, reason);
                    continue;
                }
                batch
                    .diagnostics
                    .record_parsed(&filename, device.hostname(), dialect);
                batch.devices.push(device);
            }
            Err(reason) => batch.diagnostics.record_skipped(&filename, reason),
        }
    }

    log::info!(
        "Parsed {} devices, skipped {} files",
        batch.devices.len(),
        batch.diagnostics.skipped.len()
    );
    Ok(batch)
}

fn config_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| format!("Error reading config directory {}: {e}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == CONFIG_EXTENSION))
        .collect();
    files.sort();
    Ok(files)
}
