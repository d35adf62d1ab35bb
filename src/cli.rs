//! Command line interface and the end-to-end run.

use crate::config::{SiteInfo, DEFAULT_DESCRIPTION, DEFAULT_LOCATION, DEFAULT_SITE_NAME};
use crate::dialect::ParserRegistry;
use crate::models::DeviceModel;
use crate::output::{write_report, write_site, RunReport, SiteFiles};
use crate::processing::{infer_connections, parse_directory, Connection, Diagnostics};
use crate::site::combine_site;
use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "config-topology")]
#[command(about = "Generate D2 topology diagrams from network device configurations.")]
pub struct Cli {
    /// Directory containing *.conf device configuration files
    #[arg(short = 'c', long, env = "CONFIG_TOPOLOGY_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Directory to write main.d2 and devices/*.d2 into
    #[arg(short = 'o', long, env = "CONFIG_TOPOLOGY_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    #[arg(short = 'n', long, env = "CONFIG_TOPOLOGY_SITE_NAME", default_value = DEFAULT_SITE_NAME)]
    pub site_name: String,

    #[arg(short = 'l', long, env = "CONFIG_TOPOLOGY_LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    #[arg(short = 'd', long, env = "CONFIG_TOPOLOGY_DESCRIPTION", default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Write a JSON report of devices, connections and skipped files
    #[arg(long, env = "CONFIG_TOPOLOGY_REPORT")]
    pub report: Option<PathBuf>,

    /// Write main.d2 and all device files combined into one file
    #[arg(long, env = "CONFIG_TOPOLOGY_BUNDLE")]
    pub bundle: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn site(&self) -> SiteInfo {
        SiteInfo::new(&self.site_name, &self.location, &self.description).generated_now()
    }
}

/// What a run produced, for the terminal summary.
#[derive(Debug)]
pub struct RunSummary {
    pub devices: Vec<DeviceModel>,
    pub connections: Vec<Connection>,
    pub diagnostics: Diagnostics,
    pub files: SiteFiles,
}

impl RunSummary {
    /// Print one line per device, then the skipped files.
    pub fn print(&self) {
        println!(
            "Parsed {} devices:",
            self.devices.len().to_string().green()
        );
        for device in &self.devices {
            let protocols = device.protocols();
            let protocols = if protocols.is_empty() {
                "None".to_string()
            } else {
                protocols.join(", ")
            };
            println!(
                "  - {} ({}) - Protocols: {}",
                device.hostname().bold(),
                device.model(),
                protocols
            );
        }
        println!(
            "Inferred {} connections, wrote {}",
            self.connections.len(),
            self.files.topology.display()
        );
        if !self.diagnostics.is_clean() {
            println!("Skipped {} files:", self.diagnostics.skipped.len().to_string().yellow());
            for skipped in &self.diagnostics.skipped {
                println!("  - {}: {}", skipped.file.yellow(), skipped.reason);
            }
        }
    }
}

/// Parse, infer, write. Fails when no device could be parsed.
pub fn run(cli: &Cli) -> Result<RunSummary, Box<dyn Error>> {
    let registry = ParserRegistry::with_builtin();
    let batch = parse_directory(&cli.config_dir, &registry)?;
    if batch.devices.is_empty() {
        return Err("No devices found or parsed successfully".into());
    }

    let connections = infer_connections(&batch.devices);

    let site = cli.site();
    let files = write_site(&cli.output_dir, &batch.devices, &connections, &site)?;

    if let Some(path) = &cli.report {
        let report = RunReport {
            site: &site,
            devices: &batch.devices,
            connections: &connections,
            diagnostics: &batch.diagnostics,
        };
        write_report(path, &report)?;
    }

    if let Some(path) = &cli.bundle {
        let combined = combine_site(&cli.output_dir)?;
        for failure in &combined.failures {
            log::warn!(
                "Left out of bundle: {} ({})",
                failure.path.display(),
                failure.reason
            );
        }
        std::fs::write(path, &combined.content)
            .map_err(|e| format!("Error writing bundle {}: {e}", path.display()))?;
        log::info!("Wrote bundle to {}", path.display());
    }

    Ok(RunSummary {
        devices: batch.devices,
        connections,
        diagnostics: batch.diagnostics,
        files,
    })
}
