//! Output formatting for parsed devices.
//!
//! This module handles rendering and writing the diagram files:
//! - [`d2`] - D2 quoting and block helpers
//! - [`topology`] - Shared topology file with devices and connections
//! - [`device`] - One diagram file per device
//! - [`writer`] - Writes the files to the output directory
//! - [`report`] - Optional JSON run report

mod d2;
mod device;
mod report;
mod topology;
mod writer;

pub use d2::{key, quote};
pub use device::{management_address, ospf_area, render_device};
pub use report::{write_report, RunReport};
pub use topology::{render_topology, DEVICES_BLOCK};
pub use writer::{file_stem, write_site, SiteFiles, DEVICES_DIR, DIAGRAM_EXTENSION, TOPOLOGY_FILE};
