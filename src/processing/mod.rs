//! Batch processing of device configurations.
//!
//! This module contains the business logic between parsing and output:
//! - [`batch`] - Read and parse every config file in a directory
//! - [`diagnostics`] - Record which files were parsed or skipped, and why
//! - [`connections`] - Infer links between devices from shared subnets
//! - [`device_type`] - Resolve the kind of each device

mod batch;
mod connections;
mod device_type;
mod diagnostics;

// Re-export public functions
pub use batch::{parse_config_text, parse_directory, Batch, CONFIG_EXTENSION};
pub use connections::{infer_connections, Connection, Endpoint};
pub use device_type::resolve_device_kind;
pub use diagnostics::{Diagnostics, ParsedFile, SkipReason, SkippedFile};
