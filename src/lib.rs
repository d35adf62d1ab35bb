//! Parse network device configurations and draw the site as D2 diagrams.
//!
//! - [`dialect`] - Dialect detection and per-vendor parsers
//! - [`models`] - Immutable device models built from parsed text
//! - [`processing`] - Directory batches, diagnostics and connection inference
//! - [`output`] - D2 rendering and file writing
//! - [`site`] - Reading a written site back as one diagram
//! - [`cli`] - Command line flags and the end-to-end run

pub mod cli;
pub mod config;
pub mod dialect;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod site;

pub use cli::{run, Cli, RunSummary};
pub use config::SiteInfo;
pub use dialect::{detect_dialect, Dialect, DialectParser, ParserRegistry};
pub use processing::{infer_connections, parse_directory};
