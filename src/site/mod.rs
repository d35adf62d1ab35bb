//! Reading a written site back as one diagram.
//!
//! - [`combine`] - Strip the devices block from the topology file and append
//!   every device file

mod combine;

pub use combine::{combine_site, strip_devices_block, CombinedSite, FileFailure};
