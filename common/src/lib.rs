//! Shared plumbing for the acars-ingest workspace: config loading, logging
//! initialisation and the small set of error kinds that cross crate boundaries.
//!

mod config;
mod error;
mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
