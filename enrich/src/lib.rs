//! Enrichment: projecting dispatcher results down to per-flight updates
//! (`extract`) and merging them into the transactional store (`store`).
//!

pub mod extract;
pub mod store;

pub use extract::{extract, EnrichmentUpdate};
pub use store::{EnrichmentSink, EnrichmentStore, FlightEnrichment};

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
