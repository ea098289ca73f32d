//! The ingest loop: consumes wrapped bus messages, dispatches them, and
//! writes the analytic and enrichment stores. Everything transport-specific
//! is behind [`loop_::BusSource`] so the loop itself can be driven by a test
//! double without a real bus connection.
//!

mod envelope;
mod loop_;

pub use envelope::{BusEnvelope, BusMessage};
pub use loop_::{BusSource, IngestConfig, IngestLoop};

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
