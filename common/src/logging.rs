//! Common logging initialiser, shared by `acarsd` and `acars-cli`.
//!

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Initialise the global tracing subscriber.
///
/// Filters come from `RUST_LOG` (or `acars_ingest=info` if unset). `use_tree`
/// switches between the hierarchical span-aware layer (handy for tracing a
/// single dispatch through its parsers) and plain line-oriented output.
///
#[tracing::instrument]
pub fn init_logging(use_tree: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    let plain = if use_tree {
        None
    } else {
        Some(tracing_subscriber::fmt::layer().with_target(true))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(plain)
        .init();

    Ok(())
}
