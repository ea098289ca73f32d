use thiserror::Error;

/// Configuration-related failures, surfaced at startup and treated as fatal
/// per the "configuration / bus connection failure at startup" policy.
///
#[derive(Debug, Error)]
pub enum ConfigStatus {
    #[error("missing configuration file, use -c or create {0}")]
    MissingConfig(String),
    #[error("error reading configuration ({0})")]
    BadConfig(String),
    #[error("bad config file version {0}, expected {1}")]
    BadVersion(usize, usize),
    #[error("no bus url specified in {0}")]
    NoBusUrl(String),
}
