//! Finds and loads the acars-ingest configuration file.
//!
//! This is a configuration-file-neutral loading engine: it only knows how to
//! find the right default location for `config.hcl` and hand back a
//! deserialised, versioned struct. Individual binaries (`acarsd`, `acars-cli`)
//! own the actual struct shape.
//!

use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::{env, fs};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::ConfigStatus;

const CONFIG: &str = "config.hcl";
const TAG: &str = "acars-ingest";

/// A trait implemented by any configuration struct so the loader can check
/// the on-disk version against the one the binary expects.
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Locates and loads a versioned HCL configuration file.
///
#[derive(Debug)]
pub struct ConfigEngine<T: Debug + DeserializeOwned + Versioned> {
    basedir: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigEngine<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    fn new() -> Self {
        let basedir = match BaseDirs::new() {
            Some(base) => base.config_local_dir().join(TAG),
            None => {
                let home = env::var("HOME").unwrap_or_else(|_| ".".into());
                PathBuf::from(home).join(".config").join(TAG)
            }
        };
        debug!("config basedir = {}", basedir.display());
        ConfigEngine {
            basedir,
            _marker: PhantomData,
        }
    }

    /// Default config file path under the OS-specific config directory.
    pub fn default_file() -> PathBuf {
        ConfigEngine::<T>::new().basedir.join(CONFIG)
    }

    /// Load `fname` if given, otherwise the default config file location,
    /// checking the declared file version against `expected_version`.
    ///
    #[tracing::instrument(skip(expected_version))]
    pub fn load(fname: Option<&str>, expected_version: usize) -> Result<T> {
        let path = match fname {
            Some(f) => PathBuf::from(f),
            None => ConfigEngine::<T>::default_file(),
        };
        trace!("loading config from {}", path.display());

        if !path.exists() {
            return Err(ConfigStatus::MissingConfig(path.to_string_lossy().to_string()).into());
        }

        let data = fs::read_to_string(&path)
            .map_err(|e| ConfigStatus::BadConfig(format!("{}: {e}", path.display())))?;
        let cfg: T = hcl::from_str(&data)
            .map_err(|e| ConfigStatus::BadConfig(format!("{}: {e}", path.display())))?;

        if cfg.version() != expected_version {
            return Err(ConfigStatus::BadVersion(cfg.version(), expected_version).into());
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Versioned for Foo {
        fn version(&self) -> usize {
            self.version
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        let r = ConfigEngine::<Foo>::load(Some("/no/such/file.hcl"), 1);
        assert!(r.is_err());
    }
}
