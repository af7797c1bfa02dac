//! Configuration loading from files and the environment

pub mod env;
pub mod file;

use crate::{Config, Result, Validate};
use std::path::Path;

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Default config file names probed in the working directory, in order.
const DEFAULT_CANDIDATES: &[&str] = &[".logret.yml", ".logret.yaml", ".logret.toml", ".logret.json"];

impl Config {
    /// Load configuration with standard precedence:
    /// defaults < config file < `LOGRET_*` environment overlay.
    ///
    /// With `path = None` the default candidates (`.logret.{yml,yaml,toml,json}`)
    /// are probed; a missing file is not an error. An explicit path that does
    /// not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(p) => file::load_from_file(p)?,
            None => {
                let found = DEFAULT_CANDIDATES
                    .iter()
                    .map(|c| Path::new(*c))
                    .find(|p| p.exists());
                match found {
                    Some(p) => file::load_from_file(p)?,
                    None => Config::default(),
                }
            }
        };

        env::apply_env(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file, without the environment overlay.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        file::load_from_file(path.as_ref())
    }
}
