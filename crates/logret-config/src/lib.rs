//! Configuration management for logret
//!
//! Layered, validated configuration:
//! - Typed defaults (work with no config file at all)
//! - Optional config file (`.logret.{yml,yaml,toml,json}`)
//! - `LOGRET_*` environment variable overlay
//!
//! # Example
//!
//! ```no_run
//! use logret_config::Config;
//!
//! // Defaults + file (if present) + env overlay
//! let config = Config::load(None)?;
//!
//! let db_path = &config.store.db_path;
//! let dim = config.embedding.dim;
//! # Ok::<(), logret_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, Result};
pub use types::*;
pub use validation::Validate;
