//! # Runtime Configuration
//!
//! Environment-provided defaults, read once at startup. Command-line flags
//! override them; the library itself never reads the environment after this
//! point, everything flows through [`crate::generator::MaterializeConfig`].
//!
//! ## Environment Variables
//!
//! ### `SEED_LOG_FORMAT`
//!
//! `pretty` (default) or `json`. See [`crate::logging`].
//!
//! ### `SEED_CARGO_BIN`
//!
//! Cargo binary used to run `cargo fmt` on the generated project. Useful when
//! several toolchains are installed, and in tests, which point it at a stub.
//!
//! Default: `cargo` from `PATH`.
//!
//! ## Usage
//!
//! ```rust
//! use seed::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("log format: {:?}", config.log_format);
//! ```

use crate::logging::{LogFormat, LOG_FORMAT_ENV};
use std::env;

pub const CARGO_BIN_ENV: &str = "SEED_CARGO_BIN";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    pub log_format: LogFormat,
    /// Overrides the cargo binary used for formatting when set.
    pub cargo_bin: Option<String>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_format = lookup(LOG_FORMAT_ENV)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let cargo_bin = lookup(CARGO_BIN_ENV).filter(|v| !v.trim().is_empty());
        RuntimeConfig {
            log_format,
            cargo_bin,
        }
    }
}
