//! Parsing and validation of `hwsim.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`HwsimConfig`]. Every field has a default, so a missing
//! or empty file yields a usable configuration.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
