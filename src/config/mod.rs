//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Project config (`.revu.toml`)
//! 3. User config (`<config_home>/revu/config.toml`)
//! 4. Environment variables (`REVU_*`)
//! 5. CLI arguments (highest priority)
//!
//! Each resolved key records its provenance; see [`manager::ConfigSource`].

pub mod manager;
pub mod migration;
mod types;

pub use manager::{ConfigManager, ConfigSource, env_layer, overrides_from_pairs, parse_scalar};
pub use migration::SCHEMA_VERSION;
pub use types::*;
