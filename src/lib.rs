//! revu - AI-Assisted Code Review CLI
//!
//! Core library behind the `revu` command: layered configuration resolution
//! with per-key provenance, and a rule-driven file scanner that selects the
//! files a review considers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use revu::{ConfigManager, FileScanner};
//!
//! let mut manager = ConfigManager::new();
//! manager.load(None)?;
//! let config = manager.config()?;
//!
//! let files = FileScanner::from_config(&config.analyze)?.scan("src");
//! ```
//!
//! ## Modules
//!
//! - [`config`]: typed config sections, precedence merging, schema migration
//! - [`scanner`]: file descriptors, composable filters, the scan engine
//! - [`cli`]: thin command layer over the two subsystems

pub mod cli;
pub mod config;
pub mod constants;
pub mod scanner;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{ConfigManager, ConfigSource, RevuConfig, SCHEMA_VERSION};

// Error Types
pub use types::error::{Result, RevuError};

// Scanner
pub use scanner::{CompositeFilter, FileFilter, FileInfo, FileScanner, Language};
