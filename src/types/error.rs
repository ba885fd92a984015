//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (RevuError) for the entire application
//! - Structured error variants with context for better debugging
//! - Load-time per-source failures degrade gracefully (warn and skip);
//!   only explicit mutations (`set`, `init`, `save`) surface hard errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevuError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown config key: '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    // -------------------------------------------------------------------------
    // Scanner Errors
    // -------------------------------------------------------------------------
    #[error("Invalid filter pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

impl RevuError {
    /// Create an invalid-value error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RevuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = RevuError::invalid_value("llm.temperature", "must be between 0.0 and 2.0");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'llm.temperature': must be between 0.0 and 2.0"
        );
    }

    #[test]
    fn test_unknown_key_display() {
        let err = RevuError::UnknownKey("llm.modle".to_string());
        assert_eq!(err.to_string(), "Unknown config key: 'llm.modle'");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RevuError = io.into();
        assert!(matches!(err, RevuError::Io(_)));
    }
}
