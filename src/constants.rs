//! Global Constants
//!
//! Centralized constants for configuration resolution and file scanning.
//! All magic numbers should be defined here with documentation.

/// Configuration resolution constants
pub mod config {
    /// Environment variable prefix (`REVU_LLM_MODEL` -> `llm.model`)
    pub const ENV_PREFIX: &str = "REVU_";

    /// Project-level config file, looked up in the current directory
    pub const PROJECT_CONFIG_FILE: &str = ".revu.toml";

    /// Application name used to resolve the user config directory
    pub const USER_CONFIG_DIR: &str = "revu";

    /// File name inside the user config directory
    pub const USER_CONFIG_FILE: &str = "config.toml";
}

/// File scanning constants
pub mod scan {
    /// Default maximum file size considered for review (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// Directories pruned before descent: version control, build outputs,
    /// dependency caches, editor state
    pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
        ".git",
        ".hg",
        ".svn",
        "node_modules",
        "target",
        "build",
        "dist",
        "__pycache__",
        ".venv",
        "venv",
        "vendor",
        ".idea",
        ".vscode",
    ];
}
