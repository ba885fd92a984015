//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! The TOML surface has the top-level keys `schema_version`, `llm`, `autogen`,
//! `review`, `analyze`, `document`, `explain` and the free-form `custom` table.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::migration::SCHEMA_VERSION;
use crate::constants::scan::DEFAULT_MAX_FILE_SIZE;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevuConfig {
    /// Configuration schema version (see `config::migration`)
    pub schema_version: i64,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Agent framework settings
    pub autogen: AutogenConfig,

    /// Code review settings
    pub review: ReviewConfig,

    /// File analysis / scanning settings
    pub analyze: AnalyzeConfig,

    /// Documentation generation settings
    pub document: DocumentConfig,

    /// Code explanation settings
    pub explain: ExplainConfig,

    /// Free-form user extensions, never interpreted by revu itself
    pub custom: toml::Table,
}

impl Default for RevuConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            llm: LlmConfig::default(),
            autogen: AutogenConfig::default(),
            review: ReviewConfig::default(),
            analyze: AnalyzeConfig::default(),
            document: DocumentConfig::default(),
            explain: ExplainConfig::default(),
            custom: toml::Table::new(),
        }
    }
}

impl RevuConfig {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `RevuError::InvalidValue` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::RevuError::invalid_value(
                "llm.temperature",
                format!("must be between 0.0 and 2.0, got {}", self.llm.temperature),
            ));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::RevuError::invalid_value(
                "llm.timeout_secs",
                "must be greater than 0",
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(crate::types::RevuError::invalid_value(
                "llm.max_tokens",
                "must be greater than 0",
            ));
        }

        if self.autogen.max_rounds == 0 {
            return Err(crate::types::RevuError::invalid_value(
                "autogen.max_rounds",
                "must be greater than 0",
            ));
        }

        if self.analyze.max_file_size == 0 {
            return Err(crate::types::RevuError::invalid_value(
                "analyze.max_file_size",
                "must be greater than 0",
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider backing all agents
    pub provider: LlmProvider,

    /// Model name
    pub model: String,

    /// API key; usually supplied via REVU_LLM_API_KEY rather than a file
    pub api_key: Option<String>,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Response token cap per request
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Openai,
            model: "gpt-4o".to_string(),
            api_key: None,
            temperature: 0.2,
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Openai,
    Anthropic,
    Ollama,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Openai => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::Openai),
            "anthropic" => Ok(LlmProvider::Anthropic),
            "ollama" => Ok(LlmProvider::Ollama),
            _ => Err(format!(
                "Unknown provider: {}. Valid values: openai, anthropic, ollama",
                s
            )),
        }
    }
}

// =============================================================================
// Agent Framework Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutogenConfig {
    /// Run agent tool calls inside docker
    pub use_docker: bool,

    /// Seed for the framework's completion cache; None disables caching
    pub cache_seed: Option<i64>,

    /// Maximum conversation rounds per review
    pub max_rounds: u32,

    /// Scratch directory for agent artifacts
    pub work_dir: PathBuf,
}

impl Default for AutogenConfig {
    fn default() -> Self {
        Self {
            use_docker: false,
            cache_seed: Some(42),
            max_rounds: 10,
            work_dir: PathBuf::from(".revu/work"),
        }
    }
}

// =============================================================================
// Review Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// How deep the review agents dig
    pub depth: ReviewDepth,

    /// Aspect the review concentrates on
    pub focus: ReviewFocus,

    /// Where review findings are rendered
    pub output_format: OutputFormat,

    /// Ask before applying suggested changes
    pub interactive: bool,

    /// Include test files in the review set
    pub include_tests: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            depth: ReviewDepth::Standard,
            focus: ReviewFocus::All,
            output_format: OutputFormat::Terminal,
            interactive: true,
            include_tests: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDepth {
    /// Surface pass for CI gates
    Quick,
    #[default]
    Standard,
    /// Exhaustive pass for release branches
    Thorough,
}

impl std::fmt::Display for ReviewDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewDepth::Quick => write!(f, "quick"),
            ReviewDepth::Standard => write!(f, "standard"),
            ReviewDepth::Thorough => write!(f, "thorough"),
        }
    }
}

impl std::str::FromStr for ReviewDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick" => Ok(ReviewDepth::Quick),
            "standard" => Ok(ReviewDepth::Standard),
            "thorough" => Ok(ReviewDepth::Thorough),
            _ => Err(format!(
                "Unknown review depth: {}. Valid values: quick, standard, thorough",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFocus {
    #[default]
    All,
    Security,
    Performance,
    Style,
    Maintainability,
}

impl std::fmt::Display for ReviewFocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewFocus::All => write!(f, "all"),
            ReviewFocus::Security => write!(f, "security"),
            ReviewFocus::Performance => write!(f, "performance"),
            ReviewFocus::Style => write!(f, "style"),
            ReviewFocus::Maintainability => write!(f, "maintainability"),
        }
    }
}

impl std::str::FromStr for ReviewFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ReviewFocus::All),
            "security" => Ok(ReviewFocus::Security),
            "performance" => Ok(ReviewFocus::Performance),
            "style" => Ok(ReviewFocus::Style),
            "maintainability" => Ok(ReviewFocus::Maintainability),
            _ => Err(format!(
                "Unknown review focus: {}. Valid values: all, security, performance, style, maintainability",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Terminal => write!(f, "terminal"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "markdown" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: terminal, markdown, html",
                s
            )),
        }
    }
}

// =============================================================================
// Analyze Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Extensions admitted when no include patterns are configured
    pub include_extensions: Vec<String>,

    /// Glob patterns a file must match to be admitted (overrides extensions)
    pub include_patterns: Vec<String>,

    /// Glob patterns that reject a file
    pub exclude_patterns: Vec<String>,

    /// Directory names pruned in addition to the built-in set
    pub exclude_dirs: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            include_extensions: vec![],
            include_patterns: vec![],
            exclude_patterns: vec![],
            exclude_dirs: vec![],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

// =============================================================================
// Document Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Verbosity of generated documentation
    pub style: DocStyle,

    /// Output directory for generated docs
    pub output_dir: PathBuf,

    /// Document private items as well
    pub include_private: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            style: DocStyle::Standard,
            output_dir: PathBuf::from("docs"),
            include_private: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    Minimal,
    #[default]
    Standard,
    Detailed,
}

impl std::fmt::Display for DocStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocStyle::Minimal => write!(f, "minimal"),
            DocStyle::Standard => write!(f, "standard"),
            DocStyle::Detailed => write!(f, "detailed"),
        }
    }
}

impl std::str::FromStr for DocStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(DocStyle::Minimal),
            "standard" => Ok(DocStyle::Standard),
            "detailed" => Ok(DocStyle::Detailed),
            _ => Err(format!(
                "Unknown doc style: {}. Valid values: minimal, standard, detailed",
                s
            )),
        }
    }
}

// =============================================================================
// Explain Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// How much detail an explanation carries
    pub detail: DetailLevel,

    /// Who the explanation is written for
    pub audience: Audience,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            detail: DetailLevel::Standard,
            audience: Audience::Developer,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Deep,
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailLevel::Brief => write!(f, "brief"),
            DetailLevel::Standard => write!(f, "standard"),
            DetailLevel::Deep => write!(f, "deep"),
        }
    }
}

impl std::str::FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brief" => Ok(DetailLevel::Brief),
            "standard" => Ok(DetailLevel::Standard),
            "deep" => Ok(DetailLevel::Deep),
            _ => Err(format!(
                "Unknown detail level: {}. Valid values: brief, standard, deep",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Beginner,
    #[default]
    Developer,
    Expert,
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Audience::Beginner => write!(f, "beginner"),
            Audience::Developer => write!(f, "developer"),
            Audience::Expert => write!(f, "expert"),
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Audience::Beginner),
            "developer" => Ok(Audience::Developer),
            "expert" => Ok(Audience::Expert),
            _ => Err(format!(
                "Unknown audience: {}. Valid values: beginner, developer, expert",
                s
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
