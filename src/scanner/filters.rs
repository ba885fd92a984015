//! File Filters
//!
//! Stateless predicates over a [`FileInfo`], combinable through
//! [`CompositeFilter`]. The scanner applies every configured filter with AND
//! semantics; a composite node provides AND/OR grouping below that.

use glob::Pattern;
use regex::Regex;

use super::file_info::FileInfo;
use super::language::Language;
use crate::types::{Result, RevuError};

/// A pure predicate over a file descriptor.
pub trait FileFilter {
    fn matches(&self, file: &FileInfo) -> bool;

    /// Short name for debug logging
    fn name(&self) -> &str;
}

// =============================================================================
// Path-Based Filters
// =============================================================================

/// Accepts files whose detected language is one of the given set.
pub struct LanguageFilter {
    languages: Vec<Language>,
}

impl LanguageFilter {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }
}

impl FileFilter for LanguageFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        file.language()
            .is_some_and(|lang| self.languages.contains(&lang))
    }

    fn name(&self) -> &str {
        "language"
    }
}

/// Accepts files whose extension is one of the given set.
/// Extensions are normalized: leading dots stripped, lowercased.
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }
}

impl FileFilter for ExtensionFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        file.extension()
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    fn name(&self) -> &str {
        "extension"
    }
}

/// Accepts files whose relative path matches a glob pattern.
#[derive(Debug)]
pub struct GlobFilter {
    pattern: Pattern,
}

impl GlobFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| RevuError::pattern(pattern, e.to_string()))?;
        Ok(Self { pattern })
    }
}

impl FileFilter for GlobFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        self.pattern
            .matches(&file.relative_path().to_string_lossy())
    }

    fn name(&self) -> &str {
        "glob"
    }
}

/// Accepts files whose relative path matches a regular expression.
pub struct RegexFilter {
    regex: Regex,
}

impl RegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RevuError::pattern(pattern, e.to_string()))?;
        Ok(Self { regex })
    }
}

impl FileFilter for RegexFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        self.regex.is_match(&file.relative_path().to_string_lossy())
    }

    fn name(&self) -> &str {
        "regex"
    }
}

// =============================================================================
// Content-Based Filters
// =============================================================================

/// Accepts files whose content contains a substring. Forces a lazy content
/// load on first evaluation.
pub struct ContentFilter {
    needle: String,
}

impl ContentFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl FileFilter for ContentFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        file.content().contains(&self.needle)
    }

    fn name(&self) -> &str {
        "content"
    }
}

/// Accepts files whose content matches a regular expression.
pub struct ContentRegexFilter {
    regex: Regex,
}

impl ContentRegexFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RevuError::pattern(pattern, e.to_string()))?;
        Ok(Self { regex })
    }
}

impl FileFilter for ContentRegexFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        self.regex.is_match(file.content())
    }

    fn name(&self) -> &str {
        "content-regex"
    }
}

// =============================================================================
// Composite
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Every child must match
    All,
    /// At least one child must match
    Any,
}

/// AND/OR combinator over child filters. An empty composite matches
/// everything in `All` mode and nothing in `Any` mode.
pub struct CompositeFilter {
    filters: Vec<Box<dyn FileFilter>>,
    mode: CombineMode,
}

impl CompositeFilter {
    pub fn new(mode: CombineMode) -> Self {
        Self {
            filters: Vec::new(),
            mode,
        }
    }

    pub fn all() -> Self {
        Self::new(CombineMode::All)
    }

    pub fn any() -> Self {
        Self::new(CombineMode::Any)
    }

    pub fn with(mut self, filter: Box<dyn FileFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: Box<dyn FileFilter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FileFilter for CompositeFilter {
    fn matches(&self, file: &FileInfo) -> bool {
        match self.mode {
            CombineMode::All => self.filters.iter().all(|f| f.matches(file)),
            CombineMode::Any => self.filters.iter().any(|f| f.matches(file)),
        }
    }

    fn name(&self) -> &str {
        match self.mode {
            CombineMode::All => "composite-all",
            CombineMode::Any => "composite-any",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
