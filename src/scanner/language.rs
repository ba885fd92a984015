//! Language Detection
//!
//! Single source of truth for extension-based language detection across the
//! codebase. Detection never reads file content.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Python,
    TypeScript,
    JavaScript,
    Go,
    Java,
    Kotlin,
    Ruby,
    C,
    Cpp,
    CSharp,
    Swift,
    Php,
    Shell,
    Markdown,
    Toml,
    Yaml,
    Json,
}

impl Language {
    /// File extensions that map to this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["rs"],
            Language::Python => &["py", "pyi", "pyw"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::Go => &["go"],
            Language::Java => &["java"],
            Language::Kotlin => &["kt", "kts"],
            Language::Ruby => &["rb", "rake", "gemspec"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
            Language::CSharp => &["cs"],
            Language::Swift => &["swift"],
            Language::Php => &["php", "phtml"],
            Language::Shell => &["sh", "bash", "zsh"],
            Language::Markdown => &["md", "markdown"],
            Language::Toml => &["toml"],
            Language::Yaml => &["yaml", "yml"],
            Language::Json => &["json"],
        }
    }

    const ALL: &'static [Language] = &[
        Language::Rust,
        Language::Python,
        Language::TypeScript,
        Language::JavaScript,
        Language::Go,
        Language::Java,
        Language::Kotlin,
        Language::Ruby,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Swift,
        Language::Php,
        Language::Shell,
        Language::Markdown,
        Language::Toml,
        Language::Yaml,
        Language::Json,
    ];

    /// Detect a language from a file path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Go => "go",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Ruby => "ruby",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Swift => "swift",
            Language::Php => "php",
            Language::Shell => "shell",
            Language::Markdown => "markdown",
            Language::Toml => "toml",
            Language::Yaml => "yaml",
            Language::Json => "json",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str() == lower || lang.extensions().contains(&lower.as_str()))
            .ok_or_else(|| format!("Unknown language: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("src/main.rs"), Some(Language::Rust));
        assert_eq!(Language::from_path("app/views.PY"), Some(Language::Python));
        assert_eq!(Language::from_path("component.tsx"), Some(Language::TypeScript));
        assert_eq!(Language::from_path("README"), None);
        assert_eq!(Language::from_path("archive.tar.gz"), None);
    }

    #[test]
    fn test_from_str_accepts_names_and_extensions() {
        assert_eq!("rust".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!("rs".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!("Kotlin".parse::<Language>().unwrap(), Language::Kotlin);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::Cpp.to_string(), "cpp");
        assert_eq!(Language::CSharp.to_string(), "csharp");
    }
}
