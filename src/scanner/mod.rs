//! File Scanning
//!
//! Walks scan targets, builds lazily-loading [`FileInfo`] descriptors and
//! applies composable [`FileFilter`] predicates.

pub mod file_info;
pub mod file_scanner;
pub mod filters;
pub mod language;

pub use file_info::FileInfo;
pub use file_scanner::FileScanner;
pub use filters::{
    CombineMode, CompositeFilter, ContentFilter, ContentRegexFilter, ExtensionFilter, FileFilter,
    GlobFilter, LanguageFilter, RegexFilter,
};
pub use language::Language;
