//! File Scanner
//!
//! Walks a target (single file, directory tree, or glob expression), applies
//! the configured inclusion/exclusion rules plus any attached filters, and
//! produces [`FileInfo`] descriptors in traversal order.
//!
//! Directory trees are traversed depth-first with children visited in file
//! name order; excluded directories are pruned before descent, so nothing
//! inside them is ever visited. Per-file I/O errors are logged and skipped,
//! never fatal: `scan` cannot fail.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use super::file_info::FileInfo;
use super::filters::FileFilter;
use crate::config::AnalyzeConfig;
use crate::constants::scan::{DEFAULT_EXCLUDE_DIRS, DEFAULT_MAX_FILE_SIZE};
use crate::types::{Result, RevuError};

pub struct FileScanner {
    include_extensions: Vec<String>,
    include_patterns: Vec<Pattern>,
    exclude_patterns: Vec<Pattern>,
    exclude_dirs: HashSet<String>,
    max_file_size: u64,
    filters: Vec<Box<dyn FileFilter>>,
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            include_extensions: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            filters: Vec::new(),
        }
    }

    /// Build a scanner from the resolved `[analyze]` section.
    pub fn from_config(config: &AnalyzeConfig) -> Result<Self> {
        Ok(Self::new()
            .with_include_extensions(config.include_extensions.clone())
            .with_include_patterns(&config.include_patterns)?
            .with_exclude_patterns(&config.exclude_patterns)?
            .with_exclude_dirs(config.exclude_dirs.clone())
            .with_max_file_size(config.max_file_size))
    }

    /// Extensions admitted when no include patterns are set.
    /// Normalized: leading dots stripped, lowercased.
    pub fn with_include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Glob patterns a file must match to be admitted; when set they take
    /// precedence over the extension list.
    pub fn with_include_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.include_patterns = compile_patterns(patterns)?;
        Ok(self)
    }

    /// Glob patterns that reject a file.
    pub fn with_exclude_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        self.exclude_patterns = compile_patterns(patterns)?;
        Ok(self)
    }

    /// Directory names pruned in addition to the built-in set.
    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_dirs
            .extend(dirs.into_iter().map(|d| d.as_ref().to_string()));
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Attach a filter; every attached filter must accept a file (AND).
    pub fn with_filter(mut self, filter: Box<dyn FileFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
        self.filters.push(filter);
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan a target: an existing file, an existing directory, or a glob
    /// expression. A nonexistent, non-glob target yields an empty result
    /// with a warning.
    pub fn scan(&self, target: &str) -> Vec<FileInfo> {
        let path = Path::new(target);
        if path.is_file() {
            let root = path.parent().unwrap_or_else(|| Path::new(""));
            return self.process(path.to_path_buf(), root).into_iter().collect();
        }
        if path.is_dir() {
            return self.scan_dir(path);
        }
        if target.contains(['*', '?', '[']) {
            return self.scan_glob(target);
        }
        warn!("Scan target does not exist: {}", target);
        Vec::new()
    }

    fn scan_dir(&self, root: &Path) -> Vec<FileInfo> {
        let mut walker = WalkBuilder::new(root);
        walker
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let excluded = self.exclude_dirs.clone();
        walker.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                !excluded.contains(name.as_ref())
            } else {
                true
            }
        });

        let mut files = Vec::new();
        for entry in walker.build() {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                    if let Some(info) = self.process(entry.into_path(), root) {
                        files.push(info);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }
        files
    }

    fn scan_glob(&self, pattern: &str) -> Vec<FileInfo> {
        let paths = match glob::glob(pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid glob target '{}': {}", pattern, e);
                return Vec::new();
            }
        };

        let root = PathBuf::new();
        let mut files = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if let Some(info) = self.process(path, &root) {
                        files.push(info);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping glob match: {}", e),
            }
        }
        files
    }

    /// Apply the rule chain to one file: size ceiling, excluded directory,
    /// exclude patterns, include patterns / extensions, attached filters.
    fn process(&self, path: PathBuf, root: &Path) -> Option<FileInfo> {
        let info = match FileInfo::new(path, root) {
            Ok(info) => info,
            Err(e) => {
                warn!("Skipping unreadable file: {}", e);
                return None;
            }
        };
        let relative = info.relative_path().to_string_lossy().into_owned();

        if info.size() > self.max_file_size {
            debug!("Excluding {} (size {} over ceiling)", relative, info.size());
            return None;
        }

        if self.in_excluded_dir(info.relative_path()) {
            return None;
        }

        let file_name = info
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self
            .exclude_patterns
            .iter()
            .any(|p| p.matches(&relative) || p.matches(&file_name))
        {
            return None;
        }

        if !self.include_patterns.is_empty() {
            if !self
                .include_patterns
                .iter()
                .any(|p| p.matches(&relative) || p.matches(&file_name))
            {
                return None;
            }
        } else if !self.include_extensions.is_empty() {
            let ext = info.extension()?;
            if !self.include_extensions.contains(&ext) {
                return None;
            }
        }

        for filter in &self.filters {
            if !filter.matches(&info) {
                debug!("Filter '{}' rejected {}", filter.name(), relative);
                return None;
            }
        }

        Some(info)
    }

    /// Whether any directory component of a relative path names an
    /// excluded directory. Catches glob matches; tree walks already prune.
    fn in_excluded_dir(&self, relative: &Path) -> bool {
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent.components().any(|c| {
            self.exclude_dirs
                .contains(c.as_os_str().to_string_lossy().as_ref())
        })
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref()).map_err(|e| RevuError::pattern(p.as_ref(), e.to_string()))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
