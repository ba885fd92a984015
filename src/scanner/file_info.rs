//! File Descriptor
//!
//! One [`FileInfo`] is built per matched file during a scan. Content is read
//! lazily on first access and cached for the descriptor's lifetime; per-file
//! read errors are logged and never propagate.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::language::Language;

#[derive(Debug, Clone)]
pub struct FileInfo {
    path: PathBuf,
    relative_path: PathBuf,
    size: u64,
    language: Option<Language>,
    encoding: String,
    content: OnceCell<String>,
}

impl FileInfo {
    /// Build a descriptor for `path`, with `relative_path` computed against
    /// the scan root. Reads file metadata; does not read content.
    pub fn new(path: PathBuf, root: &Path) -> std::io::Result<Self> {
        let metadata = fs::metadata(&path)?;
        let relative_path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let language = Language::from_path(&path);
        Ok(Self {
            path,
            relative_path,
            size: metadata.len(),
            language,
            encoding: "utf-8".to_string(),
            content: OnceCell::new(),
        })
    }

    /// Absolute (or scan-target-relative) path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the scan root
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Language detected from the file extension
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Decoded file content, read lazily and cached. An unreadable file
    /// logs a warning and yields the empty string; invalid UTF-8 is decoded
    /// lossily.
    pub fn content(&self) -> &str {
        self.content.get_or_init(|| match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                String::new()
            }
        })
    }

    /// Whether content has already been loaded
    pub fn content_loaded(&self) -> bool {
        self.content.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_metadata_fields() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "lib.rs", "pub fn answer() -> u32 { 42 }\n");

        let info = FileInfo::new(path, dir.path()).unwrap();
        assert_eq!(info.relative_path(), Path::new("lib.rs"));
        assert_eq!(info.size(), 30);
        assert_eq!(info.language(), Some(Language::Rust));
        assert_eq!(info.encoding(), "utf-8");
        assert_eq!(info.extension().as_deref(), Some("rs"));
    }

    #[test]
    fn test_content_is_lazy_and_cached() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "notes.md", "hello");

        let info = FileInfo::new(path.clone(), dir.path()).unwrap();
        assert!(!info.content_loaded());
        assert_eq!(info.content(), "hello");
        assert!(info.content_loaded());

        // Cache survives the file changing underneath
        fs::write(&path, "changed").unwrap();
        assert_eq!(info.content(), "hello");
    }

    #[test]
    fn test_unreadable_content_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "gone.rs", "x");
        let info = FileInfo::new(path.clone(), dir.path()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(info.content(), "");
    }

    #[test]
    fn test_missing_file_errors_at_construction() {
        let dir = TempDir::new().unwrap();
        assert!(FileInfo::new(dir.path().join("absent.rs"), dir.path()).is_err());
    }
}
