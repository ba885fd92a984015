//! Scan Command
//!
//! Resolve configuration, build a [`FileScanner`] from the `[analyze]`
//! section, and list the files a review would consider.
//!
//! Flags that mirror `analyze.*` keys are fed to the config manager as the
//! CLI-args layer, so they participate in normal precedence; `--language`
//! and `--contains` become filters attached to the scanner.

use serde_json::json;

use crate::cli::output::Output;
use crate::config::ConfigManager;
use crate::scanner::{
    CompositeFilter, ContentFilter, FileInfo, FileScanner, Language, LanguageFilter,
};
use crate::types::{Result, RevuError};

pub struct ScanOptions {
    pub target: String,
    pub extensions: Vec<String>,
    pub patterns: Vec<String>,
    pub excludes: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub max_file_size: Option<u64>,
    pub languages: Vec<String>,
    pub contains: Option<String>,
    pub as_json: bool,
}

pub fn run(options: ScanOptions) -> Result<()> {
    let overrides = analyze_overrides(&options);
    let mut manager = ConfigManager::new();
    manager.load(Some(&overrides))?;
    let config = manager.config()?;

    let mut scanner = FileScanner::from_config(&config.analyze)?;

    if !options.languages.is_empty() {
        let mut languages = Vec::new();
        for name in &options.languages {
            let lang: Language = name
                .parse()
                .map_err(|e: String| RevuError::Config(e))?;
            languages.push(lang);
        }
        // One composite per flag group keeps each group's semantics explicit
        let group = CompositeFilter::any().with(Box::new(LanguageFilter::new(languages)));
        scanner.add_filter(Box::new(group));
    }

    if let Some(needle) = &options.contains {
        scanner.add_filter(Box::new(ContentFilter::new(needle.clone())));
    }

    let files = scanner.scan(&options.target);
    if options.as_json {
        print_json(&files)?;
    } else {
        print_table(&files);
    }
    Ok(())
}

/// Map scan flags onto their `analyze.*` keys.
fn analyze_overrides(options: &ScanOptions) -> toml::Table {
    let mut layer = toml::Table::new();
    let mut analyze = toml::Table::new();

    if !options.extensions.is_empty() {
        analyze.insert(
            "include_extensions".to_string(),
            string_array(&options.extensions),
        );
    }
    if !options.patterns.is_empty() {
        analyze.insert("include_patterns".to_string(), string_array(&options.patterns));
    }
    if !options.excludes.is_empty() {
        analyze.insert("exclude_patterns".to_string(), string_array(&options.excludes));
    }
    if !options.exclude_dirs.is_empty() {
        analyze.insert("exclude_dirs".to_string(), string_array(&options.exclude_dirs));
    }
    if let Some(size) = options.max_file_size {
        analyze.insert(
            "max_file_size".to_string(),
            toml::Value::Integer(size as i64),
        );
    }

    if !analyze.is_empty() {
        layer.insert("analyze".to_string(), toml::Value::Table(analyze));
    }
    layer
}

fn string_array(items: &[String]) -> toml::Value {
    toml::Value::Array(
        items
            .iter()
            .map(|s| toml::Value::String(s.clone()))
            .collect(),
    )
}

fn print_table(files: &[FileInfo]) {
    let out = Output::new();
    if files.is_empty() {
        out.warning("No files matched");
        return;
    }
    for file in files {
        let language = file
            .language()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>9}  {:<12} {}",
            file.size(),
            language,
            file.relative_path().display()
        );
    }
    out.success(&format!("{} file(s)", files.len()));
}

fn print_json(files: &[FileInfo]) -> Result<()> {
    let entries: Vec<_> = files
        .iter()
        .map(|file| {
            json!({
                "path": file.path().to_string_lossy(),
                "relative_path": file.relative_path().to_string_lossy(),
                "size": file.size(),
                "language": file.language().map(|l| l.to_string()),
                "encoding": file.encoding(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
