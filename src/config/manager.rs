//! Configuration Manager
//!
//! Hierarchical configuration resolution with per-key provenance:
//! 1. Built-in defaults
//! 2. Project config (`.revu.toml` in the current directory)
//! 3. User config (`<config_home>/revu/config.toml`)
//! 4. Environment variables (`REVU_*`)
//! 5. CLI argument overrides (highest priority)
//!
//! Every resolved leaf key records which source supplied its value; a
//! lower-precedence source never overwrites one already set by a higher
//! source. `load` rebuilds the whole tree from scratch on each call, so the
//! recorded provenance is always consistent with the precedence order.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::config::migration;
use crate::config::types::RevuConfig;
use crate::constants::config::{
    ENV_PREFIX, PROJECT_CONFIG_FILE, USER_CONFIG_DIR, USER_CONFIG_FILE,
};
use crate::types::{Result, RevuError};

/// Section names admitted from environment variables
const SECTIONS: &[&str] = &[
    "llm", "autogen", "review", "analyze", "document", "explain", "custom",
];

// =============================================================================
// Provenance
// =============================================================================

/// Where a resolved config value came from. Variant order is precedence
/// order, lowest first, so `Ord` compares by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    Default,
    ProjectFile,
    UserFile,
    Environment,
    CliArgs,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::ProjectFile => write!(f, "project config"),
            ConfigSource::UserFile => write!(f, "user config"),
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::CliArgs => write!(f, "cli args"),
        }
    }
}

// =============================================================================
// Manager
// =============================================================================

pub struct ConfigManager {
    project_path: PathBuf,
    user_path: Option<PathBuf>,
    defaults: Table,
    tree: Table,
    sources: BTreeMap<String, ConfigSource>,
    /// Contents destined for the user config file; `set` mutations land here
    user_overlay: Table,
}

impl ConfigManager {
    /// Manager over the conventional paths: `.revu.toml` in the current
    /// directory and the user's config home.
    pub fn new() -> Self {
        let user_path = BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(USER_CONFIG_DIR).join(USER_CONFIG_FILE));
        Self::from_paths(PathBuf::from(PROJECT_CONFIG_FILE), user_path)
    }

    /// Manager over explicit paths, for tests and embedding.
    pub fn with_paths(project_path: PathBuf, user_path: PathBuf) -> Self {
        Self::from_paths(project_path, Some(user_path))
    }

    fn from_paths(project_path: PathBuf, user_path: Option<PathBuf>) -> Self {
        let defaults = default_tree();
        let mut sources = BTreeMap::new();
        record_leaves(&defaults, "", ConfigSource::Default, &mut sources);
        Self {
            project_path,
            user_path,
            tree: defaults.clone(),
            defaults,
            sources,
            user_overlay: Table::new(),
        }
    }

    /// Path of the project config file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Path of the user config file, when a config home could be determined
    pub fn user_path(&self) -> Option<&Path> {
        self.user_path.as_deref()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Re-resolve the whole configuration tree from scratch, in precedence
    /// order: defaults, project file, user file, environment, CLI args.
    ///
    /// Per-source failures (missing file, malformed TOML) degrade to a
    /// warning; the source is simply not merged.
    pub fn load(&mut self, cli_args: Option<&Table>) -> Result<()> {
        self.tree = self.defaults.clone();
        self.sources.clear();
        record_leaves(&self.defaults, "", ConfigSource::Default, &mut self.sources);
        self.user_overlay = Table::new();

        if let Some(layer) = self.read_file_layer(&self.project_path) {
            self.merge_layer(&layer, ConfigSource::ProjectFile);
        }

        if let Some(user_path) = self.user_path.clone()
            && let Some(layer) = self.read_file_layer(&user_path)
        {
            self.user_overlay = layer.clone();
            self.merge_layer(&layer, ConfigSource::UserFile);
        }

        let env = env_layer(env::vars());
        if !env.is_empty() {
            self.merge_layer(&env, ConfigSource::Environment);
        }

        if let Some(cli) = cli_args
            && !cli.is_empty()
        {
            self.merge_layer(cli, ConfigSource::CliArgs);
        }

        Ok(())
    }

    /// Read, parse and migrate one config file; `None` when the file is
    /// absent or unusable.
    fn read_file_layer(&self, path: &Path) -> Option<Table> {
        if !path.exists() {
            return None;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping unreadable config {}: {}", path.display(), e);
                return None;
            }
        };
        let mut table: Table = match toml::from_str(&text) {
            Ok(table) => table,
            Err(e) => {
                warn!("Skipping malformed config {}: {}", path.display(), e);
                return None;
            }
        };
        if migration::migrate(&mut table) {
            debug!("Migrated config {} to current schema", path.display());
        }
        Some(table)
    }

    fn merge_layer(&mut self, layer: &Table, source: ConfigSource) {
        merge_into(&mut self.tree, layer, "", source, &mut self.sources);
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Look up a dot-path key in the resolved tree.
    pub fn get(&self, key: &str) -> Option<&Value> {
        get_path(&self.tree, key)
    }

    /// Which source supplied the value at `key`. Only leaf keys carry
    /// provenance.
    pub fn get_source(&self, key: &str) -> Option<ConfigSource> {
        self.sources.get(key).copied()
    }

    /// Iterate leaf keys and their recorded sources.
    pub fn sources(&self) -> impl Iterator<Item = (&str, ConfigSource)> {
        self.sources.iter().map(|(k, s)| (k.as_str(), *s))
    }

    /// Typed view of the resolved tree.
    pub fn config(&self) -> Result<RevuConfig> {
        Value::Table(self.tree.clone())
            .try_into()
            .map_err(|e| RevuError::Config(format!("configuration is invalid: {}", e)))
    }

    /// The raw resolved tree, for rendering.
    pub fn tree(&self) -> &Table {
        &self.tree
    }

    /// Typed extraction plus range validation.
    pub fn validate(&self) -> Result<()> {
        self.config()?.validate()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Set a key to a new value.
    ///
    /// The key must exist in the default schema (or live under `custom.`);
    /// the mutated tree must still deserialize into a valid [`RevuConfig`].
    /// On success the key's source becomes `user config`, the mutation is
    /// mirrored into the user-file overlay, and the overlay is persisted
    /// when `save` is true.
    pub fn set(&mut self, key: &str, value: Value, save: bool) -> Result<()> {
        if get_path(&self.defaults, key).is_none() && !is_custom_key(key) {
            return Err(RevuError::UnknownKey(key.to_string()));
        }

        let mut candidate = self.tree.clone();
        set_path(&mut candidate, key, value.clone());
        let config: RevuConfig = Value::Table(candidate)
            .try_into()
            .map_err(|e: toml::de::Error| RevuError::invalid_value(key, e.to_string()))?;
        config.validate()?;

        set_path(&mut self.tree, key, value.clone());
        self.sources.insert(key.to_string(), ConfigSource::UserFile);
        set_path(&mut self.user_overlay, key, value);

        if save {
            self.save_user()?;
        }
        Ok(())
    }

    /// Write the user-file overlay to the user config path.
    pub fn save_user(&self) -> Result<()> {
        let path = self.user_path.as_ref().ok_or_else(|| {
            RevuError::Config("cannot determine user config directory".to_string())
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut overlay = self.user_overlay.clone();
        overlay.insert(
            "schema_version".to_string(),
            Value::Integer(migration::SCHEMA_VERSION),
        );
        fs::write(path, toml::to_string_pretty(&overlay)?)?;
        debug!("Wrote user config {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default configuration to the project config path.
    pub fn init_project(&self, force: bool) -> Result<PathBuf> {
        init_config_file(&self.project_path, force)?;
        Ok(self.project_path.clone())
    }

    /// Write the default configuration to the user config path.
    pub fn init_user(&self, force: bool) -> Result<PathBuf> {
        let path = self.user_path.as_ref().ok_or_else(|| {
            RevuError::Config("cannot determine user config directory".to_string())
        })?;
        init_config_file(path, force)?;
        Ok(path.clone())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn init_config_file(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(RevuError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let body = toml::to_string_pretty(&RevuConfig::default())?;
    let content = format!(
        "# revu configuration\n# Precedence: cli args > environment > user config > this file > defaults\n\n{}",
        body
    );
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tree Helpers
// =============================================================================

fn default_tree() -> Table {
    match Value::try_from(RevuConfig::default()) {
        Ok(Value::Table(table)) => table,
        _ => Table::new(),
    }
}

fn is_custom_key(key: &str) -> bool {
    key.strip_prefix("custom.")
        .is_some_and(|rest| !rest.is_empty())
}

/// Look up a dot-path key in a TOML table.
pub fn get_path<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = table.get(parts.next()?)?;
    for part in parts {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Insert a value at a dot-path key, creating intermediate tables. An
/// intermediate non-table value is replaced by a table.
pub fn set_path(table: &mut Table, key: &str, value: Value) {
    let mut parts = key.split('.').peekable();
    let mut current = table;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            current.insert(part.to_string(), value);
            return;
        }
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        current = entry.as_table_mut().expect("just ensured table");
    }
}

/// Record every leaf under `table` with the given source, keeping an
/// already-recorded higher-precedence source.
fn record_leaves(
    table: &Table,
    prefix: &str,
    source: ConfigSource,
    sources: &mut BTreeMap<String, ConfigSource>,
) {
    for (key, value) in table {
        let path = join_path(prefix, key);
        match value {
            Value::Table(inner) => record_leaves(inner, &path, source, sources),
            _ => {
                let current = sources.get(&path).copied();
                if current.is_none_or(|c| source >= c) {
                    sources.insert(path, source);
                }
            }
        }
    }
}

/// Deep-merge `src` into `dst`. Tables recurse; any other value is a leaf
/// (arrays included). A leaf is only written when the incoming source
/// outranks (or equals) the recorded one.
fn merge_into(
    dst: &mut Table,
    src: &Table,
    prefix: &str,
    source: ConfigSource,
    sources: &mut BTreeMap<String, ConfigSource>,
) {
    for (key, value) in src {
        let path = join_path(prefix, key);
        match value {
            Value::Table(src_inner) => {
                let entry = dst
                    .entry(key.clone())
                    .or_insert_with(|| Value::Table(Table::new()));
                if !entry.is_table() {
                    *entry = Value::Table(Table::new());
                }
                let dst_inner = entry.as_table_mut().expect("just ensured table");
                merge_into(dst_inner, src_inner, &path, source, sources);
            }
            _ => {
                let current = sources.get(&path).copied();
                if current.is_none_or(|c| source >= c) {
                    dst.insert(key.clone(), value.clone());
                    sources.insert(path, source);
                } else {
                    debug!(
                        "Keeping {} from {} over lower-precedence {}",
                        path,
                        current.map(|c| c.to_string()).unwrap_or_default(),
                        source
                    );
                }
            }
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

// =============================================================================
// Environment & CLI Layers
// =============================================================================

/// Build the environment layer from an iterator of variables.
/// `REVU_ANALYZE_MAX_FILE_SIZE` maps to `analyze.max_file_size`: the first
/// `_`-delimited token after the prefix is the section, the remainder
/// (lowercased) is the field.
pub fn env_layer<I>(vars: I) -> Table
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut layer = Table::new();
    for (name, raw) in vars {
        let Some(rest) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let Some((section, field)) = rest.split_once('_') else {
            warn!("Ignoring {}: expected {}<SECTION>_<FIELD>", name, ENV_PREFIX);
            continue;
        };
        let section = section.to_lowercase();
        let field = field.to_lowercase();
        if field.is_empty() {
            warn!("Ignoring {}: empty field name", name);
            continue;
        }
        if !SECTIONS.contains(&section.as_str()) {
            warn!("Ignoring {}: unknown section '{}'", name, section);
            continue;
        }
        set_path(
            &mut layer,
            &format!("{}.{}", section, field),
            parse_scalar(&raw),
        );
    }
    layer
}

/// Build a CLI-args layer from `key=value` style pairs of dot-path keys.
pub fn overrides_from_pairs<'a, I>(pairs: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut layer = Table::new();
    for (key, raw) in pairs {
        set_path(&mut layer, key, parse_scalar(raw));
    }
    layer
}

/// Parse a scalar the way TOML would: bool, then integer, then float,
/// falling back to a string.
pub fn parse_scalar(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        return Value::Boolean(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(raw.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_paths(
            dir.path().join(".revu.toml"),
            dir.path().join("home/revu/config.toml"),
        )
    }

    fn write_project(dir: &TempDir, text: &str) {
        fs::write(dir.path().join(".revu.toml"), text).unwrap();
    }

    fn write_user(dir: &TempDir, text: &str) {
        let path = dir.path().join("home/revu/config.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_defaults_only() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        assert_eq!(mgr.get("llm.model").unwrap().as_str(), Some("gpt-4o"));
        assert_eq!(mgr.get_source("llm.model"), Some(ConfigSource::Default));
        mgr.validate().unwrap();
    }

    #[test]
    fn test_precedence_user_over_project() {
        let dir = TempDir::new().unwrap();
        write_project(&dir, "[llm]\nmodel = \"from-project\"\ntemperature = 0.9\n");
        write_user(&dir, "[llm]\nmodel = \"from-user\"\n");

        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        assert_eq!(mgr.get("llm.model").unwrap().as_str(), Some("from-user"));
        assert_eq!(mgr.get_source("llm.model"), Some(ConfigSource::UserFile));
        assert_eq!(
            mgr.get("llm.temperature").unwrap().as_float(),
            Some(0.9)
        );
        assert_eq!(
            mgr.get_source("llm.temperature"),
            Some(ConfigSource::ProjectFile)
        );
        // Keys no source touched stay at defaults
        assert_eq!(mgr.get_source("review.depth"), Some(ConfigSource::Default));
    }

    #[test]
    fn test_cli_args_outrank_files() {
        let dir = TempDir::new().unwrap();
        write_project(&dir, "[llm]\nmodel = \"from-project\"\n");
        write_user(&dir, "[llm]\nmodel = \"from-user\"\n");

        let overrides = overrides_from_pairs([("llm.model", "from-cli")]);
        let mut mgr = manager_in(&dir);
        mgr.load(Some(&overrides)).unwrap();

        assert_eq!(mgr.get("llm.model").unwrap().as_str(), Some("from-cli"));
        assert_eq!(mgr.get_source("llm.model"), Some(ConfigSource::CliArgs));
    }

    #[test]
    fn test_env_var_outranks_user_file() {
        let dir = TempDir::new().unwrap();
        write_user(&dir, "[document]\nstyle = \"minimal\"\n");

        // SAFETY: single mutation of a key no other test asserts on
        unsafe {
            env::set_var("REVU_DOCUMENT_STYLE", "detailed");
        }
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();
        unsafe {
            env::remove_var("REVU_DOCUMENT_STYLE");
        }

        assert_eq!(
            mgr.get("document.style").unwrap().as_str(),
            Some("detailed")
        );
        assert_eq!(
            mgr.get_source("document.style"),
            Some(ConfigSource::Environment)
        );
    }

    #[test]
    fn test_env_layer_mapping() {
        let layer = env_layer([
            ("REVU_LLM_MODEL".to_string(), "gpt-4.1".to_string()),
            ("REVU_ANALYZE_MAX_FILE_SIZE".to_string(), "2048".to_string()),
            ("REVU_AUTOGEN_USE_DOCKER".to_string(), "true".to_string()),
            ("REVU_LLM_TEMPERATURE".to_string(), "0.5".to_string()),
            ("REVU_BOGUS_KEY".to_string(), "x".to_string()),
            ("UNRELATED".to_string(), "y".to_string()),
        ]);

        assert_eq!(get_path(&layer, "llm.model").unwrap().as_str(), Some("gpt-4.1"));
        assert_eq!(
            get_path(&layer, "analyze.max_file_size").unwrap().as_integer(),
            Some(2048)
        );
        assert_eq!(
            get_path(&layer, "autogen.use_docker").unwrap().as_bool(),
            Some(true)
        );
        assert_eq!(
            get_path(&layer, "llm.temperature").unwrap().as_float(),
            Some(0.5)
        );
        assert!(get_path(&layer, "bogus.key").is_none());
        assert_eq!(layer.len(), 3); // llm, analyze, autogen
    }

    #[test]
    fn test_multiword_field_maps_to_one_leaf() {
        let layer = env_layer([(
            "REVU_REVIEW_OUTPUT_FORMAT".to_string(),
            "markdown".to_string(),
        )]);
        assert_eq!(
            get_path(&layer, "review.output_format").unwrap().as_str(),
            Some("markdown")
        );
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("true"), Value::Boolean(true));
        assert_eq!(parse_scalar("42"), Value::Integer(42));
        assert_eq!(parse_scalar("0.25"), Value::Float(0.25));
        assert_eq!(parse_scalar("gpt-4o"), Value::String("gpt-4o".to_string()));
    }

    #[test]
    fn test_malformed_project_file_skipped() {
        let dir = TempDir::new().unwrap();
        write_project(&dir, "this is not [valid toml");

        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        assert_eq!(mgr.get("llm.model").unwrap().as_str(), Some("gpt-4o"));
        assert_eq!(mgr.get_source("llm.model"), Some(ConfigSource::Default));
    }

    #[test]
    fn test_v1_payload_migrated_during_load() {
        let dir = TempDir::new().unwrap();
        write_project(
            &dir,
            "schema_version = 1\n[llm]\nmodel_name = \"legacy-model\"\n",
        );

        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        assert_eq!(mgr.get("llm.model").unwrap().as_str(), Some("legacy-model"));
        assert_eq!(mgr.get_source("llm.model"), Some(ConfigSource::ProjectFile));
        assert_eq!(mgr.config().unwrap().llm.model, "legacy-model");
    }

    #[test]
    fn test_set_before_save() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        mgr.set("review.depth", Value::String("thorough".into()), false)
            .unwrap();

        assert_eq!(mgr.get("review.depth").unwrap().as_str(), Some("thorough"));
        assert_eq!(mgr.get_source("review.depth"), Some(ConfigSource::UserFile));
        // Nothing persisted yet
        assert!(!dir.path().join("home/revu/config.toml").exists());
    }

    #[test]
    fn test_set_rejects_invalid_enum_value() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        let err = mgr
            .set("review.depth", Value::String("reckless".into()), false)
            .unwrap_err();
        assert!(matches!(err, RevuError::InvalidValue { .. }));
        // Tree untouched
        assert_eq!(mgr.get("review.depth").unwrap().as_str(), Some("standard"));
    }

    #[test]
    fn test_set_rejects_out_of_range_value() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        let err = mgr
            .set("llm.temperature", Value::Float(9.0), false)
            .unwrap_err();
        assert!(err.to_string().contains("llm.temperature"));
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        let err = mgr
            .set("llm.modle", Value::String("typo".into()), false)
            .unwrap_err();
        assert!(matches!(err, RevuError::UnknownKey(_)));
    }

    #[test]
    fn test_set_custom_key_allowed() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        mgr.set("custom.team", Value::String("platform".into()), false)
            .unwrap();
        assert_eq!(mgr.get("custom.team").unwrap().as_str(), Some("platform"));
        assert_eq!(mgr.get_source("custom.team"), Some(ConfigSource::UserFile));
    }

    #[test]
    fn test_set_with_save_persists() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();
        mgr.set("llm.model", Value::String("saved-model".into()), true)
            .unwrap();

        let mut fresh = manager_in(&dir);
        fresh.load(None).unwrap();
        assert_eq!(fresh.get("llm.model").unwrap().as_str(), Some("saved-model"));
        assert_eq!(fresh.get_source("llm.model"), Some(ConfigSource::UserFile));
    }

    #[test]
    fn test_init_project_round_trip() {
        let dir = TempDir::new().unwrap();
        let mgr = manager_in(&dir);
        mgr.init_project(false).unwrap();

        let mut fresh = manager_in(&dir);
        fresh.load(None).unwrap();

        let defaults = RevuConfig::default();
        assert_eq!(
            fresh.get("llm.model").unwrap().as_str(),
            Some(defaults.llm.model.as_str())
        );
        assert_eq!(fresh.get_source("llm.model"), Some(ConfigSource::ProjectFile));
        assert_eq!(
            fresh.get_source("analyze.max_file_size"),
            Some(ConfigSource::ProjectFile)
        );
    }

    #[test]
    fn test_init_project_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let mgr = manager_in(&dir);
        mgr.init_project(false).unwrap();
        assert!(mgr.init_project(false).is_err());
        mgr.init_project(true).unwrap();
    }

    #[test]
    fn test_get_path_and_set_path() {
        let mut table = Table::new();
        set_path(&mut table, "a.b.c", Value::Integer(7));
        assert_eq!(get_path(&table, "a.b.c").unwrap().as_integer(), Some(7));
        assert!(get_path(&table, "a.b.missing").is_none());
        assert!(get_path(&table, "a.b.c.too.deep").is_none());

        set_path(&mut table, "a.b", Value::String("flat".into()));
        assert_eq!(get_path(&table, "a.b").unwrap().as_str(), Some("flat"));
    }

    #[test]
    fn test_sources_iterator_covers_all_leaves() {
        let dir = TempDir::new().unwrap();
        let mut mgr = manager_in(&dir);
        mgr.load(None).unwrap();

        let keys: Vec<&str> = mgr.sources().map(|(k, _)| k).collect();
        assert!(keys.contains(&"llm.model"));
        assert!(keys.contains(&"analyze.max_file_size"));
        assert!(keys.contains(&"explain.audience"));
        assert!(
            mgr.sources()
                .all(|(_, source)| source == ConfigSource::Default)
        );
    }
}
