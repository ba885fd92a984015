//! Config Command
//!
//! Manage revu configuration.
//!
//! Usage:
//!   revu config show [--format json] [--sources] [-O key=value]
//!   revu config path
//!   revu config init [--user] [--force]
//!   revu config get <key> [--with-source]
//!   revu config set <key> <value> [--no-save]

use toml::Value;

use crate::cli::output::Output;
use crate::config::{ConfigManager, overrides_from_pairs, parse_scalar};
use crate::types::{Result, RevuError};

/// Parse repeatable `key=value` override flags into a CLI-args layer.
fn override_layer(overrides: &[String]) -> Result<toml::Table> {
    let mut pairs = Vec::new();
    for spec in overrides {
        let (key, value) = spec.split_once('=').ok_or_else(|| {
            RevuError::Config(format!("Invalid override '{}': expected key=value", spec))
        })?;
        pairs.push((key, value));
    }
    Ok(overrides_from_pairs(pairs))
}

/// Show the resolved configuration, optionally annotated with provenance.
pub fn show(as_json: bool, with_sources: bool, overrides: &[String]) -> Result<()> {
    let layer = override_layer(overrides)?;
    let mut manager = ConfigManager::new();
    manager.load(Some(&layer))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(manager.tree())?);
    } else {
        println!("{}", toml::to_string_pretty(manager.tree())?);
    }

    if with_sources {
        let out = Output::new();
        out.header("Sources");
        for (key, source) in manager.sources() {
            out.field(&source.to_string(), key);
        }
    }
    Ok(())
}

/// Show configuration file paths and whether they exist.
pub fn path() -> Result<()> {
    let manager = ConfigManager::new();
    let out = Output::new();
    out.header("Configuration paths");

    let mark = |exists: bool| if exists { "✓" } else { "✗" };
    let project = manager.project_path();
    out.field("project", &format!("{} {}", mark(project.exists()), project.display()));

    match manager.user_path() {
        Some(user) => {
            out.field("user", &format!("{} {}", mark(user.exists()), user.display()));
        }
        None => out.field("user", "(not available)"),
    }
    Ok(())
}

/// Write a default config file at the project or user path.
pub fn init(user: bool, force: bool) -> Result<()> {
    let manager = ConfigManager::new();
    let written = if user {
        manager.init_user(force)?
    } else {
        manager.init_project(force)?
    };
    Output::new().success(&format!("Wrote {}", written.display()));
    Ok(())
}

/// Print one resolved key, optionally with its provenance.
pub fn get(key: &str, with_source: bool) -> Result<()> {
    let mut manager = ConfigManager::new();
    manager.load(None)?;

    let value = manager
        .get(key)
        .ok_or_else(|| RevuError::UnknownKey(key.to_string()))?;
    match value {
        Value::String(s) => println!("{}", s),
        other => println!("{}", other),
    }
    if with_source
        && let Some(source) = manager.get_source(key)
    {
        Output::new().field("source", &source.to_string());
    }
    Ok(())
}

/// Set a key in the live config and (by default) persist it to the user file.
pub fn set(key: &str, raw: &str, save: bool) -> Result<()> {
    let mut manager = ConfigManager::new();
    manager.load(None)?;
    manager.set(key, parse_scalar(raw), save)?;

    let out = Output::new();
    if save {
        out.success(&format!("Set {} = {} (saved to user config)", key, raw));
    } else {
        out.success(&format!("Set {} = {} (not persisted)", key, raw));
    }
    Ok(())
}
