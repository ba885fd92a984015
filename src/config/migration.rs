//! Configuration Schema Migration
//!
//! Config file payloads carry a `schema_version` integer. Payloads below
//! [`SCHEMA_VERSION`] are passed through an ordered chain of version-gated
//! steps before merging; each step transforms the raw TOML table in place
//! (field renames, relocations, value remaps) and advances one version.
//!
//! Payloads written before versioning existed have no `schema_version` and
//! are treated as version 1.

use toml::{Table, Value};
use tracing::{debug, warn};

/// Current configuration schema version
pub const SCHEMA_VERSION: i64 = 2;

struct MigrationStep {
    /// Version this step upgrades from (to `from + 1`)
    from: i64,
    name: &'static str,
    apply: fn(&mut Table),
}

const STEPS: &[MigrationStep] = &[MigrationStep {
    from: 1,
    name: "rename llm.model_name and review.output, relocate exclude_dirs",
    apply: migrate_v1_to_v2,
}];

/// Read the payload's schema version, defaulting to 1 when absent or malformed.
pub fn payload_version(table: &Table) -> i64 {
    match table.get("schema_version") {
        Some(Value::Integer(v)) => *v,
        Some(other) => {
            warn!("Ignoring non-integer schema_version {:?}", other);
            1
        }
        None => 1,
    }
}

/// Migrate a raw config payload up to [`SCHEMA_VERSION`].
///
/// Returns `true` if any step ran. A payload newer than the current schema
/// is left untouched with a warning; a gap in the step chain stops the
/// migration at the last reachable version.
pub fn migrate(table: &mut Table) -> bool {
    let mut version = payload_version(table);

    if version > SCHEMA_VERSION {
        warn!(
            "Config payload has schema_version {} but this build supports {}; merging as-is",
            version, SCHEMA_VERSION
        );
        return false;
    }

    let mut changed = false;
    while version < SCHEMA_VERSION {
        let Some(step) = STEPS.iter().find(|s| s.from == version) else {
            warn!(
                "No migration step from schema_version {}; stopping at this version",
                version
            );
            break;
        };
        debug!(
            "Migrating config schema {} -> {}: {}",
            version,
            version + 1,
            step.name
        );
        (step.apply)(table);
        version += 1;
        changed = true;
    }

    if changed {
        table.insert("schema_version".to_string(), Value::Integer(version));
    }
    changed
}

/// v1 -> v2:
/// - `llm.model_name` becomes `llm.model`
/// - `review.output` becomes `review.output_format`; the retired value
///   `"plain"` maps to `"terminal"`
/// - the top-level `exclude_dirs` array moves to `analyze.exclude_dirs`
fn migrate_v1_to_v2(table: &mut Table) {
    if let Some(Value::Table(llm)) = table.get_mut("llm")
        && let Some(model) = llm.remove("model_name")
        && !llm.contains_key("model")
    {
        llm.insert("model".to_string(), model);
    }

    if let Some(Value::Table(review)) = table.get_mut("review")
        && let Some(output) = review.remove("output")
        && !review.contains_key("output_format")
    {
        let remapped = match output {
            Value::String(s) if s == "plain" => Value::String("terminal".to_string()),
            other => other,
        };
        review.insert("output_format".to_string(), remapped);
    }

    if let Some(dirs) = table.remove("exclude_dirs") {
        let analyze = table
            .entry("analyze".to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if let Value::Table(analyze) = analyze
            && !analyze.contains_key("exclude_dirs")
        {
            analyze.insert("exclude_dirs".to_string(), dirs);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Table {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_missing_version_treated_as_v1() {
        let table = parse("[llm]\nmodel = \"gpt-4o\"\n");
        assert_eq!(payload_version(&table), 1);
    }

    #[test]
    fn test_v1_model_name_renamed() {
        let mut table = parse("schema_version = 1\n[llm]\nmodel_name = \"gpt-4o\"\n");
        assert!(migrate(&mut table));

        let llm = table["llm"].as_table().unwrap();
        assert_eq!(llm["model"].as_str(), Some("gpt-4o"));
        assert!(!llm.contains_key("model_name"));
        assert_eq!(table["schema_version"].as_integer(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_v1_output_renamed_and_remapped() {
        let mut table = parse("schema_version = 1\n[review]\noutput = \"plain\"\n");
        assert!(migrate(&mut table));

        let review = table["review"].as_table().unwrap();
        assert_eq!(review["output_format"].as_str(), Some("terminal"));
        assert!(!review.contains_key("output"));
    }

    #[test]
    fn test_v1_output_non_retired_value_kept() {
        let mut table = parse("schema_version = 1\n[review]\noutput = \"markdown\"\n");
        migrate(&mut table);
        let review = table["review"].as_table().unwrap();
        assert_eq!(review["output_format"].as_str(), Some("markdown"));
    }

    #[test]
    fn test_v1_exclude_dirs_relocated() {
        let mut table = parse("schema_version = 1\nexclude_dirs = [\"generated\"]\n");
        migrate(&mut table);

        let analyze = table["analyze"].as_table().unwrap();
        let dirs = analyze["exclude_dirs"].as_array().unwrap();
        assert_eq!(dirs[0].as_str(), Some("generated"));
        assert!(!table.contains_key("exclude_dirs"));
    }

    #[test]
    fn test_existing_new_key_wins_over_renamed() {
        let mut table = parse(
            "schema_version = 1\n[llm]\nmodel_name = \"old\"\nmodel = \"new\"\n",
        );
        migrate(&mut table);
        let llm = table["llm"].as_table().unwrap();
        assert_eq!(llm["model"].as_str(), Some("new"));
    }

    #[test]
    fn test_current_version_untouched() {
        let mut table = parse(&format!("schema_version = {}\n", SCHEMA_VERSION));
        assert!(!migrate(&mut table));
    }

    #[test]
    fn test_future_version_left_alone() {
        let mut table = parse(&format!(
            "schema_version = {}\n[llm]\nmodel_name = \"x\"\n",
            SCHEMA_VERSION + 1
        ));
        assert!(!migrate(&mut table));
        assert!(table["llm"].as_table().unwrap().contains_key("model_name"));
    }

    #[test]
    fn test_migrated_payload_deserializes() {
        let mut table = parse(
            "schema_version = 1\n[llm]\nmodel_name = \"gpt-4o\"\n[review]\noutput = \"plain\"\n",
        );
        migrate(&mut table);
        let config: crate::config::RevuConfig = Value::Table(table).try_into().unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(
            config.review.output_format,
            crate::config::OutputFormat::Terminal
        );
    }
}
