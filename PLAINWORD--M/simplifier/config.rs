use std::{
    fs,
    path::{Path, PathBuf},
};

use plainword_logging::LogLevel;
use serde::Deserialize;

use crate::{
    error::SimplifierError,
    table::{ReplacementEntry, ReplacementTable},
};

/// Top-level plainword configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlainwordConfig {
    /// Replacement table settings.
    #[serde(default)]
    pub table: TableSection,
    /// Telemetry sinks.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

/// How configured entries combine with the built-in table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// Layer entries over the built-in table.
    #[default]
    Extend,
    /// Use only the configured entries.
    Replace,
}

/// `[table]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSection {
    /// Combination mode.
    #[serde(default)]
    pub mode: TableMode,
    /// Entries declared in the document, in order.
    #[serde(default)]
    pub entries: Vec<ReplacementEntry>,
}

/// `[telemetry]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// JSON-line log destination; relative paths resolve against the config file.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// Records below this level are dropped.
    #[serde(default)]
    pub min_level: LogLevel,
}

impl PlainwordConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimplifierError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SimplifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = parse(&raw, &path.display().to_string())?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(log_path) = config.telemetry.log_path.as_mut() {
            if log_path.is_relative() {
                *log_path = base_dir.join(&*log_path);
            }
        }
        Ok(config)
    }

    /// Parses configuration from a TOML string. Relative paths are kept as written.
    pub fn from_toml_str(raw: &str) -> Result<Self, SimplifierError> {
        parse(raw, "inline config")
    }

    /// Builds the effective replacement table.
    pub fn build_table(&self) -> Result<ReplacementTable, SimplifierError> {
        let entries = self.table.entries.iter().cloned();
        match self.table.mode {
            TableMode::Extend => {
                let mut table = ReplacementTable::builtin();
                table.extend(entries)?;
                Ok(table)
            }
            TableMode::Replace => ReplacementTable::from_entries(entries),
        }
    }
}

fn parse(raw: &str, origin: &str) -> Result<PlainwordConfig, SimplifierError> {
    toml::from_str(raw).map_err(|source| SimplifierError::Config {
        origin: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PlainwordConfig::from_toml_str("").unwrap();
        assert_eq!(config.table.mode, TableMode::Extend);
        assert!(config.telemetry.log_path.is_none());
        assert_eq!(config.telemetry.min_level, LogLevel::Info);
        assert_eq!(config.build_table().unwrap(), ReplacementTable::builtin());
    }

    #[test]
    fn extend_mode_layers_entries() {
        let config = PlainwordConfig::from_toml_str(
            r#"
[[table.entries]]
complex = "endeavor"
simple = "try"

[[table.entries]]
complex = "utilize"
simple = "employ"
"#,
        )
        .unwrap();
        let table = config.build_table().unwrap();
        assert_eq!(table.len(), 21);
        assert_eq!(table.get("utilize"), Some("employ"));
        assert_eq!(table.get("endeavor"), Some("try"));
    }

    #[test]
    fn replace_mode_discards_builtin_entries() {
        let config = PlainwordConfig::from_toml_str(
            r#"
[table]
mode = "replace"
entries = [{ complex = "endeavor", simple = "try" }]
"#,
        )
        .unwrap();
        let table = config.build_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("utilize"), None);
    }

    #[test]
    fn invalid_entries_surface_on_build() {
        let config = PlainwordConfig::from_toml_str(
            r#"
[table]
mode = "replace"
entries = [
    { complex = "assist", simple = "help" },
    { complex = "Assist", simple = "aid" },
]
"#,
        )
        .unwrap();
        assert!(matches!(
            config.build_table(),
            Err(SimplifierError::DuplicateWord(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PlainwordConfig::from_toml_str("[table]\nstyle = 'loose'\n").unwrap_err();
        assert!(matches!(err, SimplifierError::Config { .. }));
        assert!(err.to_string().starts_with("parsing inline config"));
    }

    #[test]
    fn misspelled_entry_keys_are_rejected() {
        let err = PlainwordConfig::from_toml_str(
            r#"
[[table.entries]]
complex = "endeavor"
simple = "try"
simpel = "attempt"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimplifierError::Config { .. }));
        assert!(err.to_string().contains("simpel"));
    }

    #[test]
    fn load_resolves_relative_log_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("plainword.toml");
        fs::write(
            &config_path,
            r#"
[telemetry]
log_path = "logs/plainword.jsonl"
min_level = "warn"
"#,
        )
        .unwrap();
        let config = PlainwordConfig::load(&config_path).unwrap();
        let log_path = config.telemetry.log_path.unwrap();
        assert!(log_path.is_absolute());
        assert!(log_path.ends_with("logs/plainword.jsonl"));
        assert_eq!(config.telemetry.min_level, LogLevel::Warn);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let err = PlainwordConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SimplifierError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
