use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::input_reader::DefaultTable;

pub const DEFAULT_CONFIG_FILE: &str = "cablecalc.yaml";
pub const DEFAULT_STORE_DIR: &str = ".cablecalc";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderPolicy {
    /// Drop matching cable rows on load.
    #[default]
    Discard,
    /// Keep matching rows and only report them.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub policy: PlaceholderPolicy,
    pub values: Vec<f64>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            policy: PlaceholderPolicy::Discard,
            values: vec![75.0, 192.0, 55.0, 50.0, 40.0, 65.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub event_limit: usize,
    pub reconciliation_limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            event_limit: 100,
            reconciliation_limit: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Classify uncategorized vendor items from their description.
    pub infer_categories: bool,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            infer_categories: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub store_dir: PathBuf,
    /// Input defaults by field name, on top of the factory table.
    pub defaults: BTreeMap<String, f64>,
    pub auto_save: AutoSaveConfig,
    pub history: HistoryConfig,
    pub legacy_placeholders: PlaceholderConfig,
    pub reconciliation: ReconciliationConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            defaults: BTreeMap::new(),
            auto_save: AutoSaveConfig::default(),
            history: HistoryConfig::default(),
            legacy_placeholders: PlaceholderConfig::default(),
            reconciliation: ReconciliationConfig::default(),
        }
    }
}

impl CalculatorConfig {
    pub fn default_table(&self) -> DefaultTable {
        DefaultTable::with_overrides(&self.defaults)
    }
}

pub fn parse_config_str(input: &str) -> Result<CalculatorConfig, serde_yaml::Error> {
    if input.trim().is_empty() {
        return Ok(CalculatorConfig::default());
    }
    serde_yaml::from_str(input)
}

/// Reads the config from `path`, or from `cablecalc.yaml` in the working
/// directory when no path is given. A missing default file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<CalculatorConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(CalculatorConfig::default());
            }
            fallback
        }
    };
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_document_yields_the_default_config() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.auto_save.interval_secs, 30);
        assert_eq!(config.history.reconciliation_limit, 50);
        assert_eq!(
            config.legacy_placeholders.policy,
            PlaceholderPolicy::Discard
        );
    }

    #[test]
    fn partial_documents_keep_defaults_for_missing_sections() {
        let yaml = "store_dir: /tmp/cables\nlegacy_placeholders:\n  policy: warn\ndefaults:\n  waste_factor: 10\n";
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/cables"));
        assert_eq!(config.legacy_placeholders.policy, PlaceholderPolicy::Warn);
        assert_eq!(config.legacy_placeholders.values.len(), 6);
        assert!(config.reconciliation.infer_categories);
        assert_eq!(config.default_table().default_inputs().waste_factor, 10.0);
    }

    #[test]
    fn an_explicit_missing_config_file_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.yaml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
