//! Configuration management for `go_test_html_report`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. Environment variables (`GTHR_*`)
//! 2. Project config (`.go-test-html-report.yaml` in the working directory)
//! 3. Defaults

use crate::aggregate::{AggregateOptions, DEFAULT_OS_MARKER, DEFAULT_PAYLOAD_MARKER};
use crate::error::{ReportError, Result};
use crate::output::DEFAULT_OUTPUT_PREFIX;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const CONFIG_FILENAME: &str = ".go-test-html-report.yaml";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "GTHR_";

const KEY_MARKER: &str = "marker";
const KEY_OS_MARKER: &str = "os-marker";
const KEY_OUTPUT_PREFIX: &str = "output-prefix";
const KEY_OUTPUT_DIR: &str = "output-dir";
const KEY_TEMPLATE: &str = "template";

/// A flat key/value configuration layer.
///
/// Keys are normalized: lower-case, `_` replaced by `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ReportError::io_at(path, e))?;
        Self::from_yaml_str(&contents)
    }

    /// Build a layer from YAML source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.insert(&key, value);
        }
        Ok(layer)
    }

    /// Build a layer from `GTHR_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    /// Build a layer from `GTHR_*` entries of `vars`.
    #[must_use]
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.insert(stripped, value);
            }
        }
        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.insert(KEY_MARKER, DEFAULT_PAYLOAD_MARKER);
    layer.insert(KEY_OS_MARKER, DEFAULT_OS_MARKER);
    layer.insert(KEY_OUTPUT_PREFIX, DEFAULT_OUTPUT_PREFIX);
    layer.insert(KEY_OUTPUT_DIR, ".");
    layer
}

/// Load project config from `dir`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&dir.join(CONFIG_FILENAME))
}

/// Load configuration with the documented precedence order.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or a
/// value is invalid.
pub fn load_config(dir: &Path) -> Result<ReportConfig> {
    let layer = ConfigLayer::merge_layers(&[
        default_config_layer(),
        load_project_config(dir)?,
        ConfigLayer::from_env(),
    ]);
    ReportConfig::from_layer(&layer)
}

/// Resolved settings for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub aggregate: AggregateOptions,
    pub output_prefix: String,
    pub output_dir: PathBuf,
    /// Custom document template; the bundled one is used when `None`.
    pub template: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            aggregate: AggregateOptions::default(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            output_dir: PathBuf::from("."),
            template: None,
        }
    }
}

impl ReportConfig {
    /// Resolve typed settings from a merged layer.
    ///
    /// # Errors
    ///
    /// Returns a config error if a marker or the output prefix is empty.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let defaults = Self::default();

        let payload_marker = required(layer, KEY_MARKER, &defaults.aggregate.payload_marker)?;
        let os_marker = required(layer, KEY_OS_MARKER, &defaults.aggregate.os_marker)?;
        let output_prefix = required(layer, KEY_OUTPUT_PREFIX, &defaults.output_prefix)?;
        let output_dir = layer
            .get(KEY_OUTPUT_DIR)
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map_or(defaults.output_dir, PathBuf::from);
        let template = layer
            .get(KEY_TEMPLATE)
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            aggregate: AggregateOptions {
                payload_marker,
                os_marker,
            },
            output_prefix,
            output_dir,
            template,
        })
    }
}

fn required(layer: &ConfigLayer, key: &str, default: &str) -> Result<String> {
    match layer.get(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => {
            Err(ReportError::Config(format!("'{key}' must not be empty")))
        }
        Some(value) => Ok(value.to_string()),
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
