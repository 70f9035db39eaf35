//! Configuration management for `sweep_stats`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`SWEEP_STATS_*`)
//! 3. Project config (./sweep-stats.yaml)
//! 4. User config (~/.config/sweep-stats/config.yaml)
//! 5. Defaults

use crate::analysis::DEFAULT_CAP;
use crate::error::{Result, SweepError};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Project config filename, looked up in the working directory.
pub const PROJECT_CONFIG_FILENAME: &str = "sweep-stats.yaml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SWEEP_STATS_";

/// Every recognised key.
pub const KNOWN_KEYS: &[&str] = &[
    "data-root",
    "version",
    "cap",
    "dims.min",
    "dims.max",
    "benchmarks",
    "shift-pattern",
    "workers",
];

const DEFAULT_SHIFT_PATTERN: &str = "{bench}_shift_{value}";

/// One source of flat `key -> value` settings.
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

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(&normalize_key(key))
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

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.set(&key, value);
        }
        Ok(layer)
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `SWEEP_STATS_*` pairs; `SWEEP_STATS_DIMS_MAX` sets
    /// `dims.max`. Unknown names are ignored.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (name, value) in vars {
            let Some(stripped) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let wanted = stripped.to_lowercase();
            if let Some(key) = KNOWN_KEYS
                .iter()
                .find(|key| key.replace(['.', '-'], "_") == wanted)
            {
                layer.set(key, value);
            }
        }
        layer
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_root: Option<PathBuf>,
    pub version: Option<String>,
    pub cap: Option<usize>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(root) = &self.data_root {
            layer.set("data-root", root.to_string_lossy());
        }
        if let Some(version) = &self.version {
            layer.set("version", version.clone());
        }
        if let Some(cap) = self.cap {
            layer.set("cap", cap.to_string());
        }

        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.set("data-root", "data");
    layer.set("version", "DEFAULT");
    layer.set("cap", DEFAULT_CAP.to_string());
    layer.set("dims.min", "2");
    layer.set("dims.max", "100");
    layer.set("benchmarks", "");
    layer.set("shift-pattern", DEFAULT_SHIFT_PATTERN);
    layer.set("workers", "0");
    layer
}

/// Load user config (~/.config/sweep-stats/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("sweep-stats")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load project config (`<project_dir>/sweep-stats.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&project_dir.join(PROJECT_CONFIG_FILENAME))
}

/// Load configuration with the full precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed.
pub fn load_config(project_dir: &Path, cli: &CliOverrides) -> Result<ConfigLayer> {
    Ok(ConfigLayer::merge_layers(&[
        default_config_layer(),
        load_user_config()?,
        load_project_config(project_dir)?,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]))
}

/// Resolved analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisConfig {
    pub data_root: PathBuf,
    pub version: String,
    pub cap: usize,
    pub dims_min: u32,
    pub dims_max: u32,
    /// Benchmarks pooled by the cost regression.
    pub benchmarks: Vec<String>,
    pub shift_pattern: String,
    /// Worker threads, `0` for the rayon default.
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            version: "DEFAULT".to_string(),
            cap: DEFAULT_CAP,
            dims_min: 2,
            dims_max: 100,
            benchmarks: Vec::new(),
            shift_pattern: DEFAULT_SHIFT_PATTERN.to_string(),
            workers: 0,
        }
    }
}

impl AnalysisConfig {
    /// Resolve a merged layer; keys the layer lacks keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` for unparsable numbers, `cap == 0` or an empty
    /// dimensionality range.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            data_root: layer
                .get("data-root")
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map_or(defaults.data_root, PathBuf::from),
            version: layer
                .get("version")
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map_or(defaults.version, str::to_string),
            cap: parse_number(layer, "cap")?.unwrap_or(defaults.cap),
            dims_min: parse_number(layer, "dims.min")?.unwrap_or(defaults.dims_min),
            dims_max: parse_number(layer, "dims.max")?.unwrap_or(defaults.dims_max),
            benchmarks: layer.get("benchmarks").map_or_else(Vec::new, |v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            shift_pattern: layer
                .get("shift-pattern")
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .unwrap_or(defaults.shift_pattern),
            workers: parse_number(layer, "workers")?.unwrap_or(defaults.workers),
        };

        if config.cap == 0 {
            return Err(SweepError::Config("cap must be at least 1".to_string()));
        }
        if config.dims_min > config.dims_max {
            return Err(SweepError::Config(format!(
                "dims.min ({}) is greater than dims.max ({})",
                config.dims_min, config.dims_max
            )));
        }
        Ok(config)
    }

    #[must_use]
    pub const fn dims_range(&self) -> RangeInclusive<u32> {
        self.dims_min..=self.dims_max
    }
}

fn parse_number<T>(layer: &ConfigLayer, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    layer
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| SweepError::Config(format!("invalid value for '{key}': '{raw}': {e}")))
        })
        .transpose()
}

/// Lowercase; `_` and `-` are interchangeable, `.` separates sections.
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
