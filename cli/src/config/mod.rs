// CLI configuration module
// The embedded assets/config/default.json is always loaded first; a user file
// named by BILL_SPLITTER_CONFIG may override any subset of its keys.
use anyhow::{Context, Result};
use engine::config::StorageSettings;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "BILL_SPLITTER_CONFIG";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub display: DisplaySettings,
    pub tip: TipSettings,
    pub confirm_delete: bool,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub decimals: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TipSettings {
    pub max_percentage: f64,
    pub presets: Vec<f64>,
}

impl TipSettings {
    pub fn clamp(&self, tip_percentage: f64) -> f64 {
        tip_percentage.clamp(0.0, self.max_percentage.max(0.0))
    }
}

impl AppConfig {
    pub fn load_default() -> Result<Self> {
        let config: AppConfig = serde_json::from_value(Self::default_value()?)?;
        Ok(config)
    }

    /// Defaults, overridden by the file in `BILL_SPLITTER_CONFIG` when it is set.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_with_override(Path::new(&path)),
            None => Self::load_default(),
        }
    }

    pub fn load_with_override(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let overrides: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Config file '{}' is not valid JSON", path.display()))?;

        let mut merged = Self::default_value()?;
        merge_json(&mut merged, overrides);
        let config: AppConfig = serde_json::from_value(merged)
            .with_context(|| format!("Config file '{}' has invalid settings", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded configuration overrides");
        Ok(config)
    }

    fn default_value() -> Result<Value> {
        let config_str = include_str!("../../assets/config/default.json");
        Ok(serde_json::from_str(config_str)?)
    }
}

// Objects merge key by key; any other value replaces what was there.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
