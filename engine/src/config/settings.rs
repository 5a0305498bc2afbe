// Where the engine keeps its state between runs.
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::EngineError;

const APP_DIR: &str = "bill-splitter";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct StorageSettings {
    /// Explicit state file. When absent, the platform data directory is used.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolve_data_file(&self) -> Result<PathBuf, EngineError> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| EngineError::ConfigError("could not determine the platform data directory".to_string()))?;
        Ok(base.join(APP_DIR).join(STATE_FILE))
    }
}
