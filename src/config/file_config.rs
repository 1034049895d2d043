use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub db: Option<String>,
    pub timeout_secs: Option<u64>,

    /// Extra API payload options, e.g. `maxKeywords = 30`.
    pub options: Option<toml::Table>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
