mod file_config;

pub use file_config::FileConfig;

use crate::phototag_client::{Payload, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = ".phototag.toml";
pub const DB_FILE_NAME: &str = ".phototag_db.json";

/// Values given on the command line. Everything is optional, unset fields
/// fall through to the environment, the config file, then the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub db: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// `PHOTOTAG_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub db: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            url: get("PHOTOTAG_URL"),
            token: get("PHOTOTAG_TOKEN"),
            db: get("PHOTOTAG_DB").map(PathBuf::from),
            config: get("PHOTOTAG_CONFIG").map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub url: String,
    pub token: String,
    pub db_path: PathBuf,
    pub timeout_secs: u64,
    pub options: Payload,
}

impl AppConfig {
    /// Reads the environment and the config file, then resolves against `cli`.
    ///
    /// A config file named explicitly (flag or `PHOTOTAG_CONFIG`) must exist;
    /// the default `~/.phototag.toml` is optional.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let env = EnvConfig::from_env();
        let explicit = cli.config.clone().or_else(|| env.config.clone());
        let file_config = match explicit {
            Some(path) => Some(FileConfig::load(&path)?),
            None => match default_config_path() {
                Some(path) if path.is_file() => Some(FileConfig::load(&path)?),
                _ => None,
            },
        };
        Self::resolve(cli, &env, file_config)
    }

    /// Precedence: CLI, environment, config file, built-in default.
    pub fn resolve(cli: &CliConfig, env: &EnvConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let url = cli
            .url
            .clone()
            .or_else(|| env.url.clone())
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let token = cli
            .token
            .clone()
            .or_else(|| env.token.clone())
            .or(file.token)
            .unwrap_or_default();

        let db_path = match cli
            .db
            .clone()
            .or_else(|| env.db.clone())
            .or_else(|| file.db.map(PathBuf::from))
        {
            Some(path) => path,
            None => default_db_path()?,
        };

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let options = match file.options {
            Some(table) => table
                .into_iter()
                .map(|(key, value)| {
                    serde_json::to_value(value)
                        .map(|json| (key.clone(), json))
                        .with_context(|| format!("Invalid value for option {}", key))
                })
                .collect::<Result<Payload>>()?,
            None => Payload::new(),
        };

        Ok(Self {
            url,
            token,
            db_path,
            timeout_secs,
            options,
        })
    }

    pub fn require_token(&self) -> Result<&str> {
        if self.token.is_empty() {
            bail!(
                "API token is required. Set it with --token, PHOTOTAG_TOKEN or in $HOME/{}",
                CONFIG_FILE_NAME
            );
        }
        Ok(&self.token)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

fn default_db_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DB_FILE_NAME))
        .context("Cannot locate the home directory, pass the database path with --db")
}
