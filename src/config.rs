use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "AUTOCOMPLETE_CONFIG";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

impl Config {
    /// Loads the config from its resolved location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self> {
        Self::load_from(&resolve_config_path())
    }

    /// Relative `training.corpus` entries are resolved against the directory
    /// holding the config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            for corpus in &mut config.training.corpus {
                if corpus.is_relative() {
                    *corpus = base.join(&*corpus);
                }
            }
        }
        Ok(config)
    }
}

pub fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Some(base) = dirs::config_dir() {
        return base.join("autocomplete").join("config.toml");
    }

    PathBuf::from("autocomplete.toml")
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct QueryConfig {
    /// Maximum candidates shown per query; all of them when unset.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Lower-case fragments before querying. Training always lower-cases.
    #[serde(default)]
    pub fold_case: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct TrainingConfig {
    /// Text files trained at startup.
    #[serde(default)]
    pub corpus: Vec<PathBuf>,
}
