//! Application configuration, read from `<config dir>/config.json`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gridline_lib::model::GeneratorConfig;
use gridline_lib::table::ColumnResizeMode;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::paths;

pub const SEED_ENV: &str = "GRIDLINE_SEED";
pub const VARIANT_ENV: &str = "GRIDLINE_VARIANT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Which table the app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Flat rows with a drag handle.
    #[default]
    Reorder,
    /// Nested rows with checkboxes and expanders.
    Expanding,
}

impl Variant {
    pub fn default_lens(self) -> Vec<usize> {
        match self {
            Self::Reorder => vec![20],
            Self::Expanding => vec![10, 3, 2],
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reorder => f.write_str("reorder"),
            Self::Expanding => f.write_str("expanding"),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reorder" => Ok(Self::Reorder),
            "expanding" => Ok(Self::Expanding),
            _ => Err(ConfigError::InvalidValue {
                key: "variant".into(),
                value: s.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub variant: Variant,
    /// Overrides the variant's data shape.
    pub lens: Option<Vec<usize>>,
    pub seed: Option<u64>,
    pub resize_mode: ColumnResizeMode,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            lens: None,
            seed: None,
            resize_mode: ColumnResizeMode::default(),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Loads the user's config file and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match paths::config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(SEED_ENV) {
            let seed = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: SEED_ENV.into(),
                    value: value.clone(),
                })?;
            self.seed = Some(seed);
        }
        if let Some(value) = lookup(VARIANT_ENV) {
            self.variant = value.parse()?;
        }
        Ok(())
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn generator(&self) -> GeneratorConfig {
        let lens = self
            .lens
            .clone()
            .unwrap_or_else(|| self.variant.default_lens());
        GeneratorConfig {
            lens,
            seed: self.seed,
        }
    }
}
