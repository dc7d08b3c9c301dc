use crate::core::metric::Metric;
use crate::core::score::{MissingMetricPolicy, Weights};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Fund catalog CSV to rank.
    pub input: PathBuf,
    /// Where the ranked table is written. Kept separate from `input` so a run
    /// never overwrites its own source data.
    pub output: PathBuf,
    /// Number of top-ranked funds to keep in the export.
    #[serde(default = "default_top")]
    pub top: usize,
    /// What to do with a fund missing a metric at scoring time.
    #[serde(default)]
    pub missing_metrics: MissingMetricPolicy,
    /// Optional override of the composite weight table. Must name all eight
    /// metrics and sum to 1.0.
    #[serde(default)]
    pub weights: Option<HashMap<Metric, f64>>,
}

fn default_top() -> usize {
    30
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "mfrank")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The effective weight table: the configured override when present,
    /// otherwise the built-in defaults. Invalid overrides are rejected here,
    /// before any data is loaded.
    pub fn weights(&self) -> Result<Weights> {
        match &self.weights {
            Some(map) => Ok(Weights::from_map(map)?),
            None => Ok(Weights::default()),
        }
    }
}
