use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DB_ENV: &str = "SPENDTUI_DB";
pub(crate) const LOG_ENV: &str = "SPENDTUI_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Self::from_env_with(&data_dir, |key| std::env::var(key).ok())
    }

    /// Resolve settings against `data_dir`, reading overrides through `lookup`.
    pub(crate) fn from_env_with(
        data_dir: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let db_path = lookup(DB_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(crate::run::shellexpand(p.trim())))
            .unwrap_or_else(|| data_dir.join("spendtui.db"));
        let log_filter = lookup(LOG_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_path: data_dir.join("spendtui.log"),
            log_filter,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendtui", "SpendTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
