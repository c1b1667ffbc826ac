use anyhow::{Context, Result};
use goalpath_core::CutPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_goalpath_home, goalpath_home};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub ingest: IngestSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default)]
    pub cuts: CutPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSection {
    /// Uploads larger than this are rejected before staging
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeSection {
    /// Files ingested concurrently by `goalpath batch`
    pub workers: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            ingest: IngestSection::default(),
            runtime: RuntimeSection::default(),
            cuts: CutPolicy::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(goalpath_home()?.join("config.toml"))
}

/// Read `path`, or the default location when `None`. A missing file yields
/// the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one already exists. Returns the path.
pub fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_goalpath_home()?.join("config.toml"),
    };
    if p.exists() {
        eprintln!("Config already exists: {}", p.display());
        return Ok(p);
    }
    save_config(&p, &Config::default())?;
    eprintln!("Wrote {}", p.display());
    Ok(p)
}
