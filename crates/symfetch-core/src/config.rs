use crate::endpoint::{ArtifactName, RemoteEndpoint};
use crate::transport::TransferOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/symfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// FTP host artifacts are served from.
    pub host: String,
    /// FTP control port (None = 21).
    #[serde(default)]
    pub port: Option<u16>,
    /// Remote directory, relative to the anonymous login directory.
    pub directory: String,
    /// Artifact names fetched by `symfetch fetch`, in order.
    pub artifacts: Vec<String>,
    /// Local directory artifacts are stored in (None = current directory).
    #[serde(default)]
    pub dest_dir: Option<PathBuf>,
    /// Seconds allowed to establish the control connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Optional cap on a whole retrieval in seconds (None = no cap).
    #[serde(default)]
    pub transfer_timeout_secs: Option<u64>,
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            host: "ftp.nasdaqtrader.com".to_string(),
            port: None,
            directory: "symboldirectory".to_string(),
            artifacts: vec!["nasdaqlisted.txt".to_string(), "otherlisted.txt".to_string()],
            dest_dir: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            transfer_timeout_secs: None,
        }
    }
}

impl FetchConfig {
    pub fn endpoint(&self) -> Result<RemoteEndpoint> {
        Ok(RemoteEndpoint::new(&self.host, self.port, &self.directory)?)
    }

    /// Validated artifact names, in configured order.
    pub fn artifact_names(&self) -> Result<Vec<ArtifactName>> {
        self.artifacts
            .iter()
            .map(|a| ArtifactName::new(a.as_str()).map_err(anyhow::Error::from))
            .collect()
    }

    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: self.transfer_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Destination directory, defaulting to the process working directory.
    pub fn resolved_dest_dir(&self) -> Result<PathBuf> {
        match &self.dest_dir {
            Some(d) => Ok(d.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("symfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}
