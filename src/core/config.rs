use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fmt, fs, path::PathBuf};
use tracing::debug;

use crate::providers::{twelve_data, yahoo_finance};

/// One entry of the ordered provider list.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    Yahoo {
        base_url: String,
    },
    TwelveData {
        base_url: String,
        api_key: Option<String>,
    },
}

// Config is dumped to debug logs, so keys are masked.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Yahoo { base_url } => {
                f.debug_struct("Yahoo").field("base_url", base_url).finish()
            }
            ProviderConfig::TwelveData { base_url, api_key } => f
                .debug_struct("TwelveData")
                .field("base_url", base_url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::Yahoo {
            base_url: yahoo_finance::DEFAULT_BASE_URL.to_string(),
        },
        ProviderConfig::TwelveData {
            base_url: twelve_data::DEFAULT_BASE_URL.to_string(),
            api_key: None,
        },
    ]
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Providers in the order they are queried.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    pub portfolio_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: default_providers(),
            portfolio_path: None,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or the built-in defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "folio", "folio").context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn portfolio_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.portfolio_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().join("portfolio.json"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
