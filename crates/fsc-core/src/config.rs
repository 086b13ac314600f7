//! fsc.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::Theme;

/// Default public port for the dashboard server.
pub const DEFAULT_PORT: u16 = 8090;

/// Base URL baked into generated embed snippets when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    pub server: Option<ServerConfig>,
    pub ui: Option<UiConfig>,
    pub data: Option<DataConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    /// Public origin used when building embed URLs, e.g.
    /// `https://dashboard.example.org`.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme served when a page carries no `theme` parameter.
    pub default_theme: Option<Theme>,
    /// Heading shown in the dashboard chrome.
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory of dataset JSON files overriding the embedded ones.
    pub dir: Option<String>,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    /// Base URL with any trailing slash removed, so embed paths can be
    /// appended without doubling separators.
    pub fn base_url(&self) -> String {
        let raw = self
            .server
            .as_ref()
            .and_then(|s| s.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        raw.trim_end_matches('/').to_string()
    }

    pub fn default_theme(&self) -> Theme {
        self.ui
            .as_ref()
            .and_then(|u| u.default_theme)
            .unwrap_or_default()
    }

    pub fn title(&self) -> String {
        self.ui
            .as_ref()
            .and_then(|u| u.title.clone())
            .unwrap_or_else(|| "Startup Ecosystem Dashboard".to_string())
    }

    pub fn data_dir(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.dir.as_deref())
    }
}
