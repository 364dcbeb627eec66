use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upstream fetch parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds (None = libcurl default, no explicit limit).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Total transfer timeout in seconds (None = wait until the platform gives up).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum number of redirects followed per fetch.
    pub max_redirections: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirections: 10,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `Cross-Origin-Resource-Policy` sent with proxied assets.
///
/// `same-origin` is correct when every asset is served through this proxy's origin;
/// `cross-origin` is for deployments where the viewer lives on another origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourcePolicy {
    #[default]
    SameOrigin,
    CrossOrigin,
}

impl ResourcePolicy {
    pub fn header_value(self) -> &'static str {
        match self {
            ResourcePolicy::SameOrigin => "same-origin",
            ResourcePolicy::CrossOrigin => "cross-origin",
        }
    }
}

/// Global configuration loaded from `~/.config/hubproxy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubProxyConfig {
    /// Socket address the server binds to.
    pub listen: String,
    /// User-Agent sent on every upstream fetch.
    pub user_agent: String,
    /// `max-age` in the `Cache-Control` header of successful responses.
    pub cache_max_age_secs: u64,
    /// Resource policy for the asset endpoint.
    #[serde(default)]
    pub resource_policy: ResourcePolicy,
    /// Inject a script into proxied HTML that makes service worker registration fail.
    pub neutralize_service_workers: bool,
    /// Optional directory served verbatim for non-API paths (the gallery front-end).
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Optional fetch tuning; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for HubProxyConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8787".to_string(),
            user_agent: "Game-Hub-Viewer/1.0".to_string(),
            cache_max_age_secs: 3600,
            resource_policy: ResourcePolicy::SameOrigin,
            neutralize_service_workers: true,
            static_dir: None,
            fetch: None,
        }
    }
}

impl HubProxyConfig {
    /// Fetch settings, falling back to defaults when the section is absent.
    pub fn fetch_or_default(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hubproxy")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HubProxyConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<HubProxyConfig> {
    if !path.exists() {
        let default_cfg = HubProxyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: HubProxyConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}
