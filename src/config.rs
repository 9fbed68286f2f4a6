//! Configuration management using the prefer crate for file discovery.
//!
//! Resolution order, lowest to highest priority: built-in defaults, the
//! config file (`portfolio.{toml,json,yaml}`), `PORTFOLIO_*` environment
//! variables, then CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AnimationSlot, ContactForm, Profile};
use crate::simulation::{SimulationPacing, MAX_TIME_SCALE};
use crate::style::StylesheetSource;

/// Default listen address (host:port).
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Default port when only a host is given.
pub const DEFAULT_PORT: u16 = 8501;

/// Default asset request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

const DEFAULT_TITLE: &str = "My Animated Portfolio";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Source URL for each animation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationUrls {
    pub hello: String,
    pub about: String,
    pub projects: String,
    pub contact: String,
}

impl Default for AnimationUrls {
    fn default() -> Self {
        Self {
            hello: AnimationSlot::Hello.default_url().to_string(),
            about: AnimationSlot::About.default_url().to_string(),
            projects: AnimationSlot::Projects.default_url().to_string(),
            contact: AnimationSlot::Contact.default_url().to_string(),
        }
    }
}

impl AnimationUrls {
    pub fn url(&self, slot: AnimationSlot) -> &str {
        match slot {
            AnimationSlot::Hello => &self.hello,
            AnimationSlot::About => &self.about,
            AnimationSlot::Projects => &self.projects,
            AnimationSlot::Contact => &self.contact,
        }
    }
}

/// Simulation playback settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Multiplier on scripted pauses (1.0 = original timing).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_scale: Option<f64>,
    /// Seconds a finished simulation stays queryable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_secs: Option<u64>,
}

impl SimulationConfig {
    fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Page title.
    pub title: String,
    /// Listen address: port, host, or host:port.
    pub bind: String,
    /// User agent for asset requests (None = built-in default).
    pub user_agent: Option<String>,
    /// Asset request timeout in seconds.
    pub request_timeout: u64,
    pub stylesheet: StylesheetSource,
    pub animations: AnimationUrls,
    pub profile: Profile,
    pub contact: ContactForm,
    pub pacing: SimulationPacing,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            bind: DEFAULT_BIND.to_string(),
            user_agent: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stylesheet: StylesheetSource::Embedded,
            animations: AnimationUrls::default(),
            profile: Profile::default(),
            contact: ContactForm::default(),
            pacing: SimulationPacing::default(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Fully populated config equivalent to these settings.
    pub fn to_config(&self) -> Config {
        Config {
            title: Some(self.title.clone()),
            bind: Some(self.bind.clone()),
            user_agent: self.user_agent.clone(),
            request_timeout: Some(self.request_timeout),
            stylesheet: Some(self.stylesheet.describe()),
            animations: self.animations.clone(),
            profile: self.profile.clone(),
            contact: self.contact.clone(),
            simulation: SimulationConfig {
                time_scale: Some(self.pacing.time_scale),
                retention_secs: Some(self.pacing.retention.as_secs()),
            },
            source_path: None,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Listen address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// User agent string for asset requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// `embedded` or a path to a CSS file (relative to the config file).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    #[serde(default)]
    pub animations: AnimationUrls,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub contact: ContactForm,
    #[serde(default, skip_serializing_if = "SimulationConfig::is_default")]
    pub simulation: SimulationConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when nothing is found or the file is invalid.
    pub async fn load() -> Self {
        match prefer::load("portfolio").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config file: {}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// The format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_err(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| parse_err(e.to_string())),
            _ => serde_json::from_str(contents).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref title) = self.title {
            settings.title = title.clone();
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref stylesheet) = self.stylesheet {
            settings.stylesheet = match StylesheetSource::from_setting(stylesheet) {
                StylesheetSource::File(path) => {
                    StylesheetSource::File(self.resolve_path(&path.to_string_lossy(), base_dir))
                }
                embedded => embedded,
            };
        }
        settings.animations = self.animations.clone();
        settings.profile = self.profile.clone();
        settings.contact = self.contact.clone();

        if let Some(scale) = self.simulation.time_scale {
            if scale.is_finite() && scale >= 0.0 {
                let clamped = SimulationPacing::clamp_time_scale(scale);
                if clamped != scale {
                    tracing::warn!(
                        "simulation.time_scale {} is above {}, using {}",
                        scale,
                        MAX_TIME_SCALE,
                        clamped
                    );
                }
                settings.pacing.time_scale = clamped;
            } else {
                tracing::warn!("Ignoring invalid simulation.time_scale: {}", scale);
            }
        }
        if let Some(secs) = self.simulation.retention_secs {
            settings.pacing.retention = Duration::from_secs(secs);
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Read a non-empty environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Apply `PORTFOLIO_*` environment overrides.
fn apply_env_overrides(settings: &mut Settings) {
    if let Some(bind) = env_value("PORTFOLIO_BIND") {
        tracing::debug!("Using PORTFOLIO_BIND from environment: {}", bind);
        settings.bind = bind;
    }

    if let Some(timeout) = env_value("PORTFOLIO_REQUEST_TIMEOUT") {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => settings.request_timeout = secs,
            Err(_) => tracing::warn!("Ignoring invalid PORTFOLIO_REQUEST_TIMEOUT: {}", timeout),
        }
    }

    if let Some(stylesheet) = env_value("PORTFOLIO_STYLESHEET") {
        tracing::debug!("Using PORTFOLIO_STYLESHEET from environment: {}", stylesheet);
        settings.stylesheet = StylesheetSource::from_setting(&stylesheet);
    }
}

/// Load settings with explicit options.
///
/// An explicit `--config` path must exist and parse; auto-discovered files
/// that fail to parse are ignored with a warning.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let mut settings = Settings::default();
    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    config.apply_to_settings(&mut settings, &base_dir);
    apply_env_overrides(&mut settings);

    Ok((settings, config))
}
