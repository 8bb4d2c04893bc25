//! Configuration system: TOML file + env var overrides + defaults.
//!
//! Nothing here persists assessment data. The config only tunes presentation
//! defaults (start scenario, slider and estimator parameters) and the activity
//! log location.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assessment::integration::{DEFAULT_THRESHOLD, THRESHOLD_MAX, THRESHOLD_STEP};
use crate::assessment::navigation::Scenario;
use crate::assessment::shell::ViewSettings;
use crate::assessment::timeline::DEFAULT_BASE_ESTIMATE_DAYS;
use crate::core::errors::{LmError, Result};

/// Full LegacyMod configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub integration: IntegrationConfig,
    pub timeline: TimelineConfig,
    pub logging: LoggingConfig,
    /// Where this config was loaded from (or would have been).
    #[serde(skip)]
    pub source_path: PathBuf,
}

/// Terminal dashboard behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Scenario the dashboard opens on.
    pub start_scenario: Scenario,
    /// Input poll interval in milliseconds.
    pub tick_ms: u64,
}

/// Integration-friction slider parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntegrationConfig {
    pub default_threshold: u8,
    pub threshold_step: u8,
}

/// Timeline estimator parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Modern-platform baseline, in days.
    pub base_estimate_days: u32,
}

/// Activity log settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub jsonl_path: PathBuf,
    /// Optional secondary path used when the primary is unwritable.
    pub fallback_path: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_scenario: Scenario::Overview,
            tick_ms: 250,
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            threshold_step: THRESHOLD_STEP,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            base_estimate_days: DEFAULT_BASE_ESTIMATE_DAYS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jsonl_path: data_dir().join("activity.jsonl"),
            fallback_path: None,
            max_size_bytes: 10 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || {
            eprintln!("[LM-CONFIG] WARNING: HOME not set, falling back to /tmp for data paths");
            PathBuf::from("/tmp")
        },
        PathBuf::from,
    )
}

fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("legacymod")
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        home_dir()
            .join(".config")
            .join("legacymod")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// A missing file at the default path yields defaults; a missing explicit
    /// path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, env_var)
    }

    /// [`Config::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| LmError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(LmError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.source_path = path_buf;
        cfg.apply_env_overrides_from(lookup)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic FNV-1a hash of the effective config, for logging.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    /// Render as TOML, as `config show` prints it.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Mount-time parameters handed to the assessment shell.
    #[must_use]
    pub const fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            default_threshold: self.integration.default_threshold,
            threshold_step: self.integration.threshold_step,
            base_estimate_days: self.timeline.base_estimate_days,
        }
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("LEGACYMOD_UI_START_SCENARIO") {
            self.ui.start_scenario =
                Scenario::parse(&raw).ok_or_else(|| LmError::ConfigParse {
                    context: "env",
                    details: format!("LEGACYMOD_UI_START_SCENARIO={raw:?}: unknown scenario"),
                })?;
        }
        if let Some(raw) = lookup("LEGACYMOD_UI_TICK_MS") {
            self.ui.tick_ms = parse_env("LEGACYMOD_UI_TICK_MS", &raw)?;
        }
        if let Some(raw) = lookup("LEGACYMOD_INTEGRATION_DEFAULT_THRESHOLD") {
            self.integration.default_threshold =
                parse_env("LEGACYMOD_INTEGRATION_DEFAULT_THRESHOLD", &raw)?;
        }
        if let Some(raw) = lookup("LEGACYMOD_INTEGRATION_THRESHOLD_STEP") {
            self.integration.threshold_step =
                parse_env("LEGACYMOD_INTEGRATION_THRESHOLD_STEP", &raw)?;
        }
        if let Some(raw) = lookup("LEGACYMOD_TIMELINE_BASE_ESTIMATE_DAYS") {
            self.timeline.base_estimate_days =
                parse_env("LEGACYMOD_TIMELINE_BASE_ESTIMATE_DAYS", &raw)?;
        }
        if let Some(raw) = lookup("LEGACYMOD_LOGGING_ENABLED") {
            self.logging.enabled = parse_env("LEGACYMOD_LOGGING_ENABLED", &raw)?;
        }
        if let Some(raw) = lookup("LEGACYMOD_LOGGING_JSONL_PATH") {
            self.logging.jsonl_path = PathBuf::from(raw);
        }
        Ok(())
    }

    /// Reject values the dashboard cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(10..=5000).contains(&self.ui.tick_ms) {
            return Err(LmError::InvalidConfig {
                details: format!("ui.tick_ms must be in [10,5000], got {}", self.ui.tick_ms),
            });
        }

        let step = self.integration.threshold_step;
        if step == 0 || step > THRESHOLD_MAX {
            return Err(LmError::InvalidConfig {
                details: format!("integration.threshold_step must be in [1,100], got {step}"),
            });
        }
        let threshold = self.integration.default_threshold;
        if threshold > THRESHOLD_MAX {
            return Err(LmError::InvalidConfig {
                details: format!(
                    "integration.default_threshold must be in [0,100], got {threshold}"
                ),
            });
        }
        if threshold % step != 0 {
            return Err(LmError::InvalidConfig {
                details: format!(
                    "integration.default_threshold ({threshold}) must be a multiple of \
                     integration.threshold_step ({step})"
                ),
            });
        }

        if self.timeline.base_estimate_days == 0 {
            return Err(LmError::InvalidConfig {
                details: "timeline.base_estimate_days must be > 0".to_string(),
            });
        }

        if self.logging.enabled {
            if self.logging.jsonl_path.as_os_str().is_empty() {
                return Err(LmError::InvalidConfig {
                    details: "logging.jsonl_path must not be empty when logging is enabled"
                        .to_string(),
                });
            }
            if self.logging.max_size_bytes < 1024 {
                return Err(LmError::InvalidConfig {
                    details: format!(
                        "logging.max_size_bytes must be >= 1024, got {}",
                        self.logging.max_size_bytes
                    ),
                });
            }
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|error| LmError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}
