//! Runtime configuration.
//!
//! Defaults work against a local backend. A JSON object stored under
//! `investment_journey_config` in localStorage overrides individual fields,
//! e.g. `{"api_base":"https://example.org/api"}`.

use serde::Deserialize;

use crate::error::ConfigError;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "investment_journey_config";

pub const DEFAULT_API_BASE: &str = "http://localhost:8002/api";

pub const MAX_TICKS_PER_SEC: u32 = 1000;
pub const MAX_MARKET_POLL_SECS: u32 = 86_400;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the JSON service, without a trailing slash.
    pub api_base: String,
    /// Seconds between market snapshot requests while portfolio setup or the dashboard is shown.
    pub market_poll_secs: u32,
    /// Frame clock rate.
    pub ticks_per_sec: u32,
    /// Minimum `log` level, e.g. "debug".
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            market_poll_secs: 5,
            ticks_per_sec: 10,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = serde_json::from_str(json)?;
        config.api_base = config.api_base.trim().trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::BadBaseUrl(self.api_base.clone()));
        }
        if self.market_poll_secs == 0 {
            return Err(ConfigError::NonPositive {
                field: "market_poll_secs",
            });
        }
        if self.ticks_per_sec == 0 {
            return Err(ConfigError::NonPositive {
                field: "ticks_per_sec",
            });
        }
        if self.market_poll_secs > MAX_MARKET_POLL_SECS {
            return Err(ConfigError::TooLarge {
                field: "market_poll_secs",
                max: MAX_MARKET_POLL_SECS,
            });
        }
        if self.ticks_per_sec > MAX_TICKS_PER_SEC {
            return Err(ConfigError::TooLarge {
                field: "ticks_per_sec",
                max: MAX_TICKS_PER_SEC,
            });
        }
        Ok(())
    }

    /// Ticks between market polls at the configured clock rate.
    pub fn market_poll_ticks(&self) -> u32 {
        self.market_poll_secs.saturating_mul(self.ticks_per_sec)
    }

    /// Convert a delay in milliseconds to clock ticks, rounding up.
    pub fn ms_to_ticks(&self, ms: u32) -> u32 {
        ms.saturating_mul(self.ticks_per_sec).div_ceil(1000)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Config from a stored JSON value. An absent value yields the defaults; a
/// malformed or out-of-range one is logged and ignored.
fn from_stored(json: Option<&str>) -> AppConfig {
    let Some(json) = json else {
        return AppConfig::default();
    };
    match AppConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring stored config: {e}");
            AppConfig::default()
        }
    }
}

/// Read the overrides from localStorage.
#[cfg(target_arch = "wasm32")]
pub fn load() -> AppConfig {
    let stored = get_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    from_stored(stored.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> AppConfig {
    from_stored(None)
}
