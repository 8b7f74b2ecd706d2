use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::MIN_VISIBLE_LOADING;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Connection settings for the wiki server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the wiki server (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Whole-request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Terminal UI tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Interval between animation ticks in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Minimum time a loading screen stays visible in milliseconds
    /// (default: 300). Zero turns the smoothing off.
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,
    /// How long a toast stays on screen in milliseconds (default: 4000).
    #[serde(default = "default_toast_ttl_ms")]
    pub toast_ttl_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8776".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_request_timeout() -> u32 {
    30
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_min_loading_ms() -> u64 {
    MIN_VISIBLE_LOADING.as_millis() as u64
}

fn default_toast_ttl_ms() -> u64 {
    4000
}

impl ServerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds.into())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.into())
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn min_loading(&self) -> Duration {
        Duration::from_millis(self.min_loading_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            min_loading_ms: default_min_loading_ms(),
            toast_ttl_ms: default_toast_ttl_ms(),
        }
    }
}
