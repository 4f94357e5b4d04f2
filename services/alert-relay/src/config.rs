//! Configuration types for the alert relay

use std::net::SocketAddr;
use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: &str = ":8080";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Shanghai";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub server_chan: ServerChanConfig,
}

/// Inbound webhook server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_auth_token")]
    pub auth_token: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            auth_token: default_auth_token(),
            time_zone: default_time_zone(),
        }
    }
}

impl ServerConfig {
    /// Socket address on all interfaces for the normalized port
    pub fn bind_addr(&self) -> crate::Result<SocketAddr> {
        let port = normalize_port(&self.port);
        format!("0.0.0.0{}", port).parse::<SocketAddr>().map_err(|e| {
            crate::RelayError::Config(format!("Invalid listen port {:?}: {}", self.port, e))
        })
    }

    /// Resolve the configured zone name, falling back to UTC
    pub fn time_location(&self) -> Tz {
        match self.time_zone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!(
                    "Failed to load time zone '{}', using UTC: {}",
                    self.time_zone,
                    e
                );
                Tz::UTC
            }
        }
    }
}

/// Downstream ServerChan API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerChanConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServerChanConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup. Unset or empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port;
        }
        if let Some(token) = get("AUTH_TOKEN") {
            self.server.auth_token = token;
        }
        if let Some(tz) = get("TZ") {
            self.server.time_zone = tz;
        }
        if let Some(key) = get("SERVER_CHAN_KEY") {
            self.server_chan.api_key = key;
        }
        if let Some(url) = get("SERVER_CHAN_BASE_URL") {
            self.server_chan.base_url = url;
        }
        if let Some(raw) = get("SERVER_CHAN_TIMEOUT_SECONDS") {
            match raw.parse() {
                Ok(secs) => self.server_chan.timeout_seconds = secs,
                Err(_) => tracing::warn!(
                    "Invalid SERVER_CHAN_TIMEOUT_SECONDS '{}', keeping {}s",
                    raw,
                    self.server_chan.timeout_seconds
                ),
            }
        }

        self.server.port = normalize_port(&self.server.port);
    }
}

/// Normalize a listen port: bare numbers get a leading colon, bad input falls back to `:8080`
pub fn normalize_port(port: &str) -> String {
    if port.is_empty() {
        return DEFAULT_PORT.to_string();
    }

    if port.starts_with(':') {
        return port.to_string();
    }

    if port.parse::<i64>().is_ok() {
        return format!(":{}", port);
    }

    tracing::warn!("Invalid port format '{}', using default {}", port, DEFAULT_PORT);
    DEFAULT_PORT.to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_auth_token() -> String {
    "default_auth_token_here".to_string()
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_api_key() -> String {
    "default_server_chan_key_here".to_string()
}

fn default_base_url() -> String {
    "https://sctapi.ftqq.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::RelayError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
