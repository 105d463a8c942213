// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tandem Labs

//! Client configuration.
//!
//! Loaded from a TOML file, then overridden by `TANDEM_*` environment
//! variables so deployments can point a build at another stack without
//! editing the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use td_realtime::SocketConfig;

use crate::error::{Error, Result};

/// Client configuration for the REST and realtime endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API (`http://` or `https://`).
    pub base_url: String,
    /// URL of the realtime chat socket (`ws://` or `wss://`).
    pub ws_url: String,
    /// Bearer token, if already signed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum reconnection attempts before giving up (default: 10).
    #[serde(default = "default_reconnect_max_retries")]
    pub reconnect_max_retries: u32,
    /// Initial delay between reconnection attempts in milliseconds (default: 500).
    #[serde(default = "default_reconnect_initial_delay_ms")]
    pub reconnect_initial_delay_ms: u64,
    /// Maximum delay between reconnection attempts in seconds (default: 30).
    #[serde(default = "default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
    /// Heartbeat ping interval in milliseconds (default: 30000). 0 = disabled.
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,
    /// Max time to wait for a pong response in milliseconds (default: 10000).
    #[serde(default = "default_heartbeat_timeout_ms")]
    pub heartbeat_timeout_ms: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_reconnect_max_retries() -> u32 {
    10
}

fn default_reconnect_initial_delay_ms() -> u64 {
    500
}

fn default_reconnect_max_delay_secs() -> u64 {
    30
}

fn default_heartbeat_interval_ms() -> u64 {
    30000
}

fn default_heartbeat_timeout_ms() -> u64 {
    10000
}

impl ClientConfig {
    /// Build a config pointing at one host, with defaults for the tuning knobs.
    pub fn new(base_url: impl Into<String>, ws_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ws_url: ws_url.into(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            reconnect_max_retries: default_reconnect_max_retries(),
            reconnect_initial_delay_ms: default_reconnect_initial_delay_ms(),
            reconnect_max_delay_secs: default_reconnect_max_delay_secs(),
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            heartbeat_timeout_ms: default_heartbeat_timeout_ms(),
        }
    }

    /// Load a config from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&contents)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TANDEM_BASE_URL`, `TANDEM_WS_URL`, and `TANDEM_TOKEN` overrides.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("TANDEM_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(url) = std::env::var("TANDEM_WS_URL") {
            self.ws_url = url;
        }
        if let Ok(token) = std::env::var("TANDEM_TOKEN") {
            self.token = Some(token);
        }
        self
    }

    /// Settings for the realtime socket, taken from this config.
    pub fn socket_config(&self) -> SocketConfig {
        SocketConfig {
            url: self.ws_url.clone(),
            max_retries: self.reconnect_max_retries,
            initial_delay_ms: self.reconnect_initial_delay_ms,
            max_delay_secs: self.reconnect_max_delay_secs,
            heartbeat_interval_ms: self.heartbeat_interval_ms,
            heartbeat_timeout_ms: self.heartbeat_timeout_ms,
        }
    }

    /// Validate the endpoint URLs.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "invalid base_url '{}' (hint: must start with http:// or https://)",
                self.base_url
            )));
        }
        if !self.ws_url.starts_with("ws://") && !self.ws_url.starts_with("wss://") {
            return Err(Error::InvalidConfig(format!(
                "invalid ws_url '{}' (hint: must start with ws:// or wss://)",
                self.ws_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
