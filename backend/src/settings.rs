//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ROSTER_*` environment variables and config
//! files. Every field is optional; accessors apply the defaults and parse
//! raw values into typed ones.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Base URL of the mock REST resource holding the initial collection.
pub const DEFAULT_REMOTE_URL: &str = "https://8306efc93b20a953.mokky.dev";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw setting values that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Value as configured.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `remote_url` is not an absolute URL.
    #[error("invalid remote URL {value:?}: {source}")]
    RemoteUrl {
        /// Value as configured.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// `display_offset_minutes` is outside ±24 hours.
    #[error("display offset of {minutes} minutes is out of range")]
    DisplayOffset {
        /// Value as configured.
        minutes: i32,
    },
}

/// Settings controlling the listener, the remote source and date display.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct RosterSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the remote user resource; empty disables the fetch.
    pub remote_url: Option<String>,
    /// Timeout for the remote fetch, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// UTC offset, in minutes, used when rendering registration dates.
    pub display_offset_minutes: Option<i32>,
    /// Skip fetching the remote collection on startup.
    #[ortho_config(default = false)]
    pub skip_initial_load: bool,
}

impl RosterSettings {
    /// Listener address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Remote resource base URL; `None` when configured as blank.
    pub fn remote_url(&self) -> Result<Option<Url>, SettingsError> {
        let value = self
            .remote_url
            .as_deref()
            .unwrap_or(DEFAULT_REMOTE_URL)
            .trim();
        if value.is_empty() {
            return Ok(None);
        }
        Url::parse(value)
            .map(Some)
            .map_err(|source| SettingsError::RemoteUrl {
                value: value.to_owned(),
                source,
            })
    }

    /// Remote request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Offset applied to registration dates; UTC by default.
    pub fn display_offset(&self) -> Result<FixedOffset, SettingsError> {
        let minutes = self.display_offset_minutes.unwrap_or(0);
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(SettingsError::DisplayOffset { minutes })
    }

    /// Whether the remote collection is fetched on startup.
    pub fn load_on_startup(&self) -> bool {
        !self.skip_initial_load
    }
}

#[cfg(test)]
impl RosterSettings {
    /// Settings with every value left to its default.
    pub(crate) fn unset() -> Self {
        Self {
            bind_addr: None,
            remote_url: None,
            request_timeout_secs: None,
            display_offset_minutes: None,
            skip_initial_load: false,
        }
    }
}
