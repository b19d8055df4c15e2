//! # Client configuration: `invoicer.toml`
//!
//! Defines the TOML configuration the web client is built with (filename:
//! [`InvoicerConfig::filename`] = `"invoicer.toml"`). The file is embedded at
//! compile time by the `ui` crate and parsed once at startup.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:5000"   # REST API root, no trailing slash
//!
//! [session]
//! inactivity_minutes = 20              # idle time before forced logout
//! token_key = "accessToken"            # localStorage key for the bearer token
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`InvoicerConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, lenient loading. |
//! | [`ApiConfig`] | API section, the base URL every request is resolved against. |
//! | [`SessionConfig`] | Session section, inactivity threshold and the persisted token key. |
//!
//! All structs implement `Default` so a missing or empty file is equivalent to
//! the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `invoicer.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicerConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// REST API configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle minutes before the session is force-cleared. 0 disables the monitor.
    #[serde(default = "default_inactivity_minutes")]
    pub inactivity_minutes: u32,
    /// Key under which the bearer token is persisted.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_inactivity_minutes() -> u32 {
    20
}

fn default_token_key() -> String {
    "accessToken".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_minutes: default_inactivity_minutes(),
            token_key: default_token_key(),
        }
    }
}

impl InvoicerConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "invoicer.toml"
    }

    /// Idle duration after which the session is cleared.
    pub fn inactivity_threshold(&self) -> Duration {
        Duration::from_secs(u64::from(self.session.inactivity_minutes) * 60)
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse, falling back to defaults (with a warning) on malformed input.
    pub fn load_or_default(s: &str) -> Self {
        match Self::from_toml(s) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid {}: {e}; using defaults", Self::filename());
                Self::default()
            }
        }
    }
}
