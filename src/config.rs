//! Environment-driven client configuration.
//!
//! Resolved once at startup. Builder methods and CLI flags override these
//! values; nothing re-reads the environment afterwards.

use std::env;
use std::path::PathBuf;

/// Base URL prefixed to every request path. Empty means same-origin.
pub const API_URL_ENV: &str = "HOUSING_API_URL";
/// Origin that same-origin (relative) paths are resolved against.
pub const ORIGIN_ENV: &str = "HOUSING_ORIGIN";
pub const PROXY_URL_ENV: &str = "HOUSING_PROXY_URL";
pub const STATE_FILE_ENV: &str = "HOUSING_STATE_FILE";

pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for request paths; empty keeps paths relative.
    pub base_url: String,
    pub origin: String,
    pub proxy_url: Option<String>,
    pub state_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            origin: DEFAULT_ORIGIN.to_string(),
            proxy_url: None,
            state_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            base_url: get(API_URL_ENV)
                .map(|v| normalize_base_url(&v))
                .unwrap_or_default(),
            origin: get(ORIGIN_ENV).unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            proxy_url: get(PROXY_URL_ENV),
            state_file: get(STATE_FILE_ENV).map(PathBuf::from),
        }
    }

    pub fn is_same_origin(&self) -> bool {
        self.base_url.is_empty()
    }

    /// Human-readable API base for the startup log line.
    pub fn api_base_label(&self) -> &str {
        if self.is_same_origin() {
            "(same-origin)"
        } else {
            &self.base_url
        }
    }

    /// Configured state file, or `<data dir>/housing-client/state.json`.
    pub fn state_file_path(&self) -> Option<PathBuf> {
        self.state_file.clone().or_else(default_state_file)
    }
}

pub fn default_state_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("housing-client").join("state.json"))
}

/// Strip trailing slashes so `base + "/users"` never doubles them.
pub fn normalize_base_url(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
