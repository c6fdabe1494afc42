use std::time::Duration;

use anyhow::{anyhow, Result};
use url::Url;

/// Backend used when `BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
/// Path prefix every backend route lives under.
pub const API_PREFIX: &str = "/api";
/// Single-tenant identifier the site is published for.
pub const DEFAULT_USER_ID: &str = "akshaj";
/// Per-request deadline; an expired request surfaces as a network error.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    pub user_id: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::with_backend(&raw)
    }

    pub fn with_backend(raw: &str) -> Result<Self> {
        Ok(Self {
            backend_url: normalize_backend_url(raw)?,
            ..Self::default()
        })
    }

    /// `{backend}/api`, the root every endpoint path is joined onto.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.backend_url, API_PREFIX)
    }
}

fn normalize_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| anyhow!("invalid BACKEND_URL {:?}: {}", raw, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(anyhow!("BACKEND_URL must be http or https, got {}", other)),
    }
}
