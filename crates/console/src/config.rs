use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_POLL_SECS: u64 = 60;

/// Runtime configuration, read once at startup from the environment
/// (dotenvy has already loaded `.env` by then).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let base_url = env::var("DASHBOARD_BASE_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let poll_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POLL_SECS);

        Self {
            base_url,
            poll_interval: Duration::from_secs(poll_secs),
        }
    }
}

/// Endpoint paths are joined with a leading slash.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
