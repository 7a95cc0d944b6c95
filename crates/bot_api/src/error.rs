use thiserror::Error;

/// Failures talking to the bot backend. None of these are fatal to the
/// dashboard: callers log them and wait for the next poll cycle.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {0}")]
    NotReady(reqwest::StatusCode),
}
