use async_trait::async_trait;
use serde_json::Value;

use common::models::SignalEvent;

use crate::error::ApiError;

/// The remote surface of the trading bot, as the dashboard sees it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlBackend: Send + Sync {
    /// Current status snapshot, loosely typed on purpose.
    async fn fetch_status(&self) -> Result<Value, ApiError>;

    /// Full signal history, oldest first.
    async fn fetch_signals(&self) -> Result<Vec<SignalEvent>, ApiError>;

    async fn toggle_trading(&self, enabled: bool) -> Result<Value, ApiError>;

    async fn set_mode(&self, mode: &str) -> Result<Value, ApiError>;
}
