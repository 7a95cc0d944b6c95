use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use common::models::SignalEvent;

use crate::error::ApiError;
use crate::traits::ControlBackend;

/// HTTP client for the bot's dashboard API.
#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .user_agent("bot_dashboard/0.1.0")
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client."),
            base_url,
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::NotReady(status));
        }
        Ok(resp.json::<Value>().await?)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} {}", url, body);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::NotReady(status));
        }
        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl ControlBackend for DashboardClient {
    async fn fetch_status(&self) -> Result<Value, ApiError> {
        self.get_json("/api/status").await
    }

    async fn fetch_signals(&self) -> Result<Vec<SignalEvent>, ApiError> {
        let url = format!("{}/api/signals", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::NotReady(status));
        }
        Ok(resp.json::<Vec<SignalEvent>>().await?)
    }

    async fn toggle_trading(&self, enabled: bool) -> Result<Value, ApiError> {
        self.post_json("/api/toggle", &json!({ "trading_enabled": enabled }))
            .await
    }

    async fn set_mode(&self, mode: &str) -> Result<Value, ApiError> {
        self.post_json("/api/set_mode", &json!({ "mode": mode }))
            .await
    }
}
