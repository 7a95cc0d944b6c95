use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
    time,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{
    actors::{Actor, ActorType, ControlMessage},
    models::ViewEvent,
};

use crate::traits::ControlBackend;

/// Drives the fixed-interval refresh of status + signal feed. A tick never
/// waits for an in-flight fetch; every apply fully replaces display state,
/// so a slow response that lands late is harmless.
pub struct PollService<B> {
    id: Uuid,
    backend: Arc<B>,
    view_tx: broadcast::Sender<Arc<ViewEvent>>,
    interval: Duration,
    signals_wanted: bool,
}

#[async_trait]
impl<B: ControlBackend + 'static> Actor for PollService<B> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::PollActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let _heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting poll service, refresh every {:?}", self.interval);

        // First tick completes immediately: one fetch at startup.
        let mut ticker = time::interval(self.interval);

        loop {
            ticker.tick().await;
            self.spawn_refreshes();
        }
    }
}

impl<B: ControlBackend + 'static> PollService<B> {
    pub fn new(
        backend: Arc<B>,
        view_tx: broadcast::Sender<Arc<ViewEvent>>,
        interval: Duration,
        signals_wanted: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            backend,
            view_tx,
            interval,
            signals_wanted,
        }
    }

    /// Detaches the per-tick fetches. Status and signals run concurrently;
    /// neither failure blocks the other.
    fn spawn_refreshes(&self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(2);

        let backend = self.backend.clone();
        let view_tx = self.view_tx.clone();
        handles.push(tokio::spawn(async move {
            Self::refresh_status(&*backend, &view_tx).await;
        }));

        // No signal region rendered means no reason to hit the endpoint.
        if self.signals_wanted {
            let backend = self.backend.clone();
            let view_tx = self.view_tx.clone();
            handles.push(tokio::spawn(async move {
                Self::refresh_signals(&*backend, &view_tx).await;
            }));
        }

        handles
    }

    async fn refresh_status(backend: &B, view_tx: &broadcast::Sender<Arc<ViewEvent>>) {
        match backend.fetch_status().await {
            Ok(raw) => {
                let _ = view_tx.send(Arc::new(ViewEvent::Status(raw)));
            }
            Err(e) => warn!("Status not ready, keeping last view: {}", e),
        }
    }

    async fn refresh_signals(backend: &B, view_tx: &broadcast::Sender<Arc<ViewEvent>>) {
        match backend.fetch_signals().await {
            Ok(signals) => {
                debug!("Fetched {} signals", signals.len());
                let _ = view_tx.send(Arc::new(ViewEvent::Signals(signals)));
            }
            Err(e) => warn!("Signal fetch failed, keeping last view: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::traits::MockControlBackend;
    use serde_json::json;

    fn channel() -> (
        broadcast::Sender<Arc<ViewEvent>>,
        broadcast::Receiver<Arc<ViewEvent>>,
    ) {
        broadcast::channel(16)
    }

    #[tokio::test]
    async fn successful_status_fetch_is_published() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_fetch_status()
            .returning(|| Ok(json!({"mode": "safe", "symbol": "XAUUSD"})));
        let (tx, mut rx) = channel();

        PollService::refresh_status(&backend, &tx).await;

        let event = rx.try_recv().expect("expected a status event");
        match &*event {
            ViewEvent::Status(raw) => assert_eq!(raw["symbol"], "XAUUSD"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_status_fetch_publishes_nothing() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_fetch_status()
            .returning(|| Err(ApiError::NotReady(reqwest::StatusCode::NOT_FOUND)));
        let (tx, mut rx) = channel();

        PollService::refresh_status(&backend, &tx).await;

        assert!(
            rx.try_recv().is_err(),
            "a failed fetch must leave the prior view untouched"
        );
    }

    #[tokio::test]
    async fn signal_failure_does_not_block_status() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_fetch_status()
            .returning(|| Ok(json!({"symbol": "XAUUSD"})));
        backend
            .expect_fetch_signals()
            .returning(|| Err(ApiError::NotReady(reqwest::StatusCode::BAD_GATEWAY)));
        let (tx, mut rx) = channel();

        PollService::refresh_status(&backend, &tx).await;
        PollService::refresh_signals(&backend, &tx).await;

        let event = rx.try_recv().expect("status should still arrive");
        assert!(matches!(&*event, ViewEvent::Status(_)));
        assert!(rx.try_recv().is_err(), "no signal event on failure");
    }

    #[tokio::test]
    async fn tick_skips_signal_fetch_without_regions() {
        let mut backend = MockControlBackend::new();
        backend.expect_fetch_status().returning(|| Ok(json!({})));
        backend.expect_fetch_signals().never();
        let (tx, mut rx) = channel();

        let service = PollService::new(Arc::new(backend), tx, Duration::from_secs(60), false);
        for handle in service.spawn_refreshes() {
            handle.await.expect("refresh task panicked");
        }

        let event = rx.try_recv().expect("status still refreshes");
        assert!(matches!(&*event, ViewEvent::Status(_)));
        assert!(rx.try_recv().is_err());
    }
}
