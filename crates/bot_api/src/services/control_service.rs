use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use uuid::Uuid;

use common::{
    actors::{Actor, ActorType, ControlMessage},
    models::{ControlIntent, ViewEvent},
};

use crate::traits::ControlBackend;

/// Relays operator commands to the bot backend, fire-and-forget. A failed
/// command is only logged; the next poll cycle re-syncs the controls to
/// whatever the backend actually accepted.
pub struct ControlService<B> {
    id: Uuid,
    backend: Arc<B>,
    intent_rx: broadcast::Receiver<ControlIntent>,
    view_tx: broadcast::Sender<Arc<ViewEvent>>,
}

#[async_trait]
impl<B: ControlBackend + 'static> Actor for ControlService<B> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::ControlActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting control relay service");

        loop {
            match self.intent_rx.recv().await {
                Ok(intent) => Self::dispatch(&*self.backend, &self.view_tx, intent).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Control relay lagged: missed {} commands", n);
                }
                Err(_) => {
                    heartbeat_handle.abort();
                    supervisor_tx
                        .send(ControlMessage::Shutdown(ActorType::ControlActor))
                        .await?;
                    anyhow::bail!("Control intent channel closed.")
                }
            }
        }
    }
}

impl<B: ControlBackend + 'static> ControlService<B> {
    pub fn new(
        backend: Arc<B>,
        intent_rx: broadcast::Receiver<ControlIntent>,
        view_tx: broadcast::Sender<Arc<ViewEvent>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            backend,
            intent_rx,
            view_tx,
        }
    }

    async fn dispatch(
        backend: &B,
        view_tx: &broadcast::Sender<Arc<ViewEvent>>,
        intent: ControlIntent,
    ) {
        match intent {
            // The toggle control already shows the user's own input; only
            // the next poll corrects any divergence.
            ControlIntent::ToggleTrading(enabled) => match backend.toggle_trading(enabled).await {
                Ok(reply) => info!("Toggle acknowledged: {}", reply),
                Err(e) => error!("Toggle failed: {}", e),
            },
            ControlIntent::SetMode(mode) => match backend.set_mode(&mode).await {
                Ok(reply) => {
                    info!("Mode change acknowledged: {}", reply);
                    let _ = view_tx.send(Arc::new(ViewEvent::ModeApplied(mode)));
                }
                Err(e) => error!("Mode change failed: {}", e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::traits::MockControlBackend;
    use serde_json::json;

    fn view_channel() -> (
        broadcast::Sender<Arc<ViewEvent>>,
        broadcast::Receiver<Arc<ViewEvent>>,
    ) {
        broadcast::channel(16)
    }

    #[tokio::test]
    async fn accepted_mode_change_updates_view_immediately() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_set_mode()
            .withf(|mode| mode == "AGGRESSIVE")
            .returning(|_| Ok(json!({"success": true})));
        let (view_tx, mut view_rx) = view_channel();

        ControlService::dispatch(
            &backend,
            &view_tx,
            ControlIntent::SetMode("AGGRESSIVE".to_string()),
        )
        .await;

        let event = view_rx.try_recv().expect("expected optimistic update");
        assert!(matches!(&*event, ViewEvent::ModeApplied(m) if m == "AGGRESSIVE"));
    }

    #[tokio::test]
    async fn failed_mode_change_is_swallowed() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_set_mode()
            .returning(|_| Err(ApiError::NotReady(reqwest::StatusCode::INTERNAL_SERVER_ERROR)));
        let (view_tx, mut view_rx) = view_channel();

        ControlService::dispatch(
            &backend,
            &view_tx,
            ControlIntent::SetMode("BALANCED".to_string()),
        )
        .await;

        assert!(
            view_rx.try_recv().is_err(),
            "no optimistic update on failure, no rollback either"
        );
    }

    #[tokio::test]
    async fn toggle_never_touches_the_view() {
        let mut backend = MockControlBackend::new();
        backend
            .expect_toggle_trading()
            .withf(|&enabled| enabled)
            .returning(|_| Ok(json!({"success": true, "control": {"trading_enabled": true}})));
        let (view_tx, mut view_rx) = view_channel();

        ControlService::dispatch(&backend, &view_tx, ControlIntent::ToggleTrading(true)).await;

        assert!(view_rx.try_recv().is_err());
    }
}
