use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};
use uuid::Uuid;

use common::{
    actors::{Actor, ActorType, ControlMessage},
    models::ViewEvent,
};

use crate::reconciler;
use crate::signal_feed;
use crate::surface::Surface;

/// Sole writer of the display surface. Poll results and command
/// confirmations all funnel through this actor's queue, so concurrent
/// producers can never interleave half-applied updates.
pub struct ViewService<S> {
    id: Uuid,
    surface: S,
    view_rx: broadcast::Receiver<Arc<ViewEvent>>,
}

#[async_trait]
impl<S: Surface + Sync + 'static> Actor for ViewService<S> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> ActorType {
        ActorType::ViewActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting view service");

        loop {
            match self.view_rx.recv().await {
                Ok(event) => self.handle(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Safe to drop: every event is a full replacement.
                    warn!("View service lagged: dropped {} updates", n);
                }
                Err(_) => {
                    heartbeat_handle.abort();
                    supervisor_tx
                        .send(ControlMessage::Shutdown(ActorType::ViewActor))
                        .await?;
                    anyhow::bail!("View event channel closed.")
                }
            }
        }
    }
}

impl<S: Surface> ViewService<S> {
    pub fn new(surface: S, view_rx: broadcast::Receiver<Arc<ViewEvent>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            surface,
            view_rx,
        }
    }

    pub fn handle(&mut self, event: &ViewEvent) {
        match event {
            ViewEvent::Status(raw) => reconciler::apply_status(&mut self.surface, raw),
            ViewEvent::Signals(signals) => signal_feed::apply_signals(&mut self.surface, signals),
            ViewEvent::ModeApplied(mode) => reconciler::apply_mode_badge(&mut self.surface, mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, TextRegion};
    use serde_json::json;

    fn service() -> ViewService<MemorySurface> {
        let (_tx, rx) = broadcast::channel(16);
        ViewService::new(MemorySurface::new(), rx)
    }

    #[test]
    fn mode_confirmation_lands_before_the_next_poll() {
        let mut service = service();
        service.handle(&ViewEvent::Status(json!({"mode": "safe"})));
        assert_eq!(service.surface.texts[&TextRegion::ModeBadge], "MODE: SAFE");

        service.handle(&ViewEvent::ModeApplied("aggressive".to_string()));
        assert_eq!(
            service.surface.texts[&TextRegion::ModeBadge],
            "MODE: AGGRESSIVE"
        );
    }

    #[test]
    fn later_polls_overwrite_optimistic_state() {
        let mut service = service();
        service.handle(&ViewEvent::ModeApplied("aggressive".to_string()));
        service.handle(&ViewEvent::Status(json!({"mode": "balanced"})));

        assert_eq!(
            service.surface.texts[&TextRegion::ModeBadge],
            "MODE: BALANCED"
        );
        assert_eq!(service.surface.mode_choice.as_deref(), Some("BALANCED"));
    }

    #[test]
    fn status_and_signals_write_disjoint_regions() {
        let mut service = service();
        service.handle(&ViewEvent::Status(json!({"symbol": "XAUUSD"})));
        service.handle(&ViewEvent::Signals(vec![common::models::SignalEvent {
            time: Some("10:00".to_string()),
            ..Default::default()
        }]));

        assert_eq!(service.surface.texts[&TextRegion::SymbolCard], "XAUUSD");
        assert_eq!(service.surface.signal_rows.len(), 1);
    }
}
