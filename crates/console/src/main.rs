use std::sync::Arc;

use dotenvy::dotenv;
use tokio::sync::broadcast;
use tracing::debug;

use bot_api::remote::DashboardClient;
use bot_api::services::{ControlService, PollService};
use common::actors::ActorType;
use common::logger;
use common::models::{ControlIntent, ViewEvent};
use dashboard::router::ViewRouter;
use dashboard::services::ViewService;
use dashboard::surface::Surface;

use crate::actors::supervisor::Supervisor;
use crate::config::Config;
use crate::log_surface::LogSurface;

mod actors;
mod config;
mod input;
mod log_surface;

const VIEWS: &[&str] = &["overview", "signals", "history"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_logger();
    dotenv().ok();
    debug!("Dashboard console starting up...");

    let config = Config::from_env();
    let client = Arc::new(DashboardClient::new(config.base_url.clone()));

    let (view_tx, _) = broadcast::channel::<Arc<ViewEvent>>(1_024);
    let (intent_tx, _) = broadcast::channel::<ControlIntent>(64);

    // Region availability is resolved once at wiring time; with no signal
    // regions the poller would skip that endpoint altogether.
    let signals_wanted = LogSurface::default().has_signal_regions();

    let mut supervisor = Supervisor::new();

    let rx_for_view = view_tx.subscribe();
    supervisor.register_actor(
        ActorType::ViewActor,
        Box::new(move || {
            Box::new(ViewService::new(
                LogSurface::default(),
                rx_for_view.resubscribe(),
            ))
        }),
    );

    let client_for_poll = client.clone();
    let tx_for_poll = view_tx.clone();
    let poll_interval = config.poll_interval;
    supervisor.register_actor(
        ActorType::PollActor,
        Box::new(move || {
            Box::new(PollService::new(
                client_for_poll.clone(),
                tx_for_poll.clone(),
                poll_interval,
                signals_wanted,
            ))
        }),
    );

    let client_for_control = client.clone();
    let rx_for_control = intent_tx.subscribe();
    let tx_for_control = view_tx.clone();
    supervisor.register_actor(
        ActorType::ControlActor,
        Box::new(move || {
            Box::new(ControlService::new(
                client_for_control.clone(),
                rx_for_control.resubscribe(),
                tx_for_control.clone(),
            ))
        }),
    );

    tokio::spawn(input::read_commands(
        intent_tx.clone(),
        ViewRouter::new(VIEWS),
    ));

    supervisor.start().await;
    Ok(())
}
