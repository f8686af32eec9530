mod config;
mod data;
mod error;
mod export;
mod journal;
mod normalize;
mod poller;
mod rest_client;
mod server;
mod sign;
mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::export::PositionExporter;
use crate::journal::TradeJournal;
use crate::poller::PositionPoller;
use crate::rest_client::OkxClient;
use crate::store::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub poller: Arc<PositionPoller<OkxClient>>,
    pub store: SnapshotStore,
    pub journal: Arc<TradeJournal>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing credentials are fatal; the process must not serve traffic.
    let config = Arc::new(Config::from_env()?);
    let client = Arc::new(OkxClient::new(&config)?);

    let store = SnapshotStore::new();
    let journal = Arc::new(TradeJournal::new(config.log_path.clone()));
    let exporter = Arc::new(PositionExporter::new(config.export_path.clone()));
    info!("Journaling to {}", journal.path().display());

    let poller = Arc::new(PositionPoller {
        source: client.clone(),
        store: store.clone(),
        exporter,
        journal: journal.clone(),
        inst_type: config.inst_type_filter().map(str::to_string),
        poll_interval: Duration::from_secs_f64(config.poll_interval_secs),
    });

    let poll_task = tokio::spawn({
        let poller = poller.clone();
        async move { poller.run().await }
    });

    let state = AppState {
        poller: poller.clone(),
        store,
        journal,
    };
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Position tracker listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown in reverse order of acquisition: stop the poll loop first so
    // no fetch is in flight when the client's pool is dropped.
    poll_task.abort();
    let _ = poll_task.await;
    drop(poller);
    match Arc::try_unwrap(client) {
        Ok(client) => client.close(),
        Err(_) => warn!("Exchange client still shared at shutdown"),
    }

    info!("Position tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
    }
}
