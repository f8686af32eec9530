use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::data::{PositionSnapshot, TradeLogEntry};
use crate::error::TrackerResult;
use crate::export::PositionExporter;
use crate::journal::TradeJournal;
use crate::normalize::parse_positions;
use crate::rest_client::PositionsSource;
use crate::store::SnapshotStore;

pub struct PositionPoller<S: PositionsSource> {
    pub source: Arc<S>,
    pub store: SnapshotStore,
    pub exporter: Arc<PositionExporter>,
    pub journal: Arc<TradeJournal>,
    pub inst_type: Option<String>,
    pub poll_interval: Duration,
}

impl<S: PositionsSource> PositionPoller<S> {
    /// One full refresh cycle, shared by the background loop and the manual
    /// refresh endpoint: fetch, normalize, replace the snapshot, rewrite the
    /// sheet. Any error leaves the previous snapshot in place.
    pub async fn refresh_once(&self) -> TrackerResult<PositionSnapshot> {
        let raw = self
            .source
            .fetch_positions(self.inst_type.as_deref())
            .await?;
        let positions = parse_positions(&raw)?;
        let observed_at = Utc::now();
        self.store.replace(positions.clone(), observed_at).await;
        self.exporter.write_positions(&positions)?;
        Ok(PositionSnapshot {
            updated_at: Some(observed_at),
            positions,
        })
    }

    /// One background iteration. Failures are journaled and the loop moves
    /// on; stale-but-valid data beats no data.
    pub async fn tick(&self) {
        match self.refresh_once().await {
            Ok(snapshot) => {
                info!("Refreshed {} open positions", snapshot.positions.len());
            }
            Err(err) => {
                let entry = TradeLogEntry::new(format!("Position polling failed: {}", err));
                if let Err(journal_err) = self.journal.append(&entry) {
                    warn!("Failed to journal polling error: {}", journal_err);
                }
            }
        }
    }

    /// Poll loop. The sleep starts after the cycle completes, so a slow
    /// fetch never causes back-to-back fetches.
    pub async fn run(&self) {
        info!(
            "Position poll loop started, interval {:.1}s",
            self.poll_interval.as_secs_f64()
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
