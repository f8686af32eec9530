use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::data::{Position, PositionSnapshot};

/// Owns the current snapshot. `replace` installs a whole new value under the
/// write lock, so readers never observe a partially-updated position list;
/// when two refreshes race, the last writer wins.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<PositionSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(PositionSnapshot::empty())),
        }
    }

    pub async fn replace(&self, positions: Vec<Position>, observed_at: DateTime<Utc>) {
        let mut snapshot = self.inner.write().await;
        *snapshot = PositionSnapshot {
            updated_at: Some(observed_at),
            positions,
        };
    }

    pub async fn read(&self) -> PositionSnapshot {
        self.inner.read().await.clone()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
