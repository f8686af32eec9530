use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use tracing::info;

use crate::data::TradeLogEntry;
use crate::error::TrackerResult;

/// Append-only flat journal file. Strictly local file I/O.
pub struct TradeJournal {
    path: PathBuf,
}

impl TradeJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &TradeLogEntry) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let stamp = entry.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = match &entry.context {
            Some(ctx) => format!("{} [INFO] {} | context={}\n", stamp, entry.message, ctx),
            None => format!("{} [INFO] {}\n", stamp, entry.message),
        };
        file.write_all(line.as_bytes())?;

        info!("journal: {}", entry.message);
        Ok(())
    }
}
