use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::data::{MarginMode, Position, PositionSide};
use crate::error::TrackerResult;

const SHEET_HEADERS: [&str; 10] = [
    "instId", "posSide", "pos", "avgPx", "markPx", "upl", "uplRatio", "mgnMode", "lever",
    "timestamp",
];

/// Writes the current positions as a CSV sheet. Every successful refresh
/// rewrites the whole file; a flat book leaves a header-only sheet.
pub struct PositionExporter {
    path: PathBuf,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    inst_id: &'a str,
    pos_side: PositionSide,
    pos: Decimal,
    avg_px: Decimal,
    mark_px: Decimal,
    upl: Decimal,
    upl_ratio: Decimal,
    mgn_mode: Option<MarginMode>,
    lever: Option<Decimal>,
    timestamp: DateTime<Utc>,
}

impl<'a> From<&'a Position> for ExportRow<'a> {
    fn from(pos: &'a Position) -> Self {
        Self {
            inst_id: &pos.inst_id,
            pos_side: pos.pos_side,
            pos: pos.pos,
            avg_px: pos.avg_px,
            mark_px: pos.mark_px,
            upl: pos.upl,
            upl_ratio: pos.upl_ratio,
            mgn_mode: pos.mgn_mode,
            lever: pos.lever,
            timestamp: pos.ts,
        }
    }
}

impl PositionExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_positions(&self, positions: &[Position]) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Header is written explicitly so an empty book still produces a
        // well-formed sheet.
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(SHEET_HEADERS)?;
        for pos in positions {
            writer.serialize(ExportRow::from(pos))?;
        }
        writer.flush()?;

        debug!(
            "Exported {} positions to {}",
            positions.len(),
            self.path.display()
        );
        Ok(())
    }
}
