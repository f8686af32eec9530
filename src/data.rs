use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
    Net,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    Cross,
    Isolated,
}

/// One open position for one instrument/side, as observed at `ts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub inst_id: String,
    pub pos_side: PositionSide,
    pub pos: Decimal,
    pub avg_px: Decimal,
    pub mark_px: Decimal,
    pub upl: Decimal,
    pub upl_ratio: Decimal,
    pub mgn_mode: Option<MarginMode>,
    pub lever: Option<Decimal>,
    pub ts: DateTime<Utc>,
}

/// The full consumer-facing view. `updated_at` is `None` until the first
/// successful fetch; `positions` keeps the exchange response order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub updated_at: Option<DateTime<Utc>>,
    pub positions: Vec<Position>,
}

impl PositionSnapshot {
    pub fn empty() -> Self {
        Self {
            updated_at: None,
            positions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLogEntry {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl TradeLogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            created_at: Utc::now(),
        }
    }
}

/// A position record as OKX sends it: every field a string, most of them
/// optional. Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPosition {
    #[serde(rename = "instId")]
    pub inst_id: Option<String>,
    #[serde(rename = "posSide")]
    pub pos_side: Option<String>,
    pub pos: Option<String>,
    #[serde(rename = "avgPx")]
    pub avg_px: Option<String>,
    #[serde(rename = "markPx")]
    pub mark_px: Option<String>,
    pub upl: Option<String>,
    #[serde(rename = "uplRatio")]
    pub upl_ratio: Option<String>,
    #[serde(rename = "mgnMode")]
    pub mgn_mode: Option<String>,
    pub lever: Option<String>,
    #[serde(rename = "uTime")]
    pub u_time: Option<String>,
}

/// Response envelope of the positions endpoint. A missing `data` array is
/// the same as an empty one.
#[derive(Debug, Deserialize)]
pub struct PositionsEnvelope {
    #[serde(default)]
    pub data: Vec<RawPosition>,
}
