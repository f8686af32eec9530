use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::data::{MarginMode, Position, PositionSide, RawPosition};
use crate::error::{TrackerError, TrackerResult};

/// Converts one raw wire record into the canonical entity. Required numeric
/// fields default to zero when the exchange omits them; a present but
/// unparseable value is an error naming the field and the instrument.
pub fn parse_position(raw: &RawPosition) -> TrackerResult<Position> {
    let inst_id = raw.inst_id.clone().unwrap_or_default();

    let pos_side = match raw.pos_side.as_deref() {
        Some("long") => PositionSide::Long,
        Some("short") => PositionSide::Short,
        Some("net") | Some("") | None => PositionSide::Net,
        Some(other) => {
            return Err(TrackerError::InvalidPositionData(format!(
                "{}: unknown posSide {:?}",
                inst_id, other
            )))
        }
    };

    let mgn_mode = match raw.mgn_mode.as_deref() {
        Some("cross") => Some(MarginMode::Cross),
        Some("isolated") => Some(MarginMode::Isolated),
        _ => None,
    };

    // Leverage stays absent unless the field is present and parses.
    let lever = raw.lever.as_deref().and_then(|s| Decimal::from_str(s).ok());

    let ts = match raw.u_time.as_deref() {
        Some(ms) if !ms.is_empty() => {
            let millis = ms.parse::<i64>().map_err(|_| {
                TrackerError::InvalidPositionData(format!(
                    "{}: unparseable uTime {:?}",
                    inst_id, ms
                ))
            })?;
            DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
                TrackerError::InvalidPositionData(format!(
                    "{}: uTime {} out of range",
                    inst_id, millis
                ))
            })?
        }
        _ => Utc::now(),
    };

    Ok(Position {
        pos: required_decimal("pos", raw.pos.as_deref(), &inst_id)?,
        avg_px: required_decimal("avgPx", raw.avg_px.as_deref(), &inst_id)?,
        mark_px: required_decimal("markPx", raw.mark_px.as_deref(), &inst_id)?,
        upl: required_decimal("upl", raw.upl.as_deref(), &inst_id)?,
        upl_ratio: required_decimal("uplRatio", raw.upl_ratio.as_deref(), &inst_id)?,
        inst_id,
        pos_side,
        mgn_mode,
        lever,
        ts,
    })
}

/// Normalizes a whole fetch. The first bad record aborts the batch so a
/// half-normalized snapshot never replaces a complete one.
pub fn parse_positions(raw: &[RawPosition]) -> TrackerResult<Vec<Position>> {
    raw.iter().map(parse_position).collect()
}

fn required_decimal(field: &str, value: Option<&str>, inst_id: &str) -> TrackerResult<Decimal> {
    match value {
        None => Ok(Decimal::ZERO),
        Some(s) => Decimal::from_str(s).map_err(|_| {
            TrackerError::InvalidPositionData(format!(
                "{}: unparseable {} {:?}",
                inst_id, field, s
            ))
        }),
    }
}
