use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds a price to cents, half away from zero, the way quote vendors do.
///
/// Non-finite or out-of-range values come back as `None`.
#[must_use]
pub fn price_to_cents(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|price| {
        price.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    })
}

/// Parses the timestamp formats emitted by the chart backend.
///
/// Accepted, in order: RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM` (optionally
/// with fractional seconds), naive `YYYY-MM-DD HH:MM:SS` read as UTC, and a
/// bare `YYYY-MM-DD` read as UTC midnight.
pub fn parse_series_timestamp(raw: &str) -> ChartResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, pattern) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for pattern in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(ChartError::InvalidData(format!("unrecognized timestamp `{raw}`")))
}
