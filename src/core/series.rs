use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// One closing price at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub close: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(time: DateTime<Utc>, close: f64) -> Self {
        Self { time, close }
    }

    pub fn from_decimal(time: DateTime<Utc>, close: Decimal) -> ChartResult<Self> {
        Ok(Self {
            time,
            close: decimal_to_f64(close, "close")?,
        })
    }
}

/// Validated, chronologically ordered, non-empty price history.
///
/// A series is never mutated after construction; a new fetch replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<SeriesPoint>,
    min_close: f64,
    max_close: f64,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> ChartResult<Self> {
        let Some(first) = points.first() else {
            return Err(ChartError::EmptySeries);
        };

        let mut min_close = first.close;
        let mut max_close = first.close;
        for (index, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "close at index {index} must be finite"
                )));
            }
            if index > 0 && point.time < points[index - 1].time {
                return Err(ChartError::InvalidData(format!(
                    "sample at index {index} is older than its predecessor"
                )));
            }
            min_close = min_close.min(point.close);
            max_close = max_close.max(point.close);
        }

        Ok(Self {
            points,
            min_close,
            max_close,
        })
    }

    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SeriesPoint> {
        self.points.get(index)
    }

    #[must_use]
    pub fn first(&self) -> &SeriesPoint {
        &self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> &SeriesPoint {
        &self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }

    #[must_use]
    pub fn min_close(&self) -> f64 {
        self.min_close
    }

    #[must_use]
    pub fn max_close(&self) -> f64 {
        self.max_close
    }

    /// Last close minus first close.
    #[must_use]
    pub fn net_change(&self) -> f64 {
        self.last().close - self.first().close
    }

    /// Net change relative to the first close, in percent, rounded to two
    /// decimals. A zero first close yields `0.0`.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        let first = self.first().close;
        if first == 0.0 {
            return 0.0;
        }
        (self.net_change() / first * 10_000.0).round() / 100.0
    }
}
