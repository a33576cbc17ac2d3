use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Selected time range of the chart.
///
/// Drives both the backend request granularity and the label format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum PeriodKey {
    #[serde(rename = "1D")]
    Intraday,
    #[serde(rename = "1W")]
    Week,
    #[default]
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "3M")]
    Quarter,
    #[serde(rename = "6M")]
    HalfYear,
    #[serde(rename = "1Y")]
    Year,
    #[serde(rename = "5Y")]
    FiveYear,
    #[serde(rename = "MAX")]
    Max,
}

impl PeriodKey {
    /// Selector order shown to users.
    pub const ALL: [Self; 8] = [
        Self::Intraday,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::HalfYear,
        Self::Year,
        Self::FiveYear,
        Self::Max,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Intraday => "1D",
            Self::Week => "1W",
            Self::Month => "1M",
            Self::Quarter => "3M",
            Self::HalfYear => "6M",
            Self::Year => "1Y",
            Self::FiveYear => "5Y",
            Self::Max => "MAX",
        }
    }

    /// History range requested from the quote vendor.
    #[must_use]
    pub const fn vendor_range(self) -> &'static str {
        match self {
            Self::Intraday => "1d",
            Self::Week => "5d",
            Self::Month => "1mo",
            Self::Quarter => "3mo",
            Self::HalfYear => "6mo",
            Self::Year => "1y",
            Self::FiveYear => "5y",
            Self::Max => "max",
        }
    }

    /// Sampling interval requested from the quote vendor.
    #[must_use]
    pub const fn vendor_interval(self) -> &'static str {
        match self {
            Self::Intraday => "5m",
            Self::Week => "1h",
            Self::Month | Self::Quarter | Self::HalfYear | Self::Year => "1d",
            Self::FiveYear => "1wk",
            Self::Max => "1mo",
        }
    }

    #[must_use]
    pub const fn is_intraday(self) -> bool {
        matches!(self, Self::Intraday)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PeriodKey {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        let code = input.trim();
        Self::ALL
            .into_iter()
            .find(|period| period.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown period code `{code}`")))
    }
}
