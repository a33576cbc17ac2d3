use chrono::{DateTime, Local, TimeZone, Utc};

use crate::core::{PeriodKey, Series, price_to_cents};

use super::LabelTimeZone;

/// Time-label layout selected by the active period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLabelPattern {
    /// `9:30:00 AM`
    TimeSecond,
    /// `Tue, Jan 2 · 9:30 AM`
    WeekdayDateMinute,
    /// `Jan 2024`
    MonthYear,
    /// `Jan 2, 2024`
    MonthDayYear,
}

impl TimeLabelPattern {
    #[must_use]
    pub const fn for_period(period: PeriodKey) -> Self {
        match period {
            PeriodKey::Intraday => Self::TimeSecond,
            PeriodKey::Week => Self::WeekdayDateMinute,
            PeriodKey::FiveYear | PeriodKey::Max => Self::MonthYear,
            PeriodKey::Month | PeriodKey::Quarter | PeriodKey::HalfYear | PeriodKey::Year => {
                Self::MonthDayYear
            }
        }
    }

    const fn strftime(self) -> &'static str {
        match self {
            Self::TimeSecond => "%-I:%M:%S %p",
            Self::WeekdayDateMinute => "%a, %b %-d · %-I:%M %p",
            Self::MonthYear => "%b %Y",
            Self::MonthDayYear => "%b %-d, %Y",
        }
    }
}

/// Formats timestamps and prices for the hover readout and axis captions.
///
/// Hover labels and axis endpoint labels go through the same
/// `format_time` call so both always agree for a given period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelFormatter {
    timezone: LabelTimeZone,
}

impl LabelFormatter {
    #[must_use]
    pub fn new(timezone: LabelTimeZone) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub fn timezone(self) -> LabelTimeZone {
        self.timezone
    }

    #[must_use]
    pub fn format_time(self, time: DateTime<Utc>, period: PeriodKey) -> String {
        let pattern = TimeLabelPattern::for_period(period).strftime();
        match self.timezone {
            LabelTimeZone::Local => format_in(time, &Local, pattern),
            LabelTimeZone::Utc => format_in(time, &Utc, pattern),
            LabelTimeZone::FixedOffsetMinutes { .. } => {
                format_in(time, &self.timezone.fixed_offset(), pattern)
            }
        }
    }

    /// Axis endpoint captions: `"{first} · $min"` and `"$max · {last}"`.
    #[must_use]
    pub fn axis_endpoints(self, series: &Series, period: PeriodKey) -> AxisEndpointLabels {
        AxisEndpointLabels {
            start: format!(
                "{} · {}",
                self.format_time(series.first().time, period),
                format_price_label(series.min_close())
            ),
            end: format!(
                "{} · {}",
                format_price_label(series.max_close()),
                self.format_time(series.last().time, period)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisEndpointLabels {
    pub start: String,
    pub end: String,
}

fn format_in<Tz: TimeZone>(time: DateTime<Utc>, zone: &Tz, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(zone).format(pattern).to_string()
}

/// `$123.45`; negative prices render as `-$1.50`.
#[must_use]
pub fn format_price_label(price: f64) -> String {
    match price_to_cents(price) {
        Some(cents) if cents.is_sign_negative() && !cents.is_zero() => {
            format!("-${:.2}", cents.abs())
        }
        Some(cents) => format!("${:.2}", cents.abs()),
        None => "$--".to_owned(),
    }
}

/// `+1.23%` for gains (including zero), `-0.50%` for losses.
#[must_use]
pub fn format_change_percent(change_percent: f64) -> String {
    if !change_percent.is_finite() {
        return "--".to_owned();
    }
    if change_percent >= 0.0 {
        // `abs` folds negative zero into `+0.00%`.
        format!("+{:.2}%", change_percent.abs())
    } else {
        format!("{change_percent:.2}%")
    }
}

/// Idle readout shown while the pointer is outside the chart.
#[must_use]
pub fn hover_hint(period: PeriodKey) -> &'static str {
    if period.is_intraday() {
        "Hover over chart to see price at each minute"
    } else {
        "Hover over chart to see historical price"
    }
}
