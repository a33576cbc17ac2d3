use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ChartCanvas, PeriodKey};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::validation::validate_chart_config;

/// Environment variable overriding `BackendConfig::base_url`.
pub const BACKEND_URL_ENV: &str = "PRICE_CHART_API_URL";

/// Time zone used when rendering time labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelTimeZone {
    /// Host machine time zone, as a browser would display it.
    #[default]
    Local,
    Utc,
    FixedOffsetMinutes { minutes: i16 },
}

impl LabelTimeZone {
    #[must_use]
    pub(crate) fn offset_minutes(self) -> i16 {
        match self {
            Self::Local | Self::Utc => 0,
            Self::FixedOffsetMinutes { minutes } => minutes,
        }
    }

    #[must_use]
    pub(crate) fn fixed_offset(self) -> FixedOffset {
        let seconds = i32::from(self.offset_minutes()) * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }
}

/// Visual constants of the series and hover glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub positive_color: Color,
    pub negative_color: Color,
    pub line_width: f64,
    /// Area fill opacity at the top of the canvas; fades to `area_bottom_alpha`.
    pub area_top_alpha: f64,
    pub area_bottom_alpha: f64,
    pub guide_color: Color,
    pub guide_width: f64,
    pub guide_dash: (f64, f64),
    pub marker_radius: f64,
    pub marker_outline_color: Color,
    pub marker_outline_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            positive_color: Color::rgb8(0x34, 0xd3, 0x99),
            negative_color: Color::rgb8(0xf8, 0x71, 0x71),
            line_width: 1.5,
            area_top_alpha: 0.15,
            area_bottom_alpha: 0.0,
            guide_color: Color::rgba(1.0, 1.0, 1.0, 0.2),
            guide_width: 1.0,
            guide_dash: (3.0, 3.0),
            marker_radius: 4.0,
            marker_outline_color: Color::rgb8(0x06, 0x08, 0x0f),
            marker_outline_width: 2.0,
        }
    }
}

/// Stage list and cadence of the simulated analysis progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub interval_ms: u64,
    pub stages: SmallVec<[String; 8]>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_ms: 11_000,
            stages: ["Fundamentals", "Sentiment", "Technicals", "SEC Filings", "Synthesis"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl ProgressConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Location of the chart/analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    /// Per-request timeout for series fetches. The analysis request is not
    /// bounded; it is expected to run for minutes.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_ms: 15_000,
        }
    }
}

impl BackendConfig {
    /// Defaults, with `base_url` taken from `PRICE_CHART_API_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                config.base_url = url.to_owned();
            }
        }
        config
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can ship chart setup as JSON; every field falls
/// back to its default when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub canvas: ChartCanvas,
    #[serde(default)]
    pub initial_period: PeriodKey,
    #[serde(default)]
    pub timezone: LabelTimeZone,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn with_canvas(mut self, canvas: ChartCanvas) -> Self {
        self.canvas = canvas;
        self
    }

    #[must_use]
    pub fn with_initial_period(mut self, period: PeriodKey) -> Self {
        self.initial_period = period;
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: LabelTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_chart_config(&self)?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}
