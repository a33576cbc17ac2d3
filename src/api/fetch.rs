use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{PeriodKey, Series, SeriesPoint, Ticker, parse_series_timestamp};
use crate::error::{ChartError, FetchError};

/// Key of one series fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub ticker: Ticker,
    pub period: PeriodKey,
}

impl SeriesRequest {
    #[must_use]
    pub fn new(ticker: Ticker, period: PeriodKey) -> Self {
        Self { ticker, period }
    }
}

/// Tag attached to an issued fetch.
///
/// Only the ticket carrying the latest generation may change chart state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    request: SeriesRequest,
}

impl RequestTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn request(&self) -> &SeriesRequest {
        &self.request
    }
}

/// Monotonic generation counter deciding which response may be applied.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
    settled: bool,
}

impl RequestTracker {
    /// Issues a ticket that supersedes every ticket issued before it.
    pub fn issue(&mut self, request: SeriesRequest) -> RequestTicket {
        self.latest += 1;
        self.settled = false;
        debug!(
            generation = self.latest,
            ticker = %request.ticker,
            period = %request.period,
            "series request issued"
        );
        RequestTicket {
            generation: self.latest,
            request,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.latest && !self.settled
    }

    /// Consumes the right to apply a response. Returns `true` exactly once,
    /// and only for the latest ticket.
    pub fn settle(&mut self, ticket: &RequestTicket) -> bool {
        if !self.is_current(ticket) {
            trace!(
                generation = ticket.generation,
                latest = self.latest,
                settled = self.settled,
                "dropping stale series response"
            );
            return false;
        }
        self.settled = true;
        true
    }

    /// Marks the outstanding request as abandoned without issuing a new one.
    pub fn abandon(&mut self) {
        self.settled = true;
    }

    #[must_use]
    pub fn has_outstanding(&self) -> bool {
        self.latest > 0 && !self.settled
    }
}

/// One sample as sent by the chart backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadPoint {
    #[serde(alias = "timestamp")]
    pub date: String,
    pub close: f64,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// Chart backend response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, alias = "points")]
    pub data: Option<Vec<PayloadPoint>>,
    #[serde(default, alias = "changePercent")]
    pub change_pct: Option<f64>,
    #[serde(default, alias = "isPositive")]
    pub is_positive: Option<bool>,
}

/// Series plus the direction metadata used to pick the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    pub series: Series,
    pub is_positive: bool,
    pub change_percent: f64,
}

/// Successful fetch, which may still carry no samples.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    NoPoints,
    Loaded(LoadedSeries),
}

impl SeriesPayload {
    /// Validates the payload into a series.
    ///
    /// Missing or empty `data` is not an error; it decodes to
    /// `SeriesData::NoPoints`.
    pub fn decode(self) -> Result<SeriesData, FetchError> {
        let raw_points = match self.data {
            Some(points) if !points.is_empty() => points,
            _ => return Ok(SeriesData::NoPoints),
        };

        let mut points = Vec::with_capacity(raw_points.len());
        for raw in raw_points {
            let time = parse_series_timestamp(&raw.date).map_err(malformed)?;
            points.push(SeriesPoint::new(time, raw.close));
        }
        let series = Series::new(points).map_err(malformed)?;

        let is_positive = self
            .is_positive
            .unwrap_or_else(|| series.net_change() >= 0.0);
        let change_percent = self
            .change_pct
            .filter(|value| value.is_finite())
            .unwrap_or_else(|| series.change_percent());

        Ok(SeriesData::Loaded(LoadedSeries {
            series,
            is_positive,
            change_percent,
        }))
    }
}

fn malformed(err: ChartError) -> FetchError {
    FetchError::Malformed(err.to_string())
}

/// Remote collaborator able to return the raw series for a request.
pub trait SeriesSource {
    fn fetch_series(
        &self,
        request: &SeriesRequest,
    ) -> impl Future<Output = Result<SeriesPayload, FetchError>> + Send;
}

/// Async half of series loading: runs the fetch for a ticket and decodes it.
///
/// The fetcher never decides staleness; the chart does that when the result
/// is handed back through `PriceChart::apply_response`.
#[derive(Debug)]
pub struct SeriesFetcher<S> {
    source: Arc<S>,
}

impl<S> Clone for SeriesFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> SeriesFetcher<S>
where
    S: SeriesSource + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns an owned future so hosts can spawn it while the chart keeps
    /// handling pointer events.
    pub fn fetch(
        &self,
        ticket: &RequestTicket,
    ) -> impl Future<Output = Result<SeriesData, FetchError>> + Send + 'static {
        let source = Arc::clone(&self.source);
        let request = ticket.request().clone();
        async move { source.fetch_series(&request).await?.decode() }
    }
}
