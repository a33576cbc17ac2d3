use tracing::{debug, trace, warn};

use crate::core::{PeriodKey, ScaleContext, Series, Ticker};
use crate::error::{ChartResult, FetchError};
use crate::interaction::{HoverLocator, HoverState};
use crate::render::{RenderFrame, Renderer};

use super::fetch::{
    LoadedSeries, RequestTicket, RequestTracker, SeriesData, SeriesFetcher, SeriesRequest,
    SeriesSource,
};
use super::label_format::{
    AxisEndpointLabels, LabelFormatter, format_change_percent, format_price_label, hover_hint,
};
use super::{ChartConfig, ChartRenderer};

pub const LOADING_PLACEHOLDER: &str = "Loading chart…";
pub const NO_DATA_PLACEHOLDER: &str = "No data available";

/// Series currently on screen together with its derived scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSeries {
    pub loaded: LoadedSeries,
    pub scale: ScaleContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoDataReason {
    /// The backend answered with no samples.
    Empty,
    /// Network error, non-success status, or malformed payload.
    Failed(FetchError),
}

/// What the chart area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartView {
    /// No ticker selected yet.
    #[default]
    Idle,
    Loading,
    Ready(ActiveSeries),
    NoData(NoDataReason),
}

/// Result of handing a fetch result back to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The response matched the latest request and replaced the view.
    Applied,
    /// A newer request superseded this one; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverCaption {
    pub price: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBadge {
    pub text: String,
    pub is_positive: bool,
}

/// Text surfaced to the presentation layer around the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPresentation {
    pub period: PeriodKey,
    pub hover: Option<HoverCaption>,
    pub hint: &'static str,
    pub change: Option<ChangeBadge>,
    pub axis: Option<AxisEndpointLabels>,
    pub placeholder: Option<&'static str>,
}

/// Price-history chart for one (ticker, period) at a time.
///
/// Owns the active series, its scale, and the hover state. Fetches run
/// elsewhere; their results come back through `apply_response`, which drops
/// anything but the latest request.
pub struct PriceChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    formatter: LabelFormatter,
    painter: ChartRenderer,
    ticker: Option<Ticker>,
    period: PeriodKey,
    tracker: RequestTracker,
    view: ChartView,
    hover: Option<HoverState>,
}

impl<R: Renderer> PriceChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            formatter: LabelFormatter::new(config.timezone),
            painter: ChartRenderer::new(config.style),
            period: config.initial_period,
            config,
            ticker: None,
            tracker: RequestTracker::default(),
            view: ChartView::Idle,
            hover: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn formatter(&self) -> LabelFormatter {
        self.formatter
    }

    #[must_use]
    pub fn ticker(&self) -> Option<&Ticker> {
        self.ticker.as_ref()
    }

    #[must_use]
    pub fn period(&self) -> PeriodKey {
        self.period
    }

    #[must_use]
    pub fn view(&self) -> &ChartView {
        &self.view
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.view, ChartView::Loading)
    }

    #[must_use]
    pub fn active_series(&self) -> Option<&ActiveSeries> {
        match &self.view {
            ChartView::Ready(active) => Some(active),
            _ => None,
        }
    }

    #[must_use]
    pub fn series(&self) -> Option<&Series> {
        self.active_series().map(|active| &active.loaded.series)
    }

    #[must_use]
    pub fn scale_context(&self) -> Option<ScaleContext> {
        self.active_series().map(|active| active.scale)
    }

    #[must_use]
    pub fn hover_state(&self) -> Option<&HoverState> {
        self.hover.as_ref()
    }

    /// Switches the instrument. Returns the ticket to fetch, or `None` when
    /// the ticker is already active.
    pub fn select_ticker(&mut self, ticker: Ticker) -> Option<RequestTicket> {
        if self.ticker.as_ref() == Some(&ticker) {
            return None;
        }
        self.ticker = Some(ticker);
        self.issue_request()
    }

    /// Drops the instrument and any outstanding request.
    pub fn clear_ticker(&mut self) {
        self.ticker = None;
        self.tracker.abandon();
        self.hover = None;
        self.view = ChartView::Idle;
    }

    /// Switches the period. Returns the ticket to fetch, or `None` when the
    /// period is unchanged or no ticker is selected.
    pub fn select_period(&mut self, period: PeriodKey) -> Option<RequestTicket> {
        if self.period == period {
            return None;
        }
        self.period = period;
        self.hover = None;
        self.issue_request()
    }

    /// Re-requests the current key; failures are never retried on their own.
    pub fn reload(&mut self) -> Option<RequestTicket> {
        self.issue_request()
    }

    fn issue_request(&mut self) -> Option<RequestTicket> {
        self.hover = None;
        let Some(ticker) = self.ticker.clone() else {
            self.view = ChartView::Idle;
            return None;
        };
        self.view = ChartView::Loading;
        Some(self.tracker.issue(SeriesRequest::new(ticker, self.period)))
    }

    /// Applies a fetch result if, and only if, `ticket` is the latest one.
    pub fn apply_response(
        &mut self,
        ticket: &RequestTicket,
        result: Result<SeriesData, FetchError>,
    ) -> ResponseOutcome {
        if !self.tracker.settle(ticket) {
            return ResponseOutcome::Stale;
        }

        self.hover = None;
        self.view = match result {
            Ok(SeriesData::Loaded(loaded)) => self.activate(loaded),
            Ok(SeriesData::NoPoints) => {
                debug!(generation = ticket.generation(), "series response has no points");
                ChartView::NoData(NoDataReason::Empty)
            }
            Err(err) => {
                warn!(
                    generation = ticket.generation(),
                    ticker = %ticket.request().ticker,
                    period = %ticket.request().period,
                    error = %err,
                    "series fetch failed"
                );
                ChartView::NoData(NoDataReason::Failed(err))
            }
        };
        ResponseOutcome::Applied
    }

    fn activate(&self, loaded: LoadedSeries) -> ChartView {
        match ScaleContext::from_prices(&loaded.series.closes(), self.config.canvas) {
            Ok(scale) => {
                debug!(
                    samples = loaded.series.len(),
                    min = scale.min(),
                    max = scale.max(),
                    "series applied"
                );
                ChartView::Ready(ActiveSeries { loaded, scale })
            }
            Err(err) => {
                warn!(error = %err, "series could not be mapped onto the canvas");
                ChartView::NoData(NoDataReason::Failed(FetchError::Malformed(err.to_string())))
            }
        }
    }

    /// Fetches `ticket` through `fetcher` and applies the result.
    ///
    /// Convenient for hosts that do not need to interleave other events with
    /// the fetch; hosts that do should spawn `SeriesFetcher::fetch` and call
    /// `apply_response` themselves.
    pub async fn load<S>(
        &mut self,
        fetcher: &SeriesFetcher<S>,
        ticket: RequestTicket,
    ) -> ResponseOutcome
    where
        S: SeriesSource + Send + Sync + 'static,
    {
        let result = fetcher.fetch(&ticket).await;
        self.apply_response(&ticket, result)
    }

    /// Resolves the hovered sample for a pointer at logical `x`.
    ///
    /// Positions outside the canvas clear the hover, as does any call while
    /// no series is loaded.
    pub fn pointer_move(&mut self, x: f64) -> Option<&HoverState> {
        self.hover = self.resolve_hover(x);
        self.hover.as_ref()
    }

    /// Same as `pointer_move` for an offset measured on a stretched surface.
    pub fn pointer_move_client(
        &mut self,
        offset_x: f64,
        displayed_width: f64,
    ) -> ChartResult<Option<&HoverState>> {
        let x = self
            .config
            .canvas
            .client_to_logical_x(offset_x, displayed_width)?;
        Ok(self.pointer_move(x))
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    fn resolve_hover(&self, x: f64) -> Option<HoverState> {
        let active = self.active_series()?;
        if !active.scale.canvas().contains_x(x) {
            return None;
        }
        let index = HoverLocator::nearest_index(active.scale, x)?;
        let point = active.loaded.series.get(index)?;
        trace!(x, index, "hover resolved");
        Some(HoverState {
            index,
            price: point.close,
            time: point.time,
            label: self.formatter.format_time(point.time, self.period),
            x: active.scale.to_x(index),
            y: active.scale.to_y(point.close),
        })
    }

    /// Captions for the presentation layer.
    #[must_use]
    pub fn presentation(&self) -> ChartPresentation {
        let active = self.active_series();
        ChartPresentation {
            period: self.period,
            hover: self.hover.as_ref().map(|hover| HoverCaption {
                price: format_price_label(hover.price),
                label: hover.label.clone(),
            }),
            hint: hover_hint(self.period),
            change: active.map(|active| ChangeBadge {
                text: format_change_percent(active.loaded.change_percent),
                is_positive: active.loaded.is_positive,
            }),
            axis: active.map(|active| {
                self.formatter
                    .axis_endpoints(&active.loaded.series, self.period)
            }),
            placeholder: match self.view {
                ChartView::Loading => Some(LOADING_PLACEHOLDER),
                ChartView::NoData(_) => Some(NO_DATA_PLACEHOLDER),
                ChartView::Idle | ChartView::Ready(_) => None,
            },
        }
    }

    /// Frame for the current state; empty unless a series is loaded.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let frame = match self.active_series() {
            Some(active) => self.painter.build_frame(
                &active.loaded.series,
                active.scale,
                active.loaded.is_positive,
                self.hover.as_ref(),
            ),
            None => RenderFrame::new(self.config.canvas.viewport),
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
