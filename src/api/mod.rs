mod analysis;
mod chart;
mod config;
mod fetch;
mod http_source;
mod label_format;
mod progress;
mod render_frame_builder;
mod validation;

pub use analysis::{AnalysisReport, AnalysisSource, run_analysis};
pub use chart::{
    ActiveSeries, ChangeBadge, ChartPresentation, ChartView, HoverCaption, LOADING_PLACEHOLDER,
    NO_DATA_PLACEHOLDER, NoDataReason, PriceChart, ResponseOutcome,
};
pub use config::{
    BACKEND_URL_ENV, BackendConfig, ChartConfig, ChartStyle, LabelTimeZone, ProgressConfig,
};
pub use fetch::{
    LoadedSeries, PayloadPoint, RequestTicket, RequestTracker, SeriesData, SeriesFetcher,
    SeriesPayload, SeriesRequest, SeriesSource,
};
pub use http_source::{HttpChartBackend, error_detail};
pub use label_format::{
    AxisEndpointLabels, LabelFormatter, TimeLabelPattern, format_change_percent,
    format_price_label, hover_hint,
};
pub use progress::{JobOutcome, ProgressSimulator, ProgressSnapshot, run_with_progress};
pub use render_frame_builder::ChartRenderer;
