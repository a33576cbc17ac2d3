//! price-chart-rs: interactive price-history chart core.
//!
//! The crate maps a fetched price series onto a fixed logical canvas,
//! resolves the hovered sample under the pointer, formats period-aware time
//! labels, keeps only the latest of overlapping series fetches, and
//! simulates stage progress for a long-running analysis job. Drawing is left
//! to `render::Renderer` backends.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, PriceChart};
pub use error::{ChartError, ChartResult, FetchError};
