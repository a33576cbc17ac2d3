use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::Ticker;
use crate::error::FetchError;

use super::progress::{ProgressSimulator, ProgressSnapshot, run_with_progress};

/// Opaque recommendation payload returned by the analysis backend.
///
/// Its content is not interpreted here; only its arrival matters to the
/// progress indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub payload: Value,
}

/// Long-running remote job with no incremental status channel.
pub trait AnalysisSource {
    fn analyze(
        &self,
        ticker: &Ticker,
    ) -> impl Future<Output = Result<AnalysisReport, FetchError>> + Send;
}

/// Submits an analysis job and simulates stage progress until it resolves.
pub async fn run_analysis<S, O>(
    source: &S,
    ticker: &Ticker,
    simulator: &mut ProgressSimulator,
    observer: O,
) -> Result<AnalysisReport, FetchError>
where
    S: AnalysisSource,
    O: FnMut(&ProgressSnapshot),
{
    let result = run_with_progress(simulator, source.analyze(ticker), observer).await;
    match &result {
        Ok(_) => info!(%ticker, stage = simulator.stage_index(), "analysis finished"),
        Err(err) => warn!(%ticker, error = %err, "analysis failed"),
    }
    result
}
