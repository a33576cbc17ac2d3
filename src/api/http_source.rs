use std::future::Future;

use reqwest::{Client, Response, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::Ticker;
use crate::error::{ChartResult, FetchError};

use super::analysis::{AnalysisReport, AnalysisSource};
use super::fetch::{SeriesPayload, SeriesRequest, SeriesSource};
use super::validation::validate_backend_config;
use super::BackendConfig;

/// HTTP client for the chart and analysis endpoints.
///
/// - `GET  {base}/chart/{TICKER}?period={CODE}`
/// - `POST {base}/analyze` with `{"ticker": "..."}`
#[derive(Debug, Clone)]
pub struct HttpChartBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpChartBackend {
    pub fn new(config: BackendConfig) -> ChartResult<Self> {
        validate_backend_config(&config)?;
        let client = Client::builder().build().map_err(FetchError::from)?;
        Ok(Self { client, config })
    }

    /// Reuses a caller-provided client (connection pool, proxies, TLS roots).
    pub fn with_client(client: Client, config: BackendConfig) -> ChartResult<Self> {
        validate_backend_config(&config)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(self.config.base_url.trim())
            .map_err(|e| FetchError::Network(format!("invalid backend url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::Network("backend url cannot carry a path".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn chart_url(&self, request: &SeriesRequest) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["chart", request.ticker.as_str()])?;
        url.query_pairs_mut()
            .append_pair("period", request.period.code());
        Ok(url)
    }
}

impl SeriesSource for HttpChartBackend {
    fn fetch_series(
        &self,
        request: &SeriesRequest,
    ) -> impl Future<Output = Result<SeriesPayload, FetchError>> + Send {
        let client = self.client.clone();
        let timeout = self.config.timeout();
        let url = self.chart_url(request);
        async move {
            let url = url?;
            debug!(%url, "fetching chart series");
            let response = client.get(url).timeout(timeout).send().await?;
            let response = ensure_success(response).await?;
            response
                .json::<SeriesPayload>()
                .await
                .map_err(|e| FetchError::Malformed(e.to_string()))
        }
    }
}

impl AnalysisSource for HttpChartBackend {
    fn analyze(
        &self,
        ticker: &Ticker,
    ) -> impl Future<Output = Result<AnalysisReport, FetchError>> + Send {
        let client = self.client.clone();
        let url = self.endpoint(&["analyze"]);
        let ticker = ticker.clone();
        async move {
            let url = url?;
            debug!(%url, %ticker, "submitting analysis job");
            let body = serde_json::json!({ "ticker": ticker.as_str() });
            let response = client.post(url).json(&body).send().await?;
            let response = ensure_success(response).await?;
            let payload = response
                .json::<Value>()
                .await
                .map_err(|e| FetchError::Malformed(e.to_string()))?;
            Ok(AnalysisReport { ticker, payload })
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.json::<Value>().await {
        Ok(body) => error_detail(&body),
        Err(_) => status.canonical_reason().map(str::to_owned),
    };
    warn!(status = status.as_u16(), detail = ?detail, "backend request failed");
    Err(FetchError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}` and `{"detail": {"message": "..."}}`.
#[must_use]
pub fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(text)) => Some(text.clone()),
            _ => Some(Value::Object(map.clone()).to_string()),
        },
        other => Some(other.to_string()),
    }
}
