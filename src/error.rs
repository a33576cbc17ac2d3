use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series has no samples")]
    EmptySeries,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure of a remote request issued on behalf of the chart or the analysis job.
///
/// None of these are retried; the chart maps all of them onto its
/// "no data" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
