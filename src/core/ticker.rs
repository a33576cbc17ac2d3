use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const MAX_TICKER_LEN: usize = 15;

/// Normalized instrument symbol, e.g. `AAPL`, `BRK-B`, `^GSPC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trims and upper-cases user input, rejecting empty or malformed symbols.
    pub fn parse(input: &str) -> ChartResult<Self> {
        let symbol = input.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(ChartError::InvalidData("ticker must not be empty".to_owned()));
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(ChartError::InvalidData(format!(
                "ticker `{symbol}` exceeds {MAX_TICKER_LEN} characters"
            )));
        }
        if let Some(bad) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(ChartError::InvalidData(format!(
                "ticker `{symbol}` contains unsupported character `{bad}`"
            )));
        }
        Ok(Self(symbol))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::parse(input)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
