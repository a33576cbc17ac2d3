use crate::core::types::ChartCanvas;
use crate::error::{ChartError, ChartResult};

/// Forward mapping from a price series onto the logical canvas.
///
/// Rebuilt whenever the active series changes. X is driven by sample index,
/// not by timestamp, so gaps in trading hours do not leave holes in the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    canvas: ChartCanvas,
    sample_count: usize,
    min: f64,
    max: f64,
    range: f64,
    // Lowest price of the vertical domain. Equals `min` unless the series is
    // flat, where it is lowered so the line sits at mid height.
    floor: f64,
}

impl ScaleContext {
    pub fn from_prices(prices: &[f64], canvas: ChartCanvas) -> ChartResult<Self> {
        if prices.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        let canvas = canvas.validate()?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &price in prices {
            if !price.is_finite() {
                return Err(ChartError::InvalidData("price must be finite".to_owned()));
            }
            min = min.min(price);
            max = max.max(price);
        }

        let span = max - min;
        if !span.is_finite() {
            return Err(ChartError::InvalidData(
                "price spread exceeds the representable range".to_owned(),
            ));
        }
        let range = if span > 0.0 { span } else { 1.0 };
        let floor = min - (range - span) / 2.0;

        Ok(Self {
            canvas,
            sample_count: prices.len(),
            min,
            max,
            range,
            floor,
        })
    }

    #[must_use]
    pub fn canvas(self) -> ChartCanvas {
        self.canvas
    }

    #[must_use]
    pub fn sample_count(self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn range(self) -> f64 {
        self.range
    }

    /// Horizontal distance between adjacent samples; zero for a single sample.
    #[must_use]
    pub fn step_x(self) -> f64 {
        if self.sample_count < 2 {
            return 0.0;
        }
        self.canvas.plot_width() / (self.sample_count - 1) as f64
    }

    #[must_use]
    pub fn to_x(self, index: usize) -> f64 {
        if self.sample_count < 2 {
            return self.canvas.pad_x;
        }
        let ratio = index as f64 / (self.sample_count - 1) as f64;
        self.canvas.pad_x + ratio * self.canvas.plot_width()
    }

    /// Higher prices map to smaller y (screen space grows downwards).
    #[must_use]
    pub fn to_y(self, price: f64) -> f64 {
        let normalized = (price - self.floor) / self.range;
        self.canvas.height() - self.canvas.pad_y - normalized * self.canvas.plot_height()
    }

    /// Inverse of `to_x` without clamping; `None` for a single sample.
    #[must_use]
    pub fn x_to_fractional_index(self, x: f64) -> Option<f64> {
        if self.sample_count < 2 || !x.is_finite() {
            return None;
        }
        Some((x - self.canvas.pad_x) / self.step_x())
    }
}
