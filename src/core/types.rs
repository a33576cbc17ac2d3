use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Logical drawing surface of the chart.
///
/// All geometry is computed in these logical units; hosts stretch the result
/// onto whatever physical size they display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCanvas {
    pub viewport: Viewport,
    pub pad_x: f64,
    pub pad_y: f64,
}

impl Default for ChartCanvas {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(800, 120),
            pad_x: 4.0,
            pad_y: 8.0,
        }
    }
}

impl ChartCanvas {
    #[must_use]
    pub fn new(viewport: Viewport, pad_x: f64, pad_y: f64) -> Self {
        Self {
            viewport,
            pad_x,
            pad_y,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        f64::from(self.viewport.width)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        f64::from(self.viewport.height)
    }

    /// Horizontal extent available to samples once padding is removed.
    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width() - 2.0 * self.pad_x
    }

    /// Vertical extent available to prices once padding is removed.
    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height() - 2.0 * self.pad_y
    }

    #[must_use]
    pub fn contains_x(self, x: f64) -> bool {
        x.is_finite() && (0.0..=self.width()).contains(&x)
    }

    /// Converts a pointer offset measured on a displayed (possibly stretched)
    /// surface into logical canvas units.
    pub fn client_to_logical_x(self, offset_x: f64, displayed_width: f64) -> ChartResult<f64> {
        if !displayed_width.is_finite() || displayed_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "displayed width must be finite and > 0".to_owned(),
            ));
        }
        if !offset_x.is_finite() {
            return Err(ChartError::InvalidData(
                "pointer offset must be finite".to_owned(),
            ));
        }
        Ok(offset_x / displayed_width * self.width())
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [("pad_x", self.pad_x), ("pad_y", self.pad_y)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "canvas `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(ChartError::InvalidData(
                "canvas padding leaves no drawable area".to_owned(),
            ));
        }
        Ok(self)
    }
}
