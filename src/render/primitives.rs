use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// `#rrggbb`, alpha excluded.
    #[must_use]
    pub fn to_hex(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one straight segment in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    /// `(dash, gap)` lengths; solid when `None`.
    pub dash: Option<(f64, f64)>,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            dash: None,
        }
    }

    #[must_use]
    pub const fn with_dash(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width, "line")?;
        if let Some((dash, gap)) = self.dash {
            if !dash.is_finite() || !gap.is_finite() || dash <= 0.0 || gap < 0.0 {
                return Err(ChartError::InvalidData(
                    "line dash pattern must be finite with dash > 0 and gap >= 0".to_owned(),
                ));
            }
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    pub x: f64,
    pub y: f64,
}

impl PathVertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fill of a closed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathFill {
    Solid(Color),
    /// Linear gradient from the top of the canvas to its bottom.
    VerticalGradient { top: Color, bottom: Color },
}

impl PathFill {
    fn validate(self) -> ChartResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::VerticalGradient { top, bottom } => {
                top.validate()?;
                bottom.validate()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStroke {
    pub width: f64,
    pub color: Color,
}

/// Open polyline or closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub vertices: Vec<PathVertex>,
    pub closed: bool,
    pub fill: Option<PathFill>,
    pub stroke: Option<PathStroke>,
}

impl PathPrimitive {
    #[must_use]
    pub fn polyline(vertices: Vec<PathVertex>, stroke: PathStroke) -> Self {
        Self {
            vertices,
            closed: false,
            fill: None,
            stroke: Some(stroke),
        }
    }

    #[must_use]
    pub fn filled_polygon(vertices: Vec<PathVertex>, fill: PathFill) -> Self {
        Self {
            vertices,
            closed: true,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.vertices.len() < 2 {
            return Err(ChartError::InvalidData(
                "path needs at least two vertices".to_owned(),
            ));
        }
        if self
            .vertices
            .iter()
            .any(|vertex| !vertex.x.is_finite() || !vertex.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path vertices must be finite".to_owned(),
            ));
        }
        if self.fill.is_none() && self.stroke.is_none() {
            return Err(ChartError::InvalidData(
                "path must be filled, stroked, or both".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            validate_stroke_width(stroke.width, "path")?;
            stroke.color.validate()?;
        }
        Ok(())
    }
}

/// Filled circle with an optional outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub outline: Option<PathStroke>,
}

impl CirclePrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        if let Some(outline) = self.outline {
            validate_stroke_width(outline.width, "circle outline")?;
            outline.color.validate()?;
        }
        Ok(())
    }
}

fn validate_stroke_width(width: f64, what: &str) -> ChartResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}
