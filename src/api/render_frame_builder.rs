use crate::core::{ScaleContext, Series};
use crate::interaction::HoverState;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PathFill, PathPrimitive, PathStroke, PathVertex,
    RenderFrame,
};

use super::ChartStyle;

/// Turns a mapped series and optional hover into draw commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    #[must_use]
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(self) -> ChartStyle {
        self.style
    }

    #[must_use]
    pub fn series_color(self, is_positive: bool) -> Color {
        if is_positive {
            self.style.positive_color
        } else {
            self.style.negative_color
        }
    }

    /// Builds the frame for a loaded series.
    ///
    /// Two or more samples produce an area fill closed against the canvas
    /// bottom plus a polyline. A single sample produces one point marker.
    #[must_use]
    pub fn build_frame(
        self,
        series: &Series,
        scale: ScaleContext,
        is_positive: bool,
        hover: Option<&HoverState>,
    ) -> RenderFrame {
        let canvas = scale.canvas();
        let color = self.series_color(is_positive);
        let mut frame = RenderFrame::new(canvas.viewport);

        let vertices: Vec<PathVertex> = series
            .points()
            .iter()
            .enumerate()
            .map(|(index, point)| PathVertex::new(scale.to_x(index), scale.to_y(point.close)))
            .collect();

        if vertices.len() >= 2 {
            let baseline = canvas.height();
            let first_x = vertices[0].x;
            let last_x = vertices[vertices.len() - 1].x;

            let mut area = Vec::with_capacity(vertices.len() + 2);
            area.extend(vertices.iter().copied());
            area.push(PathVertex::new(last_x, baseline));
            area.push(PathVertex::new(first_x, baseline));

            frame = frame
                .with_path(PathPrimitive::filled_polygon(
                    area,
                    PathFill::VerticalGradient {
                        top: color.with_alpha(self.style.area_top_alpha),
                        bottom: color.with_alpha(self.style.area_bottom_alpha),
                    },
                ))
                .with_path(PathPrimitive::polyline(
                    vertices,
                    PathStroke {
                        width: self.style.line_width,
                        color,
                    },
                ));
        } else if let Some(point) = vertices.first() {
            frame = frame.with_circle(CirclePrimitive {
                cx: point.x,
                cy: point.y,
                radius: self.style.marker_radius,
                fill: color,
                outline: None,
            });
        }

        if let Some(hover) = hover {
            let (dash, gap) = self.style.guide_dash;
            let mut guide = LinePrimitive::new(
                hover.x,
                canvas.pad_y,
                hover.x,
                canvas.height() - canvas.pad_y,
                self.style.guide_width,
                self.style.guide_color,
            );
            if gap > 0.0 {
                guide = guide.with_dash(dash, gap);
            }
            frame = frame.with_line(guide).with_circle(CirclePrimitive {
                cx: hover.x,
                cy: hover.y,
                radius: self.style.marker_radius,
                fill: color,
                outline: Some(PathStroke {
                    width: self.style.marker_outline_width,
                    color: self.style.marker_outline_color,
                }),
            });
        }

        frame
    }
}
