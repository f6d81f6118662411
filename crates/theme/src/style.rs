use crate::colors::Color;

/// Visual settings for the statistics chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Grid lines at each time tick.
    pub grid: Color,
    /// Axis labels and legend text.
    pub text: Color,
    /// Axis label size in points.
    pub label_size: f32,
    /// Polyline width in logical pixels.
    pub line_width: f32,
}
