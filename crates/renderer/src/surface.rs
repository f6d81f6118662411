use crate::model::{format_rate, ChartModel};
use fwd_theme::ChartStyle;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    Pixels, Point, Rectangle, Renderer, Size, Theme,
};
use tracing::trace;

/// Space reserved right of the plot for y-axis labels.
const Y_AXIS_WIDTH: f32 = 52.0;
/// Space reserved below the plot for tick labels.
const X_AXIS_HEIGHT: f32 = 18.0;
/// Space reserved above the plot for the legend.
const LEGEND_HEIGHT: f32 = 20.0;
const Y_DIVISIONS: usize = 4;

/// Drawing surface that owns at most one chart at a time.
///
/// There is no incremental update path: every [`redraw`] tears down the
/// previous chart (model and cached geometry) before binding the new one.
///
/// [`redraw`]: ChartSurface::redraw
pub struct ChartSurface {
    chart:      Option<ChartModel>,
    cache:      canvas::Cache,
    style:      ChartStyle,
    generation: u64,
}

impl ChartSurface {
    pub fn new(style: ChartStyle) -> Self {
        Self {
            chart: None,
            cache: canvas::Cache::new(),
            style,
            generation: 0,
        }
    }

    /// Replace the current chart with `chart`.
    pub fn redraw(&mut self, chart: ChartModel) {
        self.release();
        self.chart = Some(chart);
        self.generation += 1;
        trace!(generation = self.generation, "chart rebuilt");
    }

    /// Drop the current chart, if any.
    pub fn release(&mut self) {
        if self.chart.take().is_some() {
            self.cache.clear();
        }
    }

    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
        self.cache.clear();
    }

    pub fn chart(&self) -> Option<&ChartModel> {
        self.chart.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.chart.is_some()
    }

    /// Number of charts constructed on this surface so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<Message> canvas::Program<Message> for ChartSurface {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Some(chart) = &self.chart else {
            return Vec::new();
        };

        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            draw_chart(frame, chart, &self.style);
        });

        vec![geometry]
    }
}

fn draw_chart(frame: &mut Frame, chart: &ChartModel, style: &ChartStyle) {
    let size = frame.size();
    let plot = Rectangle {
        x:      0.0,
        y:      LEGEND_HEIGHT,
        width:  (size.width - Y_AXIS_WIDTH).max(1.0),
        height: (size.height - LEGEND_HEIGHT - X_AXIS_HEIGHT).max(1.0),
    };
    let to_point = |x: f32, y: f32| {
        Point::new(plot.x + x * plot.width, plot.y + (1.0 - y) * plot.height)
    };

    let grid = Stroke::default().with_color(style.grid.to_iced()).with_width(1.0);
    let label = |content: String, position: Point| Text {
        content,
        position,
        color: style.text.to_iced(),
        size: Pixels(style.label_size),
        ..Text::default()
    };

    // ── Time axis ────────────────────────────────────────────────────────────
    for tick in chart.ticks() {
        let x = chart.x_fraction(tick.at);
        let bottom = to_point(x, 0.0);
        frame.stroke(&Path::line(to_point(x, 1.0), bottom), grid.clone());
        let half_width = tick.label.len() as f32 * style.label_size * 0.3;
        frame.fill_text(label(
            tick.label.clone(),
            Point::new(bottom.x - half_width, bottom.y + 3.0),
        ));
    }

    // ── Value axis (right) ───────────────────────────────────────────────────
    let (y_min, y_max) = chart.y_range();
    for i in 0..=Y_DIVISIONS {
        let frac = i as f32 / Y_DIVISIONS as f32;
        let value = y_min + (y_max - y_min) * f64::from(frac);
        let left = to_point(0.0, frac);
        let right = to_point(1.0, frac);
        frame.stroke(&Path::line(left, right), grid.clone());
        frame.fill_text(label(
            format_rate(value),
            Point::new(right.x + 4.0, right.y - style.label_size * 0.6),
        ));
    }

    // ── Series ───────────────────────────────────────────────────────────────
    for (index, series) in chart.series().iter().enumerate() {
        let points = chart.visible_points(index);
        if points.len() < 2 {
            continue;
        }
        let path = Path::new(|b| {
            let mut iter = points.iter().map(|(x, y)| to_point(*x, *y));
            if let Some(first) = iter.next() {
                b.move_to(first);
            }
            for p in iter {
                b.line_to(p);
            }
        });
        frame.stroke(
            &path,
            Stroke::default()
                .with_color(series.color.to_iced())
                .with_width(style.line_width),
        );
    }

    // ── Legend ───────────────────────────────────────────────────────────────
    let mut x = plot.x;
    for series in chart.series() {
        frame.fill_rectangle(
            Point::new(x, 5.0),
            Size::new(24.0, style.label_size * 0.8),
            series.color.to_iced(),
        );
        frame.fill_text(label(series.label.clone(), Point::new(x + 30.0, 2.0)));
        x += 30.0 + series.label.len() as f32 * style.label_size * 0.6 + 16.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use fwd_stats::HistoryBuffer;

    fn surface() -> ChartSurface {
        ChartSurface::new(fwd_theme::Theme::default().chart_style())
    }

    fn model() -> ChartModel {
        ChartModel::from_snapshot(&HistoryBuffer::new(300), &[], Local::now()).unwrap()
    }

    #[test]
    fn starts_unbound() {
        let s = surface();
        assert!(!s.is_bound());
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn every_redraw_builds_a_fresh_chart() {
        let mut s = surface();
        s.redraw(model());
        s.redraw(model());
        assert!(s.is_bound());
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn release_drops_the_chart() {
        let mut s = surface();
        s.redraw(model());
        s.release();
        assert!(s.chart().is_none());
        s.release();
        assert_eq!(s.generation(), 1);
    }
}
