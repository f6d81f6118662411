use chrono::{DateTime, Local};
use fwd_core::{DashError, Result};
use fwd_stats::{
    axis::{shifted_labels, window_bounds},
    DatasetSpec, HistoryBuffer, RightAlignedScale, Tick, TickGenerator, TimeScale,
};
use fwd_theme::Color;

/// One drawable line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label:  String,
    pub color:  Color,
    pub points: Vec<f64>,
}

/// Everything needed to draw one frame of the chart.
///
/// Construction checks that every series has exactly one point per label, so
/// the drawing code can zip them without further checks.
#[derive(Debug, Clone)]
pub struct ChartModel {
    labels: Vec<DateTime<Local>>,
    series: Vec<Series>,
    ticks:  Vec<Tick>,
    x_min:  DateTime<Local>,
    x_max:  DateTime<Local>,
    y_min:  f64,
    y_max:  f64,
}

impl ChartModel {
    pub fn build(
        labels: Vec<DateTime<Local>>,
        series: Vec<Series>,
        ticks: Vec<Tick>,
        (x_min, x_max): (DateTime<Local>, DateTime<Local>),
    ) -> Result<Self> {
        if let Some(bad) = series.iter().find(|s| s.points.len() != labels.len()) {
            return Err(DashError::Chart(format!(
                "series '{}' has {} points for {} labels",
                bad.label,
                bad.points.len(),
                labels.len()
            )));
        }
        if x_max <= x_min {
            return Err(DashError::Chart("empty time range".into()));
        }

        let values = series.iter().flat_map(|s| s.points.iter().copied());
        let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let y_min = if lo < 0.0 { lo * 1.1 } else { 0.0 };
        let y_max = (hi * 1.1).max(1.0);

        Ok(Self { labels, series, ticks, x_min, x_max, y_min, y_max })
    }

    /// Build the model for the buffer as it is right now: one series per
    /// dataset, labels shifted to the interval ends, ticks for the window
    /// ending at `now` with the left-edge tick dropped.
    pub fn from_snapshot(
        buffer: &HistoryBuffer,
        datasets: &[DatasetSpec],
        now: DateTime<Local>,
    ) -> Result<Self> {
        let labels = shifted_labels(buffer.timestamps(), now);
        let series = datasets
            .iter()
            .map(|d| Series {
                label:  d.label.to_string(),
                color:  Color::from_css(d.color).unwrap_or(Color::WHITE),
                points: d.series(buffer),
            })
            .collect();
        let ticks = RightAlignedScale(TimeScale::window(now)).build_ticks();

        Self::build(labels, series, ticks, window_bounds(now))
    }

    pub fn labels(&self) -> &[DateTime<Local>] {
        &self.labels
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn y_range(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    /// Horizontal position of `t` in `[0, 1]` across the window.  Values
    /// outside that range fall outside the visible window.
    pub fn x_fraction(&self, t: DateTime<Local>) -> f32 {
        let span = (self.x_max - self.x_min).num_milliseconds() as f64;
        let offset = (t - self.x_min).num_milliseconds() as f64;
        (offset / span) as f32
    }

    /// Vertical position of `v` in `[0, 1]`, bottom to top.
    pub fn y_fraction(&self, v: f64) -> f32 {
        ((v - self.y_min) / (self.y_max - self.y_min)) as f32
    }

    /// Visible `(x, y)` fractions for series `index`, oldest first.
    pub fn visible_points(&self, index: usize) -> Vec<(f32, f32)> {
        let Some(series) = self.series.get(index) else {
            return Vec::new();
        };
        self.labels
            .iter()
            .zip(&series.points)
            .map(|(t, v)| (self.x_fraction(*t), self.y_fraction(*v)))
            .filter(|(x, _)| (0.0..=1.0).contains(x))
            .collect()
    }
}

/// Format a bytes-per-second rate into a short axis label.
pub fn format_rate(bps: f64) -> String {
    const MB: f64 = 1_000_000.0;
    const KB: f64 = 1_000.0;

    let magnitude = bps.abs();
    if magnitude >= MB {
        format!("{:.1}M", bps / MB)
    } else if magnitude >= KB {
        format!("{:.0}K", bps / KB)
    } else {
        format!("{bps:.0}B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fwd_core::Sample;

    fn now() -> DateTime<Local> {
        Local.timestamp_millis_opt(1_700_000_040_000).unwrap()
    }

    const DATASETS: &[DatasetSpec] = &[
        DatasetSpec::new("In", "rgba(75,192,192,1)", "A"),
        DatasetSpec::new("Out", "rgba(192,75,75,1)", "B"),
    ];

    fn buffer(n: usize) -> HistoryBuffer {
        let mut buf = HistoryBuffer::new(300);
        for i in 0..n {
            let at = now() - Duration::seconds(2 * (n - i) as i64);
            buf.push(at, Sample::from_iter([("A", (i * 10) as f64), ("B", (i * 3) as f64)]));
        }
        buf
    }

    #[test]
    fn labels_and_series_always_line_up() {
        for n in [0, 1, 2, 3, 150, 300] {
            let model = ChartModel::from_snapshot(&buffer(n), DATASETS, now()).unwrap();
            assert_eq!(model.labels().len(), n);
            for s in model.series() {
                assert_eq!(s.points.len(), model.labels().len());
            }
        }
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let series = vec![Series { label: "x".into(), color: Color::WHITE, points: vec![1.0] }];
        let err = ChartModel::build(Vec::new(), series, Vec::new(), window_bounds(now()));
        assert!(matches!(err, Err(DashError::Chart(_))));
    }

    #[test]
    fn last_label_is_now() {
        let model = ChartModel::from_snapshot(&buffer(3), DATASETS, now()).unwrap();
        assert_eq!(model.labels().last(), Some(&now()));
        assert_eq!(model.x_fraction(now()), 1.0);
    }

    #[test]
    fn ticks_skip_left_edge() {
        let model = ChartModel::from_snapshot(&buffer(3), DATASETS, now()).unwrap();
        let (min, _) = window_bounds(now());
        assert!(model.ticks().iter().all(|t| t.at > min));
    }

    #[test]
    fn points_older_than_window_are_hidden() {
        // 300 samples * 2s = 600s of history; only the last 300s is visible.
        let model = ChartModel::from_snapshot(&buffer(300), DATASETS, now()).unwrap();
        let visible = model.visible_points(0);
        assert!(visible.len() < 300);
        assert!(visible.iter().all(|(x, _)| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn y_range_has_headroom() {
        let model = ChartModel::from_snapshot(&buffer(3), DATASETS, now()).unwrap();
        let (lo, hi) = model.y_range();
        assert_eq!(lo, 0.0);
        assert!(hi >= 10.0);
    }

    #[test]
    fn flat_zero_series_still_has_a_range() {
        let model = ChartModel::from_snapshot(&buffer(1), DATASETS, now()).unwrap();
        assert_eq!(model.y_range(), (0.0, 1.0));
    }

    #[test]
    fn format_rate_units() {
        assert_eq!(format_rate(2_500_000.0), "2.5M");
        assert_eq!(format_rate(4_000.0), "4K");
        assert_eq!(format_rate(12.0), "12B");
        assert_eq!(format_rate(-3_000.0), "-3K");
    }
}
