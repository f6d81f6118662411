//! Time axis for the scrolling chart.
//!
//! [`TimeScale`] is the plain continuous generator: it always emits a tick at
//! the left edge of the window.  The window advances on every redraw, so that
//! edge tick slides along with it while the whole-minute ticks stay put.
//! [`RightAlignedScale`] wraps any generator and drops its first tick.

use chrono::{DateTime, Duration, Local, TimeZone};
use fwd_core::WINDOW_MS;

/// Granularity of axis ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    Second,
    #[default]
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Second => 1_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Hour   => 3_600_000,
        }
    }

    fn format(self) -> &'static str {
        match self {
            TimeUnit::Second => "%H:%M:%S",
            TimeUnit::Minute | TimeUnit::Hour => "%H:%M",
        }
    }
}

/// One labelled position on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub at:    DateTime<Local>,
    pub label: String,
}

/// Anything that can lay out ticks for a time range.
pub trait TickGenerator {
    fn build_ticks(&self) -> Vec<Tick>;
}

/// Continuous time scale over `[min, max]`.
#[derive(Debug, Clone)]
pub struct TimeScale {
    pub min:  DateTime<Local>,
    pub max:  DateTime<Local>,
    pub unit: TimeUnit,
}

impl TimeScale {
    pub fn new(min: DateTime<Local>, max: DateTime<Local>) -> Self {
        Self { min, max, unit: TimeUnit::default() }
    }

    /// Scale covering the rolling window that ends at `now`.
    pub fn window(now: DateTime<Local>) -> Self {
        let (min, max) = window_bounds(now);
        Self::new(min, max)
    }

    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    fn tick_at(&self, millis: i64) -> Option<Tick> {
        let at = Local.timestamp_millis_opt(millis).single()?;
        Some(Tick {
            label: at.format(self.unit.format()).to_string(),
            at,
        })
    }
}

impl TickGenerator for TimeScale {
    /// A tick at `min`, then one at every unit boundary after `min` up to
    /// and including `max`.
    fn build_ticks(&self) -> Vec<Tick> {
        if self.max < self.min {
            return Vec::new();
        }

        let step   = self.unit.millis();
        let min_ms = self.min.timestamp_millis();
        let max_ms = self.max.timestamp_millis();

        let first_boundary = (min_ms.div_euclid(step) + 1) * step;
        let boundaries = (0..)
            .map(|i| first_boundary + i * step)
            .take_while(|t| *t <= max_ms);

        std::iter::once(min_ms)
            .chain(boundaries)
            .filter_map(|t| self.tick_at(t))
            .collect()
    }
}

/// Decorator that removes the earliest tick produced by `G`.
#[derive(Debug, Clone)]
pub struct RightAlignedScale<G>(pub G);

impl<G: TickGenerator> TickGenerator for RightAlignedScale<G> {
    fn build_ticks(&self) -> Vec<Tick> {
        let mut ticks = self.0.build_ticks();
        if !ticks.is_empty() {
            ticks.remove(0);
        }
        ticks
    }
}

/// `[now - WINDOW_MS, now]`.
pub fn window_bounds(now: DateTime<Local>) -> (DateTime<Local>, DateTime<Local>) {
    (now - Duration::milliseconds(WINDOW_MS), now)
}

/// X positions for the chart's data points.
///
/// Each delta describes the interval *ending* at the next sample, so the
/// labels are the buffer's timestamps shifted left by one with `now` appended.
/// An empty buffer has no points and therefore no labels.
pub fn shifted_labels(
    timestamps: impl IntoIterator<Item = DateTime<Local>>,
    now: DateTime<Local>,
) -> Vec<DateTime<Local>> {
    let mut iter = timestamps.into_iter();
    if iter.next().is_none() {
        return Vec::new();
    }
    iter.chain(std::iter::once(now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(millis).unwrap()
    }

    // Minute-aligned epoch instant.
    const BASE: i64 = 1_700_000_040_000;

    #[test]
    fn base_scale_ticks_at_left_edge() {
        let scale = TimeScale::window(at(BASE + 12_345));
        let ticks = scale.build_ticks();
        assert_eq!(ticks[0].at, scale.min);
        assert_eq!(ticks.len(), 6);
        assert!(ticks[1..].iter().all(|t| t.at.timestamp_millis() % 60_000 == 0));
    }

    #[test]
    fn aligned_scale_drops_exactly_the_first_tick() {
        for offset in [0, 1, 59_999, 30_000, 123_456] {
            let scale = TimeScale::window(at(BASE + offset));
            let base = scale.build_ticks();
            let aligned = RightAlignedScale(scale).build_ticks();
            assert_eq!(aligned.len(), base.len() - 1);
            assert_eq!(aligned[..], base[1..]);
        }
    }

    #[test]
    fn aligned_scale_on_empty_range_stays_empty() {
        let scale = TimeScale::new(at(BASE), at(BASE - 1));
        assert!(RightAlignedScale(scale).build_ticks().is_empty());
    }

    #[test]
    fn aligned_ticks_stay_put_as_the_window_advances() {
        let a = RightAlignedScale(TimeScale::window(at(BASE + 10_000))).build_ticks();
        let b = RightAlignedScale(TimeScale::window(at(BASE + 12_000))).build_ticks();
        assert_eq!(a, b);
    }

    #[test]
    fn second_unit_formats_seconds() {
        let scale = TimeScale::new(at(BASE), at(BASE + 2_000)).with_unit(TimeUnit::Second);
        let ticks = scale.build_ticks();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].label.len(), "00:00:00".len());
    }

    #[test]
    fn shifted_labels_match_length() {
        let now = at(BASE + 10_000);
        let stamps = vec![at(BASE), at(BASE + 2_000), at(BASE + 4_000)];
        let labels = shifted_labels(stamps, now);
        assert_eq!(labels, vec![at(BASE + 2_000), at(BASE + 4_000), now]);
    }

    #[test]
    fn shifted_labels_of_empty_buffer_are_empty() {
        assert!(shifted_labels(Vec::new(), at(BASE)).is_empty());
    }
}
