use chrono::{DateTime, Local};
use fwd_core::Sample;
use std::collections::VecDeque;

/// Rolling, time-ordered history of stats samples.
///
/// Entries are kept in arrival order.  Once `capacity` is reached, every push
/// evicts the oldest entry first, so the length never exceeds the capacity.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries:  VecDeque<(DateTime<Local>, Sample)>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if at capacity.
    pub fn push(&mut self, at: DateTime<Local>, sample: Sample) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((at, sample));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(DateTime<Local>, Sample)> {
        self.entries.iter()
    }

    pub fn timestamps(&self) -> impl ExactSizeIterator<Item = DateTime<Local>> + '_ {
        self.entries.iter().map(|(at, _)| *at)
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Sample> {
        self.entries.iter().map(|(_, s)| s)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(fwd_core::HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn sample(n: f64) -> Sample {
        Sample::from_iter([("n", n)])
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buf = HistoryBuffer::new(300);
        for i in 0..1_000 {
            buf.push(at(i), sample(i as f64));
            assert!(buf.len() <= 300);
        }
        assert_eq!(buf.len(), 300);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut buf = HistoryBuffer::new(3);
        for i in 0..5 {
            buf.push(at(i), sample(i as f64));
        }
        let kept: Vec<f64> = buf.samples().map(|s| s.get("n").unwrap()).collect();
        assert_eq!(kept, vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.timestamps().next(), Some(at(2)));
    }

    #[test]
    fn default_uses_history_capacity() {
        assert_eq!(HistoryBuffer::default().capacity(), fwd_core::HISTORY_CAPACITY);
    }

    #[test]
    fn clear_empties() {
        let mut buf = HistoryBuffer::new(3);
        buf.push(at(0), sample(1.0));
        buf.clear();
        assert!(buf.is_empty());
    }
}
