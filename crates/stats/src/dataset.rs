use crate::{history::HistoryBuffer, rate::deltas};

/// One plotted line: a counter turned into a per-interval rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Legend text, e.g. `"Incoming bytes/s"`.
    pub label: &'static str,
    /// CSS color of the line.
    pub color: &'static str,
    /// Counter the series is derived from.
    pub key:   &'static str,
}

impl DatasetSpec {
    pub const fn new(label: &'static str, color: &'static str, key: &'static str) -> Self {
        Self { label, color, key }
    }

    /// Rate series for the current buffer snapshot.  Never cached.
    pub fn series(&self, buffer: &HistoryBuffer) -> Vec<f64> {
        deltas(buffer, self.key)
    }
}
