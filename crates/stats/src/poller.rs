use crate::history::HistoryBuffer;
use chrono::{DateTime, Local};
use fwd_core::Sample;
use tracing::{debug, warn};

/// What happened to a completed stats fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Sample appended; the chart needs a redraw.
    Appended,
    /// The fetch failed; the buffer is unchanged and the error recorded.
    Failed,
    /// A newer response was already applied, so this one was dropped.
    Stale,
    /// The poller was stopped while the fetch was in flight.
    Ignored,
}

/// Owner of the stats history and its polling lifecycle.
///
/// The shell keeps the poll timer running only while [`is_active`] is true
/// and calls [`begin_fetch`] on every tick.  Fetches are never cancelled, so
/// responses can arrive late or out of order; [`apply`] sorts that out using
/// the sequence number handed out by `begin_fetch`.
///
/// [`is_active`]: StatsPoller::is_active
/// [`begin_fetch`]: StatsPoller::begin_fetch
/// [`apply`]: StatsPoller::apply
#[derive(Debug, Default)]
pub struct StatsPoller {
    buffer:       HistoryBuffer,
    active:       bool,
    next_seq:     u64,
    /// Sequence number of the newest applied response.
    last_applied: Option<u64>,
    last_error:   Option<String>,
}

impl StatsPoller {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: HistoryBuffer::new(capacity),
            ..Self::default()
        }
    }

    /// Start accepting ticks and responses.
    pub fn activate(&mut self) {
        if !self.active {
            debug!("stats polling started");
        }
        self.active = true;
    }

    /// Stop polling and discard the history.
    pub fn deactivate(&mut self) {
        if self.active {
            debug!(samples = self.buffer.len(), "stats polling stopped");
        }
        self.active = false;
        self.buffer.clear();
        self.last_applied = None;
        self.last_error = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sequence number for the fetch issued on this tick, or `None` when
    /// stopped.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if !self.active {
            return None;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        Some(seq)
    }

    /// Apply a completed fetch that was issued with `seq`.
    pub fn apply(
        &mut self,
        seq: u64,
        at: DateTime<Local>,
        result: Result<Sample, String>,
    ) -> PollOutcome {
        if !self.active {
            return PollOutcome::Ignored;
        }

        if self.last_applied.is_some_and(|newest| seq < newest) {
            debug!(seq, "dropping out-of-order stats response");
            return PollOutcome::Stale;
        }

        let sample = match result {
            Ok(sample) => sample,
            Err(e) => {
                warn!(seq, error = %e, "stats fetch failed");
                self.last_error = Some(e);
                return PollOutcome::Failed;
            }
        };

        self.buffer.push(at, sample);
        self.last_applied = Some(seq);
        self.last_error = None;
        PollOutcome::Appended
    }

    pub fn buffer(&self) -> &HistoryBuffer {
        &self.buffer
    }

    /// Most recent fetch error, cleared by the next successful sample.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
