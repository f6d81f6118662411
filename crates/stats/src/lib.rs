//! The sliding-window statistics pipeline.
//!
//! poll → [`StatsPoller`] → [`HistoryBuffer`] → [`rate::deltas`] per
//! [`DatasetSpec`] → chart, with tick positions from [`axis`].

pub mod axis;
pub mod dataset;
pub mod history;
pub mod poller;
pub mod profile;
pub mod rate;

pub use axis::{RightAlignedScale, Tick, TickGenerator, TimeScale, TimeUnit};
pub use dataset::DatasetSpec;
pub use history::HistoryBuffer;
pub use poller::{PollOutcome, StatsPoller};
pub use profile::{ModuleDetector, ModuleProfile};
pub use rate::deltas;
