pub mod error;
pub mod event;
pub mod state;

pub use error::{DashError, Result};
pub use event::{Message, Tab};
pub use state::{ConfigState, ConfigValue, ModuleKind, Sample};

/// Stats poll interval (milliseconds).
pub const POLL_INTERVAL_MS: u64 = 2_000;

/// Maximum number of samples kept in the rolling history.
pub const HISTORY_CAPACITY: usize = 300;

/// Width of the visible time window (milliseconds).
pub const WINDOW_MS: i64 = 300_000;
