use crate::state::{ConfigState, Sample};

/// The two panes of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Statistics,
    Configuration,
}

/// All messages (events) that flow through the dashboard update loop.
///
/// Sources:
/// - Backend round trips   → `Detected`, `StatsFetched`, `ConfigLoaded`, `ConfigSaved`
/// - Poll timer            → `PollTick`
/// - Settings watcher      → `SettingsReloaded`
/// - User input            → everything else
///
/// Errors are carried as strings so messages stay `Clone`.
#[derive(Debug, Clone)]
pub enum Message {
    // ── Backend ───────────────────────────────────────────────────────────────
    /// Result of the one-shot module detection fetch.
    Detected(Result<Sample, String>),
    /// A stats fetch completed.  `seq` is the request number it was issued with.
    StatsFetched { seq: u64, result: Result<Sample, String> },
    /// A config fetch completed (plain Load or the tail of Reload-then-Load).
    ConfigLoaded(Result<ConfigState, String>),
    /// A fire-and-forget save finished; only used for the status line.
    ConfigSaved(Result<(), String>),

    // ── Timer ─────────────────────────────────────────────────────────────────
    /// Poll interval elapsed.
    PollTick,

    // ── Settings ──────────────────────────────────────────────────────────────
    /// The dashboard's own settings file changed on disk.
    SettingsReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    TabSelected(Tab),
    /// Checkbox toggled on a boolean config field.
    FieldToggled { field: String, value: bool },
    /// Text edited on a non-boolean config field.
    FieldEdited { field: String, value: String },
    /// Save the whole local config to the backend.
    Apply,
    /// Re-fetch the config, discarding local edits.
    Refresh,
    /// Ask the backend to reload its config from disk, then re-fetch.
    Reload,
    /// Stop or restart stats polling.
    PauseToggled,
}
