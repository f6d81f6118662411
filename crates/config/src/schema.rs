use serde::{Deserialize, Serialize};

/// Root settings structure parsed from `fwd-dash.toml`.
///
/// These are the dashboard's own settings; the backend module's
/// configuration is edited through the Configuration tab instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Where the module's HTTP endpoints live.
    pub backend: BackendConfig,
    /// Window geometry.
    pub window: WindowConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL the endpoint names (`stats`, `getConfig`, …) are appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url:   "http://127.0.0.1:8080/".to_string(),
            timeout_ms: 5_000,
            user_agent: format!("fwd-dash/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Window geometry in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Height of the statistics chart.
    pub chart_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width:        720,
            height:       420,
            chart_height: 250,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent / highlight color.
    pub accent: String,
    /// Chart grid line color (hex or `rgba(...)`).
    pub grid: String,
    /// Font size in points.
    pub font_size: f32,
    /// Outer padding (pixels).
    pub padding: u16,
    /// Gap between controls (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(), // Catppuccin Mocha — base
            foreground: "#cdd6f4".to_string(), // Catppuccin Mocha — text
            accent:     "#cba6f7".to_string(), // Catppuccin Mocha — mauve
            grid:       "rgba(205, 214, 244, 0.1)".to_string(),
            font_size:  13.0,
            padding:    12,
            gap:        8,
        }
    }
}
