pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::ChartStyle;

use fwd_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed into normalised `[0, 1]` RGBA.  Calling
/// [`Theme::from_config`] is infallible — invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent:     Color,
    pub grid:       Color,
    pub font_size:  f32,
    pub padding:    u16,
    pub gap:        u16,
}

impl Theme {
    /// Build a [`Theme`] from the settings file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::DARK),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE),
            grid:       Color::from_css(&cfg.grid).unwrap_or(Color::GRID),
            font_size:  cfg.font_size,
            padding:    cfg.padding,
            gap:        cfg.gap,
        }
    }

    /// Chart styling derived from this theme.
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            grid:       self.grid,
            text:       self.foreground.with_alpha(0.7),
            label_size: (self.font_size - 2.0).max(8.0),
            line_width: 1.5,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig {
            background: "nope".into(),
            accent: "#aébcd".into(),
            grid: "rgba(1,2)".into(),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.background, Color::DARK);
        assert_eq!(theme.accent, Color::PURPLE);
        assert_eq!(theme.grid, Color::GRID);
    }
}
