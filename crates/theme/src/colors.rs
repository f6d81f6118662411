/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const DARK:  Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const WHITE: Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const PURPLE: Self = Self { r: 0.796, g: 0.651, b: 0.969, a: 1.0 }; // #cba6f7
    pub const GRID:  Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 0.1 };

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self::from_rgba8(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                1.0,
            )),
            8 => Some(Self::from_rgba8(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Parse a CSS color: hex, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn from_css(css: &str) -> Option<Self> {
        let css = css.trim();
        if css.starts_with('#') {
            return Self::from_hex(css);
        }

        let (args, has_alpha) = if let Some(rest) = css.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = css.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }

        let channel = |s: &str| s.parse::<u8>().ok();
        let alpha = if has_alpha {
            parts[3].parse::<f32>().ok()?.clamp(0.0, 1.0)
        } else {
            1.0
        };

        Some(Self::from_rgba8(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgba() {
        let c = Color::from_css("rgba(75,192,192,1)").unwrap();
        assert_eq!(c, Color::from_rgba8(75, 192, 192, 1.0));
    }

    #[test]
    fn parses_rgb_with_spaces() {
        let c = Color::from_css(" rgb(192, 75, 75) ").unwrap();
        assert_eq!(c.a, 1.0);
        assert!((c.r - 192.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn parses_hex_through_css() {
        assert_eq!(Color::from_css("#1e1e2e"), Color::from_hex("1e1e2e"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::from_css("rgba(1,2,3)").is_none());
        assert!(Color::from_css("hsl(1,2,3)").is_none());
        assert!(Color::from_css("rgb(300,0,0)").is_none());
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        assert!(Color::from_hex("#aébcd").is_none());
        assert!(Color::from_hex("ü1e1e2e").is_none());
    }
}
