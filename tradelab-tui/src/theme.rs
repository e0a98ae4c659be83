//! Nordic and Light themes.
//!
//! Two palettes toggled at runtime. Theme is a rendering concern only —
//! switching it never touches the dataset or the computed summary.

use ratatui::style::{Color, Modifier, Style};
use tradelab_core::ChartPalette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Nordic,
    Light,
}

/// Color tokens for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub kind: ThemeKind,
    /// Base surface behind all panels.
    pub background: Color,
    /// Raised surface (table header rows, overlay boxes).
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    /// Bars and gains.
    pub positive: Color,
    pub negative: Color,
    /// Focus and highlights; also the "current" threshold line.
    pub accent: Color,
    /// Alerts; also the "target" threshold line.
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::nordic()
    }
}

impl Theme {
    pub fn nordic() -> Self {
        Self {
            kind: ThemeKind::Nordic,
            background: Color::Rgb(0x2E, 0x34, 0x40),
            surface: Color::Rgb(0x3B, 0x42, 0x52),
            text: Color::Rgb(0xD8, 0xDE, 0xE9),
            muted: Color::Rgb(0x61, 0x6E, 0x88),
            positive: Color::Rgb(0xA3, 0xBE, 0x8C),
            negative: Color::Rgb(0xBF, 0x61, 0x6A),
            accent: Color::Rgb(0xEB, 0xCB, 0x8B),
            warning: Color::Rgb(0xB4, 0x8E, 0xAD),
        }
    }

    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: Color::White,
            surface: Color::Rgb(0xF0, 0xF0, 0xF0),
            text: Color::Black,
            muted: Color::Rgb(0x6C, 0x75, 0x7D),
            positive: Color::Rgb(0x76, 0xC8, 0x93),
            negative: Color::Rgb(0xE6, 0x39, 0x46),
            accent: Color::Rgb(0xF9, 0xC7, 0x4F),
            warning: Color::Rgb(0xF9, 0x84, 0x4A),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            ThemeKind::Nordic => "Nordic",
            ThemeKind::Light => "Light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self.kind {
            ThemeKind::Nordic => Theme::light(),
            ThemeKind::Light => Theme::nordic(),
        }
    }

    /// Green for gains, red for losses. Zero counts as a gain.
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// The matching palette for file chart export.
    pub fn chart_palette(&self) -> ChartPalette {
        match self.kind {
            ThemeKind::Nordic => ChartPalette::nordic(),
            ThemeKind::Light => ChartPalette::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_themes() {
        let theme = Theme::nordic();
        assert_eq!(theme.toggled().kind, ThemeKind::Light);
        assert_eq!(theme.toggled().toggled().kind, ThemeKind::Nordic);
    }

    #[test]
    fn pnl_color_splits_on_zero() {
        let theme = Theme::default();
        assert_eq!(theme.pnl_color(5.0), theme.positive);
        assert_eq!(theme.pnl_color(0.0), theme.positive);
        assert_eq!(theme.pnl_color(-0.01), theme.negative);
    }

    #[test]
    fn chart_palette_tracks_theme() {
        assert_eq!(Theme::nordic().chart_palette().name, "Nordic");
        assert_eq!(Theme::light().chart_palette().name, "Light");
    }
}
