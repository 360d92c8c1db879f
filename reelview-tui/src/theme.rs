//! Neon theme tokens.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headings, active links)
//! - **Positive**: Neon green (user score)
//! - **Negative**: Hot pink (NOT FOUND, errors)
//! - **Warning**: Neon orange (loading, alerts)
//! - **Neutral**: Cool purple (section titles)
//! - **Muted**: Steel blue (secondary text, hints)

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub const fn neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Color for a 0..=100 user score.
    pub fn score_color(&self, percent: i64) -> Color {
        match percent {
            p if p >= 70 => self.positive,
            p if p >= 40 => self.warning,
            _ => self.negative,
        }
    }
}

const THEME: Theme = Theme::neon();

pub fn palette() -> Theme {
    THEME
}

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn panel_border() -> Style {
    accent()
}

pub fn panel_title() -> Style {
    accent_bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.text_primary, Color::White);
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_score_color() {
        let theme = palette();
        assert_eq!(theme.score_color(84), theme.positive);
        assert_eq!(theme.score_color(70), theme.positive);
        assert_eq!(theme.score_color(55), theme.warning);
        assert_eq!(theme.score_color(0), theme.negative);
    }

    #[test]
    fn test_panel_styles() {
        assert_eq!(panel_border(), accent());
        assert!(panel_title().add_modifier.contains(Modifier::BOLD));
    }
}
