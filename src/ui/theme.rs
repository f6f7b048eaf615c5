//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

pub const EMERALD: (u8, u8, u8) = (16, 185, 129);
pub const TEAL: (u8, u8, u8) = (20, 184, 166);
pub const CYAN: (u8, u8, u8) = (6, 182, 212);

/// Central theme.  Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Emerald → teal → cyan, sampled at `t` in `[0, 1]`.
    pub fn gradient(t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let (a, b, local) = if t < 0.5 {
            (EMERALD, TEAL, t * 2.0)
        } else {
            (TEAL, CYAN, (t - 0.5) * 2.0)
        };
        let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * local).round() as u8;
        Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    pub fn accent() -> Color {
        Color::Rgb(EMERALD.0, EMERALD.1, EMERALD.2)
    }

    // ── page ───────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn accent_bold_style() -> Style {
        Self::accent_style().add_modifier(Modifier::BOLD)
    }

    pub fn secondary_accent_style() -> Style {
        Style::default().fg(Color::Rgb(TEAL.0, TEAL.1, TEAL.2))
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn rule_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn chip_style() -> Style {
        Style::default().fg(Color::Gray).bg(Color::Rgb(28, 28, 36))
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::Rgb(CYAN.0, CYAN.1, CYAN.2))
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Style forced onto a block that is still fading in.
    pub fn fading_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn nav_active_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn title_style() -> Style {
        Self::accent_bold_style()
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn track_style() -> Style {
        Style::default().fg(Color::Rgb(40, 40, 48))
    }
}
