//! Scroll-progress bar: a thin gradient line across the top of the screen.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::theme::Theme;

/// Partial-cell glyphs, one to seven eighths wide.
const EIGHTHS: [&str; 7] = ["▏", "▎", "▍", "▌", "▋", "▊", "▉"];

pub struct ProgressBar {
    /// Fill fraction in `[0, 1]` (values outside are clamped).
    pub progress: f64,
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let eighths = (self.progress.clamp(0.0, 1.0) * width as f64 * 8.0).round() as usize;
        let full = eighths / 8;
        let partial = eighths % 8;

        for i in 0..width {
            let t = if width > 1 { i as f64 / (width - 1) as f64 } else { 0.0 };
            let (symbol, style) = if i < full {
                ("█", Style::default().fg(Theme::gradient(t)))
            } else if i == full && partial > 0 {
                (EIGHTHS[partial - 1], Style::default().fg(Theme::gradient(t)))
            } else {
                ("─", Theme::track_style())
            };
            buf[(area.x + i as u16, area.y)].set_symbol(symbol).set_style(style);
        }
    }
}
