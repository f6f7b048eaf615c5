//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the page column grows, including its side padding.
pub const MAX_PAGE_WIDTH: u16 = 100;

/// Horizontal padding on each side of the page column.
const PAGE_PADDING: u16 = 2;

/// Primary screen layout: progress bar, nav bar, page and status bar.
pub struct AppLayout {
    pub progress_area: Rect,
    pub nav_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // scroll progress
                Constraint::Length(1), // nav bar
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            progress_area: chunks[0],
            nav_area: chunks[1],
            page_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// Width of the text column inside the page area.
    pub fn content_width(&self) -> u16 {
        self.page_area
            .width
            .min(MAX_PAGE_WIDTH)
            .saturating_sub(PAGE_PADDING * 2)
            .max(1)
    }
}
