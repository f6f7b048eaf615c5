//! Navigation bar: site name on the left, numbered section links on the
//! right with the section currently in view highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::content::Section;

use super::theme::Theme;

pub struct NavBar<'a> {
    pub name: &'a str,
    pub current: Option<Section>,
}

impl NavBar<'_> {
    fn links(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, &section) in Section::ALL.iter().enumerate() {
            let style = if Some(section) == self.current {
                Theme::nav_active_style()
            } else {
                Theme::nav_style()
            };
            spans.push(Span::styled(format!("{}", i + 1), Theme::muted_style()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(section.label(), style));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    /// Column where the links start, or `None` when they are hidden.
    fn links_x(&self, area: Rect) -> Option<u16> {
        let links_width = self.links().width() as u16;
        let name_width = self.name.chars().count() as u16 + 1;
        (name_width + 2 + links_width <= area.width).then(|| area.x + area.width - links_width)
    }

    /// Section whose link covers `column`, for mouse clicks.
    pub fn section_at(&self, area: Rect, column: u16) -> Option<Section> {
        let mut x = self.links_x(area)?;
        for (i, &section) in Section::ALL.iter().enumerate() {
            let width = format!("{} {}", i + 1, section.label()).chars().count() as u16;
            if (x..x + width).contains(&column) {
                return Some(section);
            }
            x += width + 2;
        }
        None
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let name = Line::from(Span::styled(format!(" {}", self.name), Theme::title_style()));
        buf.set_line(area.x, area.y, &name, area.width);

        // Links go right-aligned; they are dropped when they would overlap
        // the name on narrow terminals.
        if let Some(x) = self.links_x(area) {
            let links = self.links();
            buf.set_line(x, area.y, &links, links.width() as u16);
        }
    }
}
