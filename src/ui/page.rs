//! The scrolling page: a [`Portfolio`] laid out as a flat list of lines.
//!
//! Layout happens once per content width.  Every frame only the visible slice
//! is drawn, with the typewriter headline patched into its reserved row and
//! blocks that have not been revealed yet left blank.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::content::{Link, Portfolio, Section};
use crate::core::reveal::RevealTracker;

use super::theme::Theme;

// ───────────────────────────────────────── document ──────────

/// A laid-out page.
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    pub lines: Vec<Line<'static>>,
    /// Row at which each navigable section starts, in page order.
    pub anchors: Vec<(Section, usize)>,
    /// Row spans of the revealable blocks, in page order.
    pub blocks: Vec<Range<usize>>,
    /// Row reserved for the typewriter headline.
    pub headline_row: usize,
    /// Width the document was laid out for.
    pub width: u16,
}

impl PageDocument {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn anchor_row(&self, section: Section) -> Option<usize> {
        self.anchors
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, row)| *row)
    }
}

/// Narrowest column the page is laid out for; narrower areas clip.
pub const MIN_WIDTH: u16 = 20;

/// Lay out `portfolio` for a text column `width` cells wide.
pub fn build(portfolio: &Portfolio, width: u16) -> PageDocument {
    let mut b = Builder::new(width.max(MIN_WIDTH));

    hero(&mut b, portfolio);
    stats(&mut b, portfolio);
    skills(&mut b, portfolio);
    projects(&mut b, portfolio);
    training_and_certs(&mut b, portfolio);
    education(&mut b, portfolio);
    achievements(&mut b, portfolio);
    contact(&mut b, portfolio);
    footer(&mut b, portfolio);

    b.finish()
}

struct Builder {
    width: usize,
    doc: PageDocument,
    block_start: Option<usize>,
}

impl Builder {
    fn new(width: u16) -> Self {
        Self {
            width: width as usize,
            doc: PageDocument {
                width,
                ..PageDocument::default()
            },
            block_start: None,
        }
    }

    fn row(&self) -> usize {
        self.doc.lines.len()
    }

    fn push(&mut self, line: Line<'static>) {
        self.doc.lines.push(line);
    }

    fn blank(&mut self) {
        self.push(Line::raw(""));
    }

    fn text(&mut self, text: &str, style: Style, indent: usize) {
        let pad = " ".repeat(indent);
        for chunk in wrap(text, self.width.saturating_sub(indent)) {
            self.push(Line::from(Span::styled(format!("{pad}{chunk}"), style)));
        }
    }

    /// `lead` followed by `text`, with continuation lines hanging under
    /// the text.
    fn hanging(&mut self, lead: String, lead_style: Style, text: &str, style: Style) {
        let hang = lead.chars().count();
        let mut lead = Some(Span::styled(lead, lead_style));
        for chunk in wrap(text, self.width.saturating_sub(hang)) {
            let first = lead.take().unwrap_or_else(|| Span::raw(" ".repeat(hang)));
            self.push(Line::from(vec![first, Span::styled(chunk, style)]));
        }
    }

    fn bullet(&mut self, marker: &str, text: &str, marker_style: Style, style: Style) {
        self.hanging(format!("  {marker} "), marker_style, text, style);
    }

    /// Two items on one line when they fit, otherwise stacked.
    fn title_with_meta(&mut self, title: &str, meta: &str, meta_style: Style) {
        let joined = title.chars().count() + 2 + meta.chars().count();
        if meta.is_empty() {
            self.text(title, Theme::heading_style(), 0);
        } else if joined <= self.width {
            self.push(Line::from(vec![
                Span::styled(title.to_string(), Theme::heading_style()),
                Span::raw("  "),
                Span::styled(meta.to_string(), meta_style),
            ]));
        } else {
            self.text(title, Theme::heading_style(), 0);
            self.text(meta, meta_style, 0);
        }
    }

    fn heading(&mut self, title: &str) {
        let rule_len = self.width.saturating_sub(title.chars().count() + 1);
        self.push(Line::from(vec![
            Span::styled(title.to_string(), Theme::heading_style()),
            Span::raw(" "),
            Span::styled("─".repeat(rule_len), Theme::rule_style()),
        ]));
        self.blank();
    }

    /// Items rendered as padded chips, wrapped to the page width.
    fn chips(&mut self, items: &[String], style: Style, indent: usize) {
        let mut spans: Vec<Span<'static>> = vec![Span::raw(" ".repeat(indent))];
        let mut used = indent;
        for item in items {
            let chip = format!(" {item} ");
            let w = chip.chars().count();
            if used > indent && used + 1 + w > self.width {
                self.push(Line::from(std::mem::take(&mut spans)));
                spans.push(Span::raw(" ".repeat(indent)));
                used = indent;
            }
            if used > indent {
                spans.push(Span::raw(" "));
                used += 1;
            }
            spans.push(Span::styled(chip, style));
            used += w;
        }
        if used > indent {
            self.push(Line::from(spans));
        }
    }

    fn links(&mut self, links: &[Link]) {
        for link in links {
            self.link(Some(&link.label), &link.url);
        }
    }

    /// `↗ label url`, with the url moved to its own lines when it does
    /// not fit beside the label.
    fn link(&mut self, label: Option<&str>, url: &str) {
        let label = label.map(|l| format!("{l:<10}")).unwrap_or_default();
        let lead = 4 + label.chars().count();
        if lead + url.chars().count() <= self.width {
            self.push(Line::from(vec![
                Span::styled("  ↗ ", Theme::accent_style()),
                Span::styled(label, Theme::heading_style()),
                Span::styled(url.to_string(), Theme::link_style()),
            ]));
            return;
        }
        if !label.is_empty() {
            self.push(Line::from(vec![
                Span::styled("  ↗ ", Theme::accent_style()),
                Span::styled(label.trim_end().to_string(), Theme::heading_style()),
            ]));
            self.text(url, Theme::link_style(), 4);
        } else {
            self.hanging("  ↗ ".into(), Theme::accent_style(), url, Theme::link_style());
        }
    }

    fn anchor(&mut self, section: Section) {
        let row = self.row();
        self.doc.anchors.push((section, row));
    }

    fn begin_block(&mut self) {
        self.block_start = Some(self.row());
    }

    fn end_block(&mut self) {
        if let Some(start) = self.block_start.take() {
            let end = self.row();
            if end > start {
                self.doc.blocks.push(start..end);
            }
        }
    }

    fn finish(mut self) -> PageDocument {
        self.end_block();
        self.doc
    }
}

// ───────────────────────────────────────── sections ──────────

fn hero(b: &mut Builder, p: &Portfolio) {
    b.anchor(Section::About);
    b.begin_block();
    b.blank();
    if let Some(ref availability) = p.profile.availability {
        b.hanging(" ● ".into(), Theme::accent_style(), availability, Theme::accent_style());
        b.blank();
    }
    b.push(Line::from(vec![
        Span::styled(format!("{} ", p.profile.greeting), Theme::heading_style()),
        Span::styled(
            p.profile.display_name().to_string(),
            Theme::accent_bold_style(),
        ),
    ]));
    let headline_row = b.row();
    b.doc.headline_row = headline_row;
    b.blank(); // replaced by the typewriter at draw time
    b.blank();
    if !p.profile.bio.is_empty() {
        b.text(&p.profile.bio, Theme::body_style(), 0);
        b.blank();
    }
    b.links(&p.profile.links);
    b.blank();
    b.end_block();
}

fn stats(b: &mut Builder, p: &Portfolio) {
    if p.stats.is_empty() {
        return;
    }
    b.begin_block();
    // Two columns when there is room, like a 2×2 card grid.
    let cols = if b.width >= 48 { 2 } else { 1 };
    let cell = b.width / cols;
    for pair in p.stats.chunks(cols) {
        let mut spans = Vec::new();
        for stat in pair {
            let value = format!("{:>6}", stat.value);
            let label = format!("  {}", stat.label);
            let pad = cell.saturating_sub(value.chars().count() + label.chars().count());
            spans.push(Span::styled(value, Theme::accent_bold_style()));
            spans.push(Span::styled(label, Theme::muted_style()));
            spans.push(Span::raw(" ".repeat(pad)));
        }
        b.push(Line::from(spans));
    }
    b.blank();
    b.blank();
    b.end_block();
}

fn skills(b: &mut Builder, p: &Portfolio) {
    if p.skills.is_empty() {
        return;
    }
    b.anchor(Section::Skills);
    b.begin_block();
    b.heading("Skills");
    for group in &p.skills {
        b.push(Line::from(Span::styled(
            group.title.clone(),
            Theme::heading_style(),
        )));
        b.chips(&group.items, Theme::chip_style(), 2);
        b.blank();
    }
    b.blank();
    b.end_block();
}

fn projects(b: &mut Builder, p: &Portfolio) {
    if p.projects.is_empty() {
        return;
    }
    b.anchor(Section::Projects);
    b.begin_block();
    b.heading("Projects");
    for project in &p.projects {
        b.title_with_meta(&project.title, &project.period, Theme::accent_style());
        if !project.description.is_empty() {
            b.text(&project.description, Theme::body_style(), 0);
        }
        for feature in &project.features {
            b.bullet("→", feature, Theme::accent_style(), Theme::muted_style());
        }
        if !project.tech.is_empty() {
            b.chips(&project.tech, Theme::accent_style().add_modifier(Modifier::REVERSED), 2);
        }
        if let Some(ref url) = project.url {
            b.link(None, url);
        }
        b.blank();
    }
    b.blank();
    b.end_block();
}

fn training_and_certs(b: &mut Builder, p: &Portfolio) {
    if p.training.is_empty() && p.certifications.is_empty() {
        return;
    }
    b.begin_block();
    if !p.training.is_empty() {
        b.heading("Training");
        for course in &p.training {
            if course.live {
                b.push(Line::from(Span::styled(" ● LIVE", Theme::accent_bold_style())));
            }
            b.text(&course.title, Theme::heading_style(), 0);
            if !course.period.is_empty() {
                b.text(&course.period, Theme::muted_style(), 0);
            }
            for topic in &course.topics {
                b.bullet("✓", topic, Theme::accent_style(), Theme::body_style());
            }
            b.blank();
        }
    }
    if !p.certifications.is_empty() {
        b.heading("Certifications");
        for cert in &p.certifications {
            b.bullet("✔", &cert.title, Theme::accent_style(), Theme::heading_style());
            if !cert.date.is_empty() {
                b.text(&cert.date, Theme::muted_style(), 4);
            }
        }
        b.blank();
    }
    b.blank();
    b.end_block();
}

fn education(b: &mut Builder, p: &Portfolio) {
    if p.education.is_empty() {
        return;
    }
    b.anchor(Section::Education);
    b.begin_block();
    b.heading("Education");
    for (i, school) in p.education.iter().enumerate() {
        let badge_style = if i % 2 == 0 {
            Theme::accent_bold_style()
        } else {
            Theme::secondary_accent_style().add_modifier(Modifier::BOLD)
        };
        let badge = format!("[{:^5}] ", school.abbr);
        let indent = badge.chars().count();
        b.hanging(badge, badge_style, &school.name, Theme::heading_style());
        if !school.degree.is_empty() {
            b.text(&school.degree, Theme::body_style(), indent);
        }
        let place: Vec<&str> = [school.location.as_str(), school.period.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !place.is_empty() {
            b.text(&place.join(" · "), Theme::muted_style(), indent);
        }
        if !school.score.is_empty() {
            b.text(&school.score, badge_style, indent);
        }
        b.blank();
    }
    b.blank();
    b.end_block();
}

fn achievements(b: &mut Builder, p: &Portfolio) {
    if p.achievements.is_empty() {
        return;
    }
    b.begin_block();
    b.heading("Achievements");
    for item in &p.achievements {
        b.hanging("★ ".into(), Theme::accent_style(), &item.title, Theme::heading_style());
        if !item.summary.is_empty() {
            b.text(&item.summary, Theme::body_style(), 2);
        }
        if !item.place.is_empty() {
            b.text(&item.place, Theme::accent_style(), 2);
        }
        b.blank();
    }
    b.blank();
    b.end_block();
}

fn contact(b: &mut Builder, p: &Portfolio) {
    let c = &p.contact;
    if c.heading.is_empty() && c.message.is_empty() && c.links.is_empty() {
        return;
    }
    b.anchor(Section::Contact);
    b.begin_block();
    let heading = if c.heading.is_empty() { "Contact" } else { c.heading.as_str() };
    b.heading(heading);
    if !c.title.is_empty() {
        b.text(&c.title, Theme::heading_style(), 0);
        b.blank();
    }
    if !c.message.is_empty() {
        b.text(&c.message, Theme::body_style(), 0);
        b.blank();
    }
    b.links(&c.links);
    b.blank();
    b.push(Line::from(Span::styled("  Say Hello!", Theme::accent_bold_style())));
    b.blank();
    b.blank();
    b.end_block();
}

fn footer(b: &mut Builder, p: &Portfolio) {
    b.begin_block();
    let width = b.width;
    b.push(Line::from(Span::styled("─".repeat(width), Theme::rule_style())));
    b.text(&p.profile.name, Theme::accent_bold_style(), 0);
    if !p.footer.tagline.is_empty() {
        b.text(&p.footer.tagline, Theme::muted_style(), 0);
    }
    b.links(&p.footer.links);
    if !p.footer.copyright.is_empty() {
        b.blank();
        b.text(&p.footer.copyright, Theme::muted_style(), 0);
    }
    b.end_block();
}

// ───────────────────────────────────────── wrapping ──────────

/// Greedy word wrap by char count.  Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(word.iter());
                current_len += word.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // Word alone is too long: hard-split it.
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ───────────────────────────────────────── widget ────────────

/// Draws the visible slice of a [`PageDocument`]; created fresh each frame.
pub struct PageWidget<'a> {
    pub document: &'a PageDocument,
    pub offset: usize,
    pub headline: &'a str,
    pub cursor_visible: bool,
    pub reveal: &'a RevealTracker,
    pub frame: u64,
}

impl PageWidget<'_> {
    fn headline_line(&self) -> Line<'static> {
        let cursor = if self.cursor_visible { "|" } else { " " };
        Line::from(vec![
            Span::styled(self.headline.to_string(), Theme::accent_bold_style()),
            Span::styled(cursor, Theme::accent_style()),
        ])
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let doc = self.document;
        // Centre the text column horizontally.
        let x_pad = area.width.saturating_sub(doc.width) / 2;
        let max_width = area.width.saturating_sub(x_pad);

        for row in 0..area.height {
            let idx = self.offset + row as usize;
            let Some(line) = doc.lines.get(idx) else {
                break;
            };

            let opacity = self
                .reveal
                .block_at(idx)
                .map_or(1.0, |block| self.reveal.opacity(block, self.frame));
            if opacity <= 0.0 {
                continue;
            }

            let mut line = if idx == doc.headline_row {
                self.headline_line()
            } else {
                line.clone()
            };
            if opacity < 1.0 {
                for span in &mut line.spans {
                    span.style = span
                        .style
                        .patch(Theme::fading_style())
                        .remove_modifier(Modifier::BOLD);
                }
            }
            buf.set_line(area.x + x_pad, area.y + row, &line, max_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn anchors_are_in_page_order() {
        let p = Portfolio::builtin().unwrap();
        let doc = build(&p, 76);
        let order: Vec<Section> = doc.anchors.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, Section::ALL.to_vec());
        let rows: Vec<usize> = doc.anchors.iter().map(|(_, r)| *r).collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(doc.anchor_row(Section::About), Some(0));
    }

    #[test]
    fn section_headings_sit_on_anchor_rows() {
        let p = Portfolio::builtin().unwrap();
        let doc = build(&p, 76);
        let skills = doc.anchor_row(Section::Skills).unwrap();
        assert!(line_text(&doc.lines[skills]).starts_with("Skills ─"));
        let contact = doc.anchor_row(Section::Contact).unwrap();
        assert!(line_text(&doc.lines[contact]).starts_with("Get In Touch"));
    }

    #[test]
    fn blocks_are_disjoint_and_cover_the_page_end() {
        let p = Portfolio::builtin().unwrap();
        let doc = build(&p, 60);
        assert!(doc.blocks.windows(2).all(|w| w[0].end <= w[1].start));
        assert_eq!(doc.blocks.last().map(|b| b.end), Some(doc.height()));
        assert!(doc.blocks[0].contains(&doc.headline_row));
    }

    #[test]
    fn no_line_exceeds_the_width() {
        let p = Portfolio::builtin().unwrap();
        for width in [30u16, 50, 96] {
            let doc = build(&p, width);
            for line in &doc.lines {
                assert!(
                    line.width() <= width as usize,
                    "{:?} wider than {width}",
                    line_text(line)
                );
            }
        }
    }

    #[test]
    fn narrower_pages_are_taller() {
        let p = Portfolio::builtin().unwrap();
        assert!(build(&p, 30).height() > build(&p, 96).height());
    }

    #[test]
    fn widget_draws_headline_and_hides_unrevealed_blocks() {
        let p = Portfolio::builtin().unwrap();
        let doc = build(&p, 40);
        let mut reveal = RevealTracker::new(doc.blocks.clone());
        reveal.reveal(0, 0);

        let area = Rect::new(0, 0, 40, doc.blocks[0].end as u16 + 4);
        let mut buf = Buffer::empty(area);
        PageWidget {
            document: &doc,
            offset: 0,
            headline: "Data Sci",
            cursor_visible: true,
            reveal: &reveal,
            frame: RevealTracker::DEFAULT_FADE_FRAMES,
        }
        .render(area, &mut buf);

        assert_eq!(row_text(&buf, doc.headline_row as u16), "Data Sci|");
        // The stats block directly below the hero is not revealed yet.
        let stats_row = doc.blocks[1].start as u16;
        assert_eq!(row_text(&buf, stats_row), "");
    }
}
