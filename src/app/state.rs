//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use crate::config::AppConfig;
use crate::core::{
    content::{Portfolio, Section},
    reveal::RevealTracker,
    scroll::ScrollState,
    spring::Spring,
    typewriter::Snapshot,
};
use crate::ui::layout::AppLayout;
use crate::ui::page::{self, PageDocument};

/// Frames per cursor blink phase (on or off) at the default frame rate.
const CURSOR_BLINK_FRAMES: u64 = 16;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub portfolio: Portfolio,
    /// The laid-out page for the current terminal width.
    pub document: PageDocument,
    pub scroll: ScrollState,
    /// Smoothed scroll progress shown in the top bar.
    pub progress: Spring,
    pub reveal: RevealTracker,
    /// Latest typewriter output.
    pub headline: Snapshot,
    /// Frame counter; drives fades and the cursor blink.
    pub frame: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(portfolio: Portfolio, config: AppConfig) -> Self {
        Self {
            portfolio,
            document: PageDocument::default(),
            scroll: ScrollState::default(),
            progress: Spring::default(),
            reveal: RevealTracker::new(Vec::new()),
            headline: Snapshot::default(),
            frame: 0,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            config,
        }
    }

    /// Fit the document to the terminal.  Re-lays out the page when the
    /// content width changed and re-clamps scrolling; cheap otherwise.
    pub fn fit_to(&mut self, layout: &AppLayout) {
        let width = layout.content_width().max(page::MIN_WIDTH);
        if self.document.lines.is_empty() || self.document.width != width {
            let first_layout = self.document.lines.is_empty();
            // Keep the reader's place: remember the progress through the
            // page and restore it on the new layout.
            let progress = self.scroll.progress();
            self.document = page::build(&self.portfolio, width);
            self.reveal.set_spans(self.document.blocks.clone());
            self.scroll
                .set_dimensions(self.document.height(), layout.page_area.height as usize);
            if first_layout {
                // The hero is on screen from the start.
                self.reveal.reveal(0, self.frame);
            } else {
                let row = (progress * self.scroll.max_offset() as f64).round() as usize;
                self.scroll.jump_to(row);
            }
            tracing::debug!(
                width,
                rows = self.document.height(),
                "page laid out"
            );
        } else {
            self.scroll
                .set_dimensions(self.document.height(), layout.page_area.height as usize);
        }
        self.observe_viewport();
    }

    /// Advance animations by one frame of `dt` seconds.
    pub fn on_frame(&mut self, dt: f64) {
        self.frame = self.frame.wrapping_add(1);
        self.progress.set_target(self.scroll.progress());
        self.progress.step(dt);
        self.observe_viewport();
    }

    fn observe_viewport(&mut self) {
        let revealed = self
            .reveal
            .observe(self.scroll.offset(), self.scroll.viewport(), self.frame);
        if !revealed.is_empty() {
            tracing::trace!(?revealed, "blocks revealed");
        }
    }

    pub fn current_section(&self) -> Option<Section> {
        self.scroll.current_anchor(&self.document.anchors)
    }

    pub fn cursor_visible(&self) -> bool {
        (self.frame / CURSOR_BLINK_FRAMES) % 2 == 0
    }

    /// Scroll so `section` is at the top of the page.
    pub fn jump_to_section(&mut self, section: Section) {
        if let Some(row) = self.document.anchor_row(section) {
            self.scroll.jump_to(row);
            self.status_message = None;
        } else {
            self.status_message = Some(format!("No {} section", section.label()));
        }
    }
}
