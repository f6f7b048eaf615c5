//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::content::Section;
use crate::ui::layout::AppLayout;
use crate::ui::nav::NavBar;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    // Digits jump straight to a section, matching the nav bar numbering.
    if let KeyCode::Char(c) = key.code {
        if let Some(section) = c.to_digit(10).and_then(Section::from_number) {
            state.jump_to_section(section);
            return;
        }
    }

    if let Some(action) = state.config.match_key(key) {
        apply_action(state, action);
    }
}

fn apply_action(state: &mut AppState, action: Action) {
    let step = state.config.scroll_step as isize;
    match action {
        Action::ScrollUp => state.scroll.scroll_by(-step),
        Action::ScrollDown => state.scroll.scroll_by(step),
        Action::PageUp => state.scroll.page_up(),
        Action::PageDown => state.scroll.page_down(),
        Action::Top => state.scroll.to_top(),
        Action::Bottom => state.scroll.to_bottom(),
        Action::NextSection => {
            match state.scroll.next_anchor(&state.document.anchors) {
                Some(row) if row <= state.scroll.max_offset() => state.scroll.jump_to(row),
                // The last sections may not reach the top of the viewport.
                _ => state.scroll.to_bottom(),
            }
        }
        Action::PrevSection => match state.scroll.prev_anchor(&state.document.anchors) {
            Some(row) => state.scroll.jump_to(row),
            None => state.scroll.to_top(),
        },
        Action::Help => state.active_view = ActiveView::Help,
        Action::Quit => state.should_quit = true,
    }
}

// ── Help overlay ───────────────────────────────────────────────

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
            state.active_view = ActiveView::Page;
        }
        _ => {
            if state.config.match_key(key) == Some(Action::Quit) {
                state.should_quit = true;
            }
        }
    }
}

// ── Mouse ──────────────────────────────────────────────────────

/// Wheel scrolls the page; a left click on a nav link jumps to its section.
pub fn handle_mouse(state: &mut AppState, layout: &AppLayout, mouse: MouseEvent) {
    if state.active_view != ActiveView::Page {
        return;
    }
    let step = state.config.scroll_step as isize;
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-step),
        MouseEventKind::ScrollDown => state.scroll.scroll_by(step),
        MouseEventKind::Down(MouseButton::Left) if mouse.row == layout.nav_area.y => {
            let nav = NavBar {
                name: state.portfolio.profile.display_name(),
                current: None,
            };
            if let Some(section) = nav.section_at(layout.nav_area, mouse.column) {
                state.jump_to_section(section);
            }
        }
        _ => {}
    }
}
