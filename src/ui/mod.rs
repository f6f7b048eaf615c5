//! Rendering: widgets, theme and layout.

pub mod layout;
pub mod nav;
pub mod page;
pub mod popup;
pub mod progress;
pub mod theme;
