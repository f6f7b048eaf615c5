//! Application orchestration: state management, event loop plumbing and input handling.

pub mod event;
pub mod handler;
pub mod state;
