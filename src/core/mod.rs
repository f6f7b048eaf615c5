//! Core logic, independent of the terminal: the typewriter effect, the
//! portfolio content model and the scroll/reveal/spring state the page
//! animates with.

pub mod content;
pub mod reveal;
pub mod scroll;
pub mod spring;
pub mod typewriter;
