//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  A
//! `Tick` goes out whenever a frame interval passes without input; the main
//! loop uses it to advance animations.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Maps a raw terminal event, dropping the ones the page has no use for
/// (focus changes, paste, mouse motion).
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown | MouseEventKind::Down(_) => {
                Some(AppEvent::Mouse(m))
            }
            _ => None,
        },
        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  The task ends once the receiver is dropped.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let has_event = match event::poll(tick_rate) {
            Ok(has_event) => has_event,
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed, stopping event reader");
                break;
            }
        };
        let app_event = if has_event {
            match event::read() {
                Ok(ev) => match translate(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    continue;
                }
            }
        } else {
            AppEvent::Tick
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton};

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keeps_keys_scrolls_and_clicks() {
        let key = CtEvent::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert!(matches!(translate(key), Some(AppEvent::Key(_))));
        assert!(matches!(translate(mouse(MouseEventKind::ScrollDown)), Some(AppEvent::Mouse(_))));
        assert!(matches!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(AppEvent::Mouse(_))
        ));
        assert!(matches!(translate(CtEvent::Resize(80, 24)), Some(AppEvent::Resize(80, 24))));
    }

    #[test]
    fn drops_motion_and_focus() {
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
        assert!(translate(CtEvent::FocusGained).is_none());
    }
}
