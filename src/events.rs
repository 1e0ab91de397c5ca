// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEvent};

use crate::runtime::Shutdown;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);
const ERROR_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Error(String),
}

impl DisplayEvent {
    pub fn from_crossterm(ev: Event) -> Option<Self> {
        match ev {
            Event::Key(k) => Some(DisplayEvent::Key(k)),
            Event::Resize(width, height) => Some(DisplayEvent::Resize { width, height }),
            _ => None,
        }
    }
}

/// Forwards terminal input to `tx` until shutdown or the receiver is gone.
///
/// Polls with a timeout instead of blocking in `read` so the thread notices
/// shutdown and can be joined.
pub fn poll_display_events(tx: Sender<DisplayEvent>, shutdown: Shutdown) {
    while !shutdown.is_triggered() {
        let next = match event::poll(POLL_TIMEOUT) {
            Ok(false) => continue,
            Ok(true) => event::read().map(DisplayEvent::from_crossterm),
            Err(e) => Err(e),
        };
        let forwarded = match next {
            Ok(Some(ev)) => tx.send(ev),
            Ok(None) => Ok(()),
            Err(e) => {
                let sent = tx.send(DisplayEvent::Error(e.to_string()));
                if shutdown.wait(ERROR_BACKOFF) {
                    break;
                }
                sent
            }
        };
        if forwarded.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn maps_keys_and_resizes_and_drops_the_rest() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(
            DisplayEvent::from_crossterm(Event::Key(key)),
            Some(DisplayEvent::Key(key))
        );
        assert_eq!(
            DisplayEvent::from_crossterm(Event::Resize(80, 24)),
            Some(DisplayEvent::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(DisplayEvent::from_crossterm(Event::FocusGained), None);
    }
}
