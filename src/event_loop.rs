// Copyright (c) 2026 rezky_nightky

use crossbeam_channel::{select, Receiver, Sender};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::events::DisplayEvent;
use crate::runtime::{SharedSize, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    QuitKey,
    Signal(i32),
    /// The event poller went away; nothing left to wait on.
    InputClosed,
}

pub fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match (k.code, k.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => true,
        (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => true,
        _ => false,
    }
}

/// Waits on display events and termination signals until one of them ends
/// the program.
///
/// A resize updates `size` first and then queues the new size for the
/// resize coordinator; with a rendezvous channel this blocks until the
/// coordinator takes it.
pub fn run(
    events: &Receiver<DisplayEvent>,
    terminate: &Receiver<i32>,
    size: &SharedSize,
    resizes: &Sender<Size>,
) -> Exit {
    loop {
        select! {
            recv(events) -> ev => match ev {
                Ok(DisplayEvent::Key(k)) if is_quit_key(&k) => return Exit::QuitKey,
                Ok(DisplayEvent::Key(_)) => {}
                Ok(DisplayEvent::Resize { width, height }) => {
                    let next = Size::new(width, height);
                    size.set(next);
                    if resizes.send(next).is_err() {
                        tracing::warn!("resize coordinator is gone; column table will not follow");
                    }
                }
                Ok(DisplayEvent::Error(msg)) => {
                    tracing::warn!(error = %msg, "display backend error");
                }
                Err(_) => return Exit::InputClosed,
            },
            recv(terminate) -> sig => match sig {
                Ok(sig) => return Exit::Signal(sig),
                // no signal source; keep serving input only
                Err(_) => return run_input_only(events, size, resizes),
            },
        }
    }
}

fn run_input_only(
    events: &Receiver<DisplayEvent>,
    size: &SharedSize,
    resizes: &Sender<Size>,
) -> Exit {
    let never = crossbeam_channel::never();
    run(events, &never, size, resizes)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crossbeam_channel::unbounded;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> DisplayEvent {
        DisplayEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));

        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }

    #[test]
    fn resize_updates_size_and_notifies_then_quit_key_exits() {
        let (ev_tx, ev_rx) = unbounded();
        let (_sig_tx, sig_rx) = unbounded::<i32>();
        let (rs_tx, rs_rx) = unbounded();
        let size = SharedSize::new(Size::new(80, 24));

        ev_tx.send(key(KeyCode::Char('x'), KeyModifiers::NONE)).unwrap();
        ev_tx
            .send(DisplayEvent::Resize {
                width: 100,
                height: 30,
            })
            .unwrap();
        ev_tx.send(DisplayEvent::Error("glitch".into())).unwrap();
        ev_tx.send(key(KeyCode::Char('q'), KeyModifiers::NONE)).unwrap();

        let exit = run(&ev_rx, &sig_rx, &size, &rs_tx);
        assert_eq!(exit, Exit::QuitKey);
        assert_eq!(size.get(), Size::new(100, 30));
        assert_eq!(rs_rx.try_iter().collect::<Vec<_>>(), vec![Size::new(100, 30)]);
    }

    #[test]
    fn termination_signal_exits() {
        let (_ev_tx, ev_rx) = unbounded::<DisplayEvent>();
        let (sig_tx, sig_rx) = unbounded();
        let (rs_tx, _rs_rx) = unbounded();
        let size = SharedSize::new(Size::new(1, 1));

        let handle = thread::spawn(move || run(&ev_rx, &sig_rx, &size, &rs_tx));
        sig_tx.send(15).unwrap();
        assert_eq!(handle.join().unwrap(), Exit::Signal(15));
    }

    #[test]
    fn missing_signal_source_keeps_serving_input() {
        let (ev_tx, ev_rx) = unbounded();
        let (sig_tx, sig_rx) = unbounded::<i32>();
        drop(sig_tx);
        let (rs_tx, _rs_rx) = unbounded();
        let size = SharedSize::new(Size::new(1, 1));

        ev_tx.send(key(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert_eq!(run(&ev_rx, &sig_rx, &size, &rs_tx), Exit::QuitKey);

        drop(ev_tx);
        assert_eq!(run(&ev_rx, &sig_rx, &size, &rs_tx), Exit::InputClosed);
    }
}
