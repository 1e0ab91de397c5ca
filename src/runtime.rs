// Copyright (c) 2026 rezky_nightky

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

/// Display dimensions in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// The authoritative current size. Written by the event loop only; the
/// spawner and the simulator read it every tick.
#[derive(Debug, Default)]
pub struct SharedSize(AtomicU32);

impl SharedSize {
    pub fn new(size: Size) -> Self {
        Self(AtomicU32::new(pack(size)))
    }

    pub fn get(&self) -> Size {
        unpack(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, size: Size) {
        self.0.store(pack(size), Ordering::Release);
    }
}

fn pack(size: Size) -> u32 {
    ((size.width as u32) << 16) | size.height as u32
}

fn unpack(v: u32) -> Size {
    Size {
        width: (v >> 16) as u16,
        height: (v & 0xFFFF) as u16,
    }
}

/// Cooperative cancellation token shared by every background task.
///
/// Nothing is ever sent on the channel: dropping the [`ShutdownTrigger`]
/// disconnects it, which wakes every `select!` waiting on [`Shutdown::signal`].
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: Receiver<()>,
}

#[derive(Debug)]
pub struct ShutdownTrigger {
    _tx: Sender<()>,
}

pub fn shutdown_pair() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = crossbeam_channel::bounded(0);
    (ShutdownTrigger { _tx: tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(self) {
        drop(self);
    }
}

impl Shutdown {
    pub fn signal(&self) -> &Receiver<()> {
        &self.rx
    }

    pub fn is_triggered(&self) -> bool {
        matches!(
            self.rx.recv_timeout(Duration::ZERO),
            Err(RecvTimeoutError::Disconnected)
        )
    }

    /// Sleeps for `dur` unless shutdown arrives first. Returns `true` on shutdown.
    pub fn wait(&self, dur: Duration) -> bool {
        matches!(
            self.rx.recv_timeout(dur),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_size_round_trips_extremes() {
        let s = SharedSize::new(Size::new(0, 0));
        s.set(Size::new(u16::MAX, 1));
        assert_eq!(s.get(), Size::new(u16::MAX, 1));
        s.set(Size::new(3, u16::MAX));
        assert_eq!(s.get(), Size::new(3, u16::MAX));
    }

    #[test]
    fn shutdown_is_observed_by_every_clone() {
        let (trigger, shutdown) = shutdown_pair();
        let other = shutdown.clone();
        assert!(!shutdown.is_triggered());
        assert!(!other.wait(Duration::from_millis(1)));

        trigger.trigger();
        assert!(shutdown.is_triggered());
        assert!(other.wait(Duration::from_secs(5)));
    }
}
