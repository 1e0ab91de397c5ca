// Copyright (c) 2026 rezky_nightky

use crossbeam_channel::Receiver;
#[cfg(unix)]
use crossbeam_channel::TrySendError;

#[cfg(unix)]
use std::thread;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::{Handle, Signals};

/// OS termination requests, delivered as signal numbers on a channel.
///
/// If no handler could be installed the channel is already disconnected and
/// the event loop runs on input alone.
pub struct Termination {
    rx: Receiver<i32>,
    #[cfg(unix)]
    handle: Option<(Handle, thread::JoinHandle<()>)>,
}

impl Termination {
    #[cfg(unix)]
    pub fn install() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut signals = match Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "failed to install signal handlers");
                return Self { rx, handle: None };
            }
        };
        let handle = signals.handle();
        let spawned = thread::Builder::new()
            .name("signals".into())
            .spawn(move || {
                for sig in signals.forever() {
                    if let Err(TrySendError::Disconnected(_)) = tx.try_send(sig) {
                        break;
                    }
                }
            });
        match spawned {
            Ok(join) => Self {
                rx,
                handle: Some((handle, join)),
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to start signal thread");
                handle.close();
                Self { rx, handle: None }
            }
        }
    }

    #[cfg(windows)]
    pub fn install() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = tx.try_send(2);
        }) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }
        Self { rx }
    }

    pub fn receiver(&self) -> &Receiver<i32> {
        &self.rx
    }

    pub fn close(self) {
        #[cfg(unix)]
        if let Some((handle, join)) = self.handle {
            handle.close();
            let _ = join.join();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn raised_signal_is_forwarded_then_closed() {
        let term = Termination::install();
        signal_hook::low_level::raise(SIGHUP).unwrap();
        let sig = term
            .receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(sig, SIGHUP);
        term.close();
    }
}
