//! Background thread that purges expired trash on a fixed interval.
//!
//! The sweeper shares the store through `Arc<Mutex<_>>`. Stopping it (or
//! dropping it) wakes the thread immediately and joins it.

use crate::core::FolioCore;
use crate::core::persistence::SlotStorage;
use chrono::Utc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Shortest wait between sweeps; smaller intervals are raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

pub struct Sweeper {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Starts the sweep loop. The first sweep runs after one `interval`.
    pub fn spawn<S>(core: Arc<Mutex<FolioCore<S>>>, interval: Duration) -> Self
    where
        S: SlotStorage + Send + 'static,
    {
        if interval < MIN_SWEEP_INTERVAL {
            warn!(?interval, min = ?MIN_SWEEP_INTERVAL, "Sweep interval too short, raising it");
        }
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            debug!(?interval, "Sweeper started");
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let Ok(mut core) = core.lock() else {
                    error!("Store lock poisoned, stopping sweeper");
                    break;
                };
                core.cleanup_expired(Utc::now());
            }
            debug!("Sweeper stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Cancels the loop and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("Sweeper thread panicked");
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}
