//! Interval driver that simulates step progress while no real job is
//! attached. Mutually exclusive with the channel-driven path: the store
//! stops the driver the moment a real job arrives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;

use crate::job::steps::StepTracker;

/// Per-tick progress increment range, percent.
const MIN_INCREMENT: f64 = 5.0;
const MAX_INCREMENT: f64 = 15.0;

/// Cancellable timer task advancing a shared [`StepTracker`] once per tick.
pub struct FallbackDriver {
    stopped: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl FallbackDriver {
    /// Spawns the driver. It advances one step per tick by a random amount
    /// in [5, 15) percent and exits on its own once every step completes.
    pub fn spawn(tracker: Arc<Mutex<StepTracker>>, tick: Duration) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(tick).await;
                if flag.load(Ordering::Acquire) {
                    break;
                }

                let increment = rand::rng().random_range(MIN_INCREMENT..MAX_INCREMENT);
                let complete = {
                    let mut guard = match tracker.lock() {
                        Ok(g) => g,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    guard.advance(increment);
                    guard.is_complete()
                };

                if complete {
                    log::debug!("Fallback driver finished: all steps complete");
                    flag.store(true, Ordering::Release);
                    break;
                }
            }
        });

        Self { stopped, handle }
    }

    /// Stops the driver and releases its timer task. Safe to call more
    /// than once.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
        self.handle.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl Drop for FallbackDriver {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::Release);
        self.handle.abort();
    }
}
