use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Auto-refresh intervals below this are rejected and leave the scheduler
/// inactive.
pub const MIN_AUTO_REFRESH_MILLIS: u64 = 30_000;

/// Recurring auto-refresh timer for one ad unit. Exists only while active:
/// the owning unit holds `Option<Dispatcher>`, and dropping it aborts the
/// timer task.
pub struct Dispatcher {
    interval: Duration,
    handle: JoinHandle<()>,
}

impl Dispatcher {
    /// Spawns a timer task invoking `tick` every `millis` milliseconds,
    /// starting one full period from now. Returns `None` without spawning
    /// anything if `millis` is below [`MIN_AUTO_REFRESH_MILLIS`].
    ///
    /// Must be called within a tokio runtime.
    pub fn start<F>(millis: u64, mut tick: F) -> Option<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if millis < MIN_AUTO_REFRESH_MILLIS {
            warn!(
                millis,
                min = MIN_AUTO_REFRESH_MILLIS,
                "auto refresh interval below minimum, scheduler not started"
            );
            return None;
        }

        let interval = Duration::from_millis(millis);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut timer = tokio::time::interval_at(start, interval);
            loop {
                timer.tick().await;
                debug!(millis, "auto refresh firing");
                tick();
            }
        });

        Some(Dispatcher { interval, handle })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels the timer task. An in-flight fetch triggered by an earlier
    /// firing is not cancelled.
    pub fn stop(self) {
        // Drop aborts the task.
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
