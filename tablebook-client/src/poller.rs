//! Cancellable periodic refresh
//!
//! A poll runs its first tick immediately, then once per period. The
//! returned [`PollHandle`] owns the task: [`PollHandle::cancel`] or dropping
//! the handle stops it, including a tick that is still in flight.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Owner of a running poll
#[derive(Debug)]
pub struct PollHandle {
    name: &'static str,
    shutdown: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stop the poll and wait for the task to wind down
    pub async fn cancel(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
            && e.is_panic()
        {
            tracing::error!(task = %self.name, "Poll task panicked: {}", e);
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if !self.shutdown.is_cancelled() {
            tracing::debug!(task = %self.name, "Poll handle dropped, cancelling");
            self.shutdown.cancel();
        }
    }
}

/// Spawn `tick` now and every `period` until cancelled
///
/// Must be called from within a tokio runtime.
pub fn spawn_poll<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    // interval() rejects a zero period
    let period = period.max(Duration::from_millis(1));

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(task = %name, period_ms = period.as_millis() as u64, "Poll started");

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = tick() => {}
            }
        }

        tracing::debug!(task = %name, "Poll stopped");
    });

    PollHandle {
        name,
        shutdown,
        handle: Some(handle),
    }
}
