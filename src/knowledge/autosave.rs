//! Periodic background persistence with a guaranteed final flush.
//!
//! [`spawn_autosave`] rewrites the whole store on a fixed interval whether or
//! not anything changed. The returned [`AutosaveGuard`] stops the timer and
//! writes once more on [`shutdown`](AutosaveGuard::shutdown) or, failing that,
//! on drop.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::knowledge::store::{lock_store, SharedStore};

/// Handle to a running autosave task.
#[must_use = "dropping the guard stops autosave immediately"]
pub struct AutosaveGuard {
    store: SharedStore,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

/// Start rewriting `store` every `period`. Must be called inside a tokio runtime.
pub fn spawn_autosave(store: SharedStore, period: Duration) -> AutosaveGuard {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let task_store = store.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately; nothing to save yet
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let ok = lock_store(&task_store).persist();
                    tracing::debug!(ok, "autosave tick");
                }
                _ = &mut stop_rx => break,
            }
        }
    });

    tracing::info!(period_secs = period.as_secs(), "autosave started");

    AutosaveGuard {
        store,
        stop: Some(stop_tx),
        task: Some(task),
    }
}

impl AutosaveGuard {
    /// Stop the timer, wait for it to exit, then flush the store one last time.
    pub async fn shutdown(mut self) -> bool {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "autosave task ended abnormally");
            }
        }
        self.flush()
    }

    fn flush(&self) -> bool {
        let ok = lock_store(&self.store).persist();
        tracing::info!(ok, "final knowledge base flush");
        ok
    }
}

impl Drop for AutosaveGuard {
    fn drop(&mut self) {
        // Already shut down cleanly.
        if self.task.is_none() {
            return;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.flush();
    }
}
