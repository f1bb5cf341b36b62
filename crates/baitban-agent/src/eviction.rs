// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Once-per-second eviction driver for the [`RetentionCache`].

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::retention::RetentionCache;

/// One cache tick per period; the countdown in each entry is in these units.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic task that ages the retention cache.
///
/// Runs until its cancellation token fires. A panic inside one tick is
/// logged and the next tick runs normally.
pub struct EvictionTimer {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl EvictionTimer {
    /// Spawns the timer on the current tokio runtime.
    pub fn spawn(cache: Arc<RetentionCache>, cancel: CancellationToken) -> Self {
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            run(cache, task_cancel).await;
        });
        Self { handle, cancel }
    }

    /// Cancels the timer and waits for its task to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            error!(error = %e, "eviction timer task failed");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run(cache: Arc<RetentionCache>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; entries must get a full period.
    interval.tick().await;

    info!(window_secs = cache.window_secs(), "eviction timer started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match catch_unwind(AssertUnwindSafe(|| cache.tick())) {
                    Ok(0) => {}
                    Ok(expired) => debug!(expired, remaining = cache.len(), "expired cached messages"),
                    Err(_) => error!("cache tick panicked, continuing"),
                }
            }
            _ = cancel.cancelled() => {
                info!("eviction timer shutting down");
                break;
            }
        }
    }
}
