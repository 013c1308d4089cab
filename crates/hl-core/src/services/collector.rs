use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::error::{LookupError, Result};
use crate::models::{FetchOutcome, LookupConfig, TaskId, TaskState};
use crate::services::pool::WorkerPool;

/// Bounds on one per-handle wait.
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl WaitOptions {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Block until the work unit reaches a terminal state or the deadline
/// elapses. Every failure path comes back as a `Wait` error carrying a
/// human-readable cause; nothing here cancels the underlying unit, which
/// keeps executing in the pool after a timeout.
pub async fn await_result(
    pool: &dyn WorkerPool,
    id: &TaskId,
    opts: &WaitOptions,
) -> Result<Value> {
    let deadline = Instant::now() + opts.timeout;

    loop {
        let state = pool
            .state(id)
            .await
            .map_err(|e| LookupError::Wait(e.to_string()))?;

        match state {
            TaskState::Success => {
                let remaining = deadline.duration_since(Instant::now());
                let bound = remaining.max(opts.poll_interval);
                return match pool.fetch(id, bound).await {
                    FetchOutcome::Ready(payload) => Ok(payload),
                    FetchOutcome::NotReady => Err(LookupError::Wait(format!(
                        "timed out after {}s waiting for task {id}",
                        opts.timeout.as_secs()
                    ))),
                    FetchOutcome::Failed(cause) => Err(LookupError::Wait(cause)),
                };
            }
            TaskState::Failed { error } => {
                return Err(LookupError::Wait(
                    error.unwrap_or_else(|| "Unknown error occurred".into()),
                ));
            }
            TaskState::Pending | TaskState::Started => {}
        }

        if Instant::now() >= deadline {
            tracing::warn!(task_id = %id, "work unit did not complete before the deadline");
            return Err(LookupError::Wait(format!(
                "timed out after {}s waiting for task {id}",
                opts.timeout.as_secs()
            )));
        }
        tokio::time::sleep(opts.poll_interval).await;
    }
}
