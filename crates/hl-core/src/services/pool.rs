use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FetchOutcome, JobSpec, TaskId, TaskState};

/// Contract the orchestration layer uses to submit and observe work units.
/// The pool owns all lifecycle state; callers retain only the handle.
///
/// Injected at construction wherever it is consumed, so tests can substitute
/// a scripted double.
#[async_trait]
pub trait WorkerPool: Send + Sync {
    /// Dispatch one work unit. Returns immediately with a handle; never
    /// waits for the unit to start or finish.
    async fn submit(&self, job: JobSpec) -> Result<TaskId>;

    /// Current lifecycle state of a handle. An unknown handle reads as
    /// `Pending`. Errs only on transport failure to the pool itself.
    async fn state(&self, id: &TaskId) -> Result<TaskState>;

    /// Bounded payload fetch. Returns by value: the payload, "not ready
    /// within the bound", or the failure cause.
    async fn fetch(&self, id: &TaskId, timeout: Duration) -> FetchOutcome;
}
