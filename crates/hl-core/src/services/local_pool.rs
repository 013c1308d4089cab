use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::Result;
use crate::models::{FetchOutcome, JobSpec, LookupConfig, TaskId, TaskState};
use crate::services::pool::WorkerPool;
use crate::services::probes;

const FETCH_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
struct TaskRecord {
    state: TaskState,
    payload: Option<Value>,
    created_at: DateTime<Utc>,
}

/// In-process worker pool: each submission runs its probe on a spawned
/// tokio task and transitions Pending -> Started -> Success/Failed in a
/// shared task table. Terminal states never revert.
pub struct LocalWorkerPool {
    tasks: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
    config: Arc<LookupConfig>,
}

impl LocalWorkerPool {
    pub fn new(config: LookupConfig) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(config),
        }
    }

    async fn set_state(tasks: &RwLock<HashMap<TaskId, TaskRecord>>, id: &TaskId, state: TaskState) {
        let mut tasks = tasks.write().await;
        if let Some(record) = tasks.get_mut(id) {
            record.state = state;
        }
    }
}

#[async_trait]
impl WorkerPool for LocalWorkerPool {
    async fn submit(&self, job: JobSpec) -> Result<TaskId> {
        let id = TaskId::new();
        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(
                id.clone(),
                TaskRecord {
                    state: TaskState::Pending,
                    payload: None,
                    created_at: Utc::now(),
                },
            );
        }

        tracing::info!(task_id = %id, operation = job.operation_name(), "work unit submitted");

        let tasks = self.tasks.clone();
        let config = self.config.clone();
        let task_id = id.clone();
        tokio::spawn(async move {
            Self::set_state(&tasks, &task_id, TaskState::Started).await;
            match probes::run(&job, &config).await {
                Ok(payload) => {
                    let mut tasks = tasks.write().await;
                    if let Some(record) = tasks.get_mut(&task_id) {
                        record.payload = Some(payload);
                        record.state = TaskState::Success;
                        let elapsed = Utc::now() - record.created_at;
                        tracing::info!(
                            task_id = %task_id,
                            elapsed_ms = elapsed.num_milliseconds(),
                            "work unit completed"
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(task_id = %task_id, error = %e, "work unit failed");
                    Self::set_state(
                        &tasks,
                        &task_id,
                        TaskState::Failed {
                            error: Some(e.to_string()),
                        },
                    )
                    .await;
                }
            }
        });

        Ok(id)
    }

    async fn state(&self, id: &TaskId) -> Result<TaskState> {
        let tasks = self.tasks.read().await;
        // An unknown handle reads as Pending, matching broker semantics for
        // ids that have not reached a worker yet.
        Ok(tasks
            .get(id)
            .map(|record| record.state.clone())
            .unwrap_or(TaskState::Pending))
    }

    async fn fetch(&self, id: &TaskId, timeout: Duration) -> FetchOutcome {
        let deadline = Instant::now() + timeout;
        loop {
            {
                let tasks = self.tasks.read().await;
                match tasks.get(id) {
                    Some(TaskRecord {
                        state: TaskState::Success,
                        payload: Some(payload),
                        ..
                    }) => return FetchOutcome::Ready(payload.clone()),
                    Some(TaskRecord {
                        state: TaskState::Failed { error },
                        ..
                    }) => {
                        return FetchOutcome::Failed(
                            error.clone().unwrap_or_else(|| "Unknown error occurred".into()),
                        )
                    }
                    _ => {}
                }
            }
            if Instant::now() >= deadline {
                return FetchOutcome::NotReady;
            }
            tokio::time::sleep(FETCH_POLL_INTERVAL).await;
        }
    }
}
