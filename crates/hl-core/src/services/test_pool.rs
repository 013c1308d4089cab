//! Scripted worker-pool double for orchestration tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{LookupError, Result};
use crate::models::{FetchOutcome, JobSpec, TaskId, TaskState};
use crate::services::pool::WorkerPool;

pub struct ScriptedPool {
    submit_error: Option<String>,
    state_error: Option<String>,
    submitted_state: TaskState,
    submitted: Mutex<Vec<(TaskId, JobSpec)>>,
    states: Mutex<HashMap<TaskId, TaskState>>,
    payloads: Mutex<HashMap<TaskId, Value>>,
    fetch_timeouts: Mutex<Vec<Duration>>,
}

impl ScriptedPool {
    /// Every submission immediately reads as `Success` with payload `"ok"`.
    pub fn completing() -> Self {
        Self {
            submit_error: None,
            state_error: None,
            submitted_state: TaskState::Success,
            submitted: Mutex::new(Vec::new()),
            states: Mutex::new(HashMap::new()),
            payloads: Mutex::new(HashMap::new()),
            fetch_timeouts: Mutex::new(Vec::new()),
        }
    }

    /// Submissions land but never leave `Pending`.
    pub fn stalled() -> Self {
        Self {
            submitted_state: TaskState::Pending,
            ..Self::completing()
        }
    }

    /// Every submission fails with the given cause.
    pub fn failing_submits(cause: &str) -> Self {
        Self {
            submit_error: Some(cause.to_string()),
            ..Self::completing()
        }
    }

    /// Every state poll fails as a transport error with the given cause.
    pub fn unreachable(cause: &str) -> Self {
        Self {
            state_error: Some(cause.to_string()),
            ..Self::completing()
        }
    }

    pub fn set_state(&self, id: &TaskId, state: TaskState) {
        self.states.lock().unwrap().insert(id.clone(), state);
    }

    pub fn set_payload(&self, id: &TaskId, payload: Value) {
        self.payloads.lock().unwrap().insert(id.clone(), payload);
    }

    pub fn submitted_jobs(&self) -> Vec<JobSpec> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, job)| job.clone())
            .collect()
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    /// Bound passed to the most recent `fetch` call.
    pub fn last_fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeouts.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl WorkerPool for ScriptedPool {
    async fn submit(&self, job: JobSpec) -> Result<TaskId> {
        if let Some(cause) = &self.submit_error {
            return Err(LookupError::Submit(cause.clone()));
        }
        let id = TaskId::new();
        self.submitted.lock().unwrap().push((id.clone(), job));
        self.states
            .lock()
            .unwrap()
            .insert(id.clone(), self.submitted_state.clone());
        self.payloads.lock().unwrap().insert(id.clone(), json!("ok"));
        Ok(id)
    }

    async fn state(&self, id: &TaskId) -> Result<TaskState> {
        if let Some(cause) = &self.state_error {
            return Err(LookupError::Wait(format!("worker pool unreachable: {cause}")));
        }
        Ok(self
            .states
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(TaskState::Pending))
    }

    async fn fetch(&self, id: &TaskId, timeout: Duration) -> FetchOutcome {
        self.fetch_timeouts.lock().unwrap().push(timeout);
        let state = self
            .states
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(TaskState::Pending);
        match state {
            TaskState::Success => match self.payloads.lock().unwrap().get(id) {
                Some(payload) => FetchOutcome::Ready(payload.clone()),
                None => FetchOutcome::NotReady,
            },
            TaskState::Failed { error } => {
                FetchOutcome::Failed(error.unwrap_or_else(|| "Unknown error occurred".into()))
            }
            TaskState::Pending | TaskState::Started => FetchOutcome::NotReady,
        }
    }
}
