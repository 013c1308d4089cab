use serde::Serialize;
use serde_json::Value;

use super::task::TaskId;

/// One element of a merged lookup answer. `task_id` is present only for
/// work units that were actually dispatched.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    pub host: String,
    pub service: String,
    pub results: Value,
}

impl ResultEntry {
    /// Entry for a service that never produced a handle (invalid name or
    /// submission failure).
    pub fn immediate(host: &str, service: &str, results: &str) -> Self {
        Self {
            task_id: None,
            host: host.to_string(),
            service: service.to_string(),
            results: Value::String(results.to_string()),
        }
    }

    /// Entry for a dispatched work unit.
    pub fn resolved(task_id: TaskId, host: &str, service: &str, results: Value) -> Self {
        Self {
            task_id: Some(task_id),
            host: host.to_string(),
            service: service.to_string(),
            results,
        }
    }
}

/// Top-level answer for one lookup call.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LookupResponse {
    /// The host failed classification; nothing was dispatched.
    InvalidHost { results: String },
    /// One entry per requested service.
    Services { services: Vec<ResultEntry> },
}

/// Handle plus initial state, returned by the submit-only flow.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitReceipt {
    pub task_id: TaskId,
    pub status: String,
}

/// External status code and body produced by the task resolvers, handed to
/// whatever transport fronts them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub code: u16,
    pub body: Value,
}
