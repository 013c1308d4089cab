use std::time::Duration;

use serde_json::json;

use crate::models::{FetchOutcome, LookupConfig, Resolved, TaskId, TaskState};
use crate::services::pool::WorkerPool;

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Bound on fetching a payload for a unit already known to be complete,
/// distinct from the dispatch-phase wait.
#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    pub result_fetch_timeout: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            result_fetch_timeout: Duration::from_secs(1),
        }
    }
}

impl ResolveOptions {
    pub fn from_config(config: &LookupConfig) -> Self {
        Self {
            result_fetch_timeout: Duration::from_secs(config.result_fetch_timeout_secs),
        }
    }
}

/// Map a handle's lifecycle state to an external status code and body.
/// Never blocks on the work unit and never fails: a transport error while
/// reading state degrades to the generic error shape.
pub async fn resolve_status(pool: &dyn WorkerPool, id: &TaskId) -> Resolved {
    let state = match pool.state(id).await {
        Ok(state) => state,
        Err(e) => return task_error(id, "UNKNOWN", Some(e.to_string())),
    };

    match state {
        TaskState::Pending | TaskState::Started | TaskState::Success => Resolved {
            code: 200,
            body: json!({ "task_id": id, "status": state.label() }),
        },
        TaskState::Failed { ref error } => task_error(id, state.label(), error.clone()),
    }
}

/// Like [`resolve_status`], but additionally fetches the final payload under
/// the short configured bound when the unit has completed. Returns 200 only
/// for SUCCESS.
pub async fn resolve_result(pool: &dyn WorkerPool, id: &TaskId, opts: &ResolveOptions) -> Resolved {
    let state = match pool.state(id).await {
        Ok(state) => state,
        Err(e) => return task_error(id, "UNKNOWN", Some(e.to_string())),
    };

    match state {
        TaskState::Success => match pool.fetch(id, opts.result_fetch_timeout).await {
            FetchOutcome::Ready(result) => Resolved {
                code: 200,
                body: json!({ "task_id": id, "status": state.label(), "result": result }),
            },
            FetchOutcome::NotReady => task_error(
                id,
                state.label(),
                Some("result not available within the fetch bound".into()),
            ),
            FetchOutcome::Failed(cause) => task_error(id, state.label(), Some(cause)),
        },
        // Result does not exist yet.
        TaskState::Pending | TaskState::Started => Resolved {
            code: 404,
            body: json!({ "task_id": id, "status": state.label() }),
        },
        TaskState::Failed { ref error } => task_error(id, state.label(), error.clone()),
    }
}

/// Generic error shape with total cause extraction: a missing cause falls
/// back to a fixed string.
fn task_error(id: &TaskId, state_label: &str, cause: Option<String>) -> Resolved {
    let desc = format!(
        "task state : {state_label} - {}",
        cause.unwrap_or_else(|| UNKNOWN_ERROR.into())
    );
    Resolved {
        code: 500,
        body: json!({ "task_id": id, "status": "ERROR", "desc": desc }),
    }
}
