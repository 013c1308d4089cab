use serde::{Deserialize, Serialize};

use super::host::HostCategory;

/// Opaque handle returned by the worker pool at submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a work unit, owned and transitioned by the worker
/// pool. Once `Success` or `Failed` is observed it never reverts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "UPPERCASE")]
pub enum TaskState {
    Pending,
    Started,
    Success,
    Failed { error: Option<String> },
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failed { .. })
    }

    /// External status token for response bodies.
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::Pending => "PENDING",
            TaskState::Started => "STARTED",
            TaskState::Success => "SUCCESS",
            TaskState::Failed { .. } => "FAILURE",
        }
    }
}

/// Outcome of a bounded payload fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Ready(serde_json::Value),
    NotReady,
    Failed(String),
}

/// One named operation plus its fixed argument convention. Each recognized
/// service maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSpec {
    Ping {
        host: String,
    },
    Rdap {
        host: String,
        category: HostCategory,
    },
    VirustotalDomainReport {
        apikey: String,
        domain: String,
    },
}

impl JobSpec {
    pub fn operation_name(&self) -> &'static str {
        match self {
            JobSpec::Ping { .. } => "tasks.ping",
            JobSpec::Rdap { .. } => "tasks.rdap",
            JobSpec::VirustotalDomainReport { .. } => "tasks.virustotal_domain_report",
        }
    }
}
