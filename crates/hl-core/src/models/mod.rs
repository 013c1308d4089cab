pub mod config;
pub mod entry;
pub mod host;
pub mod task;

pub use config::LookupConfig;
pub use entry::{LookupResponse, Resolved, ResultEntry, SubmitReceipt};
pub use host::{Host, HostCategory};
pub use task::{FetchOutcome, JobSpec, TaskId, TaskState};
