use std::sync::Arc;

use serde_json::Value;

use crate::error::LookupError;
use crate::models::{Host, LookupResponse, ResultEntry, TaskId};
use crate::services::collector::{self, WaitOptions};
use crate::services::pool::WorkerPool;
use crate::services::registry::ServiceRegistry;
use crate::services::submitter::Submitter;

/// Fan-out/fan-in core: filters requested services through the registry,
/// dispatches the available ones, waits on every handle, and merges the
/// outcomes into one ordered answer.
pub struct Orchestrator {
    registry: ServiceRegistry,
    pool: Arc<dyn WorkerPool>,
    submitter: Submitter,
    wait: WaitOptions,
}

impl Orchestrator {
    pub fn new(registry: ServiceRegistry, pool: Arc<dyn WorkerPool>) -> Self {
        let submitter = Submitter::new(pool.clone());
        Self {
            registry,
            pool,
            submitter,
            wait: WaitOptions::default(),
        }
    }

    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Entry point for one lookup call. A host that fails classification
    /// short-circuits with a single invalid-host response; nothing is
    /// dispatched.
    pub async fn lookup(&self, raw_host: &str, requested: &[String]) -> LookupResponse {
        let Some(host) = Host::classify(raw_host) else {
            tracing::info!(host = raw_host, "host failed classification");
            return LookupResponse::InvalidHost {
                results: LookupError::InvalidHost.to_string(),
            };
        };
        LookupResponse::Services {
            services: self.orchestrate(&host, requested).await,
        }
    }

    /// Merge one entry per requested service, in two passes:
    ///
    /// Pass 1, in input order: unavailable services and failed submissions
    /// produce immediate entries; successful submissions are recorded as
    /// pending handles. Submission is cheap and never blocks, so a pool
    /// outage on one service cannot stall dispatch of the others.
    ///
    /// Pass 2, in recording order: wait on each pending handle up to the
    /// per-unit bound. All dispatched units execute concurrently inside the
    /// pool while this loop waits on them one at a time. Immediate entries
    /// therefore always precede resolved entries in the output.
    pub async fn orchestrate(&self, host: &Host, requested: &[String]) -> Vec<ResultEntry> {
        let requested: Vec<String> = if requested.is_empty() {
            self.registry.service_names().to_vec()
        } else {
            requested.to_vec()
        };

        let mut entries: Vec<ResultEntry> = Vec::with_capacity(requested.len());
        let mut pending: Vec<(String, TaskId)> = Vec::new();

        for service in &requested {
            if !self.registry.is_available(service) {
                tracing::info!(service = %service, host = %host.raw, "invalid service requested");
                entries.push(ResultEntry::immediate(&host.raw, service, "invalid service"));
                continue;
            }
            match self.submitter.submit(service, host).await {
                Ok(id) => pending.push((service.clone(), id)),
                Err(e) => {
                    tracing::warn!(service = %service, host = %host.raw, error = %e, "submission failed");
                    entries.push(ResultEntry::immediate(&host.raw, service, "error"));
                }
            }
        }

        for (service, id) in pending {
            match collector::await_result(self.pool.as_ref(), &id, &self.wait).await {
                Ok(payload) => {
                    entries.push(ResultEntry::resolved(id, &host.raw, &service, payload));
                }
                Err(e) => {
                    tracing::warn!(service = %service, task_id = %id, error = %e, "wait failed");
                    entries.push(ResultEntry::resolved(
                        id,
                        &host.raw,
                        &service,
                        Value::String(e.to_string()),
                    ));
                }
            }
        }

        entries
    }
}
