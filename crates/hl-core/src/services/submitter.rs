use std::sync::Arc;

use crate::error::{LookupError, Result};
use crate::models::{Host, HostCategory, JobSpec, SubmitReceipt, TaskId, TaskState};
use crate::services::pool::WorkerPool;

/// Converts one (service, host) pair into a dispatch call against the
/// worker pool. Never blocks waiting for the unit to start or finish.
pub struct Submitter {
    pool: Arc<dyn WorkerPool>,
}

impl Submitter {
    pub fn new(pool: Arc<dyn WorkerPool>) -> Self {
        Self { pool }
    }

    /// Dispatch the work unit for one recognized service. Each service maps
    /// to exactly one operation with its fixed argument convention: ping
    /// takes the host only, rdap takes host and category.
    pub async fn submit(&self, service: &str, host: &Host) -> Result<TaskId> {
        let job = match service.to_ascii_lowercase().as_str() {
            "ping" => JobSpec::Ping {
                host: host.raw.clone(),
            },
            "rdap" => JobSpec::Rdap {
                host: host.raw.clone(),
                category: host.category,
            },
            other => return Err(LookupError::UnknownService(other.to_string())),
        };

        tracing::info!(
            service,
            host = %host.raw,
            operation = job.operation_name(),
            "dispatching work unit"
        );
        self.pool.submit(job).await
    }

    /// Submit-only flow for a VirusTotal domain report: validate, dispatch,
    /// and hand back the handle with its initial state without waiting.
    pub async fn submit_domain_report(&self, apikey: &str, domain: &str) -> Result<SubmitReceipt> {
        if apikey.is_empty() || domain.is_empty() {
            return Err(LookupError::InvalidArgument(
                "empty values are not allowed".into(),
            ));
        }
        let valid_domain = matches!(
            Host::classify(domain),
            Some(Host {
                category: HostCategory::Domain,
                ..
            })
        );
        if !valid_domain {
            return Err(LookupError::InvalidArgument(format!(
                "'{domain}' is not a valid domain name"
            )));
        }

        let task_id = self
            .pool
            .submit(JobSpec::VirustotalDomainReport {
                apikey: apikey.to_string(),
                domain: domain.to_string(),
            })
            .await?;
        let status = self
            .pool
            .state(&task_id)
            .await
            .unwrap_or(TaskState::Pending)
            .label()
            .to_string();

        Ok(SubmitReceipt { task_id, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_pool::ScriptedPool;

    fn ip_host() -> Host {
        Host::classify("8.8.8.8").unwrap()
    }

    #[tokio::test]
    async fn ping_maps_to_host_only_operation() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        submitter.submit("ping", &ip_host()).await.unwrap();

        let submitted = pool.submitted_jobs();
        assert_eq!(submitted.len(), 1);
        assert_eq!(
            submitted[0],
            JobSpec::Ping {
                host: "8.8.8.8".into()
            }
        );
    }

    #[tokio::test]
    async fn rdap_maps_to_host_and_category_operation() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        submitter.submit("RDAP", &ip_host()).await.unwrap();

        let submitted = pool.submitted_jobs();
        assert_eq!(
            submitted[0],
            JobSpec::Rdap {
                host: "8.8.8.8".into(),
                category: HostCategory::Ip,
            }
        );
    }

    #[tokio::test]
    async fn unmapped_service_is_rejected_without_dispatch() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        let err = submitter.submit("junk", &ip_host()).await.unwrap_err();
        assert!(matches!(err, LookupError::UnknownService(_)));
        assert_eq!(pool.submit_count(), 0);
    }

    #[tokio::test]
    async fn pool_failure_surfaces_as_submit_error() {
        let pool = Arc::new(ScriptedPool::failing_submits("broker down"));
        let submitter = Submitter::new(pool);
        let err = submitter.submit("ping", &ip_host()).await.unwrap_err();
        assert!(matches!(err, LookupError::Submit(_)));
    }

    #[tokio::test]
    async fn domain_report_returns_receipt() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        let receipt = submitter
            .submit_domain_report("key123", "google.com")
            .await
            .unwrap();
        assert_eq!(receipt.status, "SUCCESS");
        assert_eq!(pool.submit_count(), 1);
    }

    #[tokio::test]
    async fn domain_report_rejects_empty_values() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        let err = submitter.submit_domain_report("", "google.com").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidArgument(_)));
        assert_eq!(pool.submit_count(), 0);
    }

    #[tokio::test]
    async fn domain_report_rejects_non_domain() {
        let pool = Arc::new(ScriptedPool::completing());
        let submitter = Submitter::new(pool.clone());
        let err = submitter
            .submit_domain_report("key123", "8.8.8.8")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidArgument(_)));
        assert_eq!(pool.submit_count(), 0);
    }
}
