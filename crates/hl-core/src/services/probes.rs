use std::sync::LazyLock;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::process::Command;

use crate::error::{LookupError, Result};
use crate::models::{HostCategory, JobSpec, LookupConfig};

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

// One client for all probe requests, so connections are pooled.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Execute one work unit. Probe-level failures (unreachable endpoint, bad
/// HTTP status) are encoded in the payload; `Err` is reserved for the probe
/// itself being unrunnable.
pub async fn run(job: &JobSpec, config: &LookupConfig) -> Result<Value> {
    match job {
        JobSpec::Ping { host } => ping(host).await,
        JobSpec::Rdap { host, category } => Ok(rdap(host, *category, config).await),
        JobSpec::VirustotalDomainReport { apikey, domain } => {
            Ok(virustotal_domain_report(apikey, domain, config).await)
        }
    }
}

/// Reachability probe: `ping -c 3 <host>`, payload reports the exit status.
async fn ping(host: &str) -> Result<Value> {
    tracing::debug!(host, "ping probe");
    let status = Command::new("ping")
        .args(["-c", "3", host])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| LookupError::Probe(format!("failed to spawn ping: {e}")))?;
    Ok(json!({ "success": status.success() }))
}

/// Registry lookup against the RDAP bootstrap service. The endpoint depends
/// on the host category.
async fn rdap(host: &str, category: HostCategory, config: &LookupConfig) -> Value {
    let url = match category {
        HostCategory::Ip => format!("{}{}", config.rdap_ip_url, host),
        HostCategory::Domain => format!("{}{}", config.rdap_domain_url, host),
    };
    tracing::debug!(%url, "rdap probe");
    api_request(&url, None).await
}

/// Third-party threat-intel query for a domain report.
async fn virustotal_domain_report(apikey: &str, domain: &str, config: &LookupConfig) -> Value {
    tracing::debug!(domain, "virustotal domain report probe");
    let params = [("apikey", apikey), ("domain", domain)];
    api_request(&config.virustotal_domain_report_url, Some(&params)).await
}

/// GET a JSON endpoint. Any failure becomes an error-shaped payload rather
/// than an error value, so a broken upstream still yields a reportable
/// result.
async fn api_request(url: &str, params: Option<&[(&str, &str)]>) -> Value {
    let mut request = HTTP_CLIENT.get(url).timeout(HTTP_TIMEOUT);
    if let Some(params) = params {
        request = request.query(params);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%url, error = %e, "api request failed");
            return error_payload(&e.to_string());
        }
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%url, error = %e, "api request returned error status");
            return error_payload(&e.to_string());
        }
    };

    match response.json::<Value>().await {
        Ok(body) => body,
        Err(e) => error_payload(&e.to_string()),
    }
}

fn error_payload(desc: &str) -> Value {
    json!({ "status": "ERROR", "desc": desc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_payload_shape() {
        let payload = error_payload("connection refused");
        assert_eq!(payload["status"], "ERROR");
        assert_eq!(payload["desc"], "connection refused");
    }

    #[tokio::test]
    async fn rdap_url_selection_by_category() {
        // Unroutable endpoints: both calls fail fast and degrade to the
        // error payload shape instead of returning an error value.
        let config = LookupConfig {
            rdap_ip_url: "http://127.0.0.1:1/ip/".into(),
            rdap_domain_url: "http://127.0.0.1:1/domain/".into(),
            ..LookupConfig::default()
        };
        let payload = rdap("8.8.8.8", HostCategory::Ip, &config).await;
        assert_eq!(payload["status"], "ERROR");
        let payload = rdap("google.com", HostCategory::Domain, &config).await;
        assert_eq!(payload["status"], "ERROR");
    }
}
