use serde::{Deserialize, Serialize};

fn default_services() -> Vec<String> {
    vec!["ping".to_string(), "rdap".to_string()]
}

fn default_wait_timeout_secs() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_result_fetch_timeout_secs() -> u64 {
    1
}

fn default_rdap_ip_url() -> String {
    "https://rdap.org/ip/".to_string()
}

fn default_rdap_domain_url() -> String {
    "https://rdap.org/domain/".to_string()
}

fn default_virustotal_domain_report_url() -> String {
    "https://www.virustotal.com/vtapi/v2/domain/report".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    /// Recognized service names; an empty request substitutes this full set.
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    /// Per-unit bound on the dispatch-phase wait.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
    /// Interval between lifecycle-state polls while waiting.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Short bound on fetching a payload already known to be complete.
    #[serde(default = "default_result_fetch_timeout_secs")]
    pub result_fetch_timeout_secs: u64,
    #[serde(default = "default_rdap_ip_url")]
    pub rdap_ip_url: String,
    #[serde(default = "default_rdap_domain_url")]
    pub rdap_domain_url: String,
    #[serde(default = "default_virustotal_domain_report_url")]
    pub virustotal_domain_report_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
            wait_timeout_secs: default_wait_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            result_fetch_timeout_secs: default_result_fetch_timeout_secs(),
            rdap_ip_url: default_rdap_ip_url(),
            rdap_domain_url: default_rdap_domain_url(),
            virustotal_domain_report_url: default_virustotal_domain_report_url(),
        }
    }
}
