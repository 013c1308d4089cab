use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$").unwrap()
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HostCategory {
    Ip,
    Domain,
}

/// A validated lookup target. Built once per request via [`Host::classify`];
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Host {
    pub raw: String,
    pub category: HostCategory,
}

impl Host {
    /// Classify a raw token as an IPv4 literal or a domain name.
    /// Returns `None` for anything that is neither.
    pub fn classify(raw: &str) -> Option<Host> {
        if raw.parse::<Ipv4Addr>().is_ok() {
            return Some(Host {
                raw: raw.to_string(),
                category: HostCategory::Ip,
            });
        }
        if DOMAIN_RE.is_match(raw) {
            return Some(Host {
                raw: raw.to_string(),
                category: HostCategory::Domain,
            });
        }
        None
    }
}
