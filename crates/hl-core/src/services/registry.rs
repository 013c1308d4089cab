/// Fixed set of recognized service names. Immutable process-wide
/// configuration; safe for concurrent reads.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<String>,
}

impl ServiceRegistry {
    pub fn new(services: Vec<String>) -> Self {
        Self { services }
    }

    /// Case-insensitive exact membership test. An unrecognized name is not
    /// an error by itself; callers surface it as an "invalid service" entry.
    pub fn is_available(&self, name: &str) -> bool {
        self.services
            .iter()
            .any(|svc| svc.eq_ignore_ascii_case(name))
    }

    /// The full set, substituted when a request names no services.
    pub fn service_names(&self) -> &[String] {
        &self.services
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new(crate::models::LookupConfig::default().services)
    }
}
