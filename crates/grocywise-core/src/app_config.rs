use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Credential for the generation service. Absence is tolerated at
    /// startup; every service call then fails authentication.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub web_search_enabled: bool,
    pub schema_constraint_enabled: bool,
    /// Caller-side timeout around a query; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Searches accepted per one-minute window on the HTTP server.
    pub search_rate_limit: usize,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub locations_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("web_search_enabled", &self.web_search_enabled)
            .field("schema_constraint_enabled", &self.schema_constraint_enabled)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_rate_limit", &self.search_rate_limit)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("locations_path", &self.locations_path)
            .finish()
    }
}
