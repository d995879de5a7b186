use super::RequestsLoggingLevel;
use crate::config::DEFAULT_CORS_ORIGIN;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 8000,
            metrics_port: 9091,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        }
    }
}
