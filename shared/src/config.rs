//! Configuration for the Memora client.

use std::env;
use std::time::Duration;

/// Environment used when `MEMORA_ENV` is not set.
pub const CURRENT_ENVIRONMENT: Environment = Environment::Production;

/// Named backend environments, in the order the doctor probes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Backend running on the local network (development machine).
    LocalNetwork,
    /// Backend exposed through an ngrok tunnel.
    Tunnel,
    /// Deployed backend.
    Production,
}

impl Environment {
    pub const ALL: [Environment; 3] = [
        Environment::LocalNetwork,
        Environment::Tunnel,
        Environment::Production,
    ];

    /// Base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::LocalNetwork => "http://192.168.1.100:8000",
            Environment::Tunnel => "https://memora-backend.ngrok.io",
            Environment::Production => "https://memora-backend.up.railway.app",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::LocalNetwork => "LOCAL_NETWORK",
            Environment::Tunnel => "TUNNEL",
            Environment::Production => "PRODUCTION",
        }
    }

    /// Parse an environment name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LOCAL_NETWORK" | "LOCAL" => Some(Environment::LocalNetwork),
            "TUNNEL" => Some(Environment::Tunnel),
            "PRODUCTION" | "PROD" => Some(Environment::Production),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected backend environment
    pub environment: Environment,
    /// Base URL for API calls (environment default unless overridden)
    pub base_url: String,
    /// Timeout for regular API requests
    pub request_timeout: Duration,
    /// Timeout for diagnostic probes
    pub probe_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// compiled-in defaults. Every setting is optional.
    pub fn from_env() -> Self {
        let environment = env::var("MEMORA_ENV")
            .ok()
            .and_then(|v| Environment::parse(&v))
            .unwrap_or(CURRENT_ENVIRONMENT);

        let base_url = env::var("MEMORA_API_URL")
            .unwrap_or_else(|_| environment.base_url().to_string());

        let request_timeout = env::var("MEMORA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let probe_timeout = env::var("MEMORA_PROBE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Self {
            environment,
            base_url,
            request_timeout,
            probe_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment_names() {
        assert_eq!(
            Environment::parse("local_network"),
            Some(Environment::LocalNetwork)
        );
        assert_eq!(Environment::parse("TUNNEL"), Some(Environment::Tunnel));
        assert_eq!(Environment::parse("prod"), Some(Environment::Production));
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn test_every_environment_has_a_base_url() {
        for env in Environment::ALL {
            assert!(env.base_url().starts_with("http"));
        }
    }
}
