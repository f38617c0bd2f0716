//! Endpoint probing and failure classification.
//!
//! The point of this module is turning opaque connection failures into
//! something a user can act on. Each probe is a single timed GET; there is
//! no retry logic, repeated probing is the caller's "test again" action.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Environment;

/// Coarse failure taxonomy for troubleshooting display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request exceeded the configured timeout.
    Timeout,
    /// No route, DNS failure, or connection refused.
    Network,
    /// The server responded with a non-2xx status.
    Http(u16),
    /// The request was sent but no usable response came back.
    NoResponse,
    /// The request itself could not be constructed.
    RequestSetup,
    Unknown,
}

impl ErrorKind {
    pub fn label(&self) -> String {
        match self {
            ErrorKind::Timeout => "Timeout".to_string(),
            ErrorKind::Network => "Network".to_string(),
            ErrorKind::Http(code) => format!("HTTP {}", code),
            ErrorKind::NoResponse => "No Response".to_string(),
            ErrorKind::RequestSetup => "Request Setup".to_string(),
            ErrorKind::Unknown => "Unknown".to_string(),
        }
    }
}

/// Result of a single probe. Latency is recorded regardless of outcome.
#[derive(Debug, Clone)]
pub struct DiagnosticResult {
    pub success: bool,
    pub latency: Duration,
    pub status_code: Option<u16>,
    pub error: Option<ErrorKind>,
    pub error_message: Option<String>,
    pub response: Option<Value>,
}

impl DiagnosticResult {
    fn failure(latency: Duration, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            latency,
            status_code: match kind {
                ErrorKind::Http(code) => Some(code),
                _ => None,
            },
            error: Some(kind),
            error_message: Some(message.into()),
            response: None,
        }
    }
}

fn classify(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() {
        ErrorKind::Network
    } else if err.is_builder() {
        ErrorKind::RequestSetup
    } else if err.is_body() || err.is_decode() || err.is_request() {
        ErrorKind::NoResponse
    } else {
        ErrorKind::Unknown
    }
}

/// Probes backend base URLs and classifies what went wrong.
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// Probe `path` on one environment's base URL. Never fails; failures are
    /// classified into a `DiagnosticResult`.
    pub async fn test_endpoint(&self, path: &str, env: Environment) -> DiagnosticResult {
        self.probe_url(&format!("{}{}", env.base_url(), path)).await
    }

    /// Probe an arbitrary URL with the configured timeout and no-cache
    /// headers.
    pub async fn probe_url(&self, url: &str) -> DiagnosticResult {
        let started = Instant::now();
        let outcome = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await;
        let latency = started.elapsed();

        match outcome {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    // Body parse failure is not a probe failure; the server
                    // answered, which is what we were checking.
                    let body = response.json::<Value>().await.ok();
                    DiagnosticResult {
                        success: true,
                        latency,
                        status_code: Some(status.as_u16()),
                        error: None,
                        error_message: None,
                        response: body,
                    }
                } else {
                    DiagnosticResult::failure(
                        latency,
                        ErrorKind::Http(status.as_u16()),
                        format!(
                            "server responded {} {}",
                            status.as_u16(),
                            status.canonical_reason().unwrap_or("unknown status")
                        ),
                    )
                }
            }
            Err(err) => {
                let kind = classify(&err);
                warn!("probe of {} failed ({}): {}", url, kind.label(), err);
                DiagnosticResult::failure(latency, kind, err.to_string())
            }
        }
    }

    /// Probe every configured environment, strictly sequentially: one
    /// environment finishes (either way) before the next starts.
    pub async fn test_all_environments(
        &self,
        path: &str,
    ) -> HashMap<Environment, DiagnosticResult> {
        let mut results = HashMap::new();
        for env in Environment::ALL {
            info!("probing {} ({})", env.as_str(), env.base_url());
            let result = self.test_endpoint(path, env).await;
            info!(
                "{}: {} in {}ms",
                env.as_str(),
                if result.success { "ok" } else { "failed" },
                result.latency.as_millis()
            );
            results.insert(env, result);
        }
        results
    }
}

const COMMON_TIPS: &[&str] = &[
    "Confirm the backend server is running",
    "Check that this device has internet access",
    "Try another environment (MEMORA_ENV) and probe again",
];

/// Ordered troubleshooting suggestions: category-specific tips first, then
/// the baseline set.
pub fn troubleshooting_tips(kind: &ErrorKind) -> Vec<&'static str> {
    let mut tips: Vec<&'static str> = match kind {
        ErrorKind::Timeout => vec![
            "The server may be slow to wake up; wait and test again",
            "Increase MEMORA_PROBE_TIMEOUT_SECS if the network is slow",
        ],
        ErrorKind::Network => vec![
            "Verify the device and the server are on the same network",
            "Check the base URL for typos or a stale tunnel address",
        ],
        ErrorKind::Http(code) if *code >= 500 => vec![
            "The server hit an internal error; check its logs",
        ],
        ErrorKind::Http(404) => vec![
            "The endpoint path does not exist on this server version",
        ],
        ErrorKind::Http(_) => vec![
            "The server rejected the request; check credentials and payload",
        ],
        ErrorKind::NoResponse => vec![
            "The connection dropped mid-request; the server may have crashed",
        ],
        ErrorKind::RequestSetup => vec![
            "The configured base URL is malformed",
        ],
        ErrorKind::Unknown => Vec::new(),
    };
    tips.extend_from_slice(COMMON_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ErrorKind::Timeout.label(), "Timeout");
        assert_eq!(ErrorKind::Http(500).label(), "HTTP 500");
        assert_eq!(ErrorKind::NoResponse.label(), "No Response");
    }

    #[test]
    fn test_tips_always_include_baseline_after_category_tips() {
        for kind in [
            ErrorKind::Timeout,
            ErrorKind::Network,
            ErrorKind::Http(500),
            ErrorKind::Http(404),
            ErrorKind::NoResponse,
            ErrorKind::RequestSetup,
            ErrorKind::Unknown,
        ] {
            let tips = troubleshooting_tips(&kind);
            assert!(tips.len() >= COMMON_TIPS.len());
            assert_eq!(&tips[tips.len() - COMMON_TIPS.len()..], COMMON_TIPS);
        }
    }

    #[test]
    fn test_http_failure_result_carries_status() {
        let result =
            DiagnosticResult::failure(Duration::from_millis(12), ErrorKind::Http(500), "oops");
        assert!(!result.success);
        assert_eq!(result.status_code, Some(500));
        assert_eq!(result.error, Some(ErrorKind::Http(500)));
    }

    #[tokio::test]
    async fn test_unreachable_host_classifies_as_network_or_timeout() {
        let prober = Prober::new(Duration::from_secs(2));
        // Reserved port on loopback; nothing listens there.
        let result = prober.probe_url("http://127.0.0.1:9/health").await;
        assert!(!result.success);
        assert!(matches!(
            result.error,
            Some(ErrorKind::Network) | Some(ErrorKind::Timeout)
        ));
        assert!(result.status_code.is_none());
    }
}
