/// Keep-alive ping: one HTTP GET to the ServiceGuru deployment, reported
/// as a success/failure outcome with a human-readable stdout line.
use std::time::Duration;

/// Deployment being kept alive.
pub const TARGET_URL: &str = "https://garageguru-whh7.onrender.com";

/// Delay between successive pings.
pub const PING_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifying header sent with every request.
pub const USER_AGENT: &str = "ServiceGuru-KeepAlive/1.0";

/// Result of a single ping attempt.
///
/// Any HTTP response counts as success, whatever the status code — the
/// host only needs to see traffic. Transport errors (connect, DNS,
/// timeout) are the failure case, and are reported, not propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingOutcome {
    /// A response came back; carries the numeric HTTP status code.
    Success { status: u16 },
    /// The request never completed; carries the error description.
    Failure { error: String },
}

impl PingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PingOutcome::Success { .. })
    }

    /// Render the stdout line for this outcome.
    pub fn log_line(&self, timestamp: &str) -> String {
        match self {
            PingOutcome::Success { status } => {
                format!("✅ [{timestamp}] ServiceGuru pinged successfully - Status: {status}")
            }
            PingOutcome::Failure { error } => {
                format!("❌ [{timestamp}] ServiceGuru ping failed: {error}")
            }
        }
    }
}

/// Current local time, formatted for log lines.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Owns the shared HTTP client and performs ping attempts against one URL.
pub struct Pinger {
    client: reqwest::Client,
    target_url: String,
}

impl Pinger {
    /// Create a pinger for the fixed deployment URL.
    pub fn new() -> Result<Pinger, PingerError> {
        Pinger::with_target(TARGET_URL, REQUEST_TIMEOUT)
    }

    /// Create a pinger against an arbitrary URL (used by tests).
    fn with_target(url: impl Into<String>, timeout: Duration) -> Result<Pinger, PingerError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PingerError::ClientBuild { source: e })?;

        Ok(Pinger {
            client,
            target_url: url.into(),
        })
    }

    /// Send one GET to the target and report the outcome.
    ///
    /// Never fails: transport errors come back as `PingOutcome::Failure`.
    pub async fn ping(&self) -> PingOutcome {
        tracing::debug!(url = %self.target_url, "sending keep-alive request");

        match self.client.get(&self.target_url).send().await {
            Ok(response) => PingOutcome::Success {
                status: response.status().as_u16(),
            },
            Err(e) => PingOutcome::Failure {
                error: e.to_string(),
            },
        }
    }
}

/// Errors that can occur while setting up the pinger.
#[derive(Debug)]
pub enum PingerError {
    /// Failed to build the HTTP client.
    ClientBuild { source: reqwest::Error },
}

impl std::fmt::Display for PingerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingerError::ClientBuild { source } => {
                write!(f, "failed to build HTTP client: {}", source)
            }
        }
    }
}

impl std::error::Error for PingerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PingerError::ClientBuild { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_ping_success_logs_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let pinger = Pinger::with_target(server.uri(), REQUEST_TIMEOUT).unwrap();
        let outcome = pinger.ping().await;

        assert_eq!(outcome, PingOutcome::Success { status: 200 });
        let line = outcome.log_line("2025-01-01 12:00:00");
        assert!(line.starts_with("✅"));
        assert!(line.contains("[2025-01-01 12:00:00]"));
        assert!(line.contains("Status: 200"));
    }

    #[tokio::test]
    async fn test_ping_server_error_still_counts_as_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let pinger = Pinger::with_target(server.uri(), REQUEST_TIMEOUT).unwrap();
        let outcome = pinger.ping().await;

        // Any response keeps the host awake; the status is logged, not judged.
        assert!(outcome.is_success());
        assert!(outcome.log_line("ts").contains("Status: 500"));
    }

    #[tokio::test]
    async fn test_ping_connection_refused_is_failure() {
        // Bind then drop a listener so the port is (almost certainly) closed.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let pinger =
            Pinger::with_target(format!("http://127.0.0.1:{port}"), REQUEST_TIMEOUT).unwrap();
        let outcome = pinger.ping().await;

        match &outcome {
            PingOutcome::Failure { error } => assert!(!error.is_empty()),
            other => panic!("expected failure, got {:?}", other),
        }
        let line = outcome.log_line("2025-01-01 12:00:00");
        assert!(line.starts_with("❌"));
        assert!(line.contains("ping failed:"));
    }

    #[tokio::test]
    async fn test_ping_timeout_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let pinger = Pinger::with_target(server.uri(), Duration::from_millis(100)).unwrap();
        let outcome = pinger.ping().await;

        // Timeout is reported through the same failure path as any other
        // transport error.
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_local_timestamp_format() {
        let ts = local_timestamp();
        assert!(
            chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S").is_ok(),
            "timestamp {ts:?} does not match YYYY-MM-DD HH:MM:SS"
        );
    }

    #[test]
    fn test_log_line_success_format() {
        let line = PingOutcome::Success { status: 204 }.log_line("2024-06-30 08:15:00");
        assert_eq!(
            line,
            "✅ [2024-06-30 08:15:00] ServiceGuru pinged successfully - Status: 204"
        );
    }

    #[test]
    fn test_log_line_failure_format() {
        let line = PingOutcome::Failure {
            error: "connection refused".to_string(),
        }
        .log_line("2024-06-30 08:15:00");
        assert_eq!(
            line,
            "❌ [2024-06-30 08:15:00] ServiceGuru ping failed: connection refused"
        );
    }
}
