/// Run counters: pings attempted, succeeded, failed, reported once the
/// loop stops. Nothing is persisted; the counters die with the process.
use crate::pinger::PingOutcome;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PingStats {
    attempts: u32,
    succeeded: u32,
    failed: u32,
}

impl PingStats {
    pub fn new() -> PingStats {
        PingStats::default()
    }

    /// Count one completed ping attempt.
    pub fn record(&mut self, outcome: &PingOutcome) {
        self.attempts += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// One-line end-of-run summary.
    pub fn summary_line(&self) -> String {
        format!(
            "📊 {} pings sent: {} ok, {} failed",
            self.attempts, self.succeeded, self.failed
        )
    }
}
