/// Main keep-alive loop: startup banner, one immediate ping, then a ping
/// after every interval until shutdown is requested.
use crate::pinger::{local_timestamp, PingOutcome, Pinger, PING_INTERVAL, TARGET_URL};
use crate::shutdown::ShutdownFlag;
use crate::stats::PingStats;
use std::future::Future;
use std::time::Duration;

/// Run the pinger until the shutdown flag trips, returning the counters.
pub async fn run(pinger: &Pinger, shutdown: &ShutdownFlag, quiet: bool) -> PingStats {
    if !quiet {
        println!("🚀 ServiceGuru Keep-Alive started");
        println!(
            "📡 Pinging {} every {} minutes",
            TARGET_URL,
            PING_INTERVAL.as_secs() / 60
        );
        println!("⏹️  Press Ctrl+C to stop\n");
    }

    tracing::info!(
        url = TARGET_URL,
        interval_secs = PING_INTERVAL.as_secs(),
        "keep-alive loop starting"
    );

    ping_loop(shutdown, PING_INTERVAL, move || async move {
        let outcome = pinger.ping().await;
        println!("{}", outcome.log_line(&local_timestamp()));
        outcome
    })
    .await
}

/// Loop core, generic over the ping operation so tests can drive it with
/// a counter under the paused clock.
///
/// Pings once up front, so at least one ping lands even if the process is
/// stopped before the first interval elapses. The sleep is interruptible,
/// and a ping never fires once shutdown has been requested.
async fn ping_loop<F, Fut>(shutdown: &ShutdownFlag, interval: Duration, mut ping: F) -> PingStats
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PingOutcome>,
{
    let mut stats = PingStats::new();
    stats.record(&ping().await);

    loop {
        if !shutdown.sleep(interval).await {
            break;
        }
        stats.record(&ping().await);
    }

    stats
}
