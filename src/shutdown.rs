/// Shutdown coordination: an atomic running flag with a wakeup channel,
/// tripped by the OS signal handlers (SIGINT, SIGTERM) and observed by
/// the ping loop.
///
/// Tests drive the flag directly; only `install_signal_handlers` touches
/// real OS signals.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Cloneable handle to the process-wide running flag.
#[derive(Clone)]
pub struct ShutdownFlag {
    inner: Arc<Inner>,
}

struct Inner {
    stopped: AtomicBool,
    notify: Notify,
}

impl ShutdownFlag {
    /// New flag in the running state.
    pub fn new() -> ShutdownFlag {
        ShutdownFlag {
            inner: Arc::new(Inner {
                stopped: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// True until `trigger` is called.
    pub fn is_running(&self) -> bool {
        !self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Request shutdown: clear the running flag and wake any sleeper.
    pub fn trigger(&self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Sleep for `duration` unless shutdown arrives first.
    ///
    /// Returns true if the full duration elapsed with the flag still set,
    /// false if shutdown cut the sleep short (or had already been
    /// requested).
    pub async fn sleep(&self, duration: Duration) -> bool {
        if !self.is_running() {
            return false;
        }

        tokio::select! {
            _ = self.inner.notify.notified() => false,
            _ = tokio::time::sleep(duration) => self.is_running(),
        }
    }

    /// Spawn the listener that trips this flag on SIGINT or SIGTERM.
    ///
    /// Both signals get identical treatment: print the shutdown line,
    /// clear the flag, and let the loop wind down to a zero exit.
    pub fn install_signal_handlers(&self) {
        let flag = self.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            println!("\n🛑 ServiceGuru Keep-Alive shutting down...");
            flag.trigger();
        });
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is delivered.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::debug!(signal = "SIGINT", "shutdown signal received"),
        () = terminate => tracing::debug!(signal = "SIGTERM", "shutdown signal received"),
    }
}
