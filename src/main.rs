mod pinger;
mod runloop;
mod shutdown;
mod stats;

use clap::Parser;
use pinger::Pinger;
use shutdown::ShutdownFlag;
use tracing_subscriber::EnvFilter;

/// Keeps the ServiceGuru deployment awake: sends an HTTP GET to the
/// deployed app every 2 minutes so the host never idles it out, and
/// reports every ping on stdout.
#[derive(Parser, Debug)]
#[command(name = "serviceguru-keepalive", version, about)]
pub struct Cli {
    /// Extra logging (request traces, signal details)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the startup banner, only ping results and the summary
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let pinger = match Pinger::new() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize the pinger");
            std::process::exit(1);
        }
    };

    let shutdown = ShutdownFlag::new();
    shutdown.install_signal_handlers();

    let stats = runloop::run(&pinger, &shutdown, cli.quiet).await;
    println!("{}", stats.summary_line());
}
