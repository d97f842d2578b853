//! Bridges SIGTERM/SIGINT to a cancellation token shared by all tests.
//!
//! One listener serves the whole process. It runs on its own thread with a
//! small runtime, so it outlives the per-test runtimes and every harness.
//! The first signal cancels the shared token; the next one exits with 130.

use crate::utils::error::{ApiTestError, Result};
use std::future::Future;
use std::sync::{mpsc, OnceLock};
use std::thread;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

pub const SIGNAL_EXIT_CODE: i32 = 130;

static SHUTDOWN: OnceLock<CancellationToken> = OnceLock::new();

#[cfg(unix)]
struct Signals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    async fn recv(&mut self) -> std::io::Result<&'static str> {
        tokio::select! {
            _ = self.sigterm.recv() => Ok("SIGTERM"),
            _ = self.sigint.recv() => Ok("SIGINT"),
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn register() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> std::io::Result<&'static str> {
        tokio::signal::ctrl_c().await?;
        Ok("SIGINT")
    }
}

/// Process-wide token cancelled by the first SIGTERM/SIGINT.
///
/// The listener is started on first use; this returns once the handlers are
/// registered. Harnesses should hold a `child_token()` of it.
pub fn shutdown_token() -> CancellationToken {
    SHUTDOWN
        .get_or_init(|| {
            let token = CancellationToken::new();
            start_listener(token.clone());
            token
        })
        .clone()
}

fn start_listener(token: CancellationToken) {
    let (ready_tx, ready_rx) = mpsc::channel::<()>();

    let spawned = thread::Builder::new()
        .name("signal-listener".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!("Failed to start signal listener: {}", e);
                    return;
                }
            };
            runtime.block_on(async move {
                let signals = match Signals::register() {
                    Ok(signals) => signals,
                    Err(e) => {
                        warn!("Failed to install signal handler: {}", e);
                        return;
                    }
                };
                let _ = ready_tx.send(());
                listen(signals, token).await;
            });
        });

    match spawned {
        // Dropped sender (failed start) also unblocks this.
        Ok(_) => {
            let _ = ready_rx.recv();
        }
        Err(e) => warn!("Failed to spawn signal listener: {}", e),
    }
}

async fn listen(mut signals: Signals, token: CancellationToken) {
    match signals.recv().await {
        Ok(name) => {
            warn!("Got {}, shutting down...", name);
            token.cancel();
        }
        Err(e) => {
            warn!("Signal listener failed: {}", e);
            return;
        }
    }

    if let Ok(name) = signals.recv().await {
        error!("Got {} again, exiting", name);
        std::process::exit(SIGNAL_EXIT_CODE);
    }
}

/// Runs `fut` unless `token` is cancelled first.
pub async fn run_until_cancelled<F, T>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ApiTestError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_before_cancel() {
        let token = CancellationToken::new();
        let value = run_until_cancelled(&token, async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_cancel_wins() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            child.cancel();
        });

        let result: Result<()> = run_until_cancelled(&token, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(ApiTestError::Cancelled)));
    }

    #[test]
    fn test_shutdown_token_is_shared() {
        let first = shutdown_token();
        let second = shutdown_token();

        // Cancelling a harness's child must not reach the process-wide token.
        let child = first.child_token();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
