//! Signal handling for user interrupts
//!
//! The run is raced against CTRL-C (and SIGTERM on Unix). Whichever finishes
//! first wins; an interrupt drops the in-flight work and surfaces as
//! `AppError::Interrupted`.

use std::future::Future;

use tokio::signal;
use tracing::{info, warn};

use crate::errors::{AppError, Result};

/// Resolves when CTRL-C or SIGTERM is received
///
/// If a handler cannot be installed the corresponding signal is simply never
/// observed.
pub async fn wait_for_interrupt() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C signal received"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("SIGTERM signal received");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Runs `work` until it completes or `interrupt` resolves
pub async fn run_until<T, W, I>(work: W, interrupt: I) -> Result<T>
where
    W: Future<Output = Result<T>>,
    I: Future<Output = ()>,
{
    tokio::select! {
        result = work => result,
        _ = interrupt => Err(AppError::Interrupted),
    }
}

/// Runs `work` until it completes or the user interrupts the process
pub async fn run_until_interrupted<T, W>(work: W) -> Result<T>
where
    W: Future<Output = Result<T>>,
{
    run_until(work, wait_for_interrupt()).await
}
