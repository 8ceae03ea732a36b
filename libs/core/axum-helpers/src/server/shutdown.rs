use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::signal;
use tokio::sync::broadcast;

/// Coordinates graceful shutdown across the HTTP server and background tasks.
///
/// Tasks subscribe for a shutdown notification, the OS signal handler (or a
/// test) triggers it once. The flag lets hot paths check state without a
/// channel subscription.
pub struct ShutdownCoordinator {
    tx: broadcast::Sender<()>,
    shutting_down: AtomicBool,
}

impl ShutdownCoordinator {
    pub fn new() -> Arc<Self> {
        let (tx, _) = broadcast::channel(1);
        Arc::new(Self {
            tx,
            shutting_down: AtomicBool::new(false),
        })
    }

    /// Subscribe to the shutdown notification
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Trigger shutdown. Idempotent, later calls are no-ops.
    pub fn shutdown(&self) {
        if !self.shutting_down.swap(true, Ordering::SeqCst) {
            tracing::info!("Shutdown initiated");
            let _ = self.tx.send(());
        }
    }

    /// Block until SIGINT or SIGTERM arrives, then trigger shutdown
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }
}

/// Resolves when the process receives SIGINT (Ctrl+C) or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
