use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

/// Shutdown coordinator shared between the server and its cleanup task.
///
/// The server side waits for SIGINT/SIGTERM and flips the flag; any number of
/// tasks can wait on [`wait_until_shutdown`](Self::wait_until_shutdown),
/// including ones that start waiting after the flag was flipped.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Check if shutdown has been initiated.
    pub fn is_shutting_down(&self) -> bool {
        *self.tx.borrow()
    }

    /// Initiate shutdown and wake every waiter. Idempotent.
    pub fn shutdown(&self) {
        let changed = self.tx.send_if_modified(|flag| {
            let first = !*flag;
            *flag = true;
            first
        });
        if changed {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolve once [`shutdown`](Self::shutdown) has been called.
    pub async fn wait_until_shutdown(&self) {
        let mut rx = self.tx.subscribe();
        // Err means the sender is gone, which only happens once every coordinator is dropped.
        let _ = rx.wait_for(|flag| *flag).await;
    }

    /// Wait for SIGINT or SIGTERM, then initiate shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    tracing::error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received SIGINT (Ctrl+C)"),
            _ = terminate => info!("Received SIGTERM"),
            _ = self.wait_until_shutdown() => {},
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Graceful-shutdown future handed to `axum::serve`.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}
