//! Background population of the cache after a store fallback.
//!
//! Writes are queued on a bounded channel and applied by a single worker
//! task. The resolver never waits on them; failures are logged and counted.

use crate::cache::CachePort;
use crate::metrics;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug)]
enum Command {
    // Store `value` under `key`.
    Write { key: String, value: String },
    // Acknowledged once every earlier command has been handled.
    Flush(oneshot::Sender<()>),
    // Drain what is left, stop the worker, then acknowledge.
    Shutdown(oneshot::Sender<()>),
}

/// Handle to the write-back worker. Cheap to clone.
#[derive(Clone, Debug)]
pub struct WriteBack {
    tx: mpsc::Sender<Command>,
}

impl WriteBack {
    /// Spawns the worker on the current runtime.
    ///
    /// Returns the handle used to enqueue writes and the worker's join
    /// handle.
    pub fn spawn(cache: Arc<dyn CachePort>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run(cache, rx));
        (Self { tx }, worker)
    }

    /// Queues a cache write without waiting.
    ///
    /// Returns false if the write was dropped because the queue is full or
    /// the worker has stopped.
    pub fn enqueue(&self, key: String, value: String) -> bool {
        match self.tx.try_send(Command::Write { key, value }) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(Command::Write { key, .. })) => {
                warn!(key = %key, "Write-back queue full, dropping cache write");
                metrics::record_write_back_dropped();
                false
            }
            Err(mpsc::error::TrySendError::Closed(Command::Write { key, .. })) => {
                warn!(key = %key, "Write-back worker stopped, dropping cache write");
                metrics::record_write_back_dropped();
                false
            }
            Err(_) => {
                metrics::record_write_back_dropped();
                false
            }
        }
    }

    /// Waits until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    /// Drains the queue and stops the worker.
    ///
    /// Writes enqueued afterwards are dropped.
    pub async fn shutdown(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Shutdown(ack)).await.is_ok() {
            let _ = done.await;
        }
    }
}

async fn run(cache: Arc<dyn CachePort>, mut rx: mpsc::Receiver<Command>) {
    debug!("Write-back worker started");

    while let Some(command) = rx.recv().await {
        match command {
            Command::Write { key, value } => write(cache.as_ref(), &key, &value).await,
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
            Command::Shutdown(ack) => {
                rx.close();
                let mut drained = 0_usize;
                while let Some(pending) = rx.recv().await {
                    match pending {
                        Command::Write { key, value } => {
                            write(cache.as_ref(), &key, &value).await;
                            drained += 1;
                        }
                        Command::Flush(ack) | Command::Shutdown(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
                info!(drained, "Write-back worker stopped");
                let _ = ack.send(());
                return;
            }
        }
    }

    info!("Write-back worker stopped");
}

async fn write(cache: &dyn CachePort, key: &str, value: &str) {
    match cache.set(key, value).await {
        Ok(()) => {
            debug!(key = %key, "Write-back completed");
            metrics::record_write_back_completed();
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Write-back failed");
            metrics::record_write_back_failed();
        }
    }
}
