//! Bounded notification queue drained by a fixed worker pool.
//!
//! Dispatch never waits: a full queue drops the message with a warning.
//! Delivery failures are logged and never retried.

use crate::domain::ports::{Notification, NotifierRef};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_CAPACITY: usize = 64;

/// Sending half of the queue, owned by the engine.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: mpsc::Sender<Notification>,
}

/// Worker tasks draining the queue. They exit once every
/// `NotificationQueue` handle has been dropped and the queue is empty.
#[derive(Debug)]
pub struct NotificationWorkers {
    handles: Vec<JoinHandle<()>>,
}

impl NotificationQueue {
    /// Spawns `workers` tasks delivering through `notifier`.
    pub fn spawn(
        notifier: NotifierRef,
        workers: usize,
        capacity: usize,
    ) -> (Self, NotificationWorkers) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let handles = (0..workers.max(1))
            .map(|worker| {
                let receiver = receiver.clone();
                let notifier = notifier.clone();
                tokio::spawn(async move {
                    loop {
                        let next = receiver.lock().await.recv().await;
                        let Some(notification) = next else {
                            break;
                        };
                        if let Err(e) = notifier.send(&notification).await {
                            tracing::warn!(
                                worker,
                                to = %notification.to,
                                error = %e,
                                "Failed to deliver notification"
                            );
                        }
                    }
                })
            })
            .collect();

        (Self { sender }, NotificationWorkers { handles })
    }

    pub fn dispatch(&self, notification: Notification) {
        match self.sender.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(to = %dropped.to, "Notification queue full, dropping message");
            }
            Err(TrySendError::Closed(dropped)) => {
                tracing::warn!(to = %dropped.to, "Notification queue closed, dropping message");
            }
        }
    }
}

impl NotificationWorkers {
    /// Waits for the workers to drain the queue and exit.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Notification worker panicked");
            }
        }
    }
}
