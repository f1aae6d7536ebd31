use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often the background sweeper compacts the store by default.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Revoked token identifiers, kept until the token would have expired anyway.
///
/// Process-local and in memory: a restart forgets every revocation.
/// Share it through `Arc`; all operations take `&self`.
#[derive(Debug, Default)]
pub struct RevocationStore {
    /// Map of jti -> original `exp` (Unix timestamp)
    entries: RwLock<HashMap<String, i64>>,
}

impl RevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a revoked token id with its original expiry.
    ///
    /// # Returns
    /// `true` if this call revoked the id, `false` if it was already revoked
    pub fn put(&self, jti: impl Into<String>, exp: i64) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(jti.into(), exp)
            .is_none()
    }

    /// Check whether a token id has been revoked.
    pub fn contains(&self, jti: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(jti)
    }

    /// Drop every entry whose expiry is at or before `now`.
    ///
    /// # Returns
    /// Number of entries removed
    pub fn sweep(&self, now: i64) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, exp| *exp > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn the periodic sweeper on the current tokio runtime.
    ///
    /// The sweeper runs until [`SweeperHandle::stop`] is called or the
    /// handle is dropped.
    ///
    /// # Arguments
    /// * `period` - Time between sweeps
    ///
    /// # Returns
    /// Handle owning the sweeper task
    pub fn start(self: &Arc<Self>, period: Duration) -> SweeperHandle {
        let store = Arc::clone(self);
        let period = period.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tracing::info!(
                period_secs = period.as_secs(),
                "Revocation sweeper started"
            );

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let removed = store.sweep(Utc::now().timestamp());
                        tracing::debug!(
                            removed,
                            remaining = store.len(),
                            "Revocation sweep completed"
                        );
                    }
                }
            }

            tracing::info!("Revocation sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running revocation sweeper.
///
/// Dropping the handle closes the shutdown channel, which also ends the task.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for its task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());

        if let Err(e) = self.task.await {
            tracing::error!("Revocation sweeper task failed: {}", e);
        }
    }
}
