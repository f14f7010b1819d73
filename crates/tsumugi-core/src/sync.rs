//! Sync loop: single-flight background drain of the activity queue.
//!
//! The loop claims the head of the queue, re-reads the referenced entity
//! from the store, dispatches the matching remote operation and only then
//! removes the record. A failure of any shape (transport error or non-OK
//! reply) releases the head in place and backs off; the queue never
//! advances past a failed record, so dispatch order is exactly enqueue
//! order. No failure ever propagates out of the loop; the only
//! user-visible trace is the [`SyncPhase`] / queue status indicator.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{EntityRef, OpKind};
use crate::ports::Remote;
use crate::queue::{ActivityQueue, ActivityRecord, RetryPolicy};
use crate::store::Store;

/// Externally visible phase of the loop, published on a `watch` channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Syncing,
    /// The head failed; the loop is waiting out the backoff delay.
    BackingOff,
}

/// Sync loop configuration.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    pub retry: RetryPolicy,
}

/// Outcome of dispatching one activity.
enum Dispatch {
    Delivered,
    /// The referenced entity is gone locally; nothing to sync.
    Stale,
    Failed(String),
}

/// The background drain process. Build it, subscribe to [`phase`] if
/// wanted, then [`spawn`] it.
///
/// [`phase`]: SyncLoop::phase
/// [`spawn`]: SyncLoop::spawn
pub struct SyncLoop {
    store: Arc<Store>,
    queue: Arc<ActivityQueue>,
    remote: Arc<dyn Remote>,
    config: SyncConfig,
    phase_tx: watch::Sender<SyncPhase>,
    phase_rx: watch::Receiver<SyncPhase>,
}

impl SyncLoop {
    pub fn new(
        store: Arc<Store>,
        queue: Arc<ActivityQueue>,
        remote: Arc<dyn Remote>,
        config: SyncConfig,
    ) -> Self {
        let (phase_tx, phase_rx) = watch::channel(SyncPhase::Idle);
        Self {
            store,
            queue,
            remote,
            config,
            phase_tx,
            phase_rx,
        }
    }

    /// Subscribe to the loop's phase (the syncing/idle indicator).
    pub fn phase(&self) -> watch::Receiver<SyncPhase> {
        self.phase_rx.clone()
    }

    /// Spawn the loop onto the runtime.
    pub fn spawn(self) -> SyncHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let phase_rx = self.phase_rx.clone();
        let join = tokio::spawn(async move {
            self.run(shutdown_rx).await;
        });
        SyncHandle {
            shutdown_tx,
            phase_rx,
            join,
        }
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            // wait_for_work は待つ可能性があるので shutdown と競合させる
            tokio::select! {
                _ = shutdown_rx.changed() => continue,
                _ = self.queue.wait_for_work() => {}
            }

            if self.step().await {
                continue;
            }

            // Failed head: wait out the backoff, then go around and retry
            // the same head. Shutdown interrupts the wait.
            let delay = self.config.retry.next_delay(self.queue.status().head_attempts);
            self.phase_tx.send_replace(SyncPhase::BackingOff);
            tokio::select! {
                _ = shutdown_rx.changed() => {}
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Process the head of the queue once, if there is one.
    ///
    /// Returns `false` only when a dispatch failed (the head stays queued
    /// for retry). An empty queue, a delivered record and a stale discard
    /// all return `true`.
    pub async fn step(&self) -> bool {
        let Some(activity) = self.queue.begin_head() else {
            // Empty, or the head is already in flight (re-entrancy guard).
            return true;
        };
        self.phase_tx.send_replace(SyncPhase::Syncing);

        let outcome = self.dispatch(&activity).await;
        let ok = match outcome {
            Dispatch::Delivered => {
                debug!(activity = %activity.id, entity = %activity.entity, op = %activity.op, "synced");
                self.queue.complete_head(activity.id);
                true
            }
            Dispatch::Stale => {
                debug!(activity = %activity.id, entity = %activity.entity, "entity gone locally, discarding");
                self.queue.discard_head(activity.id);
                true
            }
            Dispatch::Failed(error) => {
                warn!(
                    activity = %activity.id,
                    entity = %activity.entity,
                    attempts = activity.attempts,
                    %error,
                    "sync failed, will retry"
                );
                self.queue.release_head(activity.id, error);
                false
            }
        };
        if self.queue.is_empty() {
            self.phase_tx.send_replace(SyncPhase::Idle);
        }
        ok
    }

    /// Dispatch one activity against the remote.
    ///
    /// Create/edit re-read the entity snapshot here, never from the time
    /// of enqueue, so the freshest local state is what goes out. Delete
    /// needs no snapshot; the id is the payload.
    async fn dispatch(&self, activity: &ActivityRecord) -> Dispatch {
        let result = match activity.op {
            OpKind::Delete => match activity.entity {
                EntityRef::Category(id) => self.remote.delete_category(id).await,
                EntityRef::Parent(id) => self.remote.delete_parent_task(id).await,
                EntityRef::Child(id) => self.remote.delete_child_task(id).await,
            },
            OpKind::Create | OpKind::Edit => {
                let create = activity.op == OpKind::Create;
                match activity.entity {
                    EntityRef::Category(id) => match self.store.category(id) {
                        None => return Dispatch::Stale,
                        Some(cat) if create => self.remote.create_category(&cat).await,
                        Some(cat) => self.remote.edit_category(&cat).await,
                    },
                    EntityRef::Parent(id) => match self.store.parent_task(id) {
                        None => return Dispatch::Stale,
                        Some(task) if create => self.remote.create_parent_task(&task).await,
                        Some(task) => self.remote.edit_parent_task(&task).await,
                    },
                    EntityRef::Child(id) => match self.store.child_task(id) {
                        None => return Dispatch::Stale,
                        Some(task) if create => self.remote.create_child_task(&task).await,
                        Some(task) => self.remote.edit_child_task(&task).await,
                    },
                }
            }
        };

        match result {
            Ok(reply) if reply.is_ok() => Dispatch::Delivered,
            Ok(reply) => Dispatch::Failed(format!("remote replied with code {}", reply.code)),
            Err(error) => Dispatch::Failed(error.to_string()),
        }
    }
}

/// Handle to a spawned sync loop.
///
/// Shutdown does not cancel an in-flight RPC; it stops the loop from
/// claiming the next head.
pub struct SyncHandle {
    shutdown_tx: watch::Sender<bool>,
    phase_rx: watch::Receiver<SyncPhase>,
    join: JoinHandle<()>,
}

impl SyncHandle {
    pub fn request_shutdown(&self) {
        // ignore send error: receiver may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }

    pub fn phase(&self) -> watch::Receiver<SyncPhase> {
        self.phase_rx.clone()
    }
}
