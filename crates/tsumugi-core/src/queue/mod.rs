//! Activity queue: the append-only FIFO of pending remote operations.
//!
//! Every store mutation that must reach the remote pushes exactly one
//! [`ActivityRecord`] here, in the same tick as the local mutation. Records
//! leave only from the head: completed, or discarded as stale. A failed
//! dispatch releases the head in place, so nothing behind it can overtake;
//! the queue never reorders or coalesces entries.

mod record;
mod retry;

pub use record::ActivityRecord;
pub use retry::RetryPolicy;

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Notify;

use crate::domain::ActivityId;

/// Queue-level view for the syncing/idle indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    /// Records waiting (including the in-flight head).
    pub pending: usize,

    /// Whether the head is currently being dispatched.
    pub syncing: bool,

    /// Dispatch attempts made on the current head.
    pub head_attempts: u32,

    /// Last dispatch failure, if the head has one.
    pub last_error: Option<String>,
}

/// FIFO of pending activities.
///
/// Interior state sits under a std `Mutex` so `push` stays callable from the
/// store's synchronous mutation path; the `Notify` wakes the sync loop. The
/// lock is never held across an await point.
#[derive(Default)]
pub struct ActivityQueue {
    entries: Mutex<VecDeque<ActivityRecord>>,
    notify: Notify,
}

impl ActivityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and wake the sync loop.
    pub fn push(&self, record: ActivityRecord) {
        self.entries.lock().unwrap().push_back(record);
        self.notify.notify_one();
    }

    /// Claim the head for dispatch.
    ///
    /// Returns `None` when the queue is empty or the head is already in
    /// flight (the single-flight re-entrancy guard). On success the head is
    /// marked syncing, its attempt counter incremented, and a clone handed
    /// back; the record itself stays at the head until the dispatch result
    /// comes in.
    pub fn begin_head(&self) -> Option<ActivityRecord> {
        let mut entries = self.entries.lock().unwrap();
        let head = entries.front_mut()?;
        if head.is_syncing {
            return None;
        }
        head.start_attempt();
        Some(head.clone())
    }

    /// Remove the head after a successful dispatch.
    pub fn complete_head(&self, id: ActivityId) {
        let mut entries = self.entries.lock().unwrap();
        if entries.front().is_some_and(|head| head.id == id) {
            entries.pop_front();
        }
        if !entries.is_empty() {
            // 次の head をすぐ処理できるように起こす
            self.notify.notify_one();
        }
    }

    /// Keep the head queued after a failed dispatch; it will be retried.
    pub fn release_head(&self, id: ActivityId, error: String) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(head) = entries.front_mut()
            && head.id == id
        {
            head.release(error);
        }
    }

    /// Drop the head without a network call (its entity vanished locally).
    pub fn discard_head(&self, id: ActivityId) {
        self.complete_head(id);
    }

    /// Wait until at least one record is queued.
    pub async fn wait_for_work(&self) {
        loop {
            if !self.entries.lock().unwrap().is_empty() {
                return;
            }
            self.notify.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue-level status for the syncing indicator.
    pub fn status(&self) -> SyncStatus {
        let entries = self.entries.lock().unwrap();
        let head = entries.front();
        SyncStatus {
            pending: entries.len(),
            syncing: head.is_some_and(|h| h.is_syncing),
            head_attempts: head.map_or(0, |h| h.attempts),
            last_error: head.and_then(|h| h.last_error.clone()),
        }
    }

    /// Snapshot of all pending records, head first (observability/tests).
    pub fn pending(&self) -> Vec<ActivityRecord> {
        self.entries.lock().unwrap().iter().cloned().collect()
    }
}
