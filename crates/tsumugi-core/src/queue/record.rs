//! Activity record: one pending remote operation.

use chrono::{DateTime, Utc};

use crate::domain::{ActivityId, EntityRef, OpKind};

/// A queued remote mutation awaiting dispatch.
///
/// Design:
/// - The record carries targeting only (entity ref + op kind), never an
///   entity snapshot. The sync loop re-reads the store when it dispatches,
///   so a later local edit is reflected in a still-pending CREATE.
/// - All state transitions happen via methods.
#[derive(Debug, Clone)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub entity: EntityRef,
    pub op: OpKind,

    /// Set while this record is the in-flight head. At most one record is
    /// syncing at any time.
    pub is_syncing: bool,

    /// Number of dispatch attempts so far (including the current one while
    /// syncing).
    pub attempts: u32,

    /// Last failure message (if any).
    pub last_error: Option<String>,

    pub enqueued_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(id: ActivityId, entity: EntityRef, op: OpKind, enqueued_at: DateTime<Utc>) -> Self {
        Self {
            id,
            entity,
            op,
            is_syncing: false,
            attempts: 0,
            last_error: None,
            enqueued_at,
        }
    }

    /// Mark as in-flight (increments attempts).
    pub fn start_attempt(&mut self) {
        self.is_syncing = true;
        self.attempts += 1;
    }

    /// Put back at the head after a failed dispatch.
    pub fn release(&mut self, error: String) {
        self.is_syncing = false;
        self.last_error = Some(error);
    }
}
