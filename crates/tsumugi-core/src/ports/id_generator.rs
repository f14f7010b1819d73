//! IdGenerator port - minting of entity ids and inbox order keys.
//!
//! ULIDs compose the clock's milliseconds with random entropy, so ids sort
//! by creation time and can be minted without coordination. Routing the
//! timestamp through [`Clock`] keeps minting deterministic-in-time under a
//! `FixedClock` (the random half still differs per call).

use ulid::Ulid;

use crate::domain::ids::{ActivityId, CategoryId, ChildTaskId, OrderKey, TaskId};
use crate::ports::Clock;

/// Mints fresh ids. Entity ids are never reused or mutated after creation.
pub trait IdGenerator: Send + Sync {
    fn category_id(&self) -> CategoryId;

    fn task_id(&self) -> TaskId;

    fn child_task_id(&self) -> ChildTaskId;

    fn activity_id(&self) -> ActivityId;

    /// Sortable key for a task entering the inbox.
    fn order_key(&self) -> OrderKey;
}

/// ULID-based generator over an injected clock.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn mint(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn category_id(&self) -> CategoryId {
        CategoryId::from(self.mint())
    }

    fn task_id(&self) -> TaskId {
        TaskId::from(self.mint())
    }

    fn child_task_id(&self) -> ChildTaskId {
        ChildTaskId::from(self.mint())
    }

    fn activity_id(&self) -> ActivityId {
        ActivityId::from(self.mint())
    }

    fn order_key(&self) -> OrderKey {
        OrderKey::from_ulid(self.mint())
    }
}
