//! Domain identifiers (strongly-typed IDs).
//!
//! IDs are ULIDs (Universally Unique Lexicographically Sortable Identifiers)
//! wrapped in a generic `Id<T>` so the compiler keeps category ids, task ids
//! and activity ids apart. `T` is a phantom marker and costs nothing at
//! runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for each ID type.
///
/// Provides the prefix used by `Display` ("cat-", "task-", ...).
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic ID type.
///
/// Two `Id<T>`s with different markers are different types and cannot be
/// mixed up at a call site, even though both are just a ULID underneath.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// Marker types
// ========================================

/// Marker for category ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryMarker {}

impl IdMarker for CategoryMarker {
    fn prefix() -> &'static str {
        "cat-"
    }
}

/// Marker for parent-task ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskMarker {}

impl IdMarker for TaskMarker {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// Marker for child-task ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildTaskMarker {}

impl IdMarker for ChildTaskMarker {
    fn prefix() -> &'static str {
        "sub-"
    }
}

/// Marker for activity (pending operation) ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityMarker {}

impl IdMarker for ActivityMarker {
    fn prefix() -> &'static str {
        "act-"
    }
}

// ========================================
// Type aliases
// ========================================

/// Identifier of a Category.
pub type CategoryId = Id<CategoryMarker>;

/// Identifier of a ParentTask.
pub type TaskId = Id<TaskMarker>;

/// Identifier of a ChildTask.
pub type ChildTaskId = Id<ChildTaskMarker>;

/// Identifier of a queued Activity.
pub type ActivityId = Id<ActivityMarker>;

/// Opaque sortable key for the inbox (uncategorized) task ordering.
///
/// ULIDs sort by creation time, which is exactly the order the inbox wants;
/// the key is never subdivided or renumbered.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderKey(Ulid);

impl OrderKey {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
