//! Activity targeting: which entity a pending operation refers to, and what
//! kind of remote operation it is.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ChildTaskId, TaskId};

/// The remote operation a queued activity stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Create,
    Edit,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpKind::Create => "create",
            OpKind::Edit => "edit",
            OpKind::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Typed reference to the entity an activity targets.
///
/// Keeping the id typed (instead of a bare ULID plus a kind tag) means the
/// sync loop cannot look a category id up in the task map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum EntityRef {
    Category(CategoryId),
    Parent(TaskId),
    Child(ChildTaskId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Category(id) => id.fmt(f),
            EntityRef::Parent(id) => id.fmt(f),
            EntityRef::Child(id) => id.fmt(f),
        }
    }
}
