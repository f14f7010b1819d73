//! Task entities (parent + child).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ChildTaskId, OrderKey, TaskId};

/// A top-level task.
///
/// `category_id = None` puts the task in the inbox, where `order_id` (a
/// creation-ordered sortable key) decides its position. Completion is a
/// timestamp, not a flag, so "done" carries *when*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentTask {
    pub id: TaskId,
    pub title: String,
    pub details: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub completed_at: Option<DateTime<Utc>>,
    pub category_id: Option<CategoryId>,
    pub order_id: OrderKey,
}

impl ParentTask {
    pub fn new(id: TaskId, title: impl Into<String>, order_id: OrderKey) -> Self {
        Self {
            id,
            title: title.into(),
            details: None,
            date: None,
            time: None,
            completed_at: None,
            category_id: None,
            order_id,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// A subtask. Same fields as [`ParentTask`] minus the category/inbox
/// placement, plus the mandatory parent reference. Its lifecycle is tied to
/// the parent: deleting the parent deletes it too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildTask {
    pub id: ChildTaskId,
    pub parent_id: TaskId,
    pub title: String,
    pub details: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChildTask {
    pub fn new(id: ChildTaskId, parent_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            title: title.into(),
            details: None,
            date: None,
            time: None,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
