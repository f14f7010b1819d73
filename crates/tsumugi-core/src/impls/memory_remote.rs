//! MemoryRemote - in-memory remote for development and tests.
//!
//! Persists payloads into a map, records every call in order, and can be
//! scripted to fail: `fail_next(n)` makes the next `n` calls die in the
//! transport, `reject_next(code)` makes the next call come back with a
//! non-OK reply code. Both look the same to the sync loop (retry).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Category, CategoryId, ChildTask, ChildTaskId, ParentTask, TaskId};
use crate::ports::{Remote, RpcError, RpcReply};

/// One remote call, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub method: &'static str,
    /// Display form of the target entity id.
    pub entity: String,
}

#[derive(Default)]
struct RemoteState {
    /// "Persisted" payloads keyed by entity id.
    rows: HashMap<String, serde_json::Value>,
    calls: Vec<CallRecord>,
    failures_left: u32,
    rejections: VecDeque<String>,
}

/// In-memory [`Remote`] implementation.
#[derive(Default)]
pub struct MemoryRemote {
    state: Mutex<RemoteState>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` calls fail with a transport error.
    pub fn fail_next(&self, n: u32) {
        self.state.lock().unwrap().failures_left = n;
    }

    /// Make the next call reply with the given non-OK code.
    pub fn reject_next(&self, code: impl Into<String>) {
        self.state.lock().unwrap().rejections.push_back(code.into());
    }

    /// All calls made so far, in order (failed ones included).
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// The persisted payload for an entity id, if any.
    pub fn row(&self, id: impl ToString) -> Option<serde_json::Value> {
        self.state.lock().unwrap().rows.get(&id.to_string()).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    fn upsert<T: Serialize>(
        &self,
        method: &'static str,
        id: String,
        payload: &T,
    ) -> Result<RpcReply, RpcError> {
        let value =
            serde_json::to_value(payload).map_err(|e| RpcError::Transport(e.to_string()))?;
        self.apply(method, id, Some(value))
    }

    fn apply(
        &self,
        method: &'static str,
        id: String,
        payload: Option<serde_json::Value>,
    ) -> Result<RpcReply, RpcError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CallRecord {
            method,
            entity: id.clone(),
        });
        if state.failures_left > 0 {
            state.failures_left -= 1;
            return Err(RpcError::Transport("injected failure".to_string()));
        }
        if let Some(code) = state.rejections.pop_front() {
            return Ok(RpcReply::error(code));
        }
        match payload {
            Some(value) => {
                state.rows.insert(id, value);
            }
            None => {
                state.rows.remove(&id);
            }
        }
        Ok(RpcReply::ok())
    }
}

#[async_trait]
impl Remote for MemoryRemote {
    async fn create_category(&self, category: &Category) -> Result<RpcReply, RpcError> {
        self.upsert("create_category", category.id.to_string(), category)
    }

    async fn edit_category(&self, category: &Category) -> Result<RpcReply, RpcError> {
        self.upsert("edit_category", category.id.to_string(), category)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<RpcReply, RpcError> {
        self.apply("delete_category", id.to_string(), None)
    }

    async fn create_parent_task(&self, task: &ParentTask) -> Result<RpcReply, RpcError> {
        self.upsert("create_parent_task", task.id.to_string(), task)
    }

    async fn edit_parent_task(&self, task: &ParentTask) -> Result<RpcReply, RpcError> {
        self.upsert("edit_parent_task", task.id.to_string(), task)
    }

    async fn delete_parent_task(&self, id: TaskId) -> Result<RpcReply, RpcError> {
        self.apply("delete_parent_task", id.to_string(), None)
    }

    async fn create_child_task(&self, task: &ChildTask) -> Result<RpcReply, RpcError> {
        self.upsert("create_child_task", task.id.to_string(), task)
    }

    async fn edit_child_task(&self, task: &ChildTask) -> Result<RpcReply, RpcError> {
        self.upsert("edit_child_task", task.id.to_string(), task)
    }

    async fn delete_child_task(&self, id: ChildTaskId) -> Result<RpcReply, RpcError> {
        self.apply("delete_child_task", id.to_string(), None)
    }
}
