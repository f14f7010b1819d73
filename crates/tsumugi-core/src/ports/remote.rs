//! Remote port - the RPC surface the sync loop drains into.
//!
//! One async method per entity type × operation. The transport behind these
//! calls is not this crate's business: implementations serialize the payload
//! however they like and come back with a tagged reply. The sync loop treats
//! a thrown [`RpcError`] and a non-`"OK"` reply code identically (§ retry).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, CategoryId, ChildTask, ChildTaskId, ParentTask, TaskId};

/// Tagged result every remote operation comes back with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcReply {
    pub code: String,
}

impl RpcReply {
    pub const OK: &'static str = "OK";

    pub fn ok() -> Self {
        Self {
            code: Self::OK.to_string(),
        }
    }

    pub fn error(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }
}

/// Failure raised by the transport itself (as opposed to a reply the remote
/// produced with a non-OK code).
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote unavailable: {0}")]
    Unavailable(String),
}

/// Remote persistence collaborator.
///
/// Create/edit take the current entity snapshot (re-read from the store at
/// dispatch time, not captured at enqueue time); delete takes the typed id.
#[async_trait]
pub trait Remote: Send + Sync {
    async fn create_category(&self, category: &Category) -> Result<RpcReply, RpcError>;

    async fn edit_category(&self, category: &Category) -> Result<RpcReply, RpcError>;

    async fn delete_category(&self, id: CategoryId) -> Result<RpcReply, RpcError>;

    async fn create_parent_task(&self, task: &ParentTask) -> Result<RpcReply, RpcError>;

    async fn edit_parent_task(&self, task: &ParentTask) -> Result<RpcReply, RpcError>;

    async fn delete_parent_task(&self, id: TaskId) -> Result<RpcReply, RpcError>;

    async fn create_child_task(&self, task: &ChildTask) -> Result<RpcReply, RpcError>;

    async fn edit_child_task(&self, task: &ChildTask) -> Result<RpcReply, RpcError>;

    async fn delete_child_task(&self, id: ChildTaskId) -> Result<RpcReply, RpcError>;
}
