//! Domain model (IDs, categories, tasks, activity targeting).

pub mod activity;
pub mod category;
pub mod ids;
pub mod task;

pub use activity::{EntityRef, OpKind};
pub use category::{Category, Indicator};
pub use ids::{ActivityId, CategoryId, ChildTaskId, Id, IdMarker, OrderKey, TaskId};
pub use task::{ChildTask, ParentTask};
