//! Entity collections behind the store lock.

use std::collections::HashMap;

use crate::domain::{Category, CategoryId, ChildTask, ChildTaskId, ParentTask, TaskId};

/// Single source of truth for entities.
///
/// Only the [`Store`](super::Store) touches this, under its mutex; nothing
/// outside the module ever sees a mutable reference into the maps.
#[derive(Default)]
pub(super) struct StoreState {
    pub categories: HashMap<CategoryId, Category>,
    pub parents: HashMap<TaskId, ParentTask>,
    pub children: HashMap<ChildTaskId, ChildTask>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-archived categories in display order.
    ///
    /// Ties on the order key are broken by id so the result is stable
    /// regardless of map iteration order.
    pub fn active_sorted(&self) -> Vec<&Category> {
        let mut active: Vec<&Category> = self
            .categories
            .values()
            .filter(|c| !c.is_archived())
            .collect();
        active.sort_by_key(|c| (c.order_number, c.id));
        active
    }

    /// Favorited categories sorted by favorite order.
    pub fn favorites_sorted(&self) -> Vec<&Category> {
        let mut favorites: Vec<&Category> = self
            .categories
            .values()
            .filter(|c| c.is_favorite())
            .collect();
        favorites.sort_by_key(|c| (c.favorite_order_number, c.id));
        favorites
    }

    /// Archived categories, oldest archive first.
    pub fn archived_sorted(&self) -> Vec<&Category> {
        let mut archived: Vec<&Category> = self
            .categories
            .values()
            .filter(|c| c.is_archived())
            .collect();
        archived.sort_by_key(|c| (c.archived_at, c.id));
        archived
    }

    pub fn active_order_keys(&self) -> Vec<i64> {
        self.categories
            .values()
            .filter_map(|c| if c.is_archived() { None } else { c.order_number })
            .collect()
    }

    pub fn favorite_order_keys(&self) -> Vec<i64> {
        self.categories
            .values()
            .filter_map(|c| c.favorite_order_number)
            .collect()
    }

    /// Parent tasks in the given category (`None` = inbox, sorted by the
    /// creation-ordered inbox key).
    pub fn tasks_in_category(&self, category: Option<CategoryId>) -> Vec<&ParentTask> {
        let mut tasks: Vec<&ParentTask> = self
            .parents
            .values()
            .filter(|t| t.category_id == category)
            .collect();
        tasks.sort_by_key(|t| (t.order_id, t.id));
        tasks
    }

    pub fn children_of(&self, parent: TaskId) -> Vec<&ChildTask> {
        let mut children: Vec<&ChildTask> = self
            .children
            .values()
            .filter(|c| c.parent_id == parent)
            .collect();
        children.sort_by_key(|c| c.id);
        children
    }
}
