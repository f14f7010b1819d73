//! Local store: the in-memory, optimistically-mutated source of truth.
//!
//! Every mutation applies synchronously under the store lock and is visible
//! to the next read, network or no network. Mutations that must reach the
//! remote push one activity per persisted entity change onto the shared
//! [`ActivityQueue`] in the same tick; the sync loop drains that queue later
//! and re-reads snapshots from here at dispatch time.
//!
//! Mutations on unknown ids are no-ops (they return `false`/`None`), never
//! errors.

mod state;

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{
    Category, CategoryId, ChildTask, ChildTaskId, EntityRef, Indicator, OpKind, ParentTask, TaskId,
};
use crate::drag::{DropEvent, Placement};
use crate::ordering;
use crate::ports::{Clock, IdGenerator};
use crate::queue::{ActivityQueue, ActivityRecord};
use state::StoreState;

/// Patch for category edits. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    pub title: Option<String>,
    pub indicator: Option<Indicator>,
}

/// Patch for parent-task edits.
///
/// The outer `Option` means "touch this field"; the inner value is what to
/// write (so `Some(None)` clears a nullable field). `completed: Some(true)`
/// stamps the task *and all its children* with the same completion time;
/// `Some(false)` clears the task only; finished subtasks are not silently
/// revived by un-completing the parent.
#[derive(Debug, Clone, Default)]
pub struct ParentTaskEdit {
    pub title: Option<String>,
    pub details: Option<Option<String>>,
    pub date: Option<Option<NaiveDate>>,
    pub time: Option<Option<NaiveTime>>,
    pub category_id: Option<Option<CategoryId>>,
    pub completed: Option<bool>,
}

/// Patch for child-task edits.
#[derive(Debug, Clone, Default)]
pub struct ChildTaskEdit {
    pub title: Option<String>,
    pub details: Option<Option<String>>,
    pub date: Option<Option<NaiveDate>>,
    pub time: Option<Option<NaiveTime>>,
    pub completed: Option<bool>,
}

/// The in-memory store plus its wiring: activity queue, id minting, clock.
///
/// All mutation entry points are synchronous; the lock is a std `Mutex` and
/// is never held across an await. Share the store itself behind an `Arc`.
pub struct Store {
    state: Mutex<StoreState>,
    queue: Arc<ActivityQueue>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Store {
    pub fn new(
        queue: Arc<ActivityQueue>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Mutex::new(StoreState::new()),
            queue,
            ids,
            clock,
        }
    }

    fn enqueue(&self, entity: EntityRef, op: OpKind) {
        let record = ActivityRecord::new(self.ids.activity_id(), entity, op, self.clock.now());
        self.queue.push(record);
    }

    // ========================================
    // Selectors (cloned snapshots)
    // ========================================

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.state.lock().unwrap().categories.get(&id).cloned()
    }

    /// Non-archived categories in display order.
    pub fn active_categories(&self) -> Vec<Category> {
        let state = self.state.lock().unwrap();
        state.active_sorted().into_iter().cloned().collect()
    }

    /// Favorited categories in favorite order.
    pub fn favorite_categories(&self) -> Vec<Category> {
        let state = self.state.lock().unwrap();
        state.favorites_sorted().into_iter().cloned().collect()
    }

    /// Archived categories, oldest archive first.
    pub fn archived_categories(&self) -> Vec<Category> {
        let state = self.state.lock().unwrap();
        state.archived_sorted().into_iter().cloned().collect()
    }

    pub fn parent_task(&self, id: TaskId) -> Option<ParentTask> {
        self.state.lock().unwrap().parents.get(&id).cloned()
    }

    pub fn child_task(&self, id: ChildTaskId) -> Option<ChildTask> {
        self.state.lock().unwrap().children.get(&id).cloned()
    }

    /// Parent tasks in a category (`None` = inbox), in inbox-key order.
    pub fn tasks_in_category(&self, category: Option<CategoryId>) -> Vec<ParentTask> {
        let state = self.state.lock().unwrap();
        state
            .tasks_in_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Parent tasks filtered by completion state.
    pub fn tasks_by_completion(&self, completed: bool) -> Vec<ParentTask> {
        let state = self.state.lock().unwrap();
        let mut tasks: Vec<ParentTask> = state
            .parents
            .values()
            .filter(|t| t.is_completed() == completed)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.order_id, t.id));
        tasks
    }

    pub fn children_of(&self, parent: TaskId) -> Vec<ChildTask> {
        let state = self.state.lock().unwrap();
        state.children_of(parent).into_iter().cloned().collect()
    }

    // ========================================
    // Category mutations
    // ========================================

    /// Create a category at the bottom of the active list.
    pub fn add_category(&self, title: impl Into<String>, indicator: Indicator) -> CategoryId {
        let id = self.ids.category_id();
        {
            let mut state = self.state.lock().unwrap();
            let order = ordering::next_order(state.active_order_keys());
            state
                .categories
                .insert(id, Category::new(id, title, indicator, order));
        }
        self.enqueue(EntityRef::Category(id), OpKind::Create);
        id
    }

    pub fn edit_category(&self, id: CategoryId, edit: CategoryEdit) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            let Some(cat) = state.categories.get_mut(&id) else {
                return false;
            };
            if let Some(title) = edit.title {
                cat.title = title;
            }
            if let Some(indicator) = edit.indicator {
                cat.indicator = indicator;
            }
        }
        self.enqueue(EntityRef::Category(id), OpKind::Edit);
        true
    }

    /// Delete a category. Tasks referencing it are left alone: they merely
    /// point at the id, the category does not own them.
    pub fn delete_category(&self, id: CategoryId) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            if state.categories.remove(&id).is_none() {
                return false;
            }
        }
        self.enqueue(EntityRef::Category(id), OpKind::Delete);
        true
    }

    /// Favorite on: appended after the highest favorite order. Favorite
    /// off: the slot is simply vacated; favorite order keeps its gaps.
    pub fn toggle_favorite(&self, id: CategoryId) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            let next = ordering::next_order(state.favorite_order_keys());
            let Some(cat) = state.categories.get_mut(&id) else {
                return false;
            };
            cat.favorite_order_number = if cat.is_favorite() { None } else { Some(next) };
        }
        self.enqueue(EntityRef::Category(id), OpKind::Edit);
        true
    }

    /// Archive on: stamped with the current time, both order fields
    /// cleared. Archive off: re-enters at the bottom of the active list.
    pub fn toggle_archive(&self, id: CategoryId) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            let bottom = ordering::next_order(state.active_order_keys());
            let now = self.clock.now();
            let Some(cat) = state.categories.get_mut(&id) else {
                return false;
            };
            if cat.is_archived() {
                cat.unarchive(bottom);
            } else {
                cat.archive(now);
            }
        }
        self.enqueue(EntityRef::Category(id), OpKind::Edit);
        true
    }

    /// Move a category above everything else in the active list.
    ///
    /// Takes `min - 1`; no other category's key is touched, so repeating
    /// this is harmless.
    pub fn move_category_to_top(&self, id: CategoryId) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            let top = ordering::top_order(state.active_order_keys());
            let Some(cat) = state.categories.get_mut(&id) else {
                return false;
            };
            if cat.is_archived() {
                return false;
            }
            cat.order_number = Some(top);
        }
        self.enqueue(EntityRef::Category(id), OpKind::Edit);
        true
    }

    /// Move a category directly below another active category.
    ///
    /// Takes `target + 1`. If that collides with an existing key, the whole
    /// active list is renumbered 1..n in the intended order (the
    /// degradation path for integer insert-between). One EDIT activity per
    /// category whose key actually changed.
    pub fn move_category_below(&self, moved: CategoryId, target: CategoryId) -> bool {
        if moved == target {
            return false;
        }
        let mut changed: Vec<CategoryId> = Vec::new();
        {
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;

            let target_key = match state.categories.get(&target) {
                Some(t) if !t.is_archived() => match t.order_number {
                    Some(key) => key,
                    None => return false,
                },
                _ => return false,
            };
            match state.categories.get(&moved) {
                Some(m) if !m.is_archived() => {}
                _ => return false,
            }

            // Intended display order: current order minus `moved`, with
            // `moved` reinserted right after `target`.
            let mut intended: Vec<CategoryId> = state
                .active_sorted()
                .iter()
                .map(|c| c.id)
                .filter(|id| *id != moved)
                .collect();
            let target_index = match intended.iter().position(|id| *id == target) {
                Some(i) => i,
                None => return false,
            };
            intended.insert(target_index + 1, moved);

            let cat = state.categories.get_mut(&moved).expect("checked above");
            cat.order_number = Some(ordering::below_order(target_key));
            changed.push(moved);

            if ordering::has_collision(state.active_order_keys()) {
                for (id, key) in ordering::renumber(&intended) {
                    let cat = state.categories.get_mut(&id).expect("id from active set");
                    if cat.order_number != Some(key) {
                        cat.order_number = Some(key);
                        if !changed.contains(&id) {
                            changed.push(id);
                        }
                    }
                }
            }
        }
        for id in changed {
            self.enqueue(EntityRef::Category(id), OpKind::Edit);
        }
        true
    }

    /// Resolve a terminal drop event into an ordering mutation.
    ///
    /// Above the first active category means "take the top"; above any
    /// other means "go below its predecessor"; below means "go below the
    /// hovered target". Unknown ids and self-drops are no-ops.
    pub fn apply_drop(&self, event: DropEvent<CategoryId>) -> bool {
        let DropEvent {
            moved,
            over,
            placement,
        } = event;
        if moved == over {
            return false;
        }
        match placement {
            Placement::Below => self.move_category_below(moved, over),
            Placement::Above => {
                let previous = {
                    let state = self.state.lock().unwrap();
                    let order: Vec<CategoryId> =
                        state.active_sorted().iter().map(|c| c.id).collect();
                    match order.iter().position(|id| *id == over) {
                        None => return false,
                        Some(0) => None,
                        Some(i) => Some(order[i - 1]),
                    }
                };
                match previous {
                    None => self.move_category_to_top(moved),
                    // Already sitting directly above `over`.
                    Some(p) if p == moved => false,
                    Some(p) => self.move_category_below(moved, p),
                }
            }
        }
    }

    // ========================================
    // Task mutations
    // ========================================

    /// Create a parent task; `category = None` puts it in the inbox.
    pub fn add_parent_task(
        &self,
        title: impl Into<String>,
        category: Option<CategoryId>,
    ) -> TaskId {
        let id = self.ids.task_id();
        {
            let mut state = self.state.lock().unwrap();
            let mut task = ParentTask::new(id, title, self.ids.order_key());
            task.category_id = category;
            state.parents.insert(id, task);
        }
        self.enqueue(EntityRef::Parent(id), OpKind::Create);
        id
    }

    /// Create a child under an existing parent. `None` if the parent is
    /// unknown.
    pub fn add_child_task(&self, parent: TaskId, title: impl Into<String>) -> Option<ChildTaskId> {
        let id = self.ids.child_task_id();
        {
            let mut state = self.state.lock().unwrap();
            if !state.parents.contains_key(&parent) {
                return None;
            }
            state.children.insert(id, ChildTask::new(id, parent, title));
        }
        self.enqueue(EntityRef::Child(id), OpKind::Create);
        Some(id)
    }

    /// Edit a parent task.
    ///
    /// Completing a parent stamps every child with the same timestamp and
    /// enqueues one EDIT per stamped child (children first, then the
    /// parent). Clearing completion touches the parent alone.
    pub fn edit_parent_task(&self, id: TaskId, edit: ParentTaskEdit) -> bool {
        let mut stamped_children: Vec<ChildTaskId> = Vec::new();
        {
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;
            let Some(task) = state.parents.get_mut(&id) else {
                return false;
            };
            if let Some(title) = edit.title {
                task.title = title;
            }
            if let Some(details) = edit.details {
                task.details = details;
            }
            if let Some(date) = edit.date {
                task.date = date;
            }
            if let Some(time) = edit.time {
                task.time = time;
            }
            if let Some(category_id) = edit.category_id {
                task.category_id = category_id;
            }
            match edit.completed {
                Some(true) => {
                    let stamp = self.clock.now();
                    task.completed_at = Some(stamp);
                    for child in state.children.values_mut().filter(|c| c.parent_id == id) {
                        child.completed_at = Some(stamp);
                        stamped_children.push(child.id);
                    }
                    stamped_children.sort();
                }
                Some(false) => {
                    task.completed_at = None;
                }
                None => {}
            }
        }
        for child in stamped_children {
            self.enqueue(EntityRef::Child(child), OpKind::Edit);
        }
        self.enqueue(EntityRef::Parent(id), OpKind::Edit);
        true
    }

    pub fn edit_child_task(&self, id: ChildTaskId, edit: ChildTaskEdit) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            let Some(task) = state.children.get_mut(&id) else {
                return false;
            };
            if let Some(title) = edit.title {
                task.title = title;
            }
            if let Some(details) = edit.details {
                task.details = details;
            }
            if let Some(date) = edit.date {
                task.date = date;
            }
            if let Some(time) = edit.time {
                task.time = time;
            }
            match edit.completed {
                Some(true) => task.completed_at = Some(self.clock.now()),
                Some(false) => task.completed_at = None,
                None => {}
            }
        }
        self.enqueue(EntityRef::Child(id), OpKind::Edit);
        true
    }

    /// Delete a parent and cascade to its children. The cascade is this
    /// store's job, not the server's: one DELETE activity per child goes
    /// out before the parent's own.
    pub fn remove_parent_task(&self, id: TaskId) -> bool {
        let removed_children: Vec<ChildTaskId>;
        {
            let mut state = self.state.lock().unwrap();
            if state.parents.remove(&id).is_none() {
                return false;
            }
            let mut orphans: Vec<ChildTaskId> = state
                .children
                .values()
                .filter(|c| c.parent_id == id)
                .map(|c| c.id)
                .collect();
            orphans.sort();
            for child in &orphans {
                state.children.remove(child);
            }
            removed_children = orphans;
        }
        for child in removed_children {
            self.enqueue(EntityRef::Child(child), OpKind::Delete);
        }
        self.enqueue(EntityRef::Parent(id), OpKind::Delete);
        true
    }

    pub fn remove_child_task(&self, id: ChildTaskId) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            if state.children.remove(&id).is_none() {
                return false;
            }
        }
        self.enqueue(EntityRef::Child(id), OpKind::Delete);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{TimeZone, Utc};

    fn store() -> (Arc<ActivityQueue>, Store) {
        let queue = Arc::new(ActivityQueue::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        let store = Store::new(
            Arc::clone(&queue),
            Arc::new(UlidGenerator::new(clock)),
            Arc::new(clock),
        );
        (queue, store)
    }

    fn queued_ops(queue: &ActivityQueue) -> Vec<(EntityRef, OpKind)> {
        queue.pending().iter().map(|r| (r.entity, r.op)).collect()
    }

    #[test]
    fn first_category_gets_order_one() {
        let (queue, store) = store();

        let id = store.add_category("Work", Indicator::Blue);

        let cat = store.category(id).unwrap();
        assert_eq!(cat.order_number, Some(1));
        assert_eq!(cat.favorite_order_number, None);
        assert_eq!(cat.archived_at, None);
        assert_eq!(
            queued_ops(&queue),
            vec![(EntityRef::Category(id), OpKind::Create)]
        );
    }

    #[test]
    fn mutations_are_visible_immediately() {
        let (_queue, store) = store();

        let id = store.add_category("Work", Indicator::Blue);
        assert_eq!(store.active_categories().len(), 1);

        store.edit_category(
            id,
            CategoryEdit {
                title: Some("Deep work".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(store.category(id).unwrap().title, "Deep work");
    }

    #[test]
    fn drag_to_top_leaves_the_rest_untouched() {
        let (_queue, store) = store();
        let first = store.add_category("A", Indicator::Gray);
        let second = store.add_category("B", Indicator::Gray);

        let applied = store.apply_drop(DropEvent {
            moved: second,
            over: first,
            placement: Placement::Above,
        });

        assert!(applied);
        let moved = store.category(second).unwrap();
        let untouched = store.category(first).unwrap();
        assert!(moved.order_number.unwrap() < 1);
        assert_eq!(untouched.order_number, Some(1));

        let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn move_to_top_is_idempotent_for_everyone_else() {
        let (_queue, store) = store();
        let a = store.add_category("A", Indicator::Gray);
        let b = store.add_category("B", Indicator::Gray);
        let c = store.add_category("C", Indicator::Gray);

        for _ in 0..3 {
            assert!(store.move_category_to_top(c));
            let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
            assert_eq!(order, vec![c, a, b]);
        }
    }

    #[test]
    fn move_below_collision_falls_back_to_renumbering() {
        let (queue, store) = store();
        let a = store.add_category("A", Indicator::Gray); // 1
        let b = store.add_category("B", Indicator::Gray); // 2
        let c = store.add_category("C", Indicator::Gray); // 3

        // C below A wants key 2, which B already holds.
        assert!(store.move_category_below(c, a));

        let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![a, c, b]);

        let keys: Vec<i64> = store
            .active_categories()
            .iter()
            .map(|c| c.order_number.unwrap())
            .collect();
        assert_eq!(keys, vec![1, 2, 3]);

        // One EDIT per changed category: C took 2, B was pushed to 3.
        let edits: Vec<(EntityRef, OpKind)> = queued_ops(&queue)
            .into_iter()
            .filter(|(_, op)| *op == OpKind::Edit)
            .collect();
        assert_eq!(
            edits,
            vec![
                (EntityRef::Category(c), OpKind::Edit),
                (EntityRef::Category(b), OpKind::Edit),
            ]
        );
    }

    #[test]
    fn move_below_without_collision_touches_one_key() {
        let (_queue, store) = store();
        let a = store.add_category("A", Indicator::Gray); // 1
        let b = store.add_category("B", Indicator::Gray); // 2
        store.move_category_to_top(b); // b = 0

        // A below B wants key 1 = its own current key; list is b, a either way.
        assert!(store.move_category_below(a, b));
        let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn drop_above_a_middle_item_goes_below_its_predecessor() {
        let (_queue, store) = store();
        let a = store.add_category("A", Indicator::Gray);
        let b = store.add_category("B", Indicator::Gray);
        let c = store.add_category("C", Indicator::Gray);

        // Drop C above B: it should land between A and B.
        assert!(store.apply_drop(DropEvent {
            moved: c,
            over: b,
            placement: Placement::Above,
        }));

        let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![a, c, b]);
    }

    #[test]
    fn self_drop_is_a_no_op() {
        let (queue, store) = store();
        let a = store.add_category("A", Indicator::Gray);
        let before = queue.len();

        assert!(!store.apply_drop(DropEvent {
            moved: a,
            over: a,
            placement: Placement::Below,
        }));
        assert_eq!(queue.len(), before);
    }

    #[test]
    fn archiving_clears_both_order_fields() {
        let (_queue, store) = store();
        let id = store.add_category("Work", Indicator::Blue);
        store.toggle_favorite(id);
        store.toggle_favorite(store.add_category("Other", Indicator::Red));
        store.toggle_favorite(id); // off
        store.toggle_favorite(id); // back on, order 3
        assert_eq!(store.category(id).unwrap().favorite_order_number, Some(3));

        store.toggle_archive(id);

        let cat = store.category(id).unwrap();
        assert_eq!(cat.favorite_order_number, None);
        assert_eq!(cat.order_number, None);
        assert!(cat.archived_at.is_some());
        assert_eq!(store.archived_categories().len(), 1);
    }

    #[test]
    fn unarchiving_reenters_at_the_bottom() {
        let (_queue, store) = store();
        let a = store.add_category("A", Indicator::Gray); // 1
        let b = store.add_category("B", Indicator::Gray); // 2

        store.toggle_archive(a);
        store.toggle_archive(a);

        let order: Vec<CategoryId> = store.active_categories().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(store.category(a).unwrap().order_number, Some(3));
    }

    #[test]
    fn favorite_off_leaves_gaps_alone() {
        let (_queue, store) = store();
        let a = store.add_category("A", Indicator::Gray);
        let b = store.add_category("B", Indicator::Gray);
        let c = store.add_category("C", Indicator::Gray);
        store.toggle_favorite(a); // 1
        store.toggle_favorite(b); // 2
        store.toggle_favorite(c); // 3

        store.toggle_favorite(b); // off; a=1, c=3 keep their keys

        let favorites: Vec<CategoryId> =
            store.favorite_categories().iter().map(|c| c.id).collect();
        assert_eq!(favorites, vec![a, c]);
        assert_eq!(store.category(c).unwrap().favorite_order_number, Some(3));
    }

    #[test]
    fn completing_a_parent_stamps_its_children() {
        let (_queue, store) = store();
        let parent = store.add_parent_task("report", None);
        let first = store.add_child_task(parent, "outline").unwrap();
        let second = store.add_child_task(parent, "draft").unwrap();

        store.edit_parent_task(
            parent,
            ParentTaskEdit {
                completed: Some(true),
                ..Default::default()
            },
        );

        let stamp = store.parent_task(parent).unwrap().completed_at.unwrap();
        assert_eq!(store.child_task(first).unwrap().completed_at, Some(stamp));
        assert_eq!(store.child_task(second).unwrap().completed_at, Some(stamp));

        // Asymmetric: clearing the parent does not revive the children.
        store.edit_parent_task(
            parent,
            ParentTaskEdit {
                completed: Some(false),
                ..Default::default()
            },
        );
        assert!(!store.parent_task(parent).unwrap().is_completed());
        assert!(store.child_task(first).unwrap().is_completed());
        assert!(store.child_task(second).unwrap().is_completed());
    }

    #[test]
    fn removing_a_parent_cascades_to_children() {
        let (queue, store) = store();
        let parent = store.add_parent_task("report", None);
        let child = store.add_child_task(parent, "outline").unwrap();

        assert!(store.remove_parent_task(parent));

        assert_eq!(store.parent_task(parent), None);
        assert_eq!(store.child_task(child), None);

        let deletes: Vec<(EntityRef, OpKind)> = queued_ops(&queue)
            .into_iter()
            .filter(|(_, op)| *op == OpKind::Delete)
            .collect();
        assert_eq!(
            deletes,
            vec![
                (EntityRef::Child(child), OpKind::Delete),
                (EntityRef::Parent(parent), OpKind::Delete),
            ]
        );
    }

    #[test]
    fn create_then_edit_stays_two_queue_entries() {
        let (queue, store) = store();
        let id = store.add_category("Work", Indicator::Blue);
        store.edit_category(
            id,
            CategoryEdit {
                title: Some("Projects".to_string()),
                ..Default::default()
            },
        );

        // The queue never coalesces: both survive, in insertion order.
        assert_eq!(
            queued_ops(&queue),
            vec![
                (EntityRef::Category(id), OpKind::Create),
                (EntityRef::Category(id), OpKind::Edit),
            ]
        );
    }

    #[test]
    fn unknown_ids_are_no_ops_and_enqueue_nothing() {
        let (queue, store) = store();
        let ghost = CategoryId::from_ulid(ulid::Ulid::new());

        assert!(!store.edit_category(ghost, CategoryEdit::default()));
        assert!(!store.toggle_favorite(ghost));
        assert!(!store.toggle_archive(ghost));
        assert!(!store.delete_category(ghost));
        assert!(!store.move_category_to_top(ghost));
        assert!(store
            .add_child_task(TaskId::from_ulid(ulid::Ulid::new()), "x")
            .is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn inbox_holds_only_uncategorized_tasks() {
        let (_queue, store) = store();
        let loose = store.add_parent_task("one", None);
        let category = store.add_category("Work", Indicator::Blue);
        let filed = store.add_parent_task("two", Some(category));

        let inbox: Vec<TaskId> = store
            .tasks_in_category(None)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(inbox, vec![loose]);

        let in_category: Vec<TaskId> = store
            .tasks_in_category(Some(category))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(in_category, vec![filed]);
    }

    #[test]
    fn completion_filter_splits_tasks() {
        let (_queue, store) = store();
        let done = store.add_parent_task("done", None);
        let open = store.add_parent_task("open", None);
        store.edit_parent_task(
            done,
            ParentTaskEdit {
                completed: Some(true),
                ..Default::default()
            },
        );

        let completed: Vec<TaskId> = store
            .tasks_by_completion(true)
            .iter()
            .map(|t| t.id)
            .collect();
        let pending: Vec<TaskId> = store
            .tasks_by_completion(false)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(completed, vec![done]);
        assert_eq!(pending, vec![open]);
    }
}
