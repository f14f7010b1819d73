//! Drag session controller.
//!
//! One gesture at a time: `idle → dragging → (resolve on release) → idle`.
//! While dragging, every pointer move re-resolves the hovered drop target
//! from the currently registered rectangles, so zones may mount and unmount
//! mid-drag. Release either produces a single terminal [`DropEvent`] or,
//! with no hover, discards the gesture silently.
//!
//! The controller is UI-agnostic: `I` is whatever id type the drop zones
//! carry (category ids in this app). The hovered target is published on a
//! `watch` channel so drop indicators can subscribe without polling.

use std::sync::Mutex;

use tokio::sync::watch;

use crate::geometry::{self, Point, Rect};

/// Which half of the hovered target the pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Above the target's vertical center: insert before it.
    Above,
    /// Below the center: insert after it.
    Below,
}

/// The terminal event of a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent<I> {
    /// The dragged item.
    pub moved: I,
    /// The drop target it was released over.
    pub over: I,
    pub placement: Placement,
}

/// Currently hovered target while a drag is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover<I> {
    pub target: I,
    pub placement: Placement,
}

#[derive(Clone, Copy)]
enum DragState<I> {
    Idle,
    Dragging { moved: I, position: Point },
}

struct Inner<I> {
    /// Registered drop zones in registration order (ties in the nearest
    /// computation resolve to the earlier registration).
    targets: Vec<(I, Rect)>,
    state: DragState<I>,
}

impl<I: Copy + Eq> Inner<I> {
    /// Resolve the hover for a pointer position. The dragged item's own
    /// zone is never a candidate.
    fn hover_at(&self, moved: I, position: Point) -> Option<Hover<I>> {
        let candidates: Vec<(I, Rect)> = self
            .targets
            .iter()
            .filter(|(id, _)| *id != moved)
            .copied()
            .collect();
        let target = geometry::nearest(position, &candidates)?;
        let (_, rect) = candidates
            .iter()
            .find(|(id, _)| *id == target)
            .expect("nearest returns a candidate id");
        let placement = if position.y < rect.mid_y() {
            Placement::Above
        } else {
            Placement::Below
        };
        Some(Hover { target, placement })
    }

    fn current_hover(&self) -> Option<Hover<I>> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { moved, position } => self.hover_at(moved, position),
        }
    }
}

/// Per-gesture state machine over a registry of drop-target rectangles.
///
/// Only one item can hold the dragging state; a `gesture_start` during a
/// live drag is ignored (single pointer ownership, no multi-touch).
pub struct DragController<I> {
    inner: Mutex<Inner<I>>,
    hover_tx: watch::Sender<Option<Hover<I>>>,
}

impl<I: Copy + Eq + Send + Sync + 'static> Default for DragController<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy + Eq + Send + Sync + 'static> DragController<I> {
    pub fn new() -> Self {
        let (hover_tx, _) = watch::channel(None);
        Self {
            inner: Mutex::new(Inner {
                targets: Vec::new(),
                state: DragState::Idle,
            }),
            hover_tx,
        }
    }

    /// Add a drop zone, or refresh its rectangle if already registered.
    /// Allowed mid-drag; the hover is re-resolved right away.
    pub fn register_target(&self, id: I, rect: Rect) {
        let mut inner = self.inner.lock().unwrap();
        match inner.targets.iter_mut().find(|(t, _)| *t == id) {
            Some(slot) => slot.1 = rect,
            None => inner.targets.push((id, rect)),
        }
        self.publish(&inner);
    }

    /// Remove a drop zone. Allowed mid-drag.
    pub fn unregister_target(&self, id: I) {
        let mut inner = self.inner.lock().unwrap();
        inner.targets.retain(|(t, _)| *t != id);
        self.publish(&inner);
    }

    /// `idle → dragging`. Ignored while another drag is live.
    pub fn gesture_start(&self, moved: I, at: Point) {
        let mut inner = self.inner.lock().unwrap();
        if let DragState::Dragging { .. } = inner.state {
            return;
        }
        inner.state = DragState::Dragging {
            moved,
            position: at,
        };
        self.publish(&inner);
    }

    /// Update the live position and re-resolve the hover. Ignored when
    /// idle.
    pub fn pointer_move(&self, to: Point) {
        let mut inner = self.inner.lock().unwrap();
        let DragState::Dragging { moved, .. } = inner.state else {
            return;
        };
        inner.state = DragState::Dragging {
            moved,
            position: to,
        };
        self.publish(&inner);
    }

    /// `dragging → idle`, resolving the gesture.
    ///
    /// Returns the terminal drop event, or `None` when the pointer was
    /// released with no valid hover target: a discarded gesture, not an
    /// error.
    pub fn gesture_end(&self) -> Option<DropEvent<I>> {
        let mut inner = self.inner.lock().unwrap();
        let DragState::Dragging { moved, position } = inner.state else {
            return None;
        };
        let resolved = inner.hover_at(moved, position);
        inner.state = DragState::Idle;
        self.publish(&inner);
        resolved.map(|hover| DropEvent {
            moved,
            over: hover.target,
            placement: hover.placement,
        })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.inner.lock().unwrap().state, DragState::Dragging { .. })
    }

    /// Subscribe to the currently hovered target (for drop indicators).
    pub fn hover(&self) -> watch::Receiver<Option<Hover<I>>> {
        self.hover_tx.subscribe()
    }

    fn publish(&self, inner: &Inner<I>) {
        // send_replace: 受信側がいなくても値は保持される
        self.hover_tx.send_replace(inner.current_hover());
    }
}
