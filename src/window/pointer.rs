//! The desktop-wide pointer stream and its exclusive grab.
//!
//! Once a window starts a drag or a resize it owns every subsequent move and
//! release until the interaction ends, wherever the cursor goes. Ownership is
//! a [`PointerGrab`] guard held inside the live session; dropping the session
//! for any reason releases the stream.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use super::WindowId;
use crate::layout::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The host lost pointer capture mid-interaction.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: Point, time: Instant) -> Self {
        Self {
            kind,
            position,
            time,
        }
    }

    pub fn down(position: Point, time: Instant) -> Self {
        Self::new(PointerKind::Down, position, time)
    }

    pub fn moved(position: Point, time: Instant) -> Self {
        Self::new(PointerKind::Move, position, time)
    }

    pub fn up(position: Point, time: Instant) -> Self {
        Self::new(PointerKind::Up, position, time)
    }

    pub fn cancel(position: Point, time: Instant) -> Self {
        Self::new(PointerKind::Cancel, position, time)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerStream {
    owner: Rc<Cell<Option<WindowId>>>,
}

impl PointerStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<WindowId> {
        self.owner.get()
    }

    /// Claim the stream for `id`. Refused while any window holds it.
    pub fn acquire(&self, id: WindowId) -> Option<PointerGrab> {
        if let Some(current) = self.owner.get() {
            tracing::debug!(window_id = ?id, owner = ?current, "pointer stream busy");
            return None;
        }
        self.owner.set(Some(id));
        tracing::trace!(window_id = ?id, "pointer grab acquired");
        Some(PointerGrab {
            id,
            slot: Rc::clone(&self.owner),
        })
    }
}

#[derive(Debug)]
pub struct PointerGrab {
    id: WindowId,
    slot: Rc<Cell<Option<WindowId>>>,
}

impl PointerGrab {
    pub fn id(&self) -> WindowId {
        self.id
    }
}

impl Drop for PointerGrab {
    fn drop(&mut self) {
        if self.slot.get() == Some(self.id) {
            self.slot.set(None);
            tracing::trace!(window_id = ?self.id, "pointer grab released");
        }
    }
}
