use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::instance::WindowInstance;
use super::pointer::{PointerEvent, PointerKind, PointerStream};
use super::{
    DesktopEvent, InteractionMode, WindowDescriptor, WindowEvent, WindowId, WindowState,
    WindowSummary,
};
use crate::config::DesktopConfig;
use crate::layout::{Geometry, Point, Viewport};

/// Owns every open window and is the only writer of z-order.
///
/// Windows queue their notifications; the manager drains them after each
/// operation, applies focus/close bookkeeping and republishes them as
/// [`DesktopEvent`]s for the shell to collect through
/// [`take_events`](Self::take_events).
#[derive(Debug)]
pub struct WindowManager<G = StdRng> {
    windows: BTreeMap<WindowId, WindowInstance>,
    next_id: u64,
    next_z: u64,
    focused: Option<WindowId>,
    viewport: Viewport,
    config: DesktopConfig,
    pointer: PointerStream,
    rng: G,
    // queue of lifecycle notifications; shell drains via `take_events`
    events: Vec<DesktopEvent>,
    // windows minimized by a shake, keyed by the window that was shaken
    shaken_aside: Option<(WindowId, Vec<WindowId>)>,
}

impl WindowManager<StdRng> {
    pub fn new(viewport: Viewport, config: DesktopConfig) -> Self {
        Self::with_rng(viewport, config, StdRng::from_entropy())
    }

    /// Reproducible placement for a given seed.
    pub fn seeded(viewport: Viewport, config: DesktopConfig, seed: u64) -> Self {
        Self::with_rng(viewport, config, StdRng::seed_from_u64(seed))
    }
}

impl<G: Rng> WindowManager<G> {
    pub fn with_rng(viewport: Viewport, config: DesktopConfig, rng: G) -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
            next_z: 1,
            focused: None,
            viewport,
            config,
            pointer: PointerStream::new(),
            rng,
            events: Vec::new(),
            shaken_aside: None,
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn open(&mut self, descriptor: WindowDescriptor) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let size = descriptor
            .size
            .unwrap_or(self.config.default_size)
            .at_least(self.config.min_size);
        let work = self.viewport.work_area();
        let max_x = (work.width() - size.width).max(0);
        let max_y = (work.height() - size.height).max(0);
        let x = work.x() + self.rng.gen_range(0..=max_x);
        let y = work.y() + self.rng.gen_range(0..=max_y);
        let geometry = Geometry::new(x, y, size.width, size.height);

        let window = WindowInstance::new(
            id,
            descriptor.title,
            geometry,
            self.config,
            self.pointer.clone(),
        )
        .with_accent(descriptor.accent);
        tracing::debug!(window_id = ?id, x, y, width = size.width, height = size.height, "opened window");
        self.windows.insert(id, window);
        self.events.push(DesktopEvent::Opened(id));
        self.focus(id);
        id
    }

    /// Raise `id` above every other window and give it focus. Other windows
    /// keep their z values.
    pub fn focus(&mut self, id: WindowId) {
        let top = self.top_z();
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if top != Some(window.z_index()) || window.z_index() == 0 {
            window.set_z_index(self.next_z);
            self.next_z += 1;
        }
        if self.focused != Some(id) {
            self.focused = Some(id);
            tracing::debug!(window_id = ?id, z = window.z_index(), "focused window");
            self.events.push(DesktopEvent::Focused(id));
        }
        self.check_z_order();
    }

    pub fn close(&mut self, id: WindowId) {
        let Some(window) = self.windows.remove(&id) else {
            return;
        };
        tracing::debug!(window_id = ?id, "closing window");
        drop(window);
        if matches!(&self.shaken_aside, Some((owner, _)) if *owner == id) {
            self.shaken_aside = None;
        } else if let Some((_, aside)) = &mut self.shaken_aside {
            aside.retain(|w| *w != id);
        }
        if self.focused == Some(id) {
            self.focused = self.topmost_visible();
        }
        self.events.push(DesktopEvent::Closed(id));
        self.check_z_order();
    }

    /// Hide `id` immediately. Geometry and z value are kept.
    pub fn minimize(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.minimize();
            self.drain_window_events(id);
        }
    }

    /// Start the animated minimize; completes on a later [`tick`](Self::tick).
    pub fn begin_minimize(&mut self, id: WindowId, now: Instant) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.begin_minimize(now);
        }
    }

    pub fn restore(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.restore();
            self.drain_window_events(id);
        }
    }

    /// Taskbar click: bring back a minimized window and raise it.
    pub fn activate(&mut self, id: WindowId) {
        if self.state(id) == Some(WindowState::Minimized) {
            self.restore(id);
        }
        self.focus(id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        let viewport = self.viewport;
        if let Some(window) = self.windows.get_mut(&id) {
            window.toggle_maximize(viewport);
            self.drain_window_events(id);
        }
    }

    /// Minimize every other visible window, or bring back the ones a previous
    /// shake of the same window put aside.
    pub fn toggle_others(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            return;
        }
        if let Some((owner, aside)) = self.shaken_aside.take()
            && owner == id
        {
            tracing::debug!(window_id = ?id, count = aside.len(), "restoring shaken-aside windows");
            for other in aside {
                self.restore(other);
            }
            self.focus(id);
            return;
        }
        let others: Vec<WindowId> = self
            .windows
            .values()
            .filter(|w| w.id() != id && w.is_visible())
            .map(WindowInstance::id)
            .collect();
        if others.is_empty() {
            return;
        }
        tracing::debug!(window_id = ?id, count = others.len(), "minimizing other windows");
        for other in &others {
            self.minimize(*other);
        }
        self.shaken_aside = Some((id, others));
        self.focus(id);
    }

    pub fn windows(&self) -> Vec<WindowSummary> {
        let mut list: Vec<WindowSummary> =
            self.windows.values().map(WindowInstance::summary).collect();
        list.sort_by_key(|w| w.z_index);
        list
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowInstance> {
        self.windows.get(&id)
    }

    pub fn state(&self, id: WindowId) -> Option<WindowState> {
        self.windows.get(&id).map(WindowInstance::state)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Visible windows, bottom first.
    pub fn draw_order(&self) -> Vec<&WindowInstance> {
        let mut list: Vec<&WindowInstance> =
            self.windows.values().filter(|w| w.is_visible()).collect();
        list.sort_by_key(|w| w.z_index());
        list
    }

    pub fn topmost_at(&self, point: Point) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|w| w.contains(point))
            .max_by_key(|w| w.z_index())
            .map(WindowInstance::id)
    }

    /// Window currently holding the pointer stream.
    pub fn pointer_owner(&self) -> Option<WindowId> {
        self.pointer.owner()
    }

    /// Route one pointer event. Presses go to the topmost window under the
    /// cursor; everything else only reaches the window holding the grab.
    /// Returns true when a window consumed the event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let viewport = self.viewport;
        let point = event.position;
        match event.kind {
            PointerKind::Down => {
                // A press while a grab is live means the release never arrived.
                self.cancel_interaction();
                let Some(id) = self.topmost_at(point) else {
                    return false;
                };
                if let Some(window) = self.windows.get_mut(&id) {
                    window.pointer_down(point, event.time, viewport);
                }
                self.drain_window_events(id);
                true
            }
            kind => {
                let Some(id) = self.pointer.owner() else {
                    return false;
                };
                let Some(window) = self.windows.get_mut(&id) else {
                    return false;
                };
                match (kind, window.interaction_mode()) {
                    (PointerKind::Move, InteractionMode::Dragging) => {
                        window.drag_to(point, event.time, viewport)
                    }
                    (PointerKind::Move, InteractionMode::Resizing) => window.resize_to(point),
                    (PointerKind::Up, InteractionMode::Dragging) => window.end_drag(point, viewport),
                    (PointerKind::Up, InteractionMode::Resizing) => window.end_resize(point),
                    _ => {
                        window.cancel_interaction();
                    }
                }
                self.drain_window_events(id);
                true
            }
        }
    }

    /// End the live drag or resize where it stands, without snapping.
    pub fn cancel_interaction(&mut self) -> bool {
        let Some(id) = self.pointer.owner() else {
            return false;
        };
        let cancelled = self
            .windows
            .get_mut(&id)
            .is_some_and(WindowInstance::cancel_interaction);
        self.drain_window_events(id);
        cancelled
    }

    /// Revert the live drag or resize, if any.
    pub fn abort_interaction(&mut self) -> bool {
        let Some(id) = self.pointer.owner() else {
            return false;
        };
        let aborted = self
            .windows
            .get_mut(&id)
            .is_some_and(WindowInstance::abort_interaction);
        self.drain_window_events(id);
        aborted
    }

    /// Complete timed transitions that are due.
    pub fn tick(&mut self, now: Instant) {
        let due: Vec<WindowId> = self
            .windows
            .values_mut()
            .filter_map(|w| w.tick(now).then(|| w.id()))
            .collect();
        for id in due {
            self.drain_window_events(id);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;
        for window in self.windows.values_mut() {
            window.refit(viewport);
        }
    }

    pub fn take_events(&mut self) -> Vec<DesktopEvent> {
        std::mem::take(&mut self.events)
    }

    /// No two open windows share a z value.
    pub fn z_order_is_total(&self) -> bool {
        let mut seen: Vec<u64> = self.windows.values().map(WindowInstance::z_index).collect();
        seen.sort_unstable();
        seen.windows(2).all(|pair| pair[0] != pair[1])
    }

    fn check_z_order(&self) {
        debug_assert!(self.z_order_is_total(), "duplicate z values");
    }

    fn top_z(&self) -> Option<u64> {
        self.windows.values().map(WindowInstance::z_index).max()
    }

    fn topmost_visible(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index())
            .map(WindowInstance::id)
    }

    fn drain_window_events(&mut self, id: WindowId) {
        let events = self
            .windows
            .get_mut(&id)
            .map(WindowInstance::take_events)
            .unwrap_or_default();
        for event in events {
            match event {
                WindowEvent::Focus => self.focus(id),
                WindowEvent::Close => self.close(id),
                WindowEvent::Minimized => {
                    if self.focused == Some(id) {
                        self.focused = self.topmost_visible();
                    }
                    self.events.push(DesktopEvent::Minimized(id));
                }
                WindowEvent::Restored => self.events.push(DesktopEvent::Restored(id)),
                WindowEvent::Snap(zone) => self.events.push(DesktopEvent::Snapped(id, zone)),
                WindowEvent::Shake => {
                    self.events.push(DesktopEvent::Shaken(id));
                    if self.config.shake_minimizes_others {
                        self.toggle_others(id);
                    }
                }
            }
        }
        self.check_z_order();
    }
}
