//! State machine for a single managed window.
//!
//! Placement (normal, maximized, snapped) and the live pointer interaction
//! are separate enums. Saved geometry only exists inside the maximized and
//! snapped variants, and a resize session can only be opened from a normal
//! placement, so the combinations the desktop forbids cannot be built.

use std::time::Instant;

use super::chrome::WindowHit;
use super::pointer::{PointerGrab, PointerStream};
use super::{InteractionMode, Rgb, WindowEvent, WindowId, WindowState, WindowSummary};
use crate::config::DesktopConfig;
use crate::constants::DOUBLE_CLICK_DISTANCE;
use crate::gesture::ShakeDetector;
use crate::layout::floating::{apply_move_drag, apply_resize_drag, detach_geometry};
use crate::layout::{Geometry, Point, SnapEngine, SnapZone, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Normal,
    Maximized { saved: Geometry },
    Snapped { zone: SnapZone, saved: Geometry },
}

impl Placement {
    fn state(self) -> WindowState {
        match self {
            Placement::Normal => WindowState::Normal,
            Placement::Maximized { .. } => WindowState::Maximized,
            Placement::Snapped { zone, .. } => WindowState::Snapped(zone),
        }
    }

    fn saved(self) -> Option<Geometry> {
        match self {
            Placement::Normal => None,
            Placement::Maximized { saved } | Placement::Snapped { saved, .. } => Some(saved),
        }
    }
}

#[derive(Debug)]
struct DragSession {
    _grab: PointerGrab,
    origin: Point,
    /// Geometry the cursor delta is applied to. Replaced once on detach.
    start: Geometry,
    /// Geometry and placement before the press, for abort.
    initial: Geometry,
    initial_placement: Placement,
    moved: bool,
    preview: Option<SnapZone>,
    shake: ShakeDetector,
}

#[derive(Debug)]
struct ResizeSession {
    _grab: PointerGrab,
    origin: Point,
    start: Geometry,
}

#[derive(Debug, Default)]
enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

#[derive(Debug)]
pub struct WindowInstance {
    id: WindowId,
    title: String,
    accent: Option<Rgb>,
    geometry: Geometry,
    placement: Placement,
    minimized: bool,
    interaction: Interaction,
    z_index: u64,
    closing: bool,
    minimize_at: Option<Instant>,
    /// Time and position of the last title bar press that stayed a click.
    last_title_click: Option<(Instant, Point)>,
    config: DesktopConfig,
    snap: SnapEngine,
    pointer: PointerStream,
    events: Vec<WindowEvent>,
}

impl WindowInstance {
    pub fn new(
        id: WindowId,
        title: impl Into<String>,
        geometry: Geometry,
        config: DesktopConfig,
        pointer: PointerStream,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            accent: None,
            geometry: geometry.with_size(geometry.size.at_least(config.min_size)),
            placement: Placement::Normal,
            minimized: false,
            interaction: Interaction::Idle,
            z_index: 0,
            closing: false,
            minimize_at: None,
            last_title_click: None,
            config,
            snap: SnapEngine::new(config.snap),
            pointer,
            events: Vec::new(),
        }
    }

    pub fn with_accent(mut self, accent: Option<Rgb>) -> Self {
        self.accent = accent;
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn accent(&self) -> Option<Rgb> {
        self.accent
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Geometry to return to when leaving a maximized or snapped placement.
    pub fn saved_geometry(&self) -> Option<Geometry> {
        self.placement.saved()
    }

    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else {
            self.placement.state()
        }
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        match self.interaction {
            Interaction::Idle => InteractionMode::Idle,
            Interaction::Dragging(_) => InteractionMode::Dragging,
            Interaction::Resizing(_) => InteractionMode::Resizing,
        }
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub(crate) fn set_z_index(&mut self, z: u64) {
        self.z_index = z;
    }

    pub fn is_visible(&self) -> bool {
        !self.minimized && !self.closing
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn is_resizable(&self) -> bool {
        self.placement == Placement::Normal && !self.minimized
    }

    pub fn minimize_pending(&self) -> bool {
        self.minimize_at.is_some()
    }

    /// Zone highlighted under the cursor during a drag.
    pub fn snap_preview(&self) -> Option<SnapZone> {
        match &self.interaction {
            Interaction::Dragging(drag) => drag.preview,
            _ => None,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.is_visible() && self.geometry.contains(point)
    }

    pub fn summary(&self) -> WindowSummary {
        WindowSummary {
            id: self.id,
            title: self.title.clone(),
            state: self.state(),
            z_index: self.z_index,
            accent: self.accent,
            geometry: self.geometry,
        }
    }

    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: WindowEvent) {
        self.events.push(event);
    }

    /// Handle a press at `point`. Focus is always requested first; the hit
    /// region then decides what else happens.
    pub fn pointer_down(&mut self, point: Point, now: Instant, viewport: Viewport) -> Option<WindowHit> {
        if !self.is_visible() {
            return None;
        }
        let hit = self
            .config
            .chrome
            .hit_test(self.geometry, point, self.is_resizable())?;
        self.emit(WindowEvent::Focus);
        match hit {
            WindowHit::Close => {
                self.last_title_click = None;
                self.request_close();
            }
            WindowHit::Maximize => {
                self.last_title_click = None;
                self.toggle_maximize(viewport);
            }
            WindowHit::Minimize => {
                self.last_title_click = None;
                self.begin_minimize(now);
            }
            WindowHit::TitleBar => {
                if self.is_double_click(point, now) {
                    self.last_title_click = None;
                    self.toggle_maximize(viewport);
                } else {
                    self.last_title_click = Some((now, point));
                    self.begin_drag(point, now);
                }
            }
            WindowHit::Grip => {
                self.begin_resize(point);
            }
            WindowHit::Content => {}
        }
        Some(hit)
    }

    fn is_double_click(&self, point: Point, now: Instant) -> bool {
        self.last_title_click.is_some_and(|(at, prev)| {
            now.saturating_duration_since(at) <= self.config.double_click
                && (point.x - prev.x).abs() <= DOUBLE_CLICK_DISTANCE
                && (point.y - prev.y).abs() <= DOUBLE_CLICK_DISTANCE
        })
    }

    /// Ask the owner to close this window. Nothing else happens to the
    /// instance afterwards.
    pub fn request_close(&mut self) {
        if self.closing {
            return;
        }
        self.interaction = Interaction::Idle;
        self.minimize_at = None;
        self.closing = true;
        self.emit(WindowEvent::Close);
    }

    pub fn begin_drag(&mut self, point: Point, _now: Instant) -> bool {
        if !self.is_visible() || !matches!(self.interaction, Interaction::Idle) {
            return false;
        }
        let Some(grab) = self.pointer.acquire(self.id) else {
            return false;
        };
        tracing::debug!(window_id = ?self.id, x = point.x, y = point.y, "drag started");
        self.interaction = Interaction::Dragging(DragSession {
            _grab: grab,
            origin: point,
            start: self.geometry,
            initial: self.geometry,
            initial_placement: self.placement,
            moved: false,
            preview: None,
            shake: ShakeDetector::new(self.config.shake),
        });
        true
    }

    pub fn drag_to(&mut self, point: Point, now: Instant, viewport: Viewport) {
        if !self.follow_drag(point) {
            return;
        }
        let zone = self.snap.zone_for(point.x, point.y, viewport);
        let Interaction::Dragging(drag) = &mut self.interaction else {
            return;
        };
        drag.preview = zone;
        let shaken = drag.shake.push(point, now);
        if shaken {
            tracing::debug!(window_id = ?self.id, "window shaken");
            self.emit(WindowEvent::Shake);
        }
    }

    pub fn end_drag(&mut self, point: Point, viewport: Viewport) {
        if !self.follow_drag(point) {
            return;
        }
        let Interaction::Dragging(drag) = std::mem::take(&mut self.interaction) else {
            return;
        };
        if !drag.moved {
            return;
        }
        if let Some(zone) = self.snap.zone_for(point.x, point.y, viewport) {
            self.snap_to(zone, drag.start, viewport);
        }
    }

    /// Apply the cursor position to the live drag, detaching from a snapped
    /// or maximized placement on the first real movement.
    fn follow_drag(&mut self, point: Point) -> bool {
        let Interaction::Dragging(drag) = &mut self.interaction else {
            return false;
        };
        if !drag.moved {
            if point == drag.origin {
                return true;
            }
            drag.moved = true;
            // A press that became a drag cannot start a double-click.
            self.last_title_click = None;
            if let Some(saved) = self.placement.saved() {
                drag.start = detach_geometry(self.geometry, saved, drag.origin);
                self.placement = Placement::Normal;
                tracing::debug!(window_id = ?self.id, "detached from placement");
            }
        }
        self.geometry = apply_move_drag(drag.start, drag.origin, point);
        true
    }

    fn snap_to(&mut self, zone: SnapZone, saved: Geometry, viewport: Viewport) {
        self.geometry = self.snap.geometry_for(zone, viewport);
        self.placement = Placement::Snapped { zone, saved };
        tracing::debug!(window_id = ?self.id, %zone, "snapped window");
        self.emit(WindowEvent::Snap(zone));
    }

    pub fn begin_resize(&mut self, point: Point) -> bool {
        if !self.is_resizable() || !matches!(self.interaction, Interaction::Idle) {
            return false;
        }
        let Some(grab) = self.pointer.acquire(self.id) else {
            return false;
        };
        self.interaction = Interaction::Resizing(ResizeSession {
            _grab: grab,
            origin: point,
            start: self.geometry,
        });
        true
    }

    pub fn resize_to(&mut self, point: Point) {
        if let Interaction::Resizing(resize) = &self.interaction {
            self.geometry =
                apply_resize_drag(resize.start, resize.origin, point, self.config.min_size);
        }
    }

    pub fn end_resize(&mut self, point: Point) {
        if !matches!(self.interaction, Interaction::Resizing(_)) {
            return;
        }
        self.resize_to(point);
        self.interaction = Interaction::Idle;
        tracing::debug!(
            window_id = ?self.id,
            width = self.geometry.width(),
            height = self.geometry.height(),
            "resized window"
        );
    }

    /// The pointer session ended abnormally. Keep whatever geometry the
    /// interaction reached, resolve no snap zone.
    pub fn cancel_interaction(&mut self) -> bool {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => false,
            _ => {
                tracing::debug!(window_id = ?self.id, "interaction cancelled");
                true
            }
        }
    }

    /// Undo the live interaction, including any detach it performed.
    pub fn abort_interaction(&mut self) -> bool {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => false,
            Interaction::Dragging(drag) => {
                self.geometry = drag.initial;
                self.placement = drag.initial_placement;
                true
            }
            Interaction::Resizing(resize) => {
                self.geometry = resize.start;
                true
            }
        }
    }

    pub fn toggle_maximize(&mut self, viewport: Viewport) {
        if !self.is_visible() {
            return;
        }
        self.cancel_interaction();
        match self.placement {
            Placement::Normal => {
                self.placement = Placement::Maximized {
                    saved: self.geometry,
                };
                self.geometry = viewport.work_area();
                tracing::debug!(window_id = ?self.id, "maximized window");
            }
            Placement::Maximized { saved } => {
                self.placement = Placement::Normal;
                self.geometry = saved;
                tracing::debug!(window_id = ?self.id, "unmaximized window");
            }
            Placement::Snapped { saved, .. } => {
                self.placement = Placement::Maximized { saved };
                self.geometry = viewport.work_area();
                tracing::debug!(window_id = ?self.id, "maximized snapped window");
            }
        }
    }

    /// Start the minimize transition; the window leaves the desktop on the
    /// first [`tick`](Self::tick) past the configured delay.
    pub fn begin_minimize(&mut self, now: Instant) {
        if !self.is_visible() || self.minimize_at.is_some() {
            return;
        }
        self.minimize_at = Some(now + self.config.minimize_delay);
    }

    /// Advance timed transitions. Returns true when the window minimized.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.minimize_at {
            Some(at) if now >= at => {
                self.minimize();
                true
            }
            _ => false,
        }
    }

    pub fn minimize(&mut self) {
        self.minimize_at = None;
        if !self.is_visible() {
            return;
        }
        self.cancel_interaction();
        self.minimized = true;
        tracing::debug!(window_id = ?self.id, "minimized window");
        self.emit(WindowEvent::Minimized);
    }

    pub fn restore(&mut self) {
        self.minimize_at = None;
        if !self.minimized || self.closing {
            return;
        }
        self.minimized = false;
        tracing::debug!(window_id = ?self.id, "restored window");
        self.emit(WindowEvent::Restored);
    }

    /// Re-resolve maximized and snapped geometry for a new viewport.
    pub fn refit(&mut self, viewport: Viewport) {
        if !matches!(self.interaction, Interaction::Idle) {
            return;
        }
        match self.placement {
            Placement::Normal => {}
            Placement::Maximized { .. } => self.geometry = viewport.work_area(),
            Placement::Snapped { zone, .. } => {
                self.geometry = self.snap.geometry_for(zone, viewport)
            }
        }
    }
}
