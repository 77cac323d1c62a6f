pub mod chrome;
pub mod decorator;
pub mod pointer;

mod instance;
mod window_manager;

use std::fmt;

use crate::layout::{Geometry, Size, SnapZone};

pub use chrome::{CaptionButton, ChromeLayout, WindowHit};
pub use instance::WindowInstance;
pub use pointer::{PointerEvent, PointerGrab, PointerKind, PointerStream};
pub use window_manager::WindowManager;

/// Identifier issued by the [`WindowManager`]. Never reused while the manager
/// lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Public view of where a window currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Maximized,
    Snapped(SnapZone),
    Minimized,
}

impl WindowState {
    pub fn is_minimized(self) -> bool {
        matches!(self, WindowState::Minimized)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// Cosmetic accent used by the decorator for the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Notifications a window queues for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Focus,
    Close,
    Minimized,
    Restored,
    Snap(SnapZone),
    Shake,
}

/// What the shell asks for when it opens a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub title: String,
    pub accent: Option<Rgb>,
    /// Requested size; the configured default when absent. Never honoured
    /// below the minimum window size.
    pub size: Option<Size>,
}

impl WindowDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            accent: None,
            size: None,
        }
    }

    pub fn with_accent(mut self, accent: Rgb) -> Self {
        self.accent = Some(accent);
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// Read-only row of the manager's collection, enough to draw a taskbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub id: WindowId,
    pub title: String,
    pub state: WindowState,
    pub z_index: u64,
    pub accent: Option<Rgb>,
    pub geometry: Geometry,
}

/// Lifecycle notifications the manager hands to the desktop shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEvent {
    Opened(WindowId),
    Focused(WindowId),
    Closed(WindowId),
    Minimized(WindowId),
    Restored(WindowId),
    Snapped(WindowId, SnapZone),
    Shaken(WindowId),
}
