use crate::constants::{CAPTION_BUTTON_WIDTH, RESIZE_GRIP_SIZE, TITLE_BAR_HEIGHT};
use crate::layout::{Geometry, Point};

/// What a pointer press on a window landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHit {
    Close,
    Maximize,
    Minimize,
    TitleBar,
    Grip,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionButton {
    Minimize,
    Maximize,
    Close,
}

impl CaptionButton {
    pub const ALL: [CaptionButton; 3] = [
        CaptionButton::Minimize,
        CaptionButton::Maximize,
        CaptionButton::Close,
    ];

    /// Slot counted from the right edge of the title bar.
    fn slot(self) -> i32 {
        match self {
            CaptionButton::Close => 1,
            CaptionButton::Maximize => 2,
            CaptionButton::Minimize => 3,
        }
    }

    fn hit(self) -> WindowHit {
        match self {
            CaptionButton::Close => WindowHit::Close,
            CaptionButton::Maximize => WindowHit::Maximize,
            CaptionButton::Minimize => WindowHit::Minimize,
        }
    }
}

/// Pixel layout of the decorations every managed window carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub title_bar_height: i32,
    pub button_width: i32,
    pub grip_size: i32,
}

impl Default for ChromeLayout {
    fn default() -> Self {
        Self {
            title_bar_height: TITLE_BAR_HEIGHT,
            button_width: CAPTION_BUTTON_WIDTH,
            grip_size: RESIZE_GRIP_SIZE,
        }
    }
}

impl ChromeLayout {
    pub fn title_bar(&self, window: Geometry) -> Geometry {
        Geometry::new(
            window.x(),
            window.y(),
            window.width(),
            self.title_bar_height.min(window.height()),
        )
    }

    pub fn button(&self, window: Geometry, button: CaptionButton) -> Geometry {
        let bar = self.title_bar(window);
        Geometry::new(
            bar.right() - self.button_width * button.slot(),
            bar.y(),
            self.button_width,
            bar.height(),
        )
    }

    pub fn grip(&self, window: Geometry) -> Geometry {
        Geometry::new(
            window.right() - self.grip_size,
            window.bottom() - self.grip_size,
            self.grip_size,
            self.grip_size,
        )
    }

    /// Area below the title bar handed to the hosted content.
    pub fn content(&self, window: Geometry) -> Geometry {
        let bar = self.title_bar(window).height();
        Geometry::new(
            window.x(),
            window.y() + bar,
            window.width(),
            (window.height() - bar).max(0),
        )
    }

    /// Classify a press inside `window`. The grip only counts when the
    /// window can currently be resized.
    pub fn hit_test(&self, window: Geometry, point: Point, resizable: bool) -> Option<WindowHit> {
        if !window.contains(point) {
            return None;
        }
        if self.title_bar(window).contains(point) {
            let button = CaptionButton::ALL
                .into_iter()
                .find(|b| self.button(window, *b).contains(point));
            return Some(button.map_or(WindowHit::TitleBar, CaptionButton::hit));
        }
        if resizable && self.grip(window).contains(point) {
            return Some(WindowHit::Grip);
        }
        Some(WindowHit::Content)
    }
}
