//! Edge, corner and top snapping for dragged windows.
//!
//! Everything here is pure: the same cursor position and viewport always
//! produce the same zone and the same geometry.

use std::fmt;

use super::{Geometry, Viewport};
use crate::constants::{SNAP_CORNER_MARGIN, SNAP_EDGE_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapZone {
    Left,
    Right,
    /// Full work area, equivalent to maximize.
    Top,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SnapZone {
    pub const ALL: [SnapZone; 7] = [
        SnapZone::Left,
        SnapZone::Right,
        SnapZone::Top,
        SnapZone::TopLeft,
        SnapZone::TopRight,
        SnapZone::BottomLeft,
        SnapZone::BottomRight,
    ];

    /// Target rectangle for this zone. Odd pixels go to the right/bottom
    /// piece so that the pieces tile the work area exactly.
    pub fn geometry(self, viewport: Viewport) -> Geometry {
        let work = viewport.work_area();
        let (x, y) = (work.x(), work.y());
        let (w, h) = (work.width(), work.height());
        let half_w = w / 2;
        let half_h = h / 2;
        match self {
            SnapZone::Top => work,
            SnapZone::Left => Geometry::new(x, y, half_w, h),
            SnapZone::Right => Geometry::new(x + half_w, y, w - half_w, h),
            SnapZone::TopLeft => Geometry::new(x, y, half_w, half_h),
            SnapZone::TopRight => Geometry::new(x + half_w, y, w - half_w, half_h),
            SnapZone::BottomLeft => Geometry::new(x, y + half_h, half_w, h - half_h),
            SnapZone::BottomRight => {
                Geometry::new(x + half_w, y + half_h, w - half_w, h - half_h)
            }
        }
    }
}

impl fmt::Display for SnapZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SnapZone::Left => "left",
            SnapZone::Right => "right",
            SnapZone::Top => "top",
            SnapZone::TopLeft => "top-left",
            SnapZone::TopRight => "top-right",
            SnapZone::BottomLeft => "bottom-left",
            SnapZone::BottomRight => "bottom-right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapConfig {
    /// Distance from the left/right edge, or from the top of the work area,
    /// that arms a snap.
    pub edge_margin: i32,
    /// Height of the bands at the top and bottom of the work area where a
    /// left/right snap turns into a quarter snap.
    pub corner_margin: i32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            edge_margin: SNAP_EDGE_MARGIN,
            corner_margin: SNAP_CORNER_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub const fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SnapConfig {
        self.config
    }

    /// Zone under the cursor, if any. Corners are checked before plain edges.
    pub fn zone_for(&self, x: i32, y: i32, viewport: Viewport) -> Option<SnapZone> {
        let work = viewport.work_area();
        if work.is_empty() {
            return None;
        }
        let edge = self.config.edge_margin;
        let corner = self.config.corner_margin;

        let near_left = x < work.x() + edge;
        let near_right = x >= work.right() - edge;
        let in_top_band = y < work.y() + corner;
        let in_bottom_band = y >= work.bottom() - corner;

        if near_left && in_top_band {
            return Some(SnapZone::TopLeft);
        }
        if near_right && in_top_band {
            return Some(SnapZone::TopRight);
        }
        if near_left && in_bottom_band {
            return Some(SnapZone::BottomLeft);
        }
        if near_right && in_bottom_band {
            return Some(SnapZone::BottomRight);
        }
        // The reserved bar above the work area also counts as "top".
        if y < work.y() + edge {
            return Some(SnapZone::Top);
        }
        if near_left {
            return Some(SnapZone::Left);
        }
        if near_right {
            return Some(SnapZone::Right);
        }
        None
    }

    pub fn geometry_for(&self, zone: SnapZone, viewport: Viewport) -> Geometry {
        zone.geometry(viewport)
    }
}
