pub mod floating;
pub mod snap;

pub use snap::{SnapConfig, SnapEngine, SnapZone};

/// A position on the desktop, in pixels. May be negative when a window has
/// been dragged partly off-screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow each dimension to at least `min`.
    pub fn at_least(self, min: Size) -> Size {
        Size {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// On-screen rectangle of a window: top-left position plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub position: Point,
    pub size: Size,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Point { x, y },
            size: Size { width, height },
        }
    }

    pub const fn x(&self) -> i32 {
        self.position.x
    }

    pub const fn y(&self) -> i32 {
        self.position.y
    }

    pub const fn width(&self) -> i32 {
        self.size.width
    }

    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.position.x + self.size.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.position.y + self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }

    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x()
            && point.x < self.right()
            && point.y >= self.y()
            && point.y < self.bottom()
    }

    pub fn with_position(self, position: Point) -> Self {
        Self { position, ..self }
    }

    pub fn with_size(self, size: Size) -> Self {
        Self { size, ..self }
    }
}

/// The visible desktop surface. `top_inset` and `bottom_inset` are rows of
/// reserved chrome (a menu bar, a taskbar) that windows never snap or
/// maximize over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub top_inset: i32,
    pub bottom_inset: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            top_inset: 0,
            bottom_inset: 0,
        }
    }

    pub const fn with_insets(mut self, top: i32, bottom: i32) -> Self {
        self.top_inset = top;
        self.bottom_inset = bottom;
        self
    }

    /// The part of the viewport available to windows.
    pub fn work_area(&self) -> Geometry {
        let width = self.width.max(0);
        let height = self.height.max(0);
        let top = self.top_inset.clamp(0, height);
        let bottom = self.bottom_inset.clamp(0, height - top);
        Geometry::new(0, top, width, height - top - bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_contains_edge_cases() {
        let empty = Geometry::new(0, 0, 0, 5);
        assert!(!empty.contains(Point::new(0, 0)));
        let g = Geometry::new(10, 10, 30, 20);
        assert!(g.contains(Point::new(10, 10)));
        assert!(g.contains(Point::new(39, 29)));
        assert!(!g.contains(Point::new(40, 10)));
        assert!(!g.contains(Point::new(10, 30)));
    }

    #[test]
    fn geometry_allows_negative_origin() {
        let g = Geometry::new(-50, 10, 100, 100);
        assert!(g.contains(Point::new(-10, 20)));
        assert_eq!(g.right(), 50);
    }

    #[test]
    fn work_area_excludes_reserved_chrome() {
        let viewport = Viewport::new(1280, 800).with_insets(32, 48);
        assert_eq!(viewport.work_area(), Geometry::new(0, 32, 1280, 720));
    }

    #[test]
    fn work_area_never_negative() {
        let viewport = Viewport::new(100, 40).with_insets(30, 30);
        let work = viewport.work_area();
        assert_eq!(work.y(), 30);
        assert_eq!(work.height(), 0);
    }

    #[test]
    fn size_at_least_clamps_each_axis() {
        let s = Size::new(120, 900).at_least(Size::new(400, 300));
        assert_eq!(s, Size::new(400, 900));
    }
}
