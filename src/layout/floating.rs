use super::{Geometry, Point, Size};

/// New geometry for a title-bar drag: the start rectangle moved by the
/// cursor delta since the drag began.
pub fn apply_move_drag(start: Geometry, origin: Point, cursor: Point) -> Geometry {
    let dx = cursor.x - origin.x;
    let dy = cursor.y - origin.y;
    start.with_position(Point {
        x: start.x() + dx,
        y: start.y() + dy,
    })
}

/// New geometry for a drag on the bottom-right grip. The top-left corner is
/// the anchor; the size follows the cursor delta and is clamped to `min`.
pub fn apply_resize_drag(start: Geometry, origin: Point, cursor: Point, min: Size) -> Geometry {
    let dx = cursor.x - origin.x;
    let dy = cursor.y - origin.y;
    let size = Size {
        width: start.width().saturating_add(dx),
        height: start.height().saturating_add(dy),
    }
    .at_least(min);
    start.with_size(size)
}

/// Geometry a snapped or maximized window takes back when the user grabs it
/// at `grab` and starts dragging.
///
/// The restored width is `saved`'s, and the cursor keeps the same relative
/// horizontal position across the window that it had across `current`. The
/// vertical offset inside the title bar is unchanged.
pub fn detach_geometry(current: Geometry, saved: Geometry, grab: Point) -> Geometry {
    let width = current.width().max(1) as f64;
    let ratio = ((grab.x - current.x()) as f64 / width).clamp(0.0, 1.0);
    let offset = (ratio * saved.width() as f64).round() as i32;
    Geometry {
        position: Point {
            x: grab.x - offset,
            y: current.y(),
        },
        size: saved.size,
    }
}
