use std::time::{Duration, Instant};

use deskwm::config::DesktopConfig;
use deskwm::layout::{Geometry, Point, SnapZone, Viewport};
use deskwm::window::{
    DesktopEvent, InteractionMode, PointerEvent, WindowDescriptor, WindowId, WindowManager,
    WindowState,
};

const VIEWPORT: Viewport = Viewport::new(1280, 800).with_insets(0, 40);

fn manager() -> WindowManager {
    WindowManager::seeded(VIEWPORT, DesktopConfig::default(), 5)
}

fn geometry(wm: &WindowManager, id: WindowId) -> Geometry {
    wm.window(id).map(|w| w.geometry()).unwrap_or_default()
}

fn title_point(g: Geometry) -> Point {
    Point::new(g.x() + 40, g.y() + 5)
}

fn click(wm: &mut WindowManager, at: Point, now: Instant) {
    wm.handle_pointer(PointerEvent::down(at, now));
    wm.handle_pointer(PointerEvent::up(at, now));
}

#[test]
fn drop_on_left_edge_snaps_and_drag_out_restores_width() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let before = geometry(&wm, id);
    let now = Instant::now();

    wm.handle_pointer(PointerEvent::down(title_point(before), now));
    wm.handle_pointer(PointerEvent::moved(Point::new(5, 400), now));
    assert_eq!(wm.window(id).and_then(|w| w.snap_preview()), Some(SnapZone::Left));
    wm.handle_pointer(PointerEvent::up(Point::new(5, 400), now));

    assert_eq!(wm.state(id), Some(WindowState::Snapped(SnapZone::Left)));
    assert_eq!(geometry(&wm, id), Geometry::new(0, 0, 640, 760));
    assert_eq!(wm.window(id).and_then(|w| w.saved_geometry()), Some(before));
    assert!(wm.take_events().contains(&DesktopEvent::Snapped(id, SnapZone::Left)));

    // Grab 100px into the snapped title bar and pull the window away.
    let later = now + Duration::from_secs(1);
    wm.handle_pointer(PointerEvent::down(Point::new(100, 5), later));
    assert_eq!(wm.state(id), Some(WindowState::Snapped(SnapZone::Left)));
    wm.handle_pointer(PointerEvent::moved(Point::new(700, 300), later));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
    wm.handle_pointer(PointerEvent::up(Point::new(700, 300), later));

    let after = geometry(&wm, id);
    assert_eq!(after.size, before.size);
    assert_eq!(after, Geometry::new(619, 295, 520, 360));
    assert!(after.contains(Point::new(700, 300)));
}

#[test]
fn corner_and_top_zones() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let now = Instant::now();

    let start = title_point(geometry(&wm, id));
    wm.handle_pointer(PointerEvent::down(start, now));
    wm.handle_pointer(PointerEvent::moved(Point::new(1275, 30), now));
    wm.handle_pointer(PointerEvent::up(Point::new(1275, 30), now));
    assert_eq!(wm.state(id), Some(WindowState::Snapped(SnapZone::TopRight)));
    assert_eq!(geometry(&wm, id), Geometry::new(640, 0, 640, 380));

    let later = now + Duration::from_secs(1);
    wm.handle_pointer(PointerEvent::down(Point::new(700, 5), later));
    wm.handle_pointer(PointerEvent::moved(Point::new(600, 2), later));
    wm.handle_pointer(PointerEvent::up(Point::new(600, 2), later));
    assert_eq!(wm.state(id), Some(WindowState::Snapped(SnapZone::Top)));
    assert_eq!(geometry(&wm, id), VIEWPORT.work_area());
}

#[test]
fn click_without_movement_never_snaps() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let g = geometry(&wm, id);
    wm.handle_pointer(PointerEvent::down(title_point(g), Instant::now()));
    wm.handle_pointer(PointerEvent::up(title_point(g), Instant::now()));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
    assert_eq!(geometry(&wm, id), g);
}

#[test]
fn double_click_toggles_maximize() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let before = geometry(&wm, id);
    let now = Instant::now();

    click(&mut wm, title_point(before), now);
    click(&mut wm, title_point(before), now + Duration::from_millis(120));
    assert_eq!(wm.state(id), Some(WindowState::Maximized));
    assert_eq!(geometry(&wm, id), VIEWPORT.work_area());

    let later = now + Duration::from_secs(2);
    click(&mut wm, Point::new(100, 5), later);
    click(&mut wm, Point::new(100, 5), later + Duration::from_millis(120));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
    assert_eq!(geometry(&wm, id), before);
}

#[test]
fn regrabbing_right_after_a_drag_starts_another_drag() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let now = Instant::now();
    let ms = |n| now + Duration::from_millis(n);

    wm.handle_pointer(PointerEvent::down(title_point(geometry(&wm, id)), now));
    wm.handle_pointer(PointerEvent::moved(Point::new(641, 333), ms(100)));
    wm.handle_pointer(PointerEvent::up(Point::new(641, 333), ms(200)));
    let dropped = geometry(&wm, id);

    wm.handle_pointer(PointerEvent::down(title_point(dropped), ms(300)));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
    assert_eq!(
        wm.window(id).map(|w| w.interaction_mode()),
        Some(InteractionMode::Dragging)
    );
    assert_eq!(geometry(&wm, id), dropped);
}

#[test]
fn slow_clicks_do_not_maximize() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let at = title_point(geometry(&wm, id));
    let now = Instant::now();
    click(&mut wm, at, now);
    click(&mut wm, at, now + Duration::from_millis(900));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
}

#[test]
fn grip_resize_clamps_to_minimum() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let g = geometry(&wm, id);
    let grip = Point::new(g.right() - 5, g.bottom() - 5);
    let now = Instant::now();

    wm.handle_pointer(PointerEvent::down(grip, now));
    assert_eq!(
        wm.window(id).map(|w| w.interaction_mode()),
        Some(InteractionMode::Resizing)
    );
    wm.handle_pointer(PointerEvent::moved(Point::new(grip.x + 60, grip.y + 40), now));
    assert_eq!(geometry(&wm, id), Geometry::new(g.x(), g.y(), 580, 400));
    wm.handle_pointer(PointerEvent::moved(Point::new(grip.x - 400, grip.y - 400), now));
    wm.handle_pointer(PointerEvent::up(Point::new(grip.x - 400, grip.y - 400), now));
    assert_eq!(geometry(&wm, id), Geometry::new(g.x(), g.y(), 400, 300));
    assert_eq!(wm.pointer_owner(), None);
}

#[test]
fn maximized_window_has_no_grip() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    wm.toggle_maximize(id);
    let g = geometry(&wm, id);
    wm.handle_pointer(PointerEvent::down(
        Point::new(g.right() - 5, g.bottom() - 5),
        Instant::now(),
    ));
    assert_eq!(wm.pointer_owner(), None);
    assert_eq!(geometry(&wm, id), g);
}

#[test]
fn only_one_window_owns_the_pointer() {
    let mut wm = manager();
    let a = wm.open(WindowDescriptor::new("A"));
    let b = wm.open(WindowDescriptor::new("B"));
    let now = Instant::now();

    wm.focus(a);
    wm.handle_pointer(PointerEvent::down(title_point(geometry(&wm, a)), now));
    assert_eq!(wm.pointer_owner(), Some(a));
    assert_eq!(wm.focused(), Some(a));
    let b_before = geometry(&wm, b);
    wm.handle_pointer(PointerEvent::moved(Point::new(640, 420), now));
    assert_eq!(geometry(&wm, b), b_before);

    wm.close(a);
    assert_eq!(wm.pointer_owner(), None);
    wm.handle_pointer(PointerEvent::down(title_point(b_before), now));
    assert_eq!(wm.pointer_owner(), Some(b));
}

#[test]
fn cancel_keeps_position_without_snapping() {
    let mut wm = manager();
    let id = wm.open(WindowDescriptor::new("Files"));
    let g = geometry(&wm, id);
    let now = Instant::now();
    let start = title_point(g);
    wm.handle_pointer(PointerEvent::down(start, now));
    wm.handle_pointer(PointerEvent::moved(Point::new(5, 400), now));
    wm.handle_pointer(PointerEvent::cancel(Point::new(5, 400), now));
    assert_eq!(wm.state(id), Some(WindowState::Normal));
    assert_eq!(wm.pointer_owner(), None);
    assert_eq!(geometry(&wm, id).x(), g.x() + 5 - start.x);
}
