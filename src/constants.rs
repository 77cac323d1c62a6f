//! Shared crate-wide constants.
//!
//! All lengths are desktop pixels unless stated otherwise.

/// Smallest width any resize gesture may produce.
pub const MIN_WINDOW_WIDTH: i32 = 400;

/// Smallest height any resize gesture may produce.
pub const MIN_WINDOW_HEIGHT: i32 = 300;

/// Size given to newly opened windows when the caller does not ask for one.
pub const DEFAULT_WINDOW_WIDTH: i32 = 520;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 360;

/// Height of the draggable title bar at the top of every window.
pub const TITLE_BAR_HEIGHT: i32 = 24;

/// Width of each caption button (minimize, maximize, close).
pub const CAPTION_BUTTON_WIDTH: i32 = 30;

/// Side of the square resize grip in the bottom-right corner.
pub const RESIZE_GRIP_SIZE: i32 = 20;

/// Distance from a vertical edge (or the top of the work area) within which
/// a dragged cursor arms an edge snap.
pub const SNAP_EDGE_MARGIN: i32 = 20;

/// Vertical band at the top and bottom of the work area in which an edge
/// snap on the left or right becomes a quarter (corner) snap instead.
pub const SNAP_CORNER_MARGIN: i32 = 100;

/// Trailing window of cursor samples considered by the shake detector.
pub const SHAKE_WINDOW_MS: u64 = 500;

/// Samples required in the window before a shake can be reported.
pub const SHAKE_MIN_SAMPLES: usize = 5;

/// Horizontal direction reversals that make a trail count as a shake.
pub const SHAKE_REVERSALS: usize = 3;

/// Quiet period after a reported shake.
pub const SHAKE_COOLDOWN_MS: u64 = 1000;

/// Upper bound on buffered shake samples, regardless of their age.
pub const SHAKE_CAPACITY: usize = 64;

/// Two title bar presses closer than this toggle maximize.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// How far the second press of a double-click may land from the first.
pub const DOUBLE_CLICK_DISTANCE: i32 = 4;

/// Delay between pressing minimize and the window leaving the desktop.
pub const MINIMIZE_DELAY_MS: u64 = 200;

/// Default terminal cell size used by the front-end to map cells to pixels.
pub const CELL_WIDTH_PX: i32 = 10;
pub const CELL_HEIGHT_PX: i32 = 24;
