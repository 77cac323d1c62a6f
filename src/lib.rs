//! Floating desktop window manager.
//!
//! [`window::WindowManager`] owns every window, issues ids, keeps the z order
//! and routes the pointer stream. Windows move, resize, snap to screen edges
//! and corners, maximize, minimize and react to a shake gesture. The
//! [`runner`] module puts a terminal front-end around it.

pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod gesture;
pub mod keybindings;
pub mod layout;
pub mod panel;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
