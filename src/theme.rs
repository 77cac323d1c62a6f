use ratatui::style::Color;

use crate::window::Rgb;

// Centralized theme colors, kept as small helpers so the palette can change
// in one place.

pub const ACCENT_RGB: Rgb = Rgb(200, 100, 0);

pub fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Desktop
pub fn desktop_bg() -> Color {
    Color::Rgb(24, 60, 96)
}

// Taskbar
pub fn panel_bg() -> Color {
    Color::DarkGray
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_inactive_fg() -> Color {
    Color::Gray
}
pub fn panel_active_bg() -> Color {
    Color::Gray
}
pub fn panel_active_fg() -> Color {
    Color::Black
}

// Decorator
/// Focused title bar when the window has no accent of its own.
pub fn decorator_header_bg() -> Color {
    accent()
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_inactive_header_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}
pub fn decorator_body_bg() -> Color {
    Color::Black
}
pub fn decorator_close_bg() -> Color {
    Color::Red
}
pub fn snap_preview() -> Color {
    Color::LightCyan
}
