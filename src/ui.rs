//! Terminal drawing helpers and the mapping between terminal cells and
//! desktop pixels.
//!
//! The window manager works in pixels; the terminal only has cells. Pointer
//! input is converted by taking the centre of the cell under the mouse, and
//! window geometry is rounded to the nearest cell edge for drawing. With that
//! rounding the centre of every drawn title-bar cell lies inside the window's
//! pixel title bar, so what the user clicks is what the manager hit-tests.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::layout::{Geometry, Point, Viewport};

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw straight into a buffer, as tests and offscreen paths do.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint every visible cell of `rect` with `style`, replacing its symbol.
    pub fn fill(&mut self, rect: CellRect, symbol: &str, style: Style) {
        let Some(visible) = rect.visible_in(self.area) else {
            return;
        };
        for y in visible.y..visible.y.saturating_add(visible.height) {
            for x in visible.x..visible.x.saturating_add(visible.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` starting at a signed cell position, clipped on every side.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        if y < self.area.y as i32 || y >= self.area.bottom() as i32 {
            return;
        }
        let skip = (self.area.x as i32 - x).max(0) as usize;
        let start = x.max(self.area.x as i32);
        if start >= self.area.right() as i32 {
            return;
        }
        let visible: String = text.chars().skip(skip).collect();
        safe_set_string(self.buffer, self.area, start as u16, y as u16, &visible, style);
    }
}

/// Rectangle in terminal cells whose origin may lie off-screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// The on-screen part of this rectangle, if any.
    pub fn visible_in(&self, bounds: Rect) -> Option<Rect> {
        let x0 = self.x.max(bounds.x as i32);
        let y0 = self.y.max(bounds.y as i32);
        let x1 = self.right().min(bounds.right() as i32);
        let y1 = self.bottom().min(bounds.bottom() as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH_PX,
            cell_height: CELL_HEIGHT_PX,
        }
    }
}

impl CellMetrics {
    pub fn new(cell_width: i32, cell_height: i32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
        }
    }

    /// Pixel position the manager sees for a mouse event on a cell.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            column as i32 * self.cell_width + self.cell_width / 2,
            row as i32 * self.cell_height + self.cell_height / 2,
        )
    }

    pub fn to_cells(&self, geometry: Geometry) -> CellRect {
        let x0 = round_div(geometry.x(), self.cell_width);
        let y0 = round_div(geometry.y(), self.cell_height);
        let x1 = round_div(geometry.right(), self.cell_width);
        let y1 = round_div(geometry.bottom(), self.cell_height);
        CellRect {
            x: x0,
            y: y0,
            width: (x1 - x0).clamp(0, u16::MAX as i32) as u16,
            height: (y1 - y0).clamp(0, u16::MAX as i32) as u16,
        }
    }

    /// Desktop viewport for a terminal of `area`, with `top` and `bottom`
    /// rows reserved for bars.
    pub fn viewport_for(&self, area: Rect, top: u16, bottom: u16) -> Viewport {
        Viewport::new(
            area.width as i32 * self.cell_width,
            area.height as i32 * self.cell_height,
        )
        .with_insets(top as i32 * self.cell_height, bottom as i32 * self.cell_height)
    }
}

/// Nearest multiple, halves rounding down.
fn round_div(value: i32, unit: i32) -> i32 {
    (value + (unit - 1) / 2).div_euclid(unit)
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TITLE_BAR_HEIGHT;

    #[test]
    fn cell_center_lands_inside_rounded_title_row() {
        let metrics = CellMetrics::default();
        for y in 0..(3 * CELL_HEIGHT_PX) {
            let window = Geometry::new(35, y, 400, 300);
            let cells = metrics.to_cells(window);
            let centre = metrics.cell_center(cells.x as u16 + 2, cells.y as u16);
            assert!(
                centre.y >= window.y() && centre.y < window.y() + TITLE_BAR_HEIGHT,
                "y={y}"
            );
        }
    }

    #[test]
    fn to_cells_handles_negative_origin() {
        let metrics = CellMetrics::new(10, 20);
        let cells = metrics.to_cells(Geometry::new(-44, -20, 400, 300));
        assert_eq!(cells.x, -4);
        assert_eq!(cells.y, -1);
        assert_eq!(cells.width, 40);
        assert_eq!(cells.height, 15);
    }

    #[test]
    fn viewport_reserves_bar_rows() {
        let metrics = CellMetrics::new(10, 20);
        let vp = metrics.viewport_for(Rect::new(0, 0, 120, 40), 0, 1);
        assert_eq!(vp.width, 1200);
        assert_eq!(vp.height, 800);
        assert_eq!(vp.work_area(), Geometry::new(0, 0, 1200, 780));
    }

    #[test]
    fn visible_in_clips_off_screen_parts() {
        let rect = CellRect {
            x: -5,
            y: 3,
            width: 20,
            height: 6,
        };
        let visible = rect.visible_in(Rect::new(0, 0, 80, 24));
        assert_eq!(visible, Some(Rect::new(0, 3, 15, 6)));
        let gone = CellRect {
            x: 90,
            ..rect
        };
        assert_eq!(gone.visible_in(Rect::new(0, 0, 80, 24)), None);
    }

    #[test]
    fn put_str_clips_left_edge() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.put_str(-2, 0, "abcdefgh", Style::default());
        let row: String = (0..6)
            .filter_map(|x| buffer.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert_eq!(row, "cdefgh");
    }

    #[test]
    fn safe_set_string_ignores_out_of_bounds() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::empty(area);
        safe_set_string(&mut buffer, area, 9, 0, "x", Style::default());
        safe_set_string(&mut buffer, area, 2, 0, "long", Style::default());
        assert_eq!(buffer.cell((3, 0)).map(|c| c.symbol().to_string()), Some("o".to_string()));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_to_width("héllo", 2), "hé");
        assert_eq!(truncate_to_width("ok", 5), "ok");
    }
}
