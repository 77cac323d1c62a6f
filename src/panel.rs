use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::{WindowId, WindowState, WindowSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarHit {
    id: WindowId,
    rect: Rect,
}

/// One-row window list at the bottom of the desktop.
///
/// Entries keep the order windows were opened in, independent of stacking.
/// Hit rectangles are rebuilt on every render.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    hits: Vec<TaskbarHit>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        windows: &[WindowSummary],
        focused: Option<WindowId>,
        status: Option<&str>,
    ) {
        self.hits.clear();
        let area = self.area;
        let bounds = area.intersection(frame.area());
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::panel_bg())
            .fg(theme::panel_fg());
        let buffer = frame.buffer_mut();
        for yy in bounds.y..bounds.y.saturating_add(bounds.height) {
            for xx in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = buffer.cell_mut((xx, yy)) {
                    cell.set_symbol(" ");
                    cell.set_style(base);
                }
            }
        }

        let y = bounds.y;
        let max_x = bounds.x.saturating_add(bounds.width);
        let mut x = bounds.x;
        const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
        let label = format!("≡ {CRATE_NAME} ");
        safe_set_string(buffer, bounds, x, y, &label, base.add_modifier(Modifier::BOLD));
        x = x.saturating_add(label.chars().count() as u16);

        // Right-aligned status text claims its space first.
        let status_width = status.map_or(0, |s| s.chars().count() as u16);
        let list_end = if status_width > 0 && status_width < max_x.saturating_sub(x) {
            let start = max_x.saturating_sub(status_width);
            if let Some(text) = status {
                safe_set_string(buffer, bounds, start, y, text, base.fg(theme::panel_inactive_fg()));
            }
            start.saturating_sub(1)
        } else {
            max_x
        };

        let mut ordered: Vec<&WindowSummary> = windows.iter().collect();
        ordered.sort_by_key(|w| w.id);
        for window in ordered {
            let minimized = window.state == WindowState::Minimized;
            let max_label = list_end.saturating_sub(x).saturating_sub(2) as usize;
            if max_label == 0 {
                break;
            }
            let title = if minimized {
                format!("({})", window.title)
            } else {
                window.title.clone()
            };
            let chunk = format!(" {} ", truncate_to_width(&title, max_label));
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > list_end {
                break;
            }
            let style = if Some(window.id) == focused && !minimized {
                Style::default()
                    .bg(theme::panel_active_bg())
                    .fg(theme::panel_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else if minimized {
                base.fg(theme::panel_inactive_fg()).add_modifier(Modifier::DIM)
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.hits.push(TaskbarHit {
                id: window.id,
                rect: Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
            });
            x = x.saturating_add(width);
        }
    }

    /// Window entry under a click, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<WindowId> {
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.id)
    }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Geometry;
    use ratatui::buffer::Buffer;

    fn summary(id: u64, title: &str, state: WindowState, z: u64) -> WindowSummary {
        WindowSummary {
            id: WindowId(id),
            title: title.to_string(),
            state,
            z_index: z,
            accent: None,
            geometry: Geometry::new(0, 0, 400, 300),
        }
    }

    fn row(buffer: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn entries_follow_open_order_and_hit_test() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut bar = Taskbar::new();
        bar.set_area(area);
        let windows = vec![
            summary(2, "Files", WindowState::Normal, 5),
            summary(1, "Notes", WindowState::Minimized, 9),
        ];
        bar.render(&mut frame, &windows, Some(WindowId(2)), None);

        let text = row(&buffer, 0, 60);
        let notes = text.find("(Notes)").unwrap_or(usize::MAX);
        let files = text.find("Files").unwrap_or(0);
        assert!(notes < files, "{text}");

        let files_col = text.chars().take_while(|c| *c != 'F').count() as u16;
        assert_eq!(bar.hit_test(files_col, 0), Some(WindowId(2)));
        assert_eq!(bar.hit_test(0, 0), None);
        assert_eq!(bar.hit_test(files_col, 1), None);
    }

    #[test]
    fn status_text_is_right_aligned() {
        let area = Rect::new(0, 5, 40, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut bar = Taskbar::new();
        bar.set_area(area);
        bar.render(&mut frame, &[], None, Some("q quit"));
        let text = row(&buffer, 5, 40);
        assert!(text.ends_with("q quit"), "{text}");
        assert!(bar.contains(3, 5));
        assert!(!bar.contains(3, 4));
    }

    #[test]
    fn entries_that_do_not_fit_are_dropped() {
        let area = Rect::new(0, 0, 24, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut bar = Taskbar::new();
        bar.set_area(area);
        let windows: Vec<WindowSummary> = (1..=6)
            .map(|i| summary(i, "Terminal", WindowState::Normal, i))
            .collect();
        bar.render(&mut frame, &windows, None, None);
        assert!(bar.hits.len() < windows.len());
        assert!(bar.hits.iter().all(|h| h.rect.x + h.rect.width <= 24));
    }
}
