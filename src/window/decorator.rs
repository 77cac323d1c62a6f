use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::chrome::{CaptionButton, ChromeLayout};
use super::{Rgb, WindowInstance};
use crate::theme;
use crate::ui::{CellMetrics, CellRect, UiFrame};

/// Cell-space description of one window, ready to be drawn.
#[derive(Debug, Clone)]
pub struct WindowFrame<'a> {
    pub title: &'a str,
    pub focused: bool,
    pub accent: Option<Rgb>,
    pub outer: CellRect,
    pub buttons: [(CaptionButton, CellRect); 3],
    /// Present only when the window can be resized.
    pub grip: Option<CellRect>,
}

impl<'a> WindowFrame<'a> {
    pub fn build(
        window: &'a WindowInstance,
        focused: bool,
        metrics: CellMetrics,
        chrome: &ChromeLayout,
    ) -> Self {
        let geometry = window.geometry();
        let buttons =
            CaptionButton::ALL.map(|b| (b, metrics.to_cells(chrome.button(geometry, b))));
        let grip = window
            .is_resizable()
            .then(|| metrics.to_cells(chrome.grip(geometry)));
        Self {
            title: window.title(),
            focused,
            accent: window.accent(),
            outer: metrics.to_cells(geometry),
            buttons,
            grip,
        }
    }

    /// Cells below the title row and inside the side and bottom borders.
    pub fn content(&self) -> CellRect {
        CellRect {
            x: self.outer.x + 1,
            y: self.outer.y + 1,
            width: self.outer.width.saturating_sub(2),
            height: self.outer.height.saturating_sub(2),
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Draw the frame over whatever is below it and return the visible
    /// content area for the hosted app.
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &WindowFrame<'_>) -> Option<Rect>;

    /// Outline where a dragged window would land.
    fn render_snap_preview(&self, frame: &mut UiFrame<'_>, rect: CellRect);
}

#[derive(Debug, Default)]
pub struct ClassicDecorator;

impl WindowDecorator for ClassicDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &WindowFrame<'_>) -> Option<Rect> {
        let outer = window.outer;
        if outer.width == 0 || outer.height == 0 {
            return None;
        }
        let body = Style::default().bg(theme::decorator_body_bg());
        let border = Style::default()
            .fg(theme::decorator_border())
            .bg(theme::decorator_body_bg());
        let header_bg = match (window.focused, window.accent) {
            (true, Some(rgb)) => theme::rgb_to_color(rgb),
            (true, None) => theme::decorator_header_bg(),
            (false, _) => theme::decorator_inactive_header_bg(),
        };
        let mut header = Style::default()
            .bg(header_bg)
            .fg(theme::decorator_header_fg());
        if window.focused {
            header = header.add_modifier(Modifier::BOLD);
        }

        frame.fill(outer, " ", body);

        // Title row
        let title_row = CellRect {
            height: 1,
            ..outer
        };
        frame.fill(title_row, " ", header);
        let title_room = window
            .buttons
            .iter()
            .map(|(_, r)| r.x)
            .min()
            .unwrap_or(outer.right())
            - outer.x
            - 1;
        if title_room > 0 {
            let title: String = window.title.chars().take(title_room as usize).collect();
            frame.put_str(outer.x + 1, outer.y, &title, header);
        }
        for (button, rect) in &window.buttons {
            let (glyph, style) = match button {
                CaptionButton::Minimize => ("_", header),
                CaptionButton::Maximize => ("□", header),
                CaptionButton::Close => ("×", header.bg(theme::decorator_close_bg())),
            };
            let row = CellRect { height: 1, ..*rect };
            frame.fill(row, " ", style);
            frame.put_str(rect.x + rect.width as i32 / 2, outer.y, glyph, style);
        }

        // Sides and bottom
        if outer.height > 1 {
            let last = outer.bottom() - 1;
            for y in (outer.y + 1)..last {
                frame.put_str(outer.x, y, "│", border);
                frame.put_str(outer.right() - 1, y, "│", border);
            }
            let inner: String = "─".repeat(outer.width.saturating_sub(2) as usize);
            frame.put_str(outer.x, last, &format!("└{inner}┘"), border);
            if let Some(grip) = window.grip {
                frame.put_str(grip.right() - 1, grip.bottom() - 1, "◢", border);
            }
        }

        window.content().visible_in(frame.area())
    }

    fn render_snap_preview(&self, frame: &mut UiFrame<'_>, rect: CellRect) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let style = Style::default().fg(theme::snap_preview());
        let inner = rect.width.saturating_sub(2) as usize;
        frame.put_str(rect.x, rect.y, &format!("┏{}┓", "━".repeat(inner)), style);
        for y in (rect.y + 1)..(rect.bottom() - 1) {
            frame.put_str(rect.x, y, "┃", style);
            frame.put_str(rect.right() - 1, y, "┃", style);
        }
        frame.put_str(rect.x, rect.bottom() - 1, &format!("┗{}┛", "━".repeat(inner)), style);
    }
}
