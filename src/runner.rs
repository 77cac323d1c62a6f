use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::drivers::{InputDriver, OutputDriver};
use crate::error::DesktopError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::{Action, KeyBindings};
use crate::panel::Taskbar;
use crate::theme;
use crate::ui::{CellMetrics, CellRect, UiFrame};
use crate::window::decorator::{ClassicDecorator, WindowDecorator, WindowFrame};
use crate::window::{
    DesktopEvent, PointerEvent, WindowDescriptor, WindowId, WindowInstance, WindowManager,
};

/// Content hosted inside managed windows.
pub trait DesktopApp {
    /// Descriptor for a window the user asked for, or `None` to refuse.
    fn new_window(&mut self) -> Option<WindowDescriptor>;

    /// Draw the body of `id` into `area` (already clipped to the screen).
    fn render_content(&mut self, frame: &mut UiFrame<'_>, id: WindowId, area: Rect, focused: bool);

    fn on_event(&mut self, _event: &DesktopEvent) {}

    /// Right-aligned taskbar text. Defaults to key hints.
    fn status(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub metrics: CellMetrics,
    /// Rows above the work area kept free of windows.
    pub top_rows: u16,
    /// Rows below the work area; the taskbar takes the last of them.
    pub bottom_rows: u16,
    pub poll_interval: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            metrics: CellMetrics::default(),
            top_rows: 0,
            bottom_rows: 1,
            poll_interval: Duration::from_millis(16),
        }
    }
}

/// Terminal front-end around a [`WindowManager`]: maps mouse cells to
/// desktop pixels, applies key bindings and draws windows bottom to top.
pub struct Desktop<A, G = StdRng> {
    wm: WindowManager<G>,
    app: A,
    taskbar: Taskbar,
    decorator: Box<dyn WindowDecorator>,
    bindings: KeyBindings,
    options: RunOptions,
    area: Rect,
}

impl<A: DesktopApp, G: Rng> Desktop<A, G> {
    pub fn new(wm: WindowManager<G>, app: A, options: RunOptions) -> Self {
        Self {
            wm,
            app,
            taskbar: Taskbar::new(),
            decorator: Box::new(ClassicDecorator),
            bindings: KeyBindings::default(),
            options,
            area: Rect::default(),
        }
    }

    pub fn with_decorator(mut self, decorator: Box<dyn WindowDecorator>) -> Self {
        self.decorator = decorator;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn wm(&self) -> &WindowManager<G> {
        &self.wm
    }

    pub fn wm_mut(&mut self) -> &mut WindowManager<G> {
        &mut self.wm
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn open_window(&mut self, descriptor: WindowDescriptor) -> WindowId {
        let id = self.wm.open(descriptor);
        self.forward_events();
        id
    }

    /// Ask the app for a window and open it.
    pub fn request_window(&mut self) -> Option<WindowId> {
        let descriptor = self.app.new_window()?;
        Some(self.open_window(descriptor))
    }

    /// Terminal size changed: resize the desktop and move the taskbar.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        let bottom = self.options.bottom_rows.min(area.height);
        let viewport = self
            .options
            .metrics
            .viewport_for(area, self.options.top_rows, bottom);
        self.wm.set_viewport(viewport);
        let taskbar = if bottom > 0 {
            Rect {
                x: area.x,
                y: area.bottom() - 1,
                width: area.width,
                height: 1,
            }
        } else {
            Rect::default()
        };
        self.taskbar.set_area(taskbar);
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        let flow = match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, now);
                ControlFlow::Continue
            }
            Event::Resize(width, height) => {
                self.set_area(Rect::new(0, 0, *width, *height));
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.forward_events();
        flow
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> ControlFlow {
        let Some(action) = self.bindings.action_for_key(key) else {
            return ControlFlow::Continue;
        };
        tracing::debug!(%action, "key action");
        let focused = self.wm.focused();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::NewWindow => {
                self.request_window();
            }
            Action::CloseWindow => {
                if let Some(id) = focused {
                    self.wm.close(id);
                }
            }
            Action::MinimizeWindow => {
                if let Some(id) = focused {
                    self.wm.begin_minimize(id, now);
                }
            }
            Action::ToggleMaximize => {
                if let Some(id) = focused {
                    self.wm.toggle_maximize(id);
                }
            }
            Action::AbortInteraction => {
                self.wm.abort_interaction();
            }
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
            && self.taskbar.contains(mouse.column, mouse.row)
        {
            // The release of a live drag may never have arrived.
            self.wm.cancel_interaction();
            if let Some(id) = self.taskbar.hit_test(mouse.column, mouse.row) {
                self.wm.activate(id);
            }
            return;
        }
        if let Some(event) = pointer_event(self.options.metrics, mouse, now) {
            self.wm.handle_pointer(event);
        }
    }

    /// Move focus along the open-order list of visible windows.
    fn cycle_focus(&mut self, forward: bool) {
        let mut visible: Vec<WindowId> = self
            .wm
            .draw_order()
            .into_iter()
            .map(WindowInstance::id)
            .collect();
        if visible.is_empty() {
            return;
        }
        visible.sort();
        let next = match self
            .wm
            .focused()
            .and_then(|id| visible.iter().position(|w| *w == id))
        {
            Some(pos) if forward => visible[(pos + 1) % visible.len()],
            Some(pos) => visible[(pos + visible.len() - 1) % visible.len()],
            None => visible[0],
        };
        self.wm.focus(next);
    }

    pub fn tick(&mut self, now: Instant) {
        self.wm.tick(now);
        self.forward_events();
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area != self.area {
            self.set_area(area);
        }
        frame.fill(
            CellRect {
                x: area.x as i32,
                y: area.y as i32,
                width: area.width,
                height: area.height,
            },
            " ",
            Style::default().bg(theme::desktop_bg()),
        );

        let metrics = self.options.metrics;
        let chrome = self.wm.config().chrome;
        let focused = self.wm.focused();
        for window in self.wm.draw_order() {
            let is_focused = focused == Some(window.id());
            let wf = WindowFrame::build(window, is_focused, metrics, &chrome);
            if let Some(content) = self.decorator.render_window(frame, &wf) {
                self.app.render_content(frame, window.id(), content, is_focused);
            }
        }

        if let Some(owner) = self.wm.pointer_owner()
            && let Some(zone) = self.wm.window(owner).and_then(WindowInstance::snap_preview)
        {
            let rect = metrics.to_cells(zone.geometry(self.wm.viewport()));
            self.decorator.render_snap_preview(frame, rect);
        }

        let status = self.app.status().unwrap_or_else(|| {
            self.bindings.hint(&[
                Action::NewWindow,
                Action::CloseWindow,
                Action::MinimizeWindow,
                Action::ToggleMaximize,
                Action::Quit,
            ])
        });
        let windows = self.wm.windows();
        self.taskbar
            .render(frame, &windows, focused, Some(status.as_str()));
    }

    fn forward_events(&mut self) {
        for event in self.wm.take_events() {
            tracing::trace!(?event, "desktop event");
            self.app.on_event(&event);
        }
    }
}

/// Translate a terminal mouse event into the pixel pointer stream. Only the
/// left button drives windows.
pub fn pointer_event(metrics: CellMetrics, mouse: &MouseEvent, now: Instant) -> Option<PointerEvent> {
    let position = metrics.cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::down(position, now)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::moved(position, now))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::up(position, now)),
        _ => None,
    }
}

/// Drive `desktop` on a real terminal until the user quits.
pub fn run_desktop<O, D, A, G>(
    output: &mut O,
    driver: D,
    desktop: &mut Desktop<A, G>,
) -> Result<(), DesktopError>
where
    O: OutputDriver,
    D: InputDriver,
    A: DesktopApp,
    G: Rng,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(driver, desktop.options().poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| match event {
        Some(evt) => Ok(desktop.handle_event(&evt, Instant::now())),
        None => {
            desktop.tick(Instant::now());
            output.draw(|mut frame| desktop.render(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
    });

    if let Err(err) = event_loop.driver().set_mouse_capture(false) {
        tracing::warn!(%err, "failed to release mouse capture");
    }
    output.exit()?;
    result.map_err(DesktopError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesktopConfig;
    use crate::layout::{Point, SnapZone, Viewport};
    use crate::window::WindowState;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;

    #[derive(Debug, Default)]
    struct Probe {
        opened: usize,
        events: Vec<DesktopEvent>,
    }

    impl DesktopApp for Probe {
        fn new_window(&mut self) -> Option<WindowDescriptor> {
            self.opened += 1;
            Some(WindowDescriptor::new(format!("Probe {}", self.opened)))
        }

        fn render_content(&mut self, frame: &mut UiFrame<'_>, _id: WindowId, area: Rect, _focused: bool) {
            frame.put_str(area.x as i32, area.y as i32, "hello", Style::default());
        }

        fn on_event(&mut self, event: &DesktopEvent) {
            self.events.push(*event);
        }
    }

    const AREA: Rect = Rect::new(0, 0, 128, 40);

    fn desktop() -> Desktop<Probe> {
        let wm = WindowManager::seeded(Viewport::new(1, 1), DesktopConfig::default(), 11);
        let mut desktop = Desktop::new(wm, Probe::default(), RunOptions::default());
        desktop.set_area(AREA);
        desktop
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn draw(desktop: &mut Desktop<Probe>) -> Buffer {
        let mut buffer = Buffer::empty(AREA);
        let mut frame = UiFrame::from_parts(AREA, &mut buffer);
        desktop.render(&mut frame);
        buffer
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..AREA.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    /// A cell on the title row, clear of the caption buttons.
    fn title_cell(desktop: &Desktop<Probe>, id: WindowId) -> (u16, u16) {
        let g = desktop.wm().window(id).map(WindowInstance::geometry).unwrap_or_default();
        let cells = desktop.options().metrics.to_cells(g);
        ((cells.x + 2) as u16, cells.y as u16)
    }

    #[test]
    fn viewport_leaves_room_for_taskbar() {
        let desktop = desktop();
        let work = desktop.wm().viewport().work_area();
        assert_eq!(work.width(), 1280);
        assert_eq!(work.height(), 39 * 24);
    }

    #[test]
    fn n_opens_and_q_quits() {
        let mut desktop = desktop();
        let now = Instant::now();
        assert_eq!(desktop.handle_event(&key(KeyCode::Char('n')), now), ControlFlow::Continue);
        assert_eq!(desktop.wm().len(), 1);
        let id = desktop.wm().focused().unwrap();
        assert_eq!(
            desktop.app().events,
            vec![DesktopEvent::Opened(id), DesktopEvent::Focused(id)]
        );
        assert_eq!(desktop.handle_event(&key(KeyCode::Char('q')), now), ControlFlow::Quit);
    }

    #[test]
    fn dragging_title_to_left_edge_snaps() {
        let mut desktop = desktop();
        let id = desktop.request_window().unwrap();
        let (col, row) = title_cell(&desktop, id);
        let now = Instant::now();
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, row), now);
        assert_eq!(desktop.wm().pointer_owner(), Some(id));
        desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 15), now);
        assert_eq!(
            desktop.wm().window(id).and_then(WindowInstance::snap_preview),
            Some(SnapZone::Left)
        );
        desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 15), now);
        assert_eq!(desktop.wm().state(id), Some(WindowState::Snapped(SnapZone::Left)));
        assert_eq!(desktop.wm().pointer_owner(), None);
        assert!(desktop.app().events.contains(&DesktopEvent::Snapped(id, SnapZone::Left)));
    }

    #[test]
    fn escape_reverts_a_drag() {
        let mut desktop = desktop();
        let id = desktop.request_window().unwrap();
        let before = desktop.wm().window(id).map(WindowInstance::geometry);
        let (col, row) = title_cell(&desktop, id);
        let now = Instant::now();
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, row), now);
        desktop.handle_event(
            &mouse(MouseEventKind::Drag(MouseButton::Left), col + 5, row + 3),
            now,
        );
        assert_ne!(desktop.wm().window(id).map(WindowInstance::geometry), before);
        desktop.handle_event(&key(KeyCode::Esc), now);
        assert_eq!(desktop.wm().window(id).map(WindowInstance::geometry), before);
        assert_eq!(desktop.wm().pointer_owner(), None);
    }

    #[test]
    fn taskbar_click_restores_minimized_window() {
        let mut desktop = desktop();
        let id = desktop.request_window().unwrap();
        desktop.wm_mut().minimize(id);
        let buffer = draw(&mut desktop);
        let bar = row(&buffer, 39);
        let col = bar.chars().position(|c| c == '(').unwrap() as u16;
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, 39), Instant::now());
        assert_eq!(desktop.wm().state(id), Some(WindowState::Normal));
        assert_eq!(desktop.wm().focused(), Some(id));
    }

    #[test]
    fn taskbar_press_ends_a_stale_drag() {
        let mut desktop = desktop();
        let id = desktop.request_window().unwrap();
        let (col, row) = title_cell(&desktop, id);
        let now = Instant::now();
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, row), now);
        desktop.handle_event(
            &mouse(MouseEventKind::Drag(MouseButton::Left), col + 4, row + 2),
            now,
        );
        // No release: the next press lands on the taskbar.
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 100, 39), now);
        assert_eq!(desktop.wm().pointer_owner(), None);
        let dropped = desktop.wm().window(id).map(WindowInstance::geometry);
        desktop.handle_event(&mouse(MouseEventKind::Moved, col + 20, row + 10), now);
        assert_eq!(desktop.wm().window(id).map(WindowInstance::geometry), dropped);
    }

    #[test]
    fn render_draws_frame_content_and_taskbar() {
        let mut desktop = desktop();
        let id = desktop.request_window().unwrap();
        let buffer = draw(&mut desktop);
        let (_, title_row) = title_cell(&desktop, id);
        assert!(row(&buffer, title_row).contains("Probe 1"));
        assert!(row(&buffer, title_row + 1).contains("hello"));
        assert!(row(&buffer, 39).contains("deskwm"));
    }

    #[test]
    fn tab_cycles_focus_in_open_order() {
        let mut desktop = desktop();
        let a = desktop.request_window().unwrap();
        let b = desktop.request_window().unwrap();
        let now = Instant::now();
        assert_eq!(desktop.wm().focused(), Some(b));
        desktop.handle_event(&key(KeyCode::Tab), now);
        assert_eq!(desktop.wm().focused(), Some(a));
        desktop.handle_event(&key(KeyCode::Tab), now);
        assert_eq!(desktop.wm().focused(), Some(b));
    }

    #[test]
    fn keyboard_close_and_maximize_act_on_focus() {
        let mut desktop = desktop();
        let a = desktop.request_window().unwrap();
        let b = desktop.request_window().unwrap();
        let now = Instant::now();
        desktop.handle_event(&key(KeyCode::Char('x')), now);
        assert_eq!(desktop.wm().state(b), Some(WindowState::Maximized));
        desktop.handle_event(&key(KeyCode::Char('w')), now);
        assert!(desktop.wm().window(b).is_none());
        assert_eq!(desktop.wm().focused(), Some(a));
    }

    #[test]
    fn resize_event_updates_viewport() {
        let mut desktop = desktop();
        desktop.handle_event(&Event::Resize(100, 30), Instant::now());
        let expected = CellMetrics::default().viewport_for(Rect::new(0, 0, 100, 30), 0, 1);
        assert_eq!(desktop.wm().viewport(), expected);
        assert_eq!(desktop.area(), Rect::new(0, 0, 100, 30));
    }

    #[test]
    fn only_left_button_produces_pointer_events() {
        let metrics = CellMetrics::new(10, 20);
        let now = Instant::now();
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        let event = pointer_event(metrics, &down, now).unwrap();
        assert_eq!(event.position, Point::new(35, 50));
        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..down
        };
        assert!(pointer_event(metrics, &right, now).is_none());
    }
}
