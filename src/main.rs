use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use deskwm::config::DesktopConfig;
use deskwm::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use deskwm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use deskwm::error::{ConfigError, DesktopError};
use deskwm::layout::Viewport;
use deskwm::runner::{Desktop, DesktopApp, RunOptions, run_desktop};
use deskwm::theme;
use deskwm::tracing_sub;
use deskwm::ui::{CellMetrics, UiFrame};
use deskwm::window::{DesktopEvent, Rgb, WindowDescriptor, WindowId, WindowManager};

const WELCOME: &str = indoc! {"
    Drag a title bar to move a window.
    Drop it on the left or right edge to fill half the screen,
    on a corner for a quarter, or on the top edge to maximize.

    Drag a snapped window away to get its old size back.
    Double-click a title bar to maximize or restore.
    Drag the ◢ grip to resize.

    Shake a window by its title bar to minimize the others;
    shake it again to bring them back.
"};

const NOTES: &str = indoc! {"
    Keys
      n      open a window
      w      close the focused window
      m      minimize the focused window
      x      maximize or restore
      Tab    focus the next window
      Esc    cancel a drag or resize
      q      quit

    Click a taskbar entry to restore a minimized window.
"};

const LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoKind {
    Welcome,
    EventLog,
    Notes,
}

impl DemoKind {
    const CATALOG: [DemoKind; 3] = [DemoKind::Welcome, DemoKind::EventLog, DemoKind::Notes];

    fn title(self) -> &'static str {
        match self {
            DemoKind::Welcome => "Welcome",
            DemoKind::EventLog => "Event Log",
            DemoKind::Notes => "Notes",
        }
    }

    fn accent(self) -> Rgb {
        match self {
            DemoKind::Welcome => theme::ACCENT_RGB,
            DemoKind::EventLog => Rgb(40, 120, 90),
            DemoKind::Notes => Rgb(110, 80, 160),
        }
    }
}

/// Small set of built-in windows that show off the desktop.
#[derive(Debug, Default)]
struct DemoApp {
    opened: usize,
    pending: VecDeque<DemoKind>,
    kinds: BTreeMap<WindowId, DemoKind>,
    log: VecDeque<String>,
}

impl DemoApp {
    fn record(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

impl DesktopApp for DemoApp {
    fn new_window(&mut self) -> Option<WindowDescriptor> {
        let kind = DemoKind::CATALOG[self.opened % DemoKind::CATALOG.len()];
        self.opened += 1;
        self.pending.push_back(kind);
        Some(WindowDescriptor::new(kind.title()).with_accent(kind.accent()))
    }

    fn render_content(&mut self, frame: &mut UiFrame<'_>, id: WindowId, area: Rect, focused: bool) {
        let mut style = Style::default()
            .bg(theme::decorator_body_bg())
            .fg(theme::panel_fg());
        if !focused {
            style = style.add_modifier(Modifier::DIM);
        }
        let paragraph = match self.kinds.get(&id) {
            Some(DemoKind::Welcome) => Paragraph::new(WELCOME),
            Some(DemoKind::Notes) => Paragraph::new(NOTES),
            Some(DemoKind::EventLog) => {
                // Newest last, trimmed to what fits.
                let rows = area.height as usize;
                let skip = self.log.len().saturating_sub(rows);
                let lines: Vec<Line> = self
                    .log
                    .iter()
                    .skip(skip)
                    .map(|l| Line::from(l.as_str()))
                    .collect();
                Paragraph::new(lines)
            }
            None => Paragraph::new(""),
        };
        frame.render_widget(paragraph.style(style).wrap(Wrap { trim: false }), area);
    }

    fn on_event(&mut self, event: &DesktopEvent) {
        match *event {
            DesktopEvent::Opened(id) => {
                if let Some(kind) = self.pending.pop_front() {
                    self.kinds.insert(id, kind);
                }
                self.record(format!("{id} opened"));
            }
            DesktopEvent::Closed(id) => {
                self.kinds.remove(&id);
                self.record(format!("{id} closed"));
            }
            DesktopEvent::Focused(id) => self.record(format!("{id} focused")),
            DesktopEvent::Minimized(id) => self.record(format!("{id} minimized")),
            DesktopEvent::Restored(id) => self.record(format!("{id} restored")),
            DesktopEvent::Snapped(id, zone) => self.record(format!("{id} snapped {zone}")),
            DesktopEvent::Shaken(id) => self.record(format!("{id} shaken")),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "deskwm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating windows in the terminal: drag, resize, snap and shake"
)]
struct Cli {
    /// Pixel width of one terminal cell.
    #[arg(long, value_name = "PX", default_value_t = CELL_WIDTH_PX)]
    cell_width: i32,

    /// Pixel height of one terminal cell. Title bars are one row at the default.
    #[arg(long, value_name = "PX", default_value_t = CELL_HEIGHT_PX)]
    cell_height: i32,

    /// Rows reserved above the desktop that windows never snap over.
    #[arg(long, value_name = "ROWS", default_value_t = 0)]
    top_rows: u16,

    /// Windows opened at startup.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 3)]
    windows: usize,

    /// Seed for window placement, for reproducible layouts.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Append debug logs to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Shaking a window no longer minimizes the others.
    #[arg(long)]
    no_shake_minimize: bool,
}

struct Launch {
    config: DesktopConfig,
    options: RunOptions,
}

impl TryFrom<&Cli> for Launch {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if cli.cell_width <= 0 || cli.cell_height <= 0 {
            return Err(ConfigError::CellMetrics {
                width: cli.cell_width,
                height: cli.cell_height,
            });
        }
        let config = DesktopConfig {
            shake_minimizes_others: !cli.no_shake_minimize,
            ..DesktopConfig::default()
        };
        config.validate()?;
        let options = RunOptions {
            metrics: CellMetrics::new(cli.cell_width, cli.cell_height),
            top_rows: cli.top_rows,
            ..RunOptions::default()
        };
        Ok(Self { config, options })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    run(&cli).map_err(io::Error::other)
}

fn run(cli: &Cli) -> Result<(), DesktopError> {
    let launch = Launch::try_from(cli)?;
    tracing_sub::init_default(cli.log_file.as_deref())?;
    tracing::info!(
        windows = cli.windows,
        seed = ?cli.seed,
        cell_width = cli.cell_width,
        cell_height = cli.cell_height,
        "starting desktop"
    );

    let viewport = Viewport::default();
    let wm = match cli.seed {
        Some(seed) => WindowManager::seeded(viewport, launch.config, seed),
        None => WindowManager::new(viewport, launch.config),
    };
    let mut desktop = Desktop::new(wm, DemoApp::default(), launch.options);

    // Size the desktop before opening windows so they land on screen.
    let (columns, rows) = crossterm::terminal::size()?;
    desktop.set_area(Rect::new(0, 0, columns, rows));
    for _ in 0..cli.windows {
        desktop.request_window();
    }

    let mut output = ConsoleOutputDriver::new()?;
    let result = run_desktop(&mut output, ConsoleInputDriver::new(), &mut desktop);
    tracing::info!(open = desktop.wm().len(), "desktop closed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("deskwm").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_produce_valid_launch() {
        let launch = Launch::try_from(&cli(&[])).unwrap();
        assert!(launch.config.shake_minimizes_others);
        assert_eq!(launch.options.metrics, CellMetrics::default());
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let err = Launch::try_from(&cli(&["--cell-width", "0"])).err();
        assert_eq!(err, Some(ConfigError::CellMetrics { width: 0, height: CELL_HEIGHT_PX }));
    }

    #[test]
    fn invalid_cell_size_fails_before_touching_the_terminal() {
        let err = run(&cli(&["--cell-height", "0"])).err();
        assert!(matches!(
            err,
            Some(DesktopError::Config(ConfigError::CellMetrics { height: 0, .. }))
        ));
    }

    #[test]
    fn demo_app_tracks_window_kinds() {
        let mut app = DemoApp::default();
        let first = app.new_window().unwrap();
        assert_eq!(first.title, "Welcome");
        app.on_event(&DesktopEvent::Opened(WindowId(1)));
        assert_eq!(app.kinds.get(&WindowId(1)), Some(&DemoKind::Welcome));
        app.on_event(&DesktopEvent::Closed(WindowId(1)));
        assert!(app.kinds.is_empty());
        assert_eq!(app.log.back().map(String::as_str), Some("#1 closed"));
    }
}
