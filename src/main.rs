use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::Level;

use term_desk::constants::{
    CASCADE_ORIGIN, CASCADE_SLOTS, CASCADE_STEP, DEFAULT_WINDOW_SIZE, DOUBLE_CLICK_INTERVAL,
    TASKBAR_HEIGHT,
};
use term_desk::drivers::console::ConsoleDriver;
use term_desk::keybindings::KeyBindings;
use term_desk::ui::UiFrame;
use term_desk::{
    ContentRenderer, DeskConfig, DeskError, Desktop, DesktopApp, OpenOptions, Size, WindowData,
    WindowRegistry, WindowState, run_desktop, tracing_sub,
};

const AFTER_HELP: &str = indoc! {"
    Windows:
      F1  Clients      F2  Report      F3  Email      F4  Notes
      Pressing a window's key again brings the existing window forward.

    Mouse:
      drag the title bar to move, drag a border to resize,
      double-click the title to maximize, click a taskbar entry to restore.
"};

#[derive(Parser, Debug)]
#[command(name = "term-desk", version, about = "A floating window desktop in the terminal.")]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Append debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Rows reserved for the taskbar
    #[arg(long, default_value_t = TASKBAR_HEIGHT)]
    taskbar_height: u16,

    /// Cascade positions before new windows wrap to the first one
    #[arg(long, default_value_t = CASCADE_SLOTS)]
    cascade_slots: usize,

    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE.width)]
    default_width: u16,

    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE.height)]
    default_height: u16,

    /// Input poll interval in milliseconds
    #[arg(long, default_value_t = 16)]
    poll_ms: u64,

    /// Longest gap between title-bar clicks that still counts as a double-click
    #[arg(long, default_value_t = DOUBLE_CLICK_INTERVAL.as_millis() as u64)]
    double_click_ms: u64,

    /// Include gesture traces in the log
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn desk_config(&self) -> DeskConfig {
        DeskConfig::default()
            .with_taskbar_height(self.taskbar_height)
            .with_cascade(CASCADE_ORIGIN, CASCADE_STEP, self.cascade_slots)
            .with_default_size(Size::new(self.default_width, self.default_height))
            .with_double_click(Duration::from_millis(self.double_click_ms))
    }
}

fn main() -> Result<(), DeskError> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::TRACE
    } else {
        Level::DEBUG
    };
    tracing_sub::init(cli.log_file.as_deref(), level)?;

    let mut desktop: Desktop<String, DemoContent> = Desktop::new(cli.desk_config(), || {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Rect::new(0, 0, width, height)
    })?;
    let mut app = DemoApp::new(desktop.keybindings());
    app.open_preset(desktop.registry_mut(), Preset::Notes);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleDriver::new();

    let result = run_desktop(
        &mut terminal,
        &mut driver,
        &mut desktop,
        &mut app,
        Duration::from_millis(cli.poll_ms),
    );

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, Clone, Default)]
struct DemoContent {
    lines: Vec<String>,
}

impl DemoContent {
    fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Preset {
    Clients,
    Report,
    Email,
    Notes,
}

impl Preset {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::F(1) => Some(Preset::Clients),
            KeyCode::F(2) => Some(Preset::Report),
            KeyCode::F(3) => Some(Preset::Email),
            KeyCode::F(4) => Some(Preset::Notes),
            _ => None,
        }
    }

    fn id(self) -> &'static str {
        match self {
            Preset::Clients => "clients",
            Preset::Report => "report",
            Preset::Email => "email",
            Preset::Notes => "notes",
        }
    }
}

struct DemoApp {
    help: Vec<String>,
    scratch_count: usize,
}

impl DemoApp {
    fn new(keybindings: &KeyBindings) -> Self {
        let help = keybindings
            .help_entries()
            .into_iter()
            .map(|(action, keys)| format!("{:<10} {}", keys.join(" / "), action))
            .collect();
        Self {
            help,
            scratch_count: 0,
        }
    }

    fn open_preset(&self, registry: &mut WindowRegistry<String, DemoContent>, preset: Preset) {
        let options = match preset {
            Preset::Clients => OpenOptions::new(
                preset.id().to_string(),
                "Clients",
                DemoContent::new(["Acme Corp", "Globex", "Initech", "Umbrella"]),
            )
            .icon("▣"),
            Preset::Report => OpenOptions::new(
                preset.id().to_string(),
                "Quarterly report",
                DemoContent::new(["Revenue   +12%", "Churn      -3%", "Tickets   1,204"]),
            )
            .icon("▤")
            .size(Size::new(36, 8)),
            Preset::Email => OpenOptions::new(
                preset.id().to_string(),
                "Email",
                DemoContent::new(["(no new messages)"]),
            )
            .icon("▥")
            .min_size(Size::new(24, 5)),
            Preset::Notes => OpenOptions::new(
                preset.id().to_string(),
                "Notes",
                DemoContent::new(self.help.iter().cloned()),
            )
            .icon("▦")
            .size(Size::new(52, self.help.len() as u16 + 4)),
        };
        registry.open(options);
    }
}

impl ContentRenderer<String, DemoContent> for DemoApp {
    fn render_content(
        &mut self,
        frame: &mut UiFrame<'_>,
        window: &WindowState<String, DemoContent>,
        focused: bool,
    ) {
        let area = frame.area();
        let style = if focused {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let mut lines: Vec<Line> = window
            .content()
            .lines
            .iter()
            .map(|line| Line::raw(line.as_str()))
            .collect();
        if let Some(edits) = window.data().get("edits") {
            lines.push(Line::raw(format!("edits: {edits}")));
        }
        let body = Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: false });
        frame.render_widget(body, area);
    }
}

impl DesktopApp<String, DemoContent> for DemoApp {
    fn new_window(&mut self, registry: &mut WindowRegistry<String, DemoContent>) {
        self.scratch_count += 1;
        let id = format!("scratch-{}", self.scratch_count);
        let title = format!("Scratch {}", self.scratch_count);
        registry.open(OpenOptions::new(id, title, DemoContent::new([""])).icon("□"));
    }

    fn handle_key(
        &mut self,
        registry: &mut WindowRegistry<String, DemoContent>,
        active: Option<&String>,
        key: KeyEvent,
    ) -> bool {
        if let Some(preset) = Preset::from_key(key.code) {
            self.open_preset(registry, preset);
            return true;
        }
        let Some(id) = active else {
            return false;
        };
        let Some(window) = registry.get_window(id) else {
            return false;
        };
        let mut content = window.content().clone();
        let edits = window
            .data()
            .get("edits")
            .and_then(|value| value.as_u64())
            .unwrap_or(0);
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match content.lines.last_mut() {
                    Some(line) => line.push(c),
                    None => content.lines.push(c.to_string()),
                }
            }
            KeyCode::Enter => content.lines.push(String::new()),
            KeyCode::Backspace => {
                if let Some(line) = content.lines.last_mut()
                    && line.pop().is_none()
                    && content.lines.len() > 1
                {
                    content.lines.pop();
                }
            }
            _ => return false,
        }
        registry.set_content(id, content);
        let mut partial = WindowData::new();
        partial.insert("edits".into(), serde_json::json!(edits + 1));
        registry.update_data(id, partial);
        true
    }

    fn handle_mouse(
        &mut self,
        registry: &mut WindowRegistry<String, DemoContent>,
        id: &String,
        mouse: MouseEvent,
        content: Rect,
    ) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return false;
        }
        let mut partial = WindowData::new();
        partial.insert(
            "last_click".into(),
            serde_json::json!({
                "column": mouse.column.saturating_sub(content.x),
                "row": mouse.row.saturating_sub(content.y),
            }),
        );
        registry.update_data(id, partial);
        false
    }
}
