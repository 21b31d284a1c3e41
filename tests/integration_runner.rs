use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use term_desk::drivers::scripted::ScriptedDriver;
use term_desk::ui::UiFrame;
use term_desk::{
    ContentRenderer, DeskConfig, Desktop, DesktopApp, OpenOptions, Point, Size, WindowState,
    run_desktop,
};

const CANVAS: Rect = Rect {
    x: 0,
    y: 0,
    width: 60,
    height: 20,
};

/// Fills each content area with the window's char and quits after a fixed
/// number of ticks.
struct Solid {
    ticks: usize,
    quit_after: usize,
}

impl Solid {
    fn new(quit_after: usize) -> Self {
        Self {
            ticks: 0,
            quit_after,
        }
    }
}

impl ContentRenderer<u8, char> for Solid {
    fn render_content(
        &mut self,
        frame: &mut UiFrame<'_>,
        window: &WindowState<u8, char>,
        _focused: bool,
    ) {
        let area = frame.area();
        let symbol = window.content().to_string();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                frame.set_symbol(x, y, &symbol, Style::default());
            }
        }
    }
}

impl DesktopApp<u8, char> for Solid {
    fn should_quit(&mut self, _registry: &term_desk::WindowRegistry<u8, char>) -> bool {
        self.ticks += 1;
        self.ticks > self.quit_after
    }
}

fn desktop() -> Desktop<u8, char> {
    let mut desktop = Desktop::new(DeskConfig::default(), || CANVAS).unwrap();
    desktop.registry_mut().open(
        OpenOptions::new(1, "one", 'a')
            .position(Point::new(2, 1))
            .size(Size::new(20, 6)),
    );
    desktop
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn title_drag() -> Vec<Event> {
    vec![
        mouse(MouseEventKind::Down(MouseButton::Left), 5, 2),
        mouse(MouseEventKind::Drag(MouseButton::Left), 15, 7),
        mouse(MouseEventKind::Up(MouseButton::Left), 25, 10),
    ]
}

#[test]
fn drag_then_quit_key_commits_position() {
    let mut desktop = desktop();
    let mut app = Solid::new(usize::MAX);
    let mut terminal = Terminal::new(TestBackend::new(CANVAS.width, CANVAS.height)).unwrap();
    let mut events = title_drag();
    events.push(Event::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::CONTROL,
    )));
    let mut driver = ScriptedDriver::new(events);

    run_desktop(
        &mut terminal,
        &mut driver,
        &mut desktop,
        &mut app,
        Duration::ZERO,
    )
    .unwrap();

    assert_eq!(
        desktop.registry().get_window(&1).unwrap().position(),
        Point::new(22, 9)
    );
    assert_eq!(driver.remaining(), 0);
    assert_eq!(driver.mouse_capture(), Some(false));
}

#[test]
fn redraw_after_drag_shows_window_at_new_place() {
    let mut desktop = desktop();
    // tick one draws the start state, tick two draws after the drag
    let mut app = Solid::new(2);
    let mut terminal = Terminal::new(TestBackend::new(CANVAS.width, CANVAS.height)).unwrap();
    let mut driver = ScriptedDriver::new(title_drag());

    run_desktop(
        &mut terminal,
        &mut driver,
        &mut desktop,
        &mut app,
        Duration::ZERO,
    )
    .unwrap();

    let buffer = terminal.backend().buffer();
    // content origin is one cell in and two rows down from the frame origin
    assert_eq!(buffer.cell((23, 11)).unwrap().symbol(), "a");
    assert_ne!(buffer.cell((3, 3)).unwrap().symbol(), "a");
    assert!(!desktop.input().is_dragging());
}

#[test]
fn taskbar_click_restores_minimized_window() {
    let mut desktop = desktop();
    desktop.registry_mut().minimize(&1);
    let mut app = Solid::new(usize::MAX);
    let mut terminal = Terminal::new(TestBackend::new(CANVAS.width, CANVAS.height)).unwrap();
    // first taskbar entry starts one cell in on the bottom row
    let mut driver = ScriptedDriver::new([
        mouse(MouseEventKind::Down(MouseButton::Left), 2, CANVAS.height - 1),
        Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
    ]);

    run_desktop(
        &mut terminal,
        &mut driver,
        &mut desktop,
        &mut app,
        Duration::ZERO,
    )
    .unwrap();

    let window = desktop.registry().get_window(&1).unwrap();
    assert!(!window.is_minimized());
    assert_eq!(desktop.registry().active_id(), Some(&1));
}
