use std::cell::Cell;
use std::fmt;
use std::hash::Hash;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, MouseEvent};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::actions::Action;
use crate::config::DeskConfig;
use crate::drivers::InputDriver;
use crate::error::DeskError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::frame::{FrameInput, WindowFrame};
use crate::keybindings::KeyBindings;
use crate::manager::{Dispatch, Manager};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::{DefaultDecorator, WindowDecorator};
use crate::window::{WindowRegistry, WindowState};

/// Paints what a window shows. The frame handed in is already clipped to
/// the window's visible content area.
pub trait ContentRenderer<Id, C> {
    fn render_content(
        &mut self,
        frame: &mut UiFrame<'_>,
        window: &WindowState<Id, C>,
        focused: bool,
    );
}

/// Application hooks around a running desktop.
pub trait DesktopApp<Id, C>: ContentRenderer<Id, C> {
    /// Bound to [`Action::NewWindow`].
    fn new_window(&mut self, _registry: &mut WindowRegistry<Id, C>) {}

    /// Keys that are not window-manager shortcuts, along with the active
    /// window if there is one. Return true if the screen needs a redraw.
    fn handle_key(
        &mut self,
        _registry: &mut WindowRegistry<Id, C>,
        _active: Option<&Id>,
        _key: KeyEvent,
    ) -> bool {
        false
    }

    /// Pointer events that landed in a window's content area. `content` is
    /// that area in screen cells.
    fn handle_mouse(
        &mut self,
        _registry: &mut WindowRegistry<Id, C>,
        _id: &Id,
        _mouse: MouseEvent,
        _content: Rect,
    ) -> bool {
        false
    }

    /// Checked once per tick, before drawing.
    fn should_quit(&mut self, _registry: &WindowRegistry<Id, C>) -> bool {
        false
    }
}

/// Registry plus everything needed to put it on a terminal: pointer state,
/// chrome painter and key table.
pub struct Desktop<Id, C> {
    registry: WindowRegistry<Id, C>,
    input: FrameInput<Id>,
    decorator: Box<dyn WindowDecorator>,
    keybindings: KeyBindings,
    dirty: Rc<Cell<bool>>,
}

impl<Id, C> fmt::Debug for Desktop<Id, C>
where
    Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop")
            .field("registry", &self.registry)
            .field("input", &self.input)
            .field("decorator", &self.decorator)
            .field("dirty", &self.dirty.get())
            .finish_non_exhaustive()
    }
}

impl<Id, C> Desktop<Id, C>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    /// Validate `config` and build an empty desktop over `canvas`.
    pub fn new(
        config: DeskConfig,
        canvas: impl Fn() -> Rect + 'static,
    ) -> Result<Self, DeskError> {
        config.validate()?;
        Ok(Self::with_registry(WindowRegistry::new(config, canvas)))
    }

    pub fn with_registry(mut registry: WindowRegistry<Id, C>) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        registry.subscribe(move |_| flag.set(true));
        let double_click = registry.config().double_click;
        Self {
            registry,
            input: FrameInput::new(double_click),
            decorator: Box::new(DefaultDecorator),
            keybindings: KeyBindings::default(),
            dirty,
        }
    }

    pub fn with_decorator(mut self, decorator: Box<dyn WindowDecorator>) -> Self {
        self.decorator = decorator;
        self
    }

    pub fn with_keybindings(mut self, keybindings: KeyBindings) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn registry(&self) -> &WindowRegistry<Id, C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WindowRegistry<Id, C> {
        &mut self.registry
    }

    pub fn input(&self) -> &FrameInput<Id> {
        &self.input
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// True once after any change since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn handle_event<A>(&mut self, app: &mut A, event: &Event, now: Instant) -> ControlFlow
    where
        A: DesktopApp<Id, C>,
    {
        match event {
            Event::Key(key) => {
                if key.code == KeyCode::Esc && self.input.is_dragging() {
                    self.input.cancel();
                    self.mark_dirty();
                    return ControlFlow::Continue;
                }
                if let Some(action) = self.keybindings.action_for_key(key) {
                    let flow = self.apply_action(app, action);
                    self.discard_stale_gesture();
                    return flow;
                }
                let active = self.registry.active_id().cloned();
                if app.handle_key(&mut self.registry, active.as_ref(), *key) {
                    self.mark_dirty();
                }
                self.discard_stale_gesture();
            }
            Event::Mouse(mouse) => {
                match Manager::dispatch_mouse(&mut self.registry, &mut self.input, *mouse, now) {
                    Dispatch::Chrome(_) => self.mark_dirty(),
                    Dispatch::Content { id, .. } => {
                        let content = self.content_area(&id);
                        if app.handle_mouse(&mut self.registry, &id, *mouse, content) {
                            self.mark_dirty();
                        }
                    }
                    Dispatch::Taskbar(_) | Dispatch::Desktop => {}
                }
            }
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.registry.sync_canvas();
                self.mark_dirty();
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn apply_action<A>(&mut self, app: &mut A, action: Action) -> ControlFlow
    where
        A: DesktopApp<Id, C>,
    {
        tracing::debug!(%action, "key action");
        let active = self.registry.active_id().cloned();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::NewWindow => app.new_window(&mut self.registry),
            Action::CloseWindow => {
                if let Some(id) = active {
                    self.registry.close(&id);
                }
            }
            Action::MinimizeWindow => {
                if let Some(id) = active {
                    self.registry.minimize(&id);
                }
            }
            Action::MaximizeWindow => {
                if let Some(id) = active {
                    self.registry.maximize(&id);
                }
            }
            Action::RestoreWindow => {
                let last = self
                    .registry
                    .windows()
                    .filter(|window| window.is_minimized())
                    .last()
                    .map(|window| window.id().clone());
                if let Some(id) = last {
                    self.registry.restore(&id);
                }
            }
            Action::FocusNext => self.registry.cycle_focus(true),
            Action::FocusPrev => self.registry.cycle_focus(false),
        }
        ControlFlow::Continue
    }

    // a key can maximize or minimize the window being dragged
    fn discard_stale_gesture(&mut self) {
        if self.input.discard_stale(&self.registry) {
            self.mark_dirty();
        }
    }

    fn content_area(&self, id: &Id) -> Rect {
        self.registry
            .get_window(id)
            .map(|window| {
                WindowFrame::new(window)
                    .chrome()
                    .content
                    .visible_rect(self.registry.canvas())
            })
            .unwrap_or_default()
    }

    /// Paint the desktop background, every visible frame bottom to top, and
    /// the taskbar over everything.
    pub fn render<A>(&self, frame: &mut UiFrame<'_>, app: &mut A)
    where
        A: ContentRenderer<Id, C>,
    {
        let projection = Manager::project(&self.registry);
        frame.fill(frame.area(), Style::default().bg(theme::desktop_bg()));
        for view in projection.frames() {
            let window = view.window();
            let focused = projection.is_focused(window.id());
            let preview = self.input.preview(window.id());
            if let Some(content) = view.render(frame, self.decorator.as_ref(), focused, preview) {
                let mut inner = UiFrame::from_parts(content, frame.buffer_mut());
                app.render_content(&mut inner, window, focused);
            }
        }
        projection.taskbar().render(frame);
    }
}

/// Drive `desktop` until the app asks to quit or a quit key is pressed.
///
/// Mouse capture is switched on for the lifetime of the loop. Frames are
/// only redrawn after something changed.
pub fn run_desktop<B, D, Id, C, A>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    desktop: &mut Desktop<Id, C>,
    app: &mut A,
    poll_interval: Duration,
) -> Result<(), DeskError>
where
    B: Backend,
    D: InputDriver,
    Id: Clone + Eq + Hash + fmt::Debug,
    A: DesktopApp<Id, C>,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    desktop.mark_dirty();

    event_loop.run(|_, event| {
        if let Some(evt) = event {
            return Ok(desktop.handle_event(app, &evt, Instant::now()));
        }
        if app.should_quit(desktop.registry()) {
            return Ok(ControlFlow::Quit);
        }
        if desktop.take_dirty() {
            terminal
                .draw(|frame| {
                    let mut ui = UiFrame::new(frame);
                    desktop.render(&mut ui, app);
                })
                .map_err(|e| io::Error::other(e.to_string()))?;
        }
        Ok(ControlFlow::Continue)
    })?;

    event_loop.driver().set_mouse_capture(false)?;
    Ok(())
}
