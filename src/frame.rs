//! Per-window chrome and the pointer gestures that act on it.
//!
//! A `WindowFrame` is a read-only view over one `WindowState`: it lays out
//! the border, header and controls, answers hit tests and paints through a
//! `WindowDecorator`. Gestures that span several pointer events (drag and
//! resize) are tracked in `FrameInput`, which keeps only the transient
//! preview and writes to the registry once, when the pointer is released.
use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crossterm::event::MouseButton;
use ratatui::prelude::Rect;
use ratatui::style::Style;

use crate::layout::floating::{ResizeEdge, apply_resize, clamp_drag_position, edge_at};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::WindowDecorator;
use crate::window::{Geometry, Point, Size, WindowRegistry, WindowState};

/// Width of a single header control, e.g. ` × `.
pub const CONTROL_WIDTH: u16 = 3;

const CONTROL_ORDER: [FrameControl; 3] = [
    FrameControl::Minimize,
    FrameControl::Maximize,
    FrameControl::Close,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Minimize,
    Maximize,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHit {
    Control(FrameControl),
    TitleBar,
    Resize(ResizeEdge),
    Content,
}

/// Cell layout of a frame at a given geometry.
///
/// Row 0 is the top border, row 1 the header, and the content sits inside
/// the side borders between the header and the bottom border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameChrome {
    pub outer: Geometry,
    pub title: Geometry,
    pub content: Geometry,
    controls: Option<[Geometry; 3]>,
}

impl FrameChrome {
    pub fn new(outer: Geometry) -> Self {
        let Geometry { position, size } = outer;
        let inner_width = size.width.saturating_sub(2);
        let header_y = position.y.saturating_add(1);
        let controls_width = CONTROL_WIDTH * CONTROL_ORDER.len() as u16;
        // keep at least two title cells next to the controls
        let controls = (size.height >= 2 && inner_width >= controls_width + 2).then(|| {
            let right = outer.right();
            let at = |slot: i32| {
                Geometry::new(
                    Point::new(
                        right.saturating_sub(CONTROL_WIDTH as i32 * (3 - slot)),
                        header_y,
                    ),
                    Size::new(CONTROL_WIDTH, 1),
                )
            };
            [at(0), at(1), at(2)]
        });
        let title_width = if controls.is_some() {
            inner_width - controls_width
        } else {
            inner_width
        };
        let title = Geometry::new(
            Point::new(position.x.saturating_add(1), header_y),
            Size::new(title_width, u16::from(size.height >= 2)),
        );
        let content = Geometry::new(
            position.offset(1, 2),
            Size::new(inner_width, size.height.saturating_sub(3)),
        );
        Self {
            outer,
            title,
            content,
            controls,
        }
    }

    /// Header controls left to right; empty when the frame is too narrow.
    pub fn controls(&self) -> impl Iterator<Item = (FrameControl, Geometry)> + '_ {
        self.controls
            .iter()
            .flat_map(|slots| CONTROL_ORDER.into_iter().zip(slots.iter().copied()))
    }

    /// Controls win over resize handles, which win over the title bar.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<FrameHit> {
        if !self.outer.contains(column, row) {
            return None;
        }
        if let Some((control, _)) = self
            .controls()
            .find(|(_, rect)| rect.contains(column, row))
        {
            return Some(FrameHit::Control(control));
        }
        if let Some(edge) = edge_at(self.outer, column, row) {
            return Some(FrameHit::Resize(edge));
        }
        if self.title.contains(column, row) {
            return Some(FrameHit::TitleBar);
        }
        Some(FrameHit::Content)
    }
}

/// Chrome view over a single window.
pub struct WindowFrame<'w, Id, C> {
    window: &'w WindowState<Id, C>,
}

impl<'w, Id, C> WindowFrame<'w, Id, C> {
    pub fn new(window: &'w WindowState<Id, C>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &'w WindowState<Id, C> {
        self.window
    }

    pub fn chrome(&self) -> FrameChrome {
        FrameChrome::new(self.window.geometry())
    }

    /// Minimized frames are not on screen and never receive hits.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<FrameHit> {
        if self.window.is_minimized() {
            return None;
        }
        self.chrome().hit_test(column, row)
    }

    /// Paint the chrome and return the visible content area, if any.
    ///
    /// `preview` is an in-flight drag or resize outline; the committed
    /// geometry is still the one painted.
    pub fn render(
        &self,
        frame: &mut UiFrame<'_>,
        decorator: &dyn WindowDecorator,
        focused: bool,
        preview: Option<Geometry>,
    ) -> Option<Rect> {
        if self.window.is_minimized() {
            return None;
        }
        let chrome = self.chrome();
        decorator.render_window(
            frame,
            &chrome,
            &self.window.label(),
            focused,
            self.window.is_maximized(),
        );
        if let Some(preview) = preview.filter(|preview| *preview != chrome.outer) {
            render_outline(frame, preview);
        }
        let content = chrome.content.visible_rect(frame.area());
        (content.width > 0 && content.height > 0).then_some(content)
    }
}

fn render_outline(frame: &mut UiFrame<'_>, outline: Geometry) {
    let style = Style::default().fg(theme::preview_fg());
    let area = frame.area();
    let left = outline.position.x;
    let top = outline.position.y;
    let right = outline.right();
    let bottom = outline.bottom();
    let mut put = |x: i32, y: i32, symbol: &str| {
        if x >= area.x as i32 && y >= area.y as i32 && x <= u16::MAX as i32 && y <= u16::MAX as i32
        {
            frame.set_symbol(x as u16, y as u16, symbol, style);
        }
    };
    for x in left..=right {
        put(x, top, "┄");
        put(x, bottom, "┄");
    }
    for y in top..=bottom {
        put(left, y, "┆");
        put(right, y, "┆");
    }
}

#[derive(Debug, Clone)]
enum Gesture<Id> {
    Move {
        id: Id,
        anchor: (u16, u16),
        start: Geometry,
        current: Geometry,
    },
    Resize {
        id: Id,
        edge: ResizeEdge,
        anchor: (u16, u16),
        start: Geometry,
        min: Size,
        max: Option<Size>,
        current: Geometry,
    },
}

impl<Id> Gesture<Id> {
    fn id(&self) -> &Id {
        match self {
            Gesture::Move { id, .. } | Gesture::Resize { id, .. } => id,
        }
    }

    fn current(&self) -> Geometry {
        match self {
            Gesture::Move { current, .. } | Gesture::Resize { current, .. } => *current,
        }
    }
}

/// Pointer state shared by all frames: the gesture in progress and the last
/// title bar press, used to recognise double clicks.
pub struct FrameInput<Id> {
    gesture: Option<Gesture<Id>>,
    last_title_press: Option<(Id, Instant)>,
    double_click: Duration,
}

impl<Id: fmt::Debug> fmt::Debug for FrameInput<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameInput")
            .field("gesture", &self.gesture)
            .field("double_click", &self.double_click)
            .finish_non_exhaustive()
    }
}

impl<Id> FrameInput<Id>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new(double_click: Duration) -> Self {
        Self {
            gesture: None,
            last_title_press: None,
            double_click,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn gesture_target(&self) -> Option<&Id> {
        self.gesture.as_ref().map(Gesture::id)
    }

    /// Outline of the in-flight gesture on `id`, if any.
    pub fn preview(&self, id: &Id) -> Option<Geometry> {
        self.gesture
            .as_ref()
            .filter(|gesture| gesture.id() == id)
            .map(Gesture::current)
    }

    /// Handle a button press that landed on `id` at `hit`. Returns true when
    /// the press was consumed by the chrome.
    #[allow(clippy::too_many_arguments)]
    pub fn press<C>(
        &mut self,
        registry: &mut WindowRegistry<Id, C>,
        id: &Id,
        hit: FrameHit,
        button: MouseButton,
        column: u16,
        row: u16,
        now: Instant,
    ) -> bool {
        let Some(window) = registry.get_window(id) else {
            return false;
        };
        let start = window.geometry();
        let (min, max) = (window.min_size(), window.max_size());
        let maximized = window.is_maximized();

        registry.focus(id);
        if button != MouseButton::Left {
            return hit != FrameHit::Content;
        }

        match hit {
            FrameHit::Control(control) => {
                self.last_title_press = None;
                match control {
                    FrameControl::Minimize => registry.minimize(id),
                    FrameControl::Maximize => registry.maximize(id),
                    FrameControl::Close => registry.close(id),
                }
                true
            }
            FrameHit::TitleBar => {
                let double = self.last_title_press.as_ref().is_some_and(|(prev, at)| {
                    prev == id && now.saturating_duration_since(*at) <= self.double_click
                });
                if double {
                    self.last_title_press = None;
                    tracing::debug!(window_id = ?id, "title double-click");
                    registry.maximize(id);
                    return true;
                }
                self.last_title_press = Some((id.clone(), now));
                if !maximized {
                    self.gesture = Some(Gesture::Move {
                        id: id.clone(),
                        anchor: (column, row),
                        start,
                        current: start,
                    });
                }
                true
            }
            FrameHit::Resize(edge) => {
                if !maximized {
                    self.gesture = Some(Gesture::Resize {
                        id: id.clone(),
                        edge,
                        anchor: (column, row),
                        start,
                        min,
                        max,
                        current: start,
                    });
                }
                true
            }
            FrameHit::Content => false,
        }
    }

    /// Update the preview. The registry is not touched until `release`.
    pub fn drag(&mut self, column: u16, row: u16) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        match gesture {
            Gesture::Move {
                anchor,
                start,
                current,
                ..
            } => {
                let (dx, dy) = delta(*anchor, column, row);
                current.position = start.position.offset(dx, dy);
            }
            Gesture::Resize {
                edge,
                anchor,
                start,
                min,
                max,
                current,
                ..
            } => {
                let (dx, dy) = delta(*anchor, column, row);
                *current = apply_resize(*start, *edge, dx, dy, *min, *max);
            }
        }
        tracing::trace!(column, row, "gesture preview");
        true
    }

    /// Drop the gesture if its window was closed, minimized or maximized
    /// since the press. Returns true when a gesture was dropped.
    pub fn discard_stale<C>(&mut self, registry: &WindowRegistry<Id, C>) -> bool {
        let stale = self.gesture.as_ref().is_some_and(|gesture| {
            registry
                .get_window(gesture.id())
                .is_none_or(|window| window.is_minimized() || window.is_maximized())
        });
        if stale {
            tracing::debug!(window_id = ?self.gesture_target(), "dropped stale gesture");
            self.gesture = None;
        }
        stale
    }

    /// Finish the gesture and commit its geometry to the registry. Nothing
    /// is committed if the window left the normal mode mid-gesture.
    pub fn release<C>(
        &mut self,
        registry: &mut WindowRegistry<Id, C>,
        column: u16,
        row: u16,
    ) -> bool {
        if self.discard_stale(registry) || !self.drag(column, row) {
            return false;
        }
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        match gesture {
            Gesture::Move { id, current, .. } => {
                let position =
                    clamp_drag_position(current.position, current.size, registry.desktop_area());
                tracing::debug!(window_id = ?id, x = position.x, y = position.y, "drag committed");
                registry.update_position(&id, position);
            }
            Gesture::Resize {
                id, edge, current, ..
            } => {
                tracing::debug!(
                    window_id = ?id,
                    width = current.size.width,
                    height = current.size.height,
                    "resize committed"
                );
                if edge.moves_origin() {
                    registry.update_geometry(&id, current);
                } else {
                    registry.update_size(&id, current.size);
                }
            }
        }
        true
    }

    /// Drop the gesture in progress without committing.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }
}

fn delta(anchor: (u16, u16), column: u16, row: u16) -> (i32, i32) {
    (
        column as i32 - anchor.0 as i32,
        row as i32 - anchor.1 as i32,
    )
}
