//! Projection of the registry onto the screen, and pointer routing.
//!
//! The manager keeps no state of its own. Every call re-derives which
//! windows are visible (painted bottom to top by z-index) and which sit on
//! the taskbar (in insertion order), so the registry stays the single
//! source of truth.
use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::frame::{FrameHit, FrameInput, WindowFrame};
use crate::layout::rect_contains;
use crate::taskbar::{Taskbar, TaskbarHit, split_area};
use crate::window::{WindowRegistry, WindowState};

/// Snapshot of what should be on screen for one registry revision.
#[derive(Debug)]
pub struct Projection<'r, Id, C> {
    visible: Vec<&'r WindowState<Id, C>>,
    minimized: Vec<&'r WindowState<Id, C>>,
    active: Option<&'r Id>,
    desktop: Rect,
    taskbar: Rect,
}

impl<'r, Id, C> Projection<'r, Id, C>
where
    Id: Eq,
{
    /// Visible windows, bottom to top.
    pub fn visible(&self) -> &[&'r WindowState<Id, C>] {
        &self.visible
    }

    /// Minimized windows in insertion order.
    pub fn minimized(&self) -> &[&'r WindowState<Id, C>] {
        &self.minimized
    }

    pub fn desktop_area(&self) -> Rect {
        self.desktop
    }

    pub fn taskbar_area(&self) -> Rect {
        self.taskbar
    }

    pub fn is_focused(&self, id: &Id) -> bool {
        self.active == Some(id)
    }

    /// One frame per visible window, in paint order.
    pub fn frames(&self) -> impl Iterator<Item = WindowFrame<'r, Id, C>> + '_ {
        self.visible.iter().map(|window| WindowFrame::new(*window))
    }

    pub fn taskbar(&self) -> Taskbar<'r, Id, C> {
        Taskbar::new(self.taskbar, self.minimized.iter().copied())
    }

    /// The topmost visible frame under `(column, row)`.
    pub fn frame_at(&self, column: u16, row: u16) -> Option<WindowFrame<'r, Id, C>> {
        self.visible
            .iter()
            .rev()
            .find(|window| window.geometry().contains(column, row))
            .map(|window| WindowFrame::new(*window))
    }
}

/// Where a pointer event ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<Id> {
    /// Consumed by a frame's chrome or an ongoing drag/resize.
    Chrome(Id),
    /// Landed on a taskbar entry; the hit has already been applied.
    Taskbar(TaskbarHit<Id>),
    /// Belongs to the window's content provider.
    Content { id: Id, column: u16, row: u16 },
    /// Empty desktop or taskbar background.
    Desktop,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Manager;

impl Manager {
    pub fn project<Id, C>(registry: &WindowRegistry<Id, C>) -> Projection<'_, Id, C>
    where
        Id: Clone + Eq + Hash + fmt::Debug,
    {
        let (desktop, taskbar) = split_area(registry.canvas(), registry.config().taskbar_height);
        let (mut visible, minimized): (Vec<_>, Vec<_>) =
            registry.windows().partition(|window| !window.is_minimized());
        visible.sort_by_key(|window| window.z_index());
        Projection {
            visible,
            minimized,
            active: registry.active_id(),
            desktop,
            taskbar,
        }
    }

    /// Route a mouse event: the taskbar first, then an ongoing gesture, then
    /// the topmost frame under the pointer.
    pub fn dispatch_mouse<Id, C>(
        registry: &mut WindowRegistry<Id, C>,
        input: &mut FrameInput<Id>,
        mouse: MouseEvent,
        now: Instant,
    ) -> Dispatch<Id>
    where
        Id: Clone + Eq + Hash + fmt::Debug,
    {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                let (taskbar_hit, on_taskbar, frame_hit) = {
                    let projection = Manager::project(registry);
                    let frame_hit = projection.frame_at(column, row).and_then(|frame| {
                        let hit = frame.hit_test(column, row)?;
                        Some((frame.window().id().clone(), hit))
                    });
                    (
                        projection.taskbar().hit_test(column, row),
                        rect_contains(projection.taskbar_area(), column, row),
                        frame_hit,
                    )
                };
                if let Some(hit) = taskbar_hit {
                    if button == MouseButton::Left {
                        hit.apply(registry);
                    }
                    return Dispatch::Taskbar(hit);
                }
                if on_taskbar {
                    return Dispatch::Desktop;
                }
                let Some((id, hit)) = frame_hit else {
                    return Dispatch::Desktop;
                };
                if input.press(registry, &id, hit, button, column, row, now) {
                    Dispatch::Chrome(id)
                } else {
                    Dispatch::Content { id, column, row }
                }
            }
            MouseEventKind::Drag(_) => {
                input.discard_stale(registry);
                if let Some(id) = input.gesture_target().cloned() {
                    input.drag(column, row);
                    return Dispatch::Chrome(id);
                }
                Self::content_at(registry, column, row)
            }
            MouseEventKind::Up(_) => {
                if let Some(id) = input.gesture_target().cloned() {
                    input.release(registry, column, row);
                    return Dispatch::Chrome(id);
                }
                Self::content_at(registry, column, row)
            }
            _ => Self::content_at(registry, column, row),
        }
    }

    fn content_at<Id, C>(registry: &WindowRegistry<Id, C>, column: u16, row: u16) -> Dispatch<Id>
    where
        Id: Clone + Eq + Hash + fmt::Debug,
    {
        let projection = Manager::project(registry);
        match projection.frame_at(column, row) {
            Some(frame) if frame.hit_test(column, row) == Some(FrameHit::Content) => {
                Dispatch::Content {
                    id: frame.window().id().clone(),
                    column,
                    row,
                }
            }
            Some(frame) => Dispatch::Chrome(frame.window().id().clone()),
            None => Dispatch::Desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeskConfig;
    use crate::window::{OpenOptions, Point, Size};
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    type Registry = WindowRegistry<&'static str, ()>;

    fn registry() -> Registry {
        WindowRegistry::with_fixed_canvas(DeskConfig::default(), Rect::new(0, 0, 80, 25))
    }

    fn open_at(reg: &mut Registry, id: &'static str, x: i32, y: i32) {
        reg.open(
            OpenOptions::new(id, id, ())
                .position(Point::new(x, y))
                .size(Size::new(30, 10)),
        );
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn ids(windows: &[&WindowState<&'static str, ()>]) -> Vec<&'static str> {
        windows.iter().map(|w| *w.id()).collect()
    }

    #[test]
    fn projection_partitions_and_orders() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        open_at(&mut reg, "b", 5, 2);
        open_at(&mut reg, "c", 10, 4);
        open_at(&mut reg, "d", 15, 6);
        reg.focus(&"a");
        reg.minimize(&"d");
        reg.minimize(&"b");

        let projection = Manager::project(&reg);
        assert_eq!(ids(projection.visible()), vec!["c", "a"]);
        assert_eq!(ids(projection.minimized()), vec!["b", "d"]);
        assert_eq!(projection.frames().count(), 2);
        assert_eq!(projection.taskbar().entries().len(), 2);
        assert!(projection.is_focused(&"a"));
        assert_eq!(projection.desktop_area(), Rect::new(0, 0, 80, 24));
        assert_eq!(projection.taskbar_area(), Rect::new(0, 24, 80, 1));
    }

    #[test]
    fn every_window_is_in_exactly_one_partition() {
        let mut reg = registry();
        for (idx, id) in ["a", "b", "c", "d", "e"].into_iter().enumerate() {
            open_at(&mut reg, id, idx as i32 * 3, 0);
        }
        reg.minimize(&"b");
        reg.minimize(&"e");
        reg.maximize(&"c");
        reg.close(&"a");
        let projection = Manager::project(&reg);
        assert_eq!(
            projection.visible().len() + projection.minimized().len(),
            reg.len()
        );
        for window in reg.windows() {
            let in_visible = projection.visible().iter().any(|w| w.id() == window.id());
            let in_minimized = projection.minimized().iter().any(|w| w.id() == window.id());
            assert!(in_visible ^ in_minimized);
        }
    }

    #[test]
    fn frame_at_picks_topmost() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        open_at(&mut reg, "b", 10, 2);
        let projection = Manager::project(&reg);
        assert_eq!(projection.frame_at(12, 4).map(|f| *f.window().id()), Some("b"));
        assert_eq!(projection.frame_at(2, 2).map(|f| *f.window().id()), Some("a"));
        assert!(projection.frame_at(70, 20).is_none());
    }

    #[test]
    fn press_on_lower_window_raises_it() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        open_at(&mut reg, "b", 10, 2);
        let mut input = FrameInput::new(Duration::from_millis(500));
        let routed = Manager::dispatch_mouse(&mut reg, &mut input, down(3, 5), Instant::now());
        assert_eq!(
            routed,
            Dispatch::Content {
                id: "a",
                column: 3,
                row: 5
            }
        );
        assert_eq!(reg.active_id(), Some(&"a"));
        assert_eq!(reg.topmost().map(|w| *w.id()), Some("a"));
    }

    #[test]
    fn drag_gesture_routes_through_manager() {
        let mut reg = registry();
        open_at(&mut reg, "a", 10, 5);
        let mut input = FrameInput::new(Duration::from_millis(500));
        let now = Instant::now();
        assert_eq!(
            Manager::dispatch_mouse(&mut reg, &mut input, down(15, 6), now),
            Dispatch::Chrome("a")
        );
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 20, 10);
        assert_eq!(
            Manager::dispatch_mouse(&mut reg, &mut input, drag, now),
            Dispatch::Chrome("a")
        );
        assert_eq!(reg.get_window(&"a").unwrap().position(), Point::new(10, 5));
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 20, 10);
        Manager::dispatch_mouse(&mut reg, &mut input, up, now);
        assert_eq!(reg.get_window(&"a").unwrap().position(), Point::new(15, 9));
    }

    #[test]
    fn taskbar_click_restores_and_close_removes() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        open_at(&mut reg, "b", 10, 2);
        reg.minimize(&"a");
        reg.minimize(&"b");
        let mut input = FrameInput::new(Duration::from_millis(500));
        let now = Instant::now();

        let restore = {
            let projection = Manager::project(&reg);
            projection.taskbar().entries()[0].restore
        };
        let routed = Manager::dispatch_mouse(&mut reg, &mut input, down(restore.x, restore.y), now);
        assert_eq!(routed, Dispatch::Taskbar(TaskbarHit::Restore("a")));
        assert!(!reg.get_window(&"a").unwrap().is_minimized());

        // "b" is now the only taskbar entry and sits where "a" used to
        let close_b = {
            let projection = Manager::project(&reg);
            projection.taskbar().entries()[0].close
        };
        let routed =
            Manager::dispatch_mouse(&mut reg, &mut input, down(close_b.x, close_b.y), now);
        assert_eq!(routed, Dispatch::Taskbar(TaskbarHit::Close("b")));
        assert!(!reg.is_open(&"b"));
    }

    #[test]
    fn empty_desktop_click_changes_nothing() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        let revision = reg.revision();
        let mut input = FrameInput::new(Duration::from_millis(500));
        let routed = Manager::dispatch_mouse(&mut reg, &mut input, down(70, 20), Instant::now());
        assert_eq!(routed, Dispatch::Desktop);
        let routed = Manager::dispatch_mouse(&mut reg, &mut input, down(70, 24), Instant::now());
        assert_eq!(routed, Dispatch::Desktop);
        assert_eq!(reg.revision(), revision);
    }

    #[test]
    fn maximized_window_covers_desktop_only() {
        let mut reg = registry();
        open_at(&mut reg, "a", 0, 0);
        open_at(&mut reg, "b", 40, 10);
        reg.minimize(&"b");
        reg.maximize(&"a");
        let projection = Manager::project(&reg);
        assert_eq!(
            projection.visible()[0].geometry().visible_rect(projection.desktop_area()),
            projection.desktop_area()
        );
        // the taskbar row stays reachable
        assert!(projection.frame_at(3, 24).is_none());
        assert!(projection.taskbar().hit_test(3, 24).is_some());
    }
}
