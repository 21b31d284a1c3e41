use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ratatui::prelude::Rect;

use super::{Geometry, OpenOptions, Point, Size, WindowData, WindowMode, WindowState};
use crate::config::DeskConfig;
use crate::constants::BASE_Z_INDEX;

/// Change notification emitted once per state-changing registry call.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent<Id> {
    Opened(Id),
    Focused(Id),
    Closed(Id),
    Minimized(Id),
    Restored(Id),
    Maximized(Id),
    Unmaximized(Id),
    Moved { id: Id, position: Point },
    Resized { id: Id, size: Size },
    /// Position and size changed together.
    Reshaped { id: Id, geometry: Geometry },
    DataChanged(Id),
    TitleChanged(Id),
    ContentChanged(Id),
}

impl<Id> RegistryEvent<Id> {
    pub fn id(&self) -> &Id {
        match self {
            RegistryEvent::Opened(id)
            | RegistryEvent::Focused(id)
            | RegistryEvent::Closed(id)
            | RegistryEvent::Minimized(id)
            | RegistryEvent::Restored(id)
            | RegistryEvent::Maximized(id)
            | RegistryEvent::Unmaximized(id)
            | RegistryEvent::DataChanged(id)
            | RegistryEvent::TitleChanged(id)
            | RegistryEvent::ContentChanged(id) => id,
            RegistryEvent::Moved { id, .. }
            | RegistryEvent::Resized { id, .. }
            | RegistryEvent::Reshaped { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<Id> = Box<dyn FnMut(&RegistryEvent<Id>)>;
type CanvasSource = Box<dyn Fn() -> Rect>;

/// Owner of every open window and the only place window state is mutated.
///
/// Windows live in a map keyed by the caller's id, with a side vector that
/// remembers insertion order for the taskbar. Operations on unknown ids are
/// silently ignored.
pub struct WindowRegistry<Id, C> {
    config: DeskConfig,
    windows: HashMap<Id, WindowState<Id, C>>,
    order: Vec<Id>,
    next_z_index: u64,
    creation_count: usize,
    active: Option<Id>,
    // queried on every use; the host viewport may change between calls
    canvas: CanvasSource,
    listeners: Vec<(ListenerId, Listener<Id>)>,
    next_listener: u64,
    revision: u64,
}

impl<Id, C> fmt::Debug for WindowRegistry<Id, C>
where
    Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("order", &self.order)
            .field("active", &self.active)
            .field("next_z_index", &self.next_z_index)
            .field("creation_count", &self.creation_count)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<Id, C> WindowRegistry<Id, C>
where
    Id: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new(config: DeskConfig, canvas: impl Fn() -> Rect + 'static) -> Self {
        Self {
            config,
            windows: HashMap::new(),
            order: Vec::new(),
            next_z_index: BASE_Z_INDEX,
            creation_count: 0,
            active: None,
            canvas: Box::new(canvas),
            listeners: Vec::new(),
            next_listener: 0,
            revision: 0,
        }
    }

    /// Registry over a canvas that never changes size.
    pub fn with_fixed_canvas(config: DeskConfig, canvas: Rect) -> Self {
        Self::new(config, move || canvas)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Current canvas bounds, freshly queried from the host.
    pub fn canvas(&self) -> Rect {
        (self.canvas)()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryEvent<Id>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.saturating_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Incremented after every change; lets renderers skip redundant frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn open(&mut self, options: OpenOptions<Id, C>) {
        let id = options.id;
        if self.windows.contains_key(&id) {
            let z_index = self.take_z_index();
            let mut was_minimized = false;
            if let Some(window) = self.windows.get_mut(&id) {
                was_minimized = window.mode == WindowMode::Minimized;
                if was_minimized {
                    window.mode = WindowMode::Normal;
                }
                window.z_index = z_index;
            }
            self.active = Some(id.clone());
            tracing::debug!(window_id = ?id, z_index, "reopened existing window");
            self.emit(if was_minimized {
                RegistryEvent::Restored(id)
            } else {
                RegistryEvent::Focused(id)
            });
            return;
        }

        let position = options.position.unwrap_or_else(|| {
            let canvas = self.canvas();
            let offset = self.config.cascade_offset(self.creation_count);
            Point::new(
                (canvas.x as i32).saturating_add(offset.x),
                (canvas.y as i32).saturating_add(offset.y),
            )
        });
        let z_index = self.take_z_index();
        let window = WindowState {
            id: id.clone(),
            title: options.title,
            icon: options.icon,
            content: options.content,
            position,
            size: options.size.unwrap_or(self.config.default_size),
            min_size: options.min_size.unwrap_or(self.config.default_min_size),
            max_size: options.max_size,
            mode: WindowMode::Normal,
            z_index,
            data: options.data.unwrap_or_default(),
            restore_point: None,
        };
        self.windows.insert(id.clone(), window);
        self.order.push(id.clone());
        self.active = Some(id.clone());
        self.creation_count = self.creation_count.saturating_add(1);
        tracing::debug!(window_id = ?id, z_index, x = position.x, y = position.y, "opened window");
        self.emit(RegistryEvent::Opened(id));
    }

    pub fn close(&mut self, id: &Id) {
        if self.windows.remove(id).is_none() {
            return;
        }
        self.order.retain(|existing| existing != id);
        if self.active.as_ref() == Some(id) {
            self.elect_active();
        }
        tracing::debug!(window_id = ?id, active = ?self.active, "closed window");
        self.emit(RegistryEvent::Closed(id.clone()));
    }

    pub fn minimize(&mut self, id: &Id) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        match window.mode {
            WindowMode::Minimized => return,
            WindowMode::Maximized => {
                // a minimized window is never maximized
                if let Some(point) = window.restore_point.take() {
                    window.position = point.position;
                    window.size = point.size;
                }
            }
            WindowMode::Normal => {}
        }
        window.mode = WindowMode::Minimized;
        if self.active.as_ref() == Some(id) {
            self.elect_active();
        }
        tracing::debug!(window_id = ?id, active = ?self.active, "minimized window");
        self.emit(RegistryEvent::Minimized(id.clone()));
    }

    pub fn restore(&mut self, id: &Id) {
        if !self.windows.contains_key(id) {
            return;
        }
        let z_index = self.take_z_index();
        let mut was_minimized = false;
        if let Some(window) = self.windows.get_mut(id) {
            was_minimized = window.mode == WindowMode::Minimized;
            if was_minimized {
                window.mode = WindowMode::Normal;
            }
            window.z_index = z_index;
        }
        self.active = Some(id.clone());
        tracing::debug!(window_id = ?id, z_index, "restored window");
        self.emit(if was_minimized {
            RegistryEvent::Restored(id.clone())
        } else {
            RegistryEvent::Focused(id.clone())
        });
    }

    /// Toggle between maximized and the geometry held in the restore point.
    ///
    /// Maximizing a minimized window also brings it to the front, since it
    /// becomes visible again.
    pub fn maximize(&mut self, id: &Id) {
        let Some(mode) = self.windows.get(id).map(|window| window.mode) else {
            return;
        };
        if mode == WindowMode::Maximized {
            if let Some(window) = self.windows.get_mut(id) {
                if let Some(point) = window.restore_point.take() {
                    window.position = point.position;
                    window.size = point.size;
                }
                window.mode = WindowMode::Normal;
            }
            tracing::debug!(window_id = ?id, "unmaximized window");
            self.emit(RegistryEvent::Unmaximized(id.clone()));
            return;
        }

        let full = self.maximized_geometry();
        let raise = mode == WindowMode::Minimized;
        let z_index = raise.then(|| self.take_z_index());
        if let Some(window) = self.windows.get_mut(id) {
            window.restore_point = Some(window.geometry());
            window.position = full.position;
            window.size = full.size;
            window.mode = WindowMode::Maximized;
            if let Some(z_index) = z_index {
                window.z_index = z_index;
            }
        }
        if raise {
            self.active = Some(id.clone());
        }
        tracing::debug!(window_id = ?id, width = full.size.width, height = full.size.height, "maximized window");
        self.emit(RegistryEvent::Maximized(id.clone()));
    }

    /// Make `id` the active window, raising it unless it is already topmost.
    /// Focusing a minimized window restores it.
    pub fn focus(&mut self, id: &Id) {
        let Some(window) = self.windows.get(id) else {
            return;
        };
        if window.is_minimized() {
            self.restore(id);
            return;
        }
        let topmost = self
            .windows
            .values()
            .all(|other| other.id == *id || other.z_index < window.z_index);
        let already_active = self.active.as_ref() == Some(id);
        if topmost && already_active {
            return;
        }
        if !topmost {
            let z_index = self.take_z_index();
            if let Some(window) = self.windows.get_mut(id) {
                window.z_index = z_index;
            }
        }
        self.active = Some(id.clone());
        tracing::debug!(window_id = ?id, raised = !topmost, "focused window");
        self.emit(RegistryEvent::Focused(id.clone()));
    }

    /// Move focus to the next (or previous) visible window in creation
    /// order, wrapping around.
    pub fn cycle_focus(&mut self, forward: bool) {
        let visible: Vec<Id> = self
            .order
            .iter()
            .filter(|id| self.windows.get(*id).is_some_and(|w| !w.is_minimized()))
            .cloned()
            .collect();
        if visible.is_empty() {
            return;
        }
        let next = match self
            .active
            .as_ref()
            .and_then(|active| visible.iter().position(|id| id == active))
        {
            Some(idx) => {
                let step = if forward { 1isize } else { -1isize };
                (idx as isize + step).rem_euclid(visible.len() as isize) as usize
            }
            None => 0,
        };
        let target = visible[next].clone();
        self.focus(&target);
    }

    pub fn update_position(&mut self, id: &Id, position: Point) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.position == position {
            return;
        }
        window.position = position;
        tracing::trace!(window_id = ?id, x = position.x, y = position.y, "moved window");
        self.emit(RegistryEvent::Moved {
            id: id.clone(),
            position,
        });
    }

    pub fn update_size(&mut self, id: &Id, size: Size) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if window.size == size {
            return;
        }
        window.size = size;
        tracing::trace!(window_id = ?id, width = size.width, height = size.height, "resized window");
        self.emit(RegistryEvent::Resized {
            id: id.clone(),
            size,
        });
    }

    /// Set position and size in one step. A change to both emits a single
    /// `Reshaped`, so listeners never see one half applied.
    pub fn update_geometry(&mut self, id: &Id, geometry: Geometry) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        let moved = window.position != geometry.position;
        let resized = window.size != geometry.size;
        window.position = geometry.position;
        window.size = geometry.size;
        let event = match (moved, resized) {
            (true, true) => RegistryEvent::Reshaped {
                id: id.clone(),
                geometry,
            },
            (true, false) => RegistryEvent::Moved {
                id: id.clone(),
                position: geometry.position,
            },
            (false, true) => RegistryEvent::Resized {
                id: id.clone(),
                size: geometry.size,
            },
            (false, false) => return,
        };
        tracing::trace!(
            window_id = ?id,
            x = geometry.position.x,
            y = geometry.position.y,
            width = geometry.size.width,
            height = geometry.size.height,
            "reshaped window"
        );
        self.emit(event);
    }

    /// Shallow-merge `partial` into the window's data map.
    pub fn update_data(&mut self, id: &Id, partial: WindowData) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        if partial.is_empty() {
            return;
        }
        window.data.extend(partial);
        self.emit(RegistryEvent::DataChanged(id.clone()));
    }

    pub fn set_title(&mut self, id: &Id, title: impl Into<String>) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.title = title.into();
        self.emit(RegistryEvent::TitleChanged(id.clone()));
    }

    pub fn set_content(&mut self, id: &Id, content: C) {
        let Some(window) = self.windows.get_mut(id) else {
            return;
        };
        window.content = content;
        self.emit(RegistryEvent::ContentChanged(id.clone()));
    }

    /// Re-fit maximized windows after the host canvas changed size.
    pub fn sync_canvas(&mut self) {
        let full = self.maximized_geometry();
        let changed: Vec<Id> = self
            .windows
            .values_mut()
            .filter(|window| window.is_maximized() && window.geometry() != full)
            .map(|window| {
                window.position = full.position;
                window.size = full.size;
                window.id.clone()
            })
            .collect();
        for id in changed {
            self.emit(RegistryEvent::Resized {
                id,
                size: full.size,
            });
        }
    }

    pub fn get_window(&self, id: &Id) -> Option<&WindowState<Id, C>> {
        self.windows.get(id)
    }

    pub fn is_open(&self, id: &Id) -> bool {
        self.windows.contains_key(id)
    }

    pub fn active_id(&self) -> Option<&Id> {
        self.active.as_ref()
    }

    pub fn active_window(&self) -> Option<&WindowState<Id, C>> {
        self.active.as_ref().and_then(|id| self.windows.get(id))
    }

    /// Highest z-index window that is not minimized.
    pub fn topmost(&self) -> Option<&WindowState<Id, C>> {
        self.windows
            .values()
            .filter(|window| !window.is_minimized())
            .max_by_key(|window| window.z_index)
    }

    /// All windows in insertion order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowState<Id, C>> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    /// All windows sorted bottom to top.
    pub fn stacking_order(&self) -> Vec<&WindowState<Id, C>> {
        let mut windows: Vec<_> = self.windows.values().collect();
        windows.sort_by_key(|window| window.z_index);
        windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The canvas minus the rows reserved for the taskbar.
    pub fn desktop_area(&self) -> Rect {
        crate::layout::split_bottom(self.canvas(), self.config.taskbar_height).0
    }

    /// Geometry a window takes when maximized.
    pub fn maximized_geometry(&self) -> Geometry {
        Geometry::from_rect(self.desktop_area())
    }

    fn take_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index = z_index.saturating_add(1);
        z_index
    }

    fn elect_active(&mut self) {
        self.active = self
            .windows
            .values()
            .filter(|window| !window.is_minimized())
            .max_by_key(|window| window.z_index)
            .map(|window| window.id.clone());
    }

    fn emit(&mut self, event: RegistryEvent<Id>) {
        self.revision = self.revision.wrapping_add(1);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
