pub mod decorator;

mod registry;

use std::collections::BTreeMap;

use ratatui::prelude::Rect;

pub use registry::{ListenerId, RegistryEvent, WindowRegistry};

/// Signed window origin. Windows may be dragged partially off the canvas, so
/// coordinates can go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by `(dx, dy)`, saturating at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Clamp each axis into `[min, max]`. `min` wins if the two disagree.
    pub fn clamp(self, min: Size, max: Option<Size>) -> Size {
        let (mut width, mut height) = (self.width, self.height);
        if let Some(max) = max {
            width = width.min(max.width);
            height = height.min(max.height);
        }
        Size {
            width: width.max(min.width),
            height: height.max(min.height),
        }
    }
}

/// Position plus size; the unit the maximize toggle snapshots and restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub position: Point,
    pub size: Size,
}

impl Geometry {
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Geometry covering `rect` exactly.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            position: Point::new(rect.x as i32, rect.y as i32),
            size: Size::new(rect.width, rect.height),
        }
    }

    /// Last column covered. Saturates for origins near `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.position
            .x
            .saturating_add(i32::from(self.size.width))
            .saturating_sub(1)
    }

    /// Last row covered. Saturates for origins near `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.position
            .y
            .saturating_add(i32::from(self.size.height))
            .saturating_sub(1)
    }

    /// The on-screen part of this geometry. Negative origins are clipped.
    pub fn visible_rect(&self, bounds: Rect) -> Rect {
        let (x, y) = (i64::from(self.position.x), i64::from(self.position.y));
        let left = x.max(i64::from(bounds.x));
        let top = y.max(i64::from(bounds.y));
        let right = (x + i64::from(self.size.width))
            .min(i64::from(bounds.x) + i64::from(bounds.width));
        let bottom = (y + i64::from(self.size.height))
            .min(i64::from(bounds.y) + i64::from(bounds.height));
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (col, row) = (i64::from(column), i64::from(row));
        let (x, y) = (i64::from(self.position.x), i64::from(self.position.y));
        col >= x
            && col < x + i64::from(self.size.width)
            && row >= y
            && row < y + i64::from(self.size.height)
    }
}

/// Lifecycle state of a single window.
///
/// Minimized and maximized are mutually exclusive: minimizing a maximized
/// window first returns it to its restore point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Caller-defined auxiliary state carried through a window untouched.
pub type WindowData = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone)]
pub struct WindowState<Id, C> {
    pub(crate) id: Id,
    pub(crate) title: String,
    pub(crate) icon: Option<String>,
    pub(crate) content: C,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) min_size: Size,
    pub(crate) max_size: Option<Size>,
    pub(crate) mode: WindowMode,
    pub(crate) z_index: u64,
    pub(crate) data: WindowData,
    pub(crate) restore_point: Option<Geometry>,
}

impl<Id, C> WindowState<Id, C> {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.position, self.size)
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Option<Size> {
        self.max_size
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn is_minimized(&self) -> bool {
        self.mode == WindowMode::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.mode == WindowMode::Maximized
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn data(&self) -> &WindowData {
        &self.data
    }

    /// Geometry the window returns to when it leaves the maximized state.
    pub fn restore_point(&self) -> Option<Geometry> {
        self.restore_point
    }

    /// Title prefixed by the icon glyph, as shown in chrome and the taskbar.
    pub fn label(&self) -> String {
        match self.icon.as_deref() {
            Some(icon) if !icon.is_empty() => format!("{icon} {}", self.title),
            _ => self.title.clone(),
        }
    }
}

/// Arguments for [`WindowRegistry::open`]. Unset geometry falls back to the
/// registry's configured defaults.
#[derive(Debug, Clone)]
pub struct OpenOptions<Id, C> {
    pub id: Id,
    pub title: String,
    pub icon: Option<String>,
    pub content: C,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub min_size: Option<Size>,
    pub max_size: Option<Size>,
    pub data: Option<WindowData>,
}

impl<Id, C> OpenOptions<Id, C> {
    pub fn new(id: Id, title: impl Into<String>, content: C) -> Self {
        Self {
            id,
            title: title.into(),
            icon: None,
            content,
            position: None,
            size: None,
            min_size: None,
            max_size: None,
            data: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn min_size(mut self, size: Size) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn max_size(mut self, size: Size) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn data(mut self, data: WindowData) -> Self {
        self.data = Some(data);
        self
    }
}
