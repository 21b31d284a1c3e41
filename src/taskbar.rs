use std::fmt;
use std::hash::Hash;

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::layout::{rect_contains, split_bottom};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::{WindowRegistry, WindowState};

const MAX_LABEL_WIDTH: usize = 24;
const CLOSE_LABEL: &str = " × ";
const CLOSE_WIDTH: u16 = 3;
const ENTRY_GAP: u16 = 1;

/// Split the canvas into the desktop and the bottom `height` taskbar rows.
pub fn split_area(canvas: Rect, height: u16) -> (Rect, Rect) {
    split_bottom(canvas, height)
}

/// One minimized window as laid out on the taskbar.
#[derive(Debug)]
pub struct TaskbarEntry<'r, Id, C> {
    pub window: &'r WindowState<Id, C>,
    pub label: String,
    pub restore: Rect,
    pub close: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskbarHit<Id> {
    Restore(Id),
    Close(Id),
}

impl<Id> TaskbarHit<Id> {
    pub fn id(&self) -> &Id {
        match self {
            TaskbarHit::Restore(id) | TaskbarHit::Close(id) => id,
        }
    }

    /// Closing from the taskbar never restores first.
    pub fn apply<C>(&self, registry: &mut WindowRegistry<Id, C>)
    where
        Id: Clone + Eq + Hash + fmt::Debug,
    {
        match self {
            TaskbarHit::Restore(id) => registry.restore(id),
            TaskbarHit::Close(id) => registry.close(id),
        }
    }
}

/// Strip of minimized windows along the bottom of the canvas.
#[derive(Debug)]
pub struct Taskbar<'r, Id, C> {
    area: Rect,
    entries: Vec<TaskbarEntry<'r, Id, C>>,
    overflow: usize,
}

impl<'r, Id, C> Taskbar<'r, Id, C> {
    /// Lay out `minimized` left to right on the first row of `area`.
    ///
    /// Layout stops at the first entry that does not fit. That entry and
    /// everything after it are counted in `overflow`, and enough room is
    /// kept at the right edge for the `+N` marker.
    pub fn new(area: Rect, minimized: impl IntoIterator<Item = &'r WindowState<Id, C>>) -> Self {
        let windows: Vec<&'r WindowState<Id, C>> = minimized.into_iter().collect();
        let mut entries: Vec<TaskbarEntry<'r, Id, C>> = Vec::new();
        let right = area.x.saturating_add(area.width);
        let mut x = area.x.saturating_add(ENTRY_GAP);
        if area.height > 0 {
            for window in windows.iter().copied() {
                let label = format!(" {} ", truncate_label(&window.label()));
                let label_width = label.chars().count() as u16;
                let end = x
                    .saturating_add(label_width)
                    .saturating_add(CLOSE_WIDTH);
                if end > right {
                    break;
                }
                let restore = Rect::new(x, area.y, label_width, 1);
                let close = Rect::new(x.saturating_add(label_width), area.y, CLOSE_WIDTH, 1);
                entries.push(TaskbarEntry {
                    window,
                    label,
                    restore,
                    close,
                });
                x = end.saturating_add(ENTRY_GAP);
            }
        }
        // dropping an entry can widen the marker, so re-check until stable
        while entries.len() < windows.len() {
            let marker = overflow_marker(windows.len() - entries.len());
            let reserved = marker.chars().count() as u16;
            let edge = right.saturating_sub(reserved.saturating_add(ENTRY_GAP));
            if !entries.last().is_some_and(|last| last.close.right() > edge) {
                break;
            }
            entries.pop();
        }
        let overflow = windows.len() - entries.len();
        Self {
            area,
            entries,
            overflow,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn entries(&self) -> &[TaskbarEntry<'r, Id, C>] {
        &self.entries
    }

    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit<Id>>
    where
        Id: Clone,
    {
        if !rect_contains(self.area, column, row) {
            return None;
        }
        self.entries.iter().find_map(|entry| {
            if rect_contains(entry.close, column, row) {
                Some(TaskbarHit::Close(entry.window.id().clone()))
            } else if rect_contains(entry.restore, column, row) {
                Some(TaskbarHit::Restore(entry.window.id().clone()))
            } else {
                None
            }
        })
    }

    pub fn render(&self, frame: &mut UiFrame<'_>) {
        if self.area.width == 0 || self.area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        frame.fill(self.area, base);
        for entry in &self.entries {
            frame.set_string(
                entry.restore,
                entry.restore.x,
                entry.restore.y,
                &entry.label,
                theme::taskbar_entry_style(),
            );
            frame.set_string(
                entry.close,
                entry.close.x,
                entry.close.y,
                CLOSE_LABEL,
                theme::taskbar_close_style(),
            );
        }
        if self.overflow > 0 {
            let marker = overflow_marker(self.overflow);
            let width = marker.chars().count() as u16;
            let x = self
                .area
                .x
                .saturating_add(self.area.width.saturating_sub(width));
            frame.set_string(self.area, x, self.area.y, &marker, base);
        }
    }
}

fn overflow_marker(count: usize) -> String {
    format!("+{count}")
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_WIDTH {
        return label.to_string();
    }
    let mut clipped = truncate_to_width(label, MAX_LABEL_WIDTH - 1);
    clipped.push('…');
    clipped
}
