//! Tunable defaults for the window registry and its chrome.

use std::time::Duration;

use crate::constants::{
    CASCADE_ORIGIN, CASCADE_SLOTS, CASCADE_STEP, DEFAULT_MIN_SIZE, DEFAULT_WINDOW_SIZE,
    DOUBLE_CLICK_INTERVAL, TASKBAR_HEIGHT,
};
use crate::error::ConfigError;
use crate::window::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeskConfig {
    pub cascade_origin: Point,
    pub cascade_step: Point,
    pub cascade_slots: usize,
    pub default_size: Size,
    pub default_min_size: Size,
    pub taskbar_height: u16,
    pub double_click: Duration,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            cascade_origin: CASCADE_ORIGIN,
            cascade_step: CASCADE_STEP,
            cascade_slots: CASCADE_SLOTS,
            default_size: DEFAULT_WINDOW_SIZE,
            default_min_size: DEFAULT_MIN_SIZE,
            taskbar_height: TASKBAR_HEIGHT,
            double_click: DOUBLE_CLICK_INTERVAL,
        }
    }
}

impl DeskConfig {
    pub fn with_cascade(mut self, origin: Point, step: Point, slots: usize) -> Self {
        self.cascade_origin = origin;
        self.cascade_step = step;
        self.cascade_slots = slots;
        self
    }

    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    pub fn with_default_min_size(mut self, size: Size) -> Self {
        self.default_min_size = size;
        self
    }

    pub fn with_taskbar_height(mut self, height: u16) -> Self {
        self.taskbar_height = height;
        self
    }

    pub fn with_double_click(mut self, interval: Duration) -> Self {
        self.double_click = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cascade_slots == 0 {
            return Err(ConfigError::ZeroCascadeSlots);
        }
        let min = self.default_min_size;
        if min.width == 0 || min.height == 0 {
            return Err(ConfigError::ZeroMinimumSize(min));
        }
        let default = self.default_size;
        if default.width < min.width || default.height < min.height {
            return Err(ConfigError::DefaultBelowMinimum { default, min });
        }
        Ok(())
    }

    /// Offset of the `slot`-th cascaded window from the canvas origin.
    pub(crate) fn cascade_offset(&self, creation_count: usize) -> Point {
        let slot = (creation_count % self.cascade_slots.max(1)) as i32;
        Point {
            x: self
                .cascade_origin
                .x
                .saturating_add(slot.saturating_mul(self.cascade_step.x)),
            y: self
                .cascade_origin
                .y
                .saturating_add(slot.saturating_mul(self.cascade_step.y)),
        }
    }
}
