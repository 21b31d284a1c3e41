//! Shared crate-wide constants.

use std::time::Duration;

use crate::window::{Point, Size};

/// Minimum number of visible cells a dragged window must keep within the
/// canvas so the user can grab its chrome again.
pub const MIN_VISIBLE_MARGIN: u16 = 4;

/// Offset from the canvas origin of the first cascaded window.
pub const CASCADE_ORIGIN: Point = Point { x: 4, y: 2 };

/// Offset added per cascade slot so new windows don't open exactly on top of
/// each other.
///
/// Units: terminal cells. Rows are roughly twice as tall as columns, hence
/// the uneven step.
pub const CASCADE_STEP: Point = Point { x: 4, y: 2 };

/// Number of cascade slots before the default position wraps back to
/// `CASCADE_ORIGIN`.
pub const CASCADE_SLOTS: usize = 8;

/// Size given to windows opened without an explicit size.
pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 48,
    height: 14,
};

/// Smallest size a window can be resized to unless the caller supplies its
/// own minimum. Border, header and a single content row need 4 rows.
pub const DEFAULT_MIN_SIZE: Size = Size {
    width: 16,
    height: 4,
};

/// Rows reserved at the bottom of the canvas for the taskbar. Maximized
/// windows never cover them.
pub const TASKBAR_HEIGHT: u16 = 1;

/// First z-index handed out by a fresh registry.
pub const BASE_Z_INDEX: u64 = 1;

/// Two presses on the same title bar within this interval toggle maximize.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);
