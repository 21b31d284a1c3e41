use std::fmt;

/// Window-management commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NewWindow,
    CloseWindow,
    MinimizeWindow,
    MaximizeWindow,
    // restores the rightmost taskbar entry
    RestoreWindow,
    FocusNext,
    FocusPrev,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::NewWindow => "New window",
            Action::CloseWindow => "Close window",
            Action::MinimizeWindow => "Minimize window",
            Action::MaximizeWindow => "Maximize / restore window",
            Action::RestoreWindow => "Restore last minimized",
            Action::FocusNext => "Focus next (Tab)",
            Action::FocusPrev => "Focus previous (BackTab)",
        };
        write!(f, "{}", s)
    }
}
