use ratatui::style::{Color, Modifier, Style};

// Centralized theme colors. Painters only go through these helpers so a
// palette change stays in one place.

pub fn desktop_bg() -> Color {
    Color::Black
}

pub fn window_bg() -> Color {
    Color::Reset
}

pub fn border_fg() -> Color {
    Color::DarkGray
}

pub fn border_focused_fg() -> Color {
    Color::Gray
}

pub fn header_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn control_style(focused: bool) -> Style {
    header_style(focused).remove_modifier(Modifier::BOLD)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}

pub fn taskbar_fg() -> Color {
    Color::White
}

pub fn taskbar_entry_style() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn taskbar_close_style() -> Style {
    Style::default()
        .bg(Color::Gray)
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

// Gesture feedback
pub fn preview_fg() -> Color {
    Color::Yellow
}
