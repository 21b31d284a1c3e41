use std::fmt;

use ratatui::style::Style;

use crate::frame::{FrameChrome, FrameControl};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::Geometry;

/// Paints window chrome. Frames are painted bottom to top, so a decorator
/// only has to cover its own window's cells.
pub trait WindowDecorator: fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        chrome: &FrameChrome,
        label: &str,
        focused: bool,
        maximized: bool,
    );
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDecorator;

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        chrome: &FrameChrome,
        label: &str,
        focused: bool,
        maximized: bool,
    ) {
        let outer = chrome.outer;
        if outer.size.width < 2 || outer.size.height < 2 {
            return;
        }
        let visible = outer.visible_rect(frame.area());
        frame.fill(visible, Style::default().bg(theme::window_bg()));

        let border_style = Style::default().fg(if focused {
            theme::border_focused_fg()
        } else {
            theme::border_fg()
        });
        let left = outer.position.x;
        let top = outer.position.y;
        let right = outer.right();
        let bottom = outer.bottom();

        for x in left..=right {
            let (top_sym, bottom_sym) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(frame, x, top, top_sym, border_style);
            put(frame, x, bottom, bottom_sym, border_style);
        }
        for y in top.saturating_add(1)..bottom {
            put(frame, left, y, "│", border_style);
            put(frame, right, y, "│", border_style);
        }

        // Header: title centered in the space left of the controls
        let header_style = theme::header_style(focused);
        let header_y = top.saturating_add(1);
        if header_y < bottom {
            for x in left.saturating_add(1)..right {
                put(frame, x, header_y, " ", header_style);
            }
            paint_centered(frame, chrome.title, label, header_style);
        }

        let control_style = theme::control_style(focused);
        for (control, rect) in chrome.controls() {
            let glyph = match control {
                FrameControl::Minimize => " _ ",
                FrameControl::Maximize if maximized => " ❐ ",
                FrameControl::Maximize => " □ ",
                FrameControl::Close => " × ",
            };
            for (idx, ch) in glyph.chars().enumerate() {
                put(
                    frame,
                    rect.position.x.saturating_add(idx as i32),
                    rect.position.y,
                    &ch.to_string(),
                    control_style,
                );
            }
        }
    }
}

fn paint_centered(frame: &mut UiFrame<'_>, area: Geometry, text: &str, style: Style) {
    let width = area.size.width as usize;
    if width == 0 {
        return;
    }
    let len = text.chars().count();
    let (text, len): (String, usize) = if len > width {
        if width > 1 {
            let mut clipped: String = text.chars().take(width - 1).collect();
            clipped.push('…');
            (clipped, width)
        } else {
            (text.chars().take(width).collect(), width)
        }
    } else {
        (text.to_string(), len)
    };
    let start = area.position.x.saturating_add(((width - len) / 2) as i32);
    for (idx, ch) in text.chars().enumerate() {
        put(
            frame,
            start.saturating_add(idx as i32),
            area.position.y,
            &ch.to_string(),
            style,
        );
    }
}

fn put(frame: &mut UiFrame<'_>, x: i32, y: i32, symbol: &str, style: Style) {
    if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
        return;
    }
    frame.set_symbol(x as u16, y as u16, symbol, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Point, Size};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn renders_border_title_and_controls() {
        let area = Rect::new(0, 0, 24, 6);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let chrome = FrameChrome::new(Geometry::new(Point::new(0, 0), Size::new(24, 5)));
        DefaultDecorator.render_window(&mut ui, &chrome, "Notes", true, false);

        assert_eq!(row(&buf, 0), format!("┌{}┐", "─".repeat(22)));
        let header = row(&buf, 1);
        assert!(header.contains("Notes"));
        assert!(header.ends_with(" _  □  × │"));
        assert_eq!(row(&buf, 4), format!("└{}┘", "─".repeat(22)));
    }

    #[test]
    fn maximized_shows_restore_glyph() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let chrome = FrameChrome::new(Geometry::new(Point::new(0, 0), Size::new(20, 4)));
        DefaultDecorator.render_window(&mut ui, &chrome, "x", false, true);
        assert!(row(&buf, 1).contains('❐'));
    }

    #[test]
    fn partially_offscreen_window_is_clipped() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        let chrome = FrameChrome::new(Geometry::new(Point::new(-5, -1), Size::new(12, 4)));
        DefaultDecorator.render_window(&mut ui, &chrome, "Offscreen", false, false);
        // the header row lands on screen row 0, the bottom border on row 2
        assert_eq!(row(&buf, 2).chars().nth(6), Some('┘'));
    }
}
