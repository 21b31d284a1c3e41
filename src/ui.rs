//! UiFrame: a thin wrapper around a `ratatui` buffer that clamps drawing to
//! the visible area.
//!
//! Window geometry is signed and windows may hang off any edge of the
//! canvas, so chrome and content regularly compute rectangles that are only
//! partly on screen. Writing outside the underlying `Buffer` panics; every
//! draw call here is clipped first so painters never need their own bounds
//! checks.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Used by tests
    /// that render into a detached `Buffer`.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area).intersection(self.buffer.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Reset every cell in `rect` to a blank symbol with `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` starting at `(x, y)` if that cell is visible, truncating
    /// at the right edge of both `bounds` and the frame.
    pub fn set_string(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        let Some(bounds) = self.clip_rect(bounds) else {
            return;
        };
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }

    pub fn set_symbol(&mut self, x: u16, y: u16, symbol: &str, style: Style) {
        if !crate::layout::rect_contains(self.area, x, y) {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let text = truncate_to_width(text, max_x.saturating_sub(x) as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    #[test]
    fn set_string_truncates_at_bounds() {
        let area = Rect::new(0, 0, 8, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.set_string(Rect::new(0, 0, 5, 1), 2, 0, "abcdef", Style::default());
        assert_eq!(row(&buf, 0), "  abc   ");
    }

    #[test]
    fn set_string_outside_is_ignored() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        frame.set_string(area, 10, 0, "x", Style::default());
        frame.set_symbol(10, 10, "x", Style::default());
        assert_eq!(row(&buf, 0), "    ");
    }

    #[test]
    fn fill_clips_to_frame() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let style = Style::default().bg(Color::Blue);
        frame.fill(Rect::new(2, 1, 10, 10), style);
        assert_eq!(buf.cell((3, 1)).unwrap().style().bg, Some(Color::Blue));
        assert_ne!(buf.cell((1, 1)).unwrap().style().bg, Some(Color::Blue));
    }

    #[test]
    fn render_widget_stays_inside_frame_area() {
        let full = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(full);
        let mut frame = UiFrame::from_parts(Rect::new(0, 0, 3, 1), &mut buf);
        frame.render_widget(ratatui::widgets::Paragraph::new("abcdef\nghi"), full);
        assert_eq!(row(&buf, 0), "abc   ");
        assert_eq!(row(&buf, 1), "      ");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_to_width("héllo", 3), "hél");
        assert_eq!(truncate_to_width("hi", 3), "hi");
    }
}
