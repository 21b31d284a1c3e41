pub mod floating;

use ratatui::prelude::Rect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Split `area` into the region above the bottom `height` rows and the rows
/// themselves.
pub fn split_bottom(area: Rect, height: u16) -> (Rect, Rect) {
    let bottom_h = height.min(area.height);
    let top = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.saturating_sub(bottom_h),
    };
    let bottom = Rect {
        x: area.x,
        y: area.y.saturating_add(top.height),
        width: area.width,
        height: bottom_h,
    };
    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(rect_contains(r, 2, 3));
        assert!(rect_contains(r, 5, 4));
        assert!(!rect_contains(r, 6, 4));
        assert!(!rect_contains(r, 2, 5));
        assert!(!rect_contains(Rect::default(), 0, 0));
    }

    #[test]
    fn split_bottom_reserves_rows() {
        let (top, bottom) = split_bottom(Rect::new(0, 0, 10, 6), 2);
        assert_eq!(top, Rect::new(0, 0, 10, 4));
        assert_eq!(bottom, Rect::new(0, 4, 10, 2));

        let (top, bottom) = split_bottom(Rect::new(0, 0, 10, 1), 3);
        assert_eq!(top.height, 0);
        assert_eq!(bottom, Rect::new(0, 0, 10, 1));
    }
}
