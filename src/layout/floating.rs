use ratatui::prelude::Rect;

use crate::constants::MIN_VISIBLE_MARGIN;
use crate::window::{Geometry, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    /// True for handles that drag the window origin along with the edge.
    pub fn moves_origin(self) -> bool {
        self.moves_left() || self.moves_top()
    }

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Which border handle, if any, sits under `(column, row)`.
pub fn edge_at(geometry: Geometry, column: u16, row: u16) -> Option<ResizeEdge> {
    if geometry.size.width < 2 || geometry.size.height < 2 || !geometry.contains(column, row) {
        return None;
    }
    let (col, row) = (column as i32, row as i32);
    let left = col == geometry.position.x;
    let right = col == geometry.right();
    let top = row == geometry.position.y;
    let bottom = row == geometry.bottom();
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Geometry after dragging `edge` by `(dx, dy)` cells from `start`, clamped
/// to `[min, max]`. Origin-moving edges keep the opposite edge anchored when
/// the clamp kicks in.
pub fn apply_resize(
    start: Geometry,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min: Size,
    max: Option<Size>,
) -> Geometry {
    let mut x = start.position.x;
    let mut y = start.position.y;
    let mut width = start.size.width as i32;
    let mut height = start.size.height as i32;

    if edge.moves_left() {
        x = x.saturating_add(dx);
        width -= dx;
    } else if edge.moves_right() {
        width += dx;
    }
    if edge.moves_top() {
        y = y.saturating_add(dy);
        height -= dy;
    } else if edge.moves_bottom() {
        height += dy;
    }

    let max_dim = u16::MAX as i32;
    let requested = Size::new(
        width.clamp(1, max_dim) as u16,
        height.clamp(1, max_dim) as u16,
    );
    let mut size = requested.clamp(min, max);
    size.width = size.width.max(1);
    size.height = size.height.max(1);

    if edge.moves_left() {
        x = x.saturating_add(width - size.width as i32);
    }
    if edge.moves_top() {
        y = y.saturating_add(height - size.height as i32);
    }

    Geometry::new(Point::new(x, y), size)
}

/// Clamp a dragged window origin so at least `MIN_VISIBLE_MARGIN` columns
/// and the title row stay inside `bounds`.
pub fn clamp_drag_position(position: Point, size: Size, bounds: Rect) -> Point {
    let width = size.width as i32;
    let margin = (MIN_VISIBLE_MARGIN as i32).min(width);
    let min_x = bounds.x as i32 - (width - margin);
    let max_x = (bounds.x as i32 + bounds.width as i32 - margin).max(min_x);
    let min_y = bounds.y as i32;
    // the header is the second row of the frame
    let max_y = (bounds.y as i32 + bounds.height as i32 - 2).max(min_y);
    Point::new(
        position.x.clamp(min_x, max_x),
        position.y.clamp(min_y, max_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_MIN: Size = Size::new(1, 1);

    fn geom(x: i32, y: i32, w: u16, h: u16) -> Geometry {
        Geometry::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn resize_top_drag_down() {
        let res = apply_resize(geom(0, 50, 20, 20), ResizeEdge::Top, 0, 5, NO_MIN, None);
        assert_eq!(res, geom(0, 55, 20, 15));
    }

    #[test]
    fn resize_top_drag_up() {
        let res = apply_resize(geom(0, 50, 20, 20), ResizeEdge::Top, 0, -5, NO_MIN, None);
        assert_eq!(res, geom(0, 45, 20, 25));
    }

    #[test]
    fn resize_left_offscreen_preserves_negative_origin() {
        let res = apply_resize(geom(-8, 10, 30, 12), ResizeEdge::Left, 4, 0, NO_MIN, None);
        assert_eq!(res, geom(-4, 10, 26, 12));
    }

    #[test]
    fn resize_left_past_minimum_keeps_right_edge_anchored() {
        let min = Size::new(16, 4);
        let res = apply_resize(geom(10, 0, 20, 10), ResizeEdge::Left, 10, 0, min, None);
        assert_eq!(res.size.width, 16);
        assert_eq!(res.position.x + res.size.width as i32, 30);
    }

    #[test]
    fn resize_bottom_right_respects_maximum() {
        let max = Some(Size::new(40, 12));
        let res = apply_resize(
            geom(5, 5, 20, 10),
            ResizeEdge::BottomRight,
            50,
            50,
            NO_MIN,
            max,
        );
        assert_eq!(res, geom(5, 5, 40, 12));
    }

    #[test]
    fn resize_top_left_past_minimum_anchors_bottom_right() {
        let min = Size::new(10, 5);
        let res = apply_resize(geom(0, 0, 12, 8), ResizeEdge::TopLeft, 6, 6, min, None);
        assert_eq!(res, geom(2, 3, 10, 5));
    }

    #[test]
    fn edge_at_detects_corners_and_sides() {
        let g = geom(2, 2, 10, 5);
        assert_eq!(edge_at(g, 2, 2), Some(ResizeEdge::TopLeft));
        assert_eq!(edge_at(g, 11, 2), Some(ResizeEdge::TopRight));
        assert_eq!(edge_at(g, 2, 6), Some(ResizeEdge::BottomLeft));
        assert_eq!(edge_at(g, 11, 6), Some(ResizeEdge::BottomRight));
        assert_eq!(edge_at(g, 5, 2), Some(ResizeEdge::Top));
        assert_eq!(edge_at(g, 5, 6), Some(ResizeEdge::Bottom));
        assert_eq!(edge_at(g, 2, 4), Some(ResizeEdge::Left));
        assert_eq!(edge_at(g, 11, 4), Some(ResizeEdge::Right));
        assert_eq!(edge_at(g, 5, 4), None);
        assert_eq!(edge_at(g, 20, 4), None);
    }

    #[test]
    fn clamp_drag_keeps_margin_visible() {
        let bounds = Rect::new(0, 0, 80, 20);
        let size = Size::new(20, 6);
        let left = clamp_drag_position(Point::new(-50, 5), size, bounds);
        assert_eq!(left.x, -(20 - MIN_VISIBLE_MARGIN as i32));
        let right = clamp_drag_position(Point::new(200, 5), size, bounds);
        assert_eq!(right.x, 80 - MIN_VISIBLE_MARGIN as i32);
        let up = clamp_drag_position(Point::new(3, -4), size, bounds);
        assert_eq!(up, Point::new(3, 0));
        let down = clamp_drag_position(Point::new(3, 40), size, bounds);
        assert_eq!(down.y, 18);
    }
}
