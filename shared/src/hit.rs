use crate::geometry::{to_page, Bounds, Point, Scroll};
use crate::shape::{Geometry, Shape};

/// Margin added around rectangles so edge clicks still register.
pub const RECT_TOLERANCE: f64 = 5.0;
/// Distance from any sampled stroke point that counts as a freehand hit.
pub const FREEHAND_RADIUS: f64 = 10.0;

/// Index of the topmost shape under a viewport point, scanning newest first.
pub fn hit_test(point: Point, scroll: Scroll, shapes: &[Shape]) -> Option<usize> {
    let page = to_page(point, scroll);
    shapes
        .iter()
        .rposition(|shape| shape_contains(shape, page))
}

/// Page-space containment. Freehand strokes only test the sampled points, so
/// the gaps between points of a fast stroke are not hittable.
pub fn shape_contains(shape: &Shape, page: Point) -> bool {
    match shape.geometry() {
        Geometry::Rect {
            origin,
            width,
            height,
        } => Bounds::from_origin(*origin, *width, *height)
            .expand(RECT_TOLERANCE)
            .contains(page),
        Geometry::Freehand { points } => {
            let radius_squared = FREEHAND_RADIUS * FREEHAND_RADIUS;
            points
                .iter()
                .any(|point| point.distance_squared(page) <= radius_squared)
        }
    }
}
