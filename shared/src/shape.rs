use crate::color::Color;
use crate::geometry::{Bounds, Point};

/// A rect drag must exceed this many units on both axes to be committed.
pub const MIN_RECT_SIZE: f64 = 5.0;
/// A freehand stroke needs more than this many points to be committed.
pub const MIN_FREEHAND_POINTS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    Freehand {
        points: Vec<Point>,
    },
}

/// One committed annotation. Geometry and color are fixed once created; only
/// the note changes afterwards. All coordinates are page space.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    geometry: Geometry,
    color: Color,
    pub note: String,
}

impl Shape {
    /// Builds a rectangle from two page-space drag corners in any order.
    /// Returns `None` when the drag is below the commit threshold.
    pub fn rect_from_drag(start: Point, end: Point, color: Color) -> Option<Self> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        if !(dx.abs() > MIN_RECT_SIZE && dy.abs() > MIN_RECT_SIZE) {
            return None;
        }
        Some(Self {
            geometry: Geometry::Rect {
                origin: Point::new(start.x.min(end.x), start.y.min(end.y)),
                width: dx.abs(),
                height: dy.abs(),
            },
            color,
            note: String::new(),
        })
    }

    /// Returns `None` unless the stroke has more than two page-space points.
    pub fn freehand(points: Vec<Point>, color: Color) -> Option<Self> {
        if points.len() <= MIN_FREEHAND_POINTS {
            return None;
        }
        Some(Self {
            geometry: Geometry::Freehand { points },
            color,
            note: String::new(),
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    /// Page-space position of the numbered badge.
    pub fn badge_anchor(&self) -> Point {
        match &self.geometry {
            Geometry::Rect { origin, .. } => *origin,
            Geometry::Freehand { points } => points.first().copied().unwrap_or_default(),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match &self.geometry {
            Geometry::Rect {
                origin,
                width,
                height,
            } => Some(Bounds::from_origin(*origin, *width, *height)),
            Geometry::Freehand { points } => Bounds::from_points(points),
        }
    }
}
