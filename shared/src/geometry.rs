/// A position in either page space or viewport space. Which one is decided by
/// the caller; persisted shapes only ever hold page-space points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Document scroll offset. Read from the host at every call site, never cached.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scroll {
    pub x: f64,
    pub y: f64,
}

impl Scroll {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub fn to_page(viewport: Point, scroll: Scroll) -> Point {
    Point {
        x: viewport.x + scroll.x,
        y: viewport.y + scroll.y,
    }
}

pub fn to_viewport(page: Point, scroll: Scroll) -> Point {
    Point {
        x: page.x - scroll.x,
        y: page.y - scroll.y,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x + width,
            max_y: origin.y + height,
        }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for point in &points[1..] {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);
        }
        Some(bounds)
    }

    pub fn expand(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// True when any part of the box falls on a surface of `size` anchored at
    /// the origin. Touching an edge counts as visible.
    pub fn intersects_surface(&self, size: Size) -> bool {
        !(self.max_x < 0.0 || self.min_x > size.width || self.max_y < 0.0 || self.min_y > size.height)
    }
}

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_viewport_round_trip() {
        let scrolls = [
            Scroll::new(0.0, 0.0),
            Scroll::new(0.0, 50.0),
            Scroll::new(120.5, 3000.0),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(-4.25, 812.0),
        ];
        for scroll in scrolls {
            for point in points {
                assert_eq!(to_viewport(to_page(point, scroll), scroll), point);
            }
        }
    }

    #[test]
    fn to_page_adds_scroll() {
        let page = to_page(Point::new(10.0, 20.0), Scroll::new(5.0, 50.0));
        assert_eq!(page, Point::new(15.0, 70.0));
    }

    #[test]
    fn bounds_from_points_tracks_each_axis() {
        let bounds = Bounds::from_points(&[
            Point::new(30.0, 5.0),
            Point::new(10.0, 40.0),
            Point::new(20.0, -2.0),
        ])
        .unwrap();
        assert_eq!(bounds.min_x, 10.0);
        assert_eq!(bounds.max_x, 30.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 40.0);
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn surface_intersection() {
        let size = Size::new(800.0, 600.0);
        assert!(Bounds::from_origin(Point::new(-40.0, 10.0), 50.0, 50.0).intersects_surface(size));
        assert!(!Bounds::from_origin(Point::new(-60.0, 10.0), 50.0, 50.0).intersects_surface(size));
        assert!(!Bounds::from_origin(Point::new(10.0, 601.0), 50.0, 50.0).intersects_surface(size));
        assert!(Bounds::from_origin(Point::new(800.0, 600.0), 5.0, 5.0).intersects_surface(size));
    }

    #[test]
    fn rounding_goes_up_on_halves() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }
}
