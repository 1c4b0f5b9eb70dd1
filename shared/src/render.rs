use crate::capture::Capture;
use crate::color::Color;
use crate::geometry::{to_viewport, Bounds, Point, Scroll, Size};
use crate::layout::{NoteLayout, TextMeasure, NOTE_FONT};
use crate::shape::{Geometry, Shape};

pub const STROKE_WIDTH: f64 = 3.0;
pub const BADGE_RADIUS: f64 = 12.0;
pub const BADGE_FONT: &str = "bold 12px sans-serif";
pub const MARKER_FONT: &str = "bold 14px sans-serif";
pub const MARKER_GLYPH: &str = "*";
pub const NOTE_BACKGROUND: &str = "rgba(26, 26, 46, 0.95)";
pub const NOTE_TEXT_COLOR: &str = "#e0e0e0";
pub const NOTE_BORDER_WIDTH: f64 = 2.0;
pub const NOTE_CORNER_RADIUS: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Drawing target in viewport space. The browser canvas implements this; the
/// tests use a recorder.
pub trait Surface: TextMeasure {
    fn size(&self) -> Size;
    fn clear(&mut self);
    fn fill_rect(&mut self, origin: Point, size: Size, fill: &str);
    fn stroke_rect(&mut self, origin: Point, size: Size, color: &str, line_width: f64);
    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str);
    fn fill_rounded_rect(&mut self, origin: Point, size: Size, radius: f64, fill: &str);
    fn stroke_rounded_rect(
        &mut self,
        origin: Point,
        size: Size,
        radius: f64,
        color: &str,
        line_width: f64,
    );
    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// Full repaint of every shape at the current scroll offset. Later shapes
/// paint over earlier ones, matching the newest-first order of hit testing.
pub fn redraw<S: Surface + ?Sized>(
    surface: &mut S,
    shapes: &[Shape],
    scroll: Scroll,
    notes_visible: bool,
) {
    surface.clear();
    for (index, shape) in shapes.iter().enumerate() {
        draw_shape(surface, shape, index, scroll, notes_visible);
    }
}

pub fn draw_shape<S: Surface + ?Sized>(
    surface: &mut S,
    shape: &Shape,
    index: usize,
    scroll: Scroll,
    notes_visible: bool,
) {
    let color = shape.color();
    match shape.geometry() {
        Geometry::Rect {
            origin,
            width,
            height,
        } => {
            let view = to_viewport(*origin, scroll);
            if !Bounds::from_origin(view, *width, *height).intersects_surface(surface.size()) {
                return;
            }
            draw_rect_body(surface, view, Size::new(*width, *height), color);
        }
        Geometry::Freehand { points } => {
            draw_stroke_body(surface, points, scroll, color);
        }
    }

    let badge = to_viewport(shape.badge_anchor(), scroll);
    draw_badge(surface, badge, index, color);

    if !shape.has_note() {
        return;
    }
    let text_color = color.contrast_text().to_string();
    surface.fill_text(
        MARKER_GLYPH,
        badge.offset(14.0, -8.0),
        &TextStyle {
            font: MARKER_FONT,
            color: text_color,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        },
    );
    if notes_visible {
        draw_note_callout(surface, &shape.note, badge, color);
    }
}

/// Live preview of an uncommitted drag. Never touches the store.
pub fn draw_preview<S: Surface + ?Sized>(
    surface: &mut S,
    capture: &Capture,
    color: Color,
    scroll: Scroll,
) {
    match capture {
        Capture::Rect { start, current } => {
            let a = to_viewport(*start, scroll);
            let b = to_viewport(*current, scroll);
            let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
            let size = Size::new((b.x - a.x).abs(), (b.y - a.y).abs());
            draw_rect_body(surface, origin, size, color);
        }
        Capture::Freehand { points } => draw_stroke_body(surface, points, scroll, color),
    }
}

fn draw_rect_body<S: Surface + ?Sized>(surface: &mut S, origin: Point, size: Size, color: Color) {
    surface.fill_rect(origin, size, &color.fill_style());
    surface.stroke_rect(origin, size, &color.to_string(), STROKE_WIDTH);
}

fn draw_stroke_body<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    scroll: Scroll,
    color: Color,
) {
    if points.len() < 2 {
        return;
    }
    let view: Vec<Point> = points
        .iter()
        .map(|point| to_viewport(*point, scroll))
        .collect();
    surface.stroke_polyline(&view, &color.to_string(), STROKE_WIDTH);
}

fn draw_badge<S: Surface + ?Sized>(surface: &mut S, center: Point, index: usize, color: Color) {
    surface.fill_circle(center, BADGE_RADIUS, &color.to_string());
    surface.fill_text(
        &(index + 1).to_string(),
        center,
        &TextStyle {
            font: BADGE_FONT,
            color: color.contrast_text().to_string(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        },
    );
}

fn draw_note_callout<S: Surface + ?Sized>(surface: &mut S, note: &str, badge: Point, color: Color) {
    let layout = NoteLayout::compute(note, badge, &*surface);
    let size = Size::new(layout.width, layout.height);
    surface.fill_rounded_rect(layout.origin, size, NOTE_CORNER_RADIUS, NOTE_BACKGROUND);
    surface.stroke_rounded_rect(
        layout.origin,
        size,
        NOTE_CORNER_RADIUS,
        &color.to_string(),
        NOTE_BORDER_WIDTH,
    );
    let style = TextStyle {
        font: NOTE_FONT,
        color: NOTE_TEXT_COLOR.to_string(),
        align: TextAlign::Left,
        baseline: TextBaseline::Top,
    };
    for (line, position) in layout.line_positions() {
        surface.fill_text(line, position, &style);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::tests::FixedAdvance;
    use crate::layout::{NOTE_MAX_WIDTH, NOTE_PADDING};
    use crate::store::ShapeStore;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Op {
        Clear,
        FillRect(Point, Size, String),
        StrokeRect(Point, Size, String),
        Polyline(Vec<Point>, String),
        Circle(Point, String),
        RoundedFill(Point, Size),
        RoundedStroke(Point, Size, String),
        Text(String, Point, TextStyle),
    }

    pub(crate) struct Recorder {
        pub size: Size,
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self {
                size: Size::new(800.0, 600.0),
                ops: Vec::new(),
            }
        }

        pub fn badges(&self) -> Vec<Point> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Circle(center, _) => Some(*center),
                    _ => None,
                })
                .collect()
        }

        pub fn texts_in(&self, font: &str) -> Vec<(String, Point)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, at, style) if style.font == font => Some((text.clone(), *at)),
                    _ => None,
                })
                .collect()
        }
    }

    impl TextMeasure for Recorder {
        fn measure_text(&self, text: &str, font: &str) -> f64 {
            FixedAdvance.measure_text(text, font)
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> Size {
            self.size
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, origin: Point, size: Size, fill: &str) {
            self.ops.push(Op::FillRect(origin, size, fill.to_string()));
        }

        fn stroke_rect(&mut self, origin: Point, size: Size, color: &str, _line_width: f64) {
            self.ops.push(Op::StrokeRect(origin, size, color.to_string()));
        }

        fn stroke_polyline(&mut self, points: &[Point], color: &str, _line_width: f64) {
            self.ops.push(Op::Polyline(points.to_vec(), color.to_string()));
        }

        fn fill_circle(&mut self, center: Point, _radius: f64, fill: &str) {
            self.ops.push(Op::Circle(center, fill.to_string()));
        }

        fn fill_rounded_rect(&mut self, origin: Point, size: Size, _radius: f64, _fill: &str) {
            self.ops.push(Op::RoundedFill(origin, size));
        }

        fn stroke_rounded_rect(
            &mut self,
            origin: Point,
            size: Size,
            _radius: f64,
            color: &str,
            _line_width: f64,
        ) {
            self.ops
                .push(Op::RoundedStroke(origin, size, color.to_string()));
        }

        fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle) {
            self.ops
                .push(Op::Text(text.to_string(), position, style.clone()));
        }
    }

    fn red() -> Color {
        "#ff0000".parse().unwrap()
    }

    fn sample_rect() -> Shape {
        Shape::rect_from_drag(Point::new(100.0, 100.0), Point::new(150.0, 140.0), red()).unwrap()
    }

    #[test]
    fn badge_follows_scroll_without_touching_the_store() {
        let mut store = ShapeStore::new();
        store.append(sample_rect());
        let before = store.all().to_vec();

        let mut surface = Recorder::new();
        redraw(&mut surface, store.all(), Scroll::new(0.0, 0.0), true);
        assert_eq!(surface.badges(), vec![Point::new(100.0, 100.0)]);

        let mut surface = Recorder::new();
        redraw(&mut surface, store.all(), Scroll::new(0.0, 50.0), true);
        assert_eq!(surface.badges(), vec![Point::new(100.0, 50.0)]);
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn rect_draws_translucent_fill_and_outline() {
        let mut surface = Recorder::new();
        redraw(&mut surface, &[sample_rect()], Scroll::default(), true);
        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(
            surface.ops[1],
            Op::FillRect(Point::new(100.0, 100.0), Size::new(50.0, 40.0), "#ff000020".into())
        );
        assert_eq!(
            surface.ops[2],
            Op::StrokeRect(Point::new(100.0, 100.0), Size::new(50.0, 40.0), "#ff0000".into())
        );
        let labels = surface.texts_in(BADGE_FONT);
        assert_eq!(labels, vec![("1".to_string(), Point::new(100.0, 100.0))]);
    }

    #[test]
    fn redraw_is_idempotent() {
        let shapes = vec![sample_rect()];
        let mut first = Recorder::new();
        redraw(&mut first, &shapes, Scroll::new(3.0, 7.0), true);
        let mut second = Recorder::new();
        redraw(&mut second, &shapes, Scroll::new(3.0, 7.0), true);
        redraw(&mut second, &shapes, Scroll::new(3.0, 7.0), true);
        let repeat = second.ops.split_off(first.ops.len());
        assert_eq!(first.ops, repeat);
    }

    #[test]
    fn offscreen_rects_are_culled_but_strokes_are_not() {
        let stroke = Shape::freehand(
            vec![
                Point::new(10.0, 2000.0),
                Point::new(20.0, 2010.0),
                Point::new(30.0, 2000.0),
            ],
            red(),
        )
        .unwrap();
        let shapes = vec![sample_rect(), stroke];
        let mut surface = Recorder::new();
        redraw(&mut surface, &shapes, Scroll::new(0.0, 1000.0), true);
        assert_eq!(surface.badges(), vec![Point::new(10.0, 1000.0)]);
        assert!(surface
            .ops
            .iter()
            .any(|op| matches!(op, Op::Polyline(points, _) if points[0] == Point::new(10.0, 1000.0))));
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::FillRect(..))));
        assert_eq!(surface.texts_in(BADGE_FONT)[0].0, "2");
    }

    #[test]
    fn badge_text_contrasts_with_fill() {
        let white = Shape::rect_from_drag(
            Point::new(0.0, 0.0),
            Point::new(20.0, 20.0),
            Color::WHITE,
        )
        .unwrap();
        let mut surface = Recorder::new();
        redraw(&mut surface, &[white, sample_rect()], Scroll::default(), false);
        let colors: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, style) if style.font == BADGE_FONT => Some(style.color.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec!["#000000".to_string(), "#ffffff".to_string()]);
    }

    #[test]
    fn note_callout_wraps_when_visible() {
        let mut store = ShapeStore::new();
        store.append(sample_rect());
        store.set_note(0, "hello world this is a long note that must wrap");

        let mut surface = Recorder::new();
        redraw(&mut surface, store.all(), Scroll::default(), true);
        let lines = surface.texts_in(NOTE_FONT);
        assert!(lines.len() >= 2);
        for (line, _) in &lines {
            assert!(surface.measure_text(line, NOTE_FONT) <= NOTE_MAX_WIDTH - NOTE_PADDING * 2.0);
        }
        assert_eq!(surface.texts_in(MARKER_FONT).len(), 1);
        assert!(surface
            .ops
            .iter()
            .any(|op| matches!(op, Op::RoundedStroke(origin, _, color) if *origin == Point::new(125.0, 100.0) && color == "#ff0000")));
    }

    #[test]
    fn hidden_notes_keep_the_marker_only() {
        let mut store = ShapeStore::new();
        store.append(sample_rect());
        store.set_note(0, "short");
        let mut surface = Recorder::new();
        redraw(&mut surface, store.all(), Scroll::default(), false);
        assert_eq!(surface.texts_in(MARKER_FONT).len(), 1);
        assert!(surface.texts_in(NOTE_FONT).is_empty());
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::RoundedFill(..))));
    }

    #[test]
    fn shapes_without_notes_have_no_marker() {
        let mut surface = Recorder::new();
        redraw(&mut surface, &[sample_rect()], Scroll::default(), true);
        assert!(surface.texts_in(MARKER_FONT).is_empty());
    }

    #[test]
    fn preview_normalizes_backwards_drags() {
        let mut capture = Capture::begin(crate::capture::Tool::Rect, Point::new(200.0, 250.0));
        capture.extend(Point::new(150.0, 200.0));
        let mut surface = Recorder::new();
        draw_preview(&mut surface, &capture, red(), Scroll::new(0.0, 100.0));
        assert_eq!(
            surface.ops[0],
            Op::FillRect(Point::new(150.0, 100.0), Size::new(50.0, 50.0), "#ff000020".into())
        );
        assert!(surface.badges().is_empty());
    }

    #[test]
    fn single_point_preview_draws_nothing() {
        let capture = Capture::begin(crate::capture::Tool::Freehand, Point::new(5.0, 5.0));
        let mut surface = Recorder::new();
        draw_preview(&mut surface, &capture, red(), Scroll::default());
        assert!(surface.ops.is_empty());
    }
}
