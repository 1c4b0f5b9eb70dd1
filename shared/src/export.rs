use std::fmt::Write;

use crate::geometry::{round_half_up, Bounds, Size};
use crate::shape::{Geometry, Shape};

pub const REPORT_TITLE: &str = "=== UI Annotations ===";
pub const EMPTY_REPORT_LINE: &str = "No annotations yet.";

/// Where the annotations were made, captured at export time.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMetrics {
    pub url: String,
    pub viewport: Size,
    pub page: Size,
}

/// Plain-text report of every shape in badge order. Pure; delivering the text
/// is up to the caller.
pub fn format_report(shapes: &[Shape], metrics: &PageMetrics) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{REPORT_TITLE}");
    let _ = writeln!(text, "Page: {}", metrics.url);
    let _ = writeln!(
        text,
        "Viewport: {} x {}",
        metrics.viewport.width, metrics.viewport.height
    );
    let _ = writeln!(
        text,
        "Full page: {} x {}",
        metrics.page.width, metrics.page.height
    );
    text.push('\n');

    if shapes.is_empty() {
        let _ = writeln!(text, "{EMPTY_REPORT_LINE}");
        return text;
    }

    for (index, shape) in shapes.iter().enumerate() {
        let _ = write!(text, "[{}] ", index + 1);
        let top = shape.bounds().map(rounded).map(|bounds| {
            let _ = match shape.geometry() {
                Geometry::Rect { .. } => write!(
                    text,
                    "RECT from:({}, {}) to:({}, {})",
                    bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
                ),
                Geometry::Freehand { .. } => write!(
                    text,
                    "FREEHAND area:({}, {}) to ({}, {})",
                    bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
                ),
            };
            bounds.min_y
        });
        if let Some(percent) = top.and_then(|top| page_depth_percent(top, metrics)) {
            let _ = write!(text, " [{percent}% down page]");
        }
        text.push('\n');
        if shape.has_note() {
            let _ = writeln!(text, "    \"{}\"", shape.note);
        }
        text.push('\n');
    }
    text
}

fn rounded(bounds: Bounds) -> Bounds {
    Bounds {
        min_x: round_half_up(bounds.min_x),
        min_y: round_half_up(bounds.min_y),
        max_x: round_half_up(bounds.max_x),
        max_y: round_half_up(bounds.max_y),
    }
}

/// How far down the full page a shape starts, only reported for shapes that
/// begin below the first screenful.
fn page_depth_percent(top: f64, metrics: &PageMetrics) -> Option<f64> {
    if top <= metrics.viewport.height || metrics.page.height <= 0.0 {
        return None;
    }
    Some(round_half_up(top / metrics.page.height * 100.0))
}
