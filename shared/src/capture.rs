use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::AnnotatorError;
use crate::geometry::Point;
use crate::shape::Shape;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Rect,
    Freehand,
}

impl FromStr for Tool {
    type Err = AnnotatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rect" => Ok(Tool::Rect),
            "freehand" => Ok(Tool::Freehand),
            other => Err(AnnotatorError::InvalidTool(other.to_string())),
        }
    }
}

/// In-progress drag. Points are converted to page space as they arrive, so
/// scrolling mid-drag does not shift what has already been captured.
#[derive(Clone, Debug, PartialEq)]
pub enum Capture {
    Rect { start: Point, current: Point },
    Freehand { points: Vec<Point> },
}

impl Capture {
    pub fn begin(tool: Tool, start: Point) -> Self {
        match tool {
            Tool::Rect => Capture::Rect {
                start,
                current: start,
            },
            Tool::Freehand => Capture::Freehand {
                points: vec![start],
            },
        }
    }

    pub fn extend(&mut self, point: Point) {
        match self {
            Capture::Rect { current, .. } => *current = point,
            Capture::Freehand { points } => points.push(point),
        }
    }

    /// Ends the drag at `end`. Returns `None` when the drag stays under the
    /// commit threshold; the capture is discarded either way.
    pub fn finish(self, end: Point, color: Color) -> Option<Shape> {
        match self {
            Capture::Rect { start, .. } => Shape::rect_from_drag(start, end, color),
            Capture::Freehand { points } => Shape::freehand(points, color),
        }
    }
}
