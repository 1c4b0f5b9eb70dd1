mod capture;
mod color;
mod config;
mod error;
mod export;
mod geometry;
mod hit;
mod layout;
mod render;
mod session;
mod shape;
mod store;

pub use capture::{Capture, Tool};
pub use color::{default_palette, Color, DEFAULT_PALETTE, FILL_ALPHA_SUFFIX};
pub use config::ToolConfig;
pub use error::AnnotatorError;
pub use export::{format_report, PageMetrics, EMPTY_REPORT_LINE, REPORT_TITLE};
pub use geometry::{round_half_up, to_page, to_viewport, Bounds, Point, Scroll, Size};
pub use hit::{hit_test, shape_contains, FREEHAND_RADIUS, RECT_TOLERANCE};
pub use layout::{wrap_words, NoteLayout, TextMeasure, NOTE_FONT, NOTE_MAX_WIDTH};
pub use render::{draw_preview, draw_shape, redraw, Surface, TextAlign, TextBaseline, TextStyle};
pub use session::{
    note_popup_position, Escape, NoteTarget, PointerDown, SessionHost, ToolSession, ToolState,
};
pub use shape::{Geometry, Shape, MIN_FREEHAND_POINTS, MIN_RECT_SIZE};
pub use store::ShapeStore;
