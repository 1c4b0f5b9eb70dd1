use crate::capture::{Capture, Tool};
use crate::color::Color;
use crate::config::ToolConfig;
use crate::error::AnnotatorError;
use crate::export::{format_report, PageMetrics};
use crate::geometry::{to_page, to_viewport, Point, Scroll, Size};
use crate::hit::hit_test;
use crate::render::{draw_preview, redraw, Surface};
use crate::store::ShapeStore;

const POPUP_WIDTH: f64 = 280.0;
const POPUP_HEIGHT: f64 = 150.0;
const POPUP_MARGIN: f64 = 10.0;
/// Distance from a fresh shape's badge to where its note editor opens.
const NEW_SHAPE_POPUP_OFFSET: f64 = 20.0;

/// Toolbar-controlled settings, threaded into rendering and event handling.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
    pub notes_visible: bool,
    pub palette: Vec<Color>,
}

impl From<ToolConfig> for ToolState {
    fn from(config: ToolConfig) -> Self {
        Self {
            tool: config.tool,
            color: config.color,
            notes_visible: config.notes_visible,
            palette: config.palette,
        }
    }
}

/// Request to open the note editor on a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteTarget {
    pub index: usize,
    pub note: String,
    /// Viewport position for the editor's top-left corner.
    pub popup: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerDown {
    EditNote(NoteTarget),
    Capturing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Escape {
    EditorClosed,
    StopRequested,
}

/// Guards against two overlays running at once. The host owns one of these
/// and hands out at most one live `ToolSession`.
#[derive(Debug, Default)]
pub struct SessionHost {
    active: bool,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self, config: ToolConfig) -> Result<ToolSession, AnnotatorError> {
        if self.active {
            log::warn!("annotator already active");
            return Err(AnnotatorError::AlreadyActive);
        }
        self.active = true;
        log::info!("annotator session started");
        Ok(ToolSession::new(config.into()))
    }

    /// Ends the session. Its shapes are dropped with it.
    pub fn stop(&mut self, session: ToolSession) {
        log::info!(
            "annotator session stopped with {} shapes",
            session.store.len()
        );
        self.active = false;
    }
}

/// One activation of the overlay: the shape store plus the drag and note
/// editor state driven by input events.
#[derive(Debug)]
pub struct ToolSession {
    store: ShapeStore,
    state: ToolState,
    capture: Option<Capture>,
    editing: Option<usize>,
}

impl ToolSession {
    fn new(state: ToolState) -> Self {
        Self {
            store: ShapeStore::new(),
            state,
            capture: None,
            editing: None,
        }
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
    }

    pub fn select_color(&mut self, color: Color) {
        self.state.color = color;
    }

    pub fn select_preset(&mut self, index: usize) -> bool {
        match self.state.palette.get(index) {
            Some(color) => {
                self.state.color = *color;
                true
            }
            None => false,
        }
    }

    pub fn toggle_notes(&mut self) -> bool {
        self.state.notes_visible = !self.state.notes_visible;
        self.state.notes_visible
    }

    /// Clicking an existing shape opens its note; anywhere else starts a drag.
    pub fn pointer_down(&mut self, point: Point, scroll: Scroll, viewport: Size) -> PointerDown {
        if let Some(index) = hit_test(point, scroll, self.store.all()) {
            return match self.open_editor(index, point, viewport) {
                Some(target) => PointerDown::EditNote(target),
                None => PointerDown::Capturing,
            };
        }
        self.capture = Some(Capture::begin(self.state.tool, to_page(point, scroll)));
        PointerDown::Capturing
    }

    /// Returns whether a drag is in progress and the preview needs repainting.
    pub fn pointer_move(&mut self, point: Point, scroll: Scroll) -> bool {
        match &mut self.capture {
            Some(capture) => {
                capture.extend(to_page(point, scroll));
                true
            }
            None => false,
        }
    }

    /// Finishes a drag. A committed shape gets its note editor opened.
    pub fn pointer_up(&mut self, point: Point, scroll: Scroll, viewport: Size) -> Option<NoteTarget> {
        let capture = self.capture.take()?;
        let Some(shape) = capture.finish(to_page(point, scroll), self.state.color) else {
            log::debug!("drag below commit threshold discarded");
            return None;
        };
        let badge = to_viewport(shape.badge_anchor(), scroll);
        let index = self.store.append(shape);
        log::debug!("committed shape {}", index + 1);
        self.open_editor(
            index,
            badge.offset(NEW_SHAPE_POPUP_OFFSET, NEW_SHAPE_POPUP_OFFSET),
            viewport,
        )
    }

    fn open_editor(&mut self, index: usize, at: Point, viewport: Size) -> Option<NoteTarget> {
        let shape = self.store.get(index)?;
        self.editing = Some(index);
        Some(NoteTarget {
            index,
            note: shape.note.clone(),
            popup: note_popup_position(at, viewport),
        })
    }

    pub fn save_note(&mut self, text: &str) -> bool {
        match self.editing.take() {
            Some(index) => self.store.set_note(index, text),
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.editing.take() else {
            return false;
        };
        let removed = self.store.remove_at(index).is_some();
        if removed {
            log::debug!("deleted shape {}", index + 1);
        }
        removed
    }

    pub fn cancel_note(&mut self) {
        self.editing = None;
    }

    pub fn undo(&mut self) -> bool {
        self.store.remove_last().is_some()
    }

    pub fn clear(&mut self) {
        log::debug!("cleared {} shapes", self.store.len());
        self.store.clear();
    }

    /// An open note editor swallows the first escape; otherwise the session
    /// should end.
    pub fn escape(&mut self) -> Escape {
        if self.editing.take().is_some() {
            Escape::EditorClosed
        } else {
            Escape::StopRequested
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, scroll: Scroll) {
        redraw(surface, self.store.all(), scroll, self.state.notes_visible);
        if let Some(capture) = &self.capture {
            draw_preview(surface, capture, self.state.color, scroll);
        }
    }

    pub fn export(&self, metrics: &PageMetrics) -> String {
        format_report(self.store.all(), metrics)
    }
}

/// Places the note editor just below-right of `at`, pulled back inside the
/// viewport when it would overflow.
pub fn note_popup_position(at: Point, viewport: Size) -> Point {
    let mut x = at.x + POPUP_MARGIN;
    let mut y = at.y + POPUP_MARGIN;
    if x + POPUP_WIDTH > viewport.width {
        x = viewport.width - POPUP_WIDTH - POPUP_MARGIN;
    }
    if y + POPUP_HEIGHT > viewport.height {
        y = viewport.height - POPUP_HEIGHT - POPUP_MARGIN;
    }
    Point::new(x, y)
}
