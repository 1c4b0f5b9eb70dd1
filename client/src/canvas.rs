use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use pagemark_shared::{Point, Size, Surface, TextAlign, TextBaseline, TextMeasure, TextStyle};

/// The overlay canvas as a drawing surface. Coordinates are CSS pixels in
/// viewport space.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Invalid 2d context"))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn resize(&self, size: Size) {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
    }

    fn rounded_path(&self, origin: Point, size: Size, radius: f64) {
        let ctx = &self.ctx;
        let right = origin.x + size.width;
        let bottom = origin.y + size.height;
        let radius = radius.min(size.width / 2.0).min(size.height / 2.0).max(0.0);
        ctx.begin_path();
        ctx.move_to(origin.x + radius, origin.y);
        let _ = ctx.arc_to(right, origin.y, right, bottom, radius);
        let _ = ctx.arc_to(right, bottom, origin.x, bottom, radius);
        let _ = ctx.arc_to(origin.x, bottom, origin.x, origin.y, radius);
        let _ = ctx.arc_to(origin.x, origin.y, right, origin.y, radius);
        ctx.close_path();
    }
}

impl TextMeasure for CanvasSurface {
    fn measure_text(&self, text: &str, font: &str) -> f64 {
        self.ctx.set_font(font);
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .unwrap_or(0.0)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_rect(&mut self, origin: Point, size: Size, fill: &str) {
        self.ctx.set_fill_style_str(fill);
        self.ctx
            .fill_rect(origin.x, origin.y, size.width, size.height);
    }

    fn stroke_rect(&mut self, origin: Point, size: Size, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx
            .stroke_rect(origin.x, origin.y, size.width, size.height);
    }

    fn stroke_polyline(&mut self, points: &[Point], color: &str, line_width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(line_width);
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for point in rest {
            ctx.line_to(point.x, point.y);
        }
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(fill);
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    fn fill_rounded_rect(&mut self, origin: Point, size: Size, radius: f64, fill: &str) {
        self.rounded_path(origin, size, radius);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
    }

    fn stroke_rounded_rect(
        &mut self,
        origin: Point,
        size: Size,
        radius: f64,
        color: &str,
        line_width: f64,
    ) {
        self.rounded_path(origin, size, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        let ctx = &self.ctx;
        ctx.set_font(style.font);
        ctx.set_fill_style_str(&style.color);
        ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        ctx.set_text_baseline(match style.baseline {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        });
        let _ = ctx.fill_text(text, position.x, position.y);
    }
}
