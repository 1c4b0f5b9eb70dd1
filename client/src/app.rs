use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, KeyboardEvent, PointerEvent, Window};

use pagemark_shared::{
    Color, Escape, NoteTarget, PointerDown, SessionHost, Tool, ToolConfig, ToolSession,
};

use crate::canvas::CanvasSurface;
use crate::dom::{create_overlay, event_point, page_metrics, scroll, viewport_size};
use crate::logging;

thread_local! {
    static HOST: RefCell<SessionHost> = RefCell::new(SessionHost::new());
}

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A DOM listener plus the closure backing it. Dropping it detaches the
/// listener and frees the closure.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback: &Function = self.closure.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, callback);
    }
}

/// Everything that lives for one activation. Dropped on close.
struct Overlay {
    window: Window,
    document: Document,
    surface: CanvasSurface,
    session: ToolSession,
    listeners: Vec<Listener>,
    on_note_edit: Option<Function>,
    on_note_close: Option<Function>,
    on_close: Option<Function>,
}

impl Overlay {
    fn render(&mut self) {
        let scroll = scroll(&self.window);
        self.session.render(&mut self.surface, scroll);
    }

    fn teardown(self) {
        drop(self.listeners);
        self.surface.canvas().remove();
        HOST.with(|host| host.borrow_mut().stop(self.session));
    }
}

type Slot = Rc<RefCell<Option<Overlay>>>;

fn with_overlay<T>(slot: &Slot, f: impl FnOnce(&mut Overlay) -> T) -> Option<T> {
    let mut guard = slot.borrow_mut();
    guard.as_mut().map(f)
}

/// Calls the note editor outside of any borrow so it may call straight back
/// into the annotator.
fn open_note_editor(callback: Option<Function>, target: NoteTarget) {
    let Some(callback) = callback else {
        return;
    };
    let args = Array::of4(
        &JsValue::from(target.index as u32),
        &JsValue::from_str(&target.note),
        &JsValue::from(target.popup.x),
        &JsValue::from(target.popup.y),
    );
    if let Err(error) = callback.apply(&JsValue::NULL, &args) {
        log::error!("note editor callback threw: {error:?}");
    }
}

fn close_note_editor(callback: Option<Function>) {
    let Some(callback) = callback else {
        return;
    };
    if let Err(error) = callback.call0(&JsValue::NULL) {
        log::error!("note close callback threw: {error:?}");
    }
}

fn close(slot: &Slot) {
    let Some(overlay) = slot.borrow_mut().take() else {
        return;
    };
    let on_close = overlay.on_close.clone();
    overlay.teardown();
    if let Some(callback) = on_close {
        if let Err(error) = callback.call0(&JsValue::NULL) {
            log::error!("close callback threw: {error:?}");
        }
    }
}

fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(E) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        handler(event.unchecked_into::<E>())
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

fn install_listeners(
    slot: &Slot,
    window: &Window,
    document: &Document,
    canvas: &EventTarget,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    let down_slot = slot.clone();
    listeners.push(listen(canvas, "pointerdown", move |event: PointerEvent| {
        let outcome = with_overlay(&down_slot, |overlay| {
            let window = &overlay.window;
            let down = overlay.session.pointer_down(
                event_point(&event),
                scroll(window),
                viewport_size(window),
            );
            (down, overlay.on_note_edit.clone())
        });
        if let Some((PointerDown::EditNote(target), callback)) = outcome {
            open_note_editor(callback, target);
        }
    })?);

    let move_slot = slot.clone();
    listeners.push(listen(canvas, "pointermove", move |event: PointerEvent| {
        with_overlay(&move_slot, |overlay| {
            let scroll = scroll(&overlay.window);
            if overlay.session.pointer_move(event_point(&event), scroll) {
                overlay.render();
            }
        });
    })?);

    let up_slot = slot.clone();
    listeners.push(listen(canvas, "pointerup", move |event: PointerEvent| {
        let outcome = with_overlay(&up_slot, |overlay| {
            if !overlay.session.is_capturing() {
                return None;
            }
            let window = &overlay.window;
            let committed = overlay.session.pointer_up(
                event_point(&event),
                scroll(window),
                viewport_size(window),
            );
            overlay.render();
            committed.map(|target| (target, overlay.on_note_edit.clone()))
        });
        if let Some(Some((target, callback))) = outcome {
            open_note_editor(callback, target);
        }
    })?);

    let scroll_slot = slot.clone();
    listeners.push(listen(window, "scroll", move |_: web_sys::Event| {
        with_overlay(&scroll_slot, Overlay::render);
    })?);

    let resize_slot = slot.clone();
    listeners.push(listen(window, "resize", move |_: web_sys::Event| {
        with_overlay(&resize_slot, |overlay| {
            overlay.surface.resize(viewport_size(&overlay.window));
            overlay.render();
        });
    })?);

    let key_slot = slot.clone();
    listeners.push(listen(document, "keydown", move |event: KeyboardEvent| {
        if event.key() != "Escape" {
            return;
        }
        let escape = with_overlay(&key_slot, |overlay| {
            (overlay.session.escape(), overlay.on_note_close.clone())
        });
        match escape {
            Some((Escape::EditorClosed, callback)) => close_note_editor(callback),
            Some((Escape::StopRequested, _)) => close(&key_slot),
            None => {}
        }
    })?);

    Ok(listeners)
}

/// Handle given to the host page. The toolbar, note editor and clipboard glue
/// drive the overlay through these methods.
#[wasm_bindgen]
pub struct Annotator {
    slot: Slot,
}

#[wasm_bindgen]
impl Annotator {
    /// Activates the overlay. `config` is optional JSON; fails if an overlay
    /// is already active on this page.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Annotator, JsValue> {
        logging::init(log::LevelFilter::Debug);

        let config =
            ToolConfig::from_json(config.as_deref().unwrap_or_default()).map_err(|error| {
                log::warn!("{error}");
                js_error(error)
            })?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Missing document"))?;

        let session = HOST.with(|host| host.borrow_mut().start(config)).map_err(js_error)?;
        let canvas = match create_overlay(&window, &document) {
            Ok(canvas) => canvas,
            Err(error) => {
                HOST.with(|host| host.borrow_mut().stop(session));
                return Err(error);
            }
        };
        let surface = match CanvasSurface::new(canvas.clone()) {
            Ok(surface) => surface,
            Err(error) => {
                canvas.remove();
                HOST.with(|host| host.borrow_mut().stop(session));
                return Err(error);
            }
        };

        let slot: Slot = Rc::new(RefCell::new(Some(Overlay {
            window: window.clone(),
            document: document.clone(),
            surface,
            session,
            listeners: Vec::new(),
            on_note_edit: None,
            on_note_close: None,
            on_close: None,
        })));

        match install_listeners(&slot, &window, &document, canvas.as_ref()) {
            Ok(listeners) => {
                with_overlay(&slot, |overlay| {
                    overlay.listeners = listeners;
                    overlay.render();
                });
            }
            Err(error) => {
                close(&slot);
                return Err(error);
            }
        }
        log::info!("Annotator ready! Click and drag to draw.");
        Ok(Annotator { slot })
    }

    /// `callback(index, note, x, y)` is called whenever the note editor
    /// should open. `index` is zero-based; the badge shows `index + 1`.
    #[wasm_bindgen(js_name = onNoteEdit)]
    pub fn on_note_edit(&self, callback: Function) {
        with_overlay(&self.slot, |overlay| overlay.on_note_edit = Some(callback));
    }

    /// `callback()` is called when the overlay dismisses the note editor on
    /// its own, e.g. on Escape. Saves made after that are ignored.
    #[wasm_bindgen(js_name = onNoteClose)]
    pub fn on_note_close(&self, callback: Function) {
        with_overlay(&self.slot, |overlay| overlay.on_note_close = Some(callback));
    }

    #[wasm_bindgen(js_name = onClose)]
    pub fn on_close(&self, callback: Function) {
        with_overlay(&self.slot, |overlay| overlay.on_close = Some(callback));
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) -> Result<(), JsValue> {
        let tool: Tool = name.parse().map_err(js_error)?;
        with_overlay(&self.slot, |overlay| overlay.session.select_tool(tool));
        Ok(())
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, hex: &str) -> Result<(), JsValue> {
        let color: Color = hex.parse().map_err(js_error)?;
        with_overlay(&self.slot, |overlay| overlay.session.select_color(color));
        Ok(())
    }

    #[wasm_bindgen(js_name = selectPreset)]
    pub fn select_preset(&self, index: usize) -> bool {
        with_overlay(&self.slot, |overlay| overlay.session.select_preset(index)).unwrap_or(false)
    }

    pub fn palette(&self) -> Array {
        let palette = Array::new();
        with_overlay(&self.slot, |overlay| {
            for color in &overlay.session.state().palette {
                palette.push(&JsValue::from_str(&color.to_string()));
            }
        });
        palette
    }

    pub fn color(&self) -> Option<String> {
        with_overlay(&self.slot, |overlay| overlay.session.state().color.to_string())
    }

    /// Flips note callouts on or off and returns the new setting.
    #[wasm_bindgen(js_name = toggleNotes)]
    pub fn toggle_notes(&self) -> bool {
        with_overlay(&self.slot, |overlay| {
            let visible = overlay.session.toggle_notes();
            overlay.render();
            visible
        })
        .unwrap_or(false)
    }

    pub fn undo(&self) {
        with_overlay(&self.slot, |overlay| {
            if overlay.session.undo() {
                overlay.render();
            }
        });
    }

    pub fn clear(&self) {
        with_overlay(&self.slot, |overlay| {
            overlay.session.clear();
            overlay.render();
        });
    }

    #[wasm_bindgen(js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        with_overlay(&self.slot, |overlay| overlay.session.store().len()).unwrap_or(0)
    }

    /// Text report for the clipboard. Does not change any state.
    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> Option<String> {
        with_overlay(&self.slot, |overlay| {
            let metrics = page_metrics(&overlay.window, &overlay.document);
            overlay.session.export(&metrics)
        })
    }

    #[wasm_bindgen(js_name = saveNote)]
    pub fn save_note(&self, text: &str) {
        with_overlay(&self.slot, |overlay| {
            if overlay.session.save_note(text) {
                overlay.render();
            }
        });
    }

    #[wasm_bindgen(js_name = deleteNote)]
    pub fn delete_note(&self) {
        with_overlay(&self.slot, |overlay| {
            if overlay.session.delete_selected() {
                overlay.render();
            }
        });
    }

    #[wasm_bindgen(js_name = cancelNote)]
    pub fn cancel_note(&self) {
        with_overlay(&self.slot, |overlay| overlay.session.cancel_note());
    }

    pub fn close(&self) {
        close(&self.slot);
    }
}
