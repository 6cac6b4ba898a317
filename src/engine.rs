use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Size, stepped_scale};
use crate::config::EngineConfig;
use crate::doc::{CanvasElement, ElementId, ElementKind, ElementStore, PartialElement};
use crate::error::CanvasError;
use crate::hit::{Hit, HitPart, hit_test};
use crate::input::{Button, ElementState, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::minimap::{MinimapProjector, MinimapView};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Cursor shown over the canvas background while idle.
const CURSOR_GRAB: &str = "grab";
/// Cursor shown while panning.
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(CanvasElement),
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementsDeleted { ids: Vec<ElementId> },
    /// The selection set changed; carries the new ids.
    SelectionChanged(Vec<ElementId>),
    CameraChanged(Camera),
    ToolChanged(Tool),
    SetCursor(String),
    RenderNeeded,
}

/// Read-only snapshot of the whole session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasState {
    pub elements: Vec<CanvasElement>,
    pub selected_ids: Vec<ElementId>,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// True while the background is being dragged to pan.
    pub is_dragging: bool,
    pub last_mouse_x: f64,
    pub last_mouse_y: f64,
    pub tool: Tool,
    /// Bumped on every state change.
    pub revision: u64,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// This is the single owner of the session state; every mutation goes through
/// one of its `&mut self` methods.
pub struct EngineCore {
    pub doc: ElementStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    last_pan_screen: Point,
    revision: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            doc: ElementStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            last_pan_screen: Point::default(),
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // --- Layout ---

    /// Record the viewport size in CSS pixels and the device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.touch();
        vec![Action::RenderNeeded]
    }

    /// The viewport size, once the host has reported a non-empty one.
    #[must_use]
    pub fn layout(&self) -> Option<Size> {
        (self.viewport_width > 0.0 && self.viewport_height > 0.0)
            .then(|| Size::new(self.viewport_width, self.viewport_height))
    }

    /// World point currently under the centre of the viewport.
    #[must_use]
    pub fn screen_center_world(&self) -> Point {
        let size = self.layout().unwrap_or(self.config.fallback_viewport);
        self.camera.screen_to_world(size.center())
    }

    // --- Toolbar ---

    /// Set the active tool.
    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.ui.tool == tool {
            return Vec::new();
        }
        self.ui.tool = tool;
        self.touch();
        vec![Action::ToolChanged(tool)]
    }

    /// Add a new element of `kind` centred in the viewport, on top of everything, as the only selection.
    pub fn add_element(&mut self, kind: ElementKind) -> Vec<Action> {
        let mut actions = self.select_tool(Tool::from(kind));
        let z_index = i64::try_from(self.doc.len()).unwrap_or(i64::MAX);
        let element = CanvasElement::with_defaults(kind, self.screen_center_world(), z_index);
        log::debug!("canvas: add {} id={} at ({:.1}, {:.1})", kind.as_str(), element.id, element.x, element.y);
        self.ui.selection.select_only(element.id);
        self.doc.insert(element.clone());
        self.touch();
        actions.push(Action::ElementCreated(element));
        actions.push(self.selection_changed());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every selected element. No-op when nothing is selected.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.ui.selection.ids().to_vec();
        let removed = self.doc.remove_all(&ids);
        let doc = &self.doc;
        self.ui.selection.retain_existing(|id| doc.contains(id));
        if self.input.target().is_some_and(|id| ids.contains(&id)) {
            self.input = InputState::Idle;
        }
        log::debug!("canvas: deleted {} element(s)", removed.len());
        self.touch();
        vec![Action::ElementsDeleted { ids: removed }, self.selection_changed(), Action::RenderNeeded]
    }

    // --- Element edits ---

    /// Replace the text of a sticky or text element.
    pub fn set_content(&mut self, id: &ElementId, content: String) -> Vec<Action> {
        let fields = PartialElement { content: Some(content), ..Default::default() };
        self.update_element(id, fields)
    }

    /// Apply a sparse update. Content is dropped for kinds without text; empty updates are ignored.
    /// Width and height are raised to the minimum element size.
    pub fn update_element(&mut self, id: &ElementId, mut fields: PartialElement) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            return Vec::new();
        };
        if !el.kind.has_text() || fields.content == el.content {
            fields.content = None;
        }
        let min = self.config.min_element_size;
        fields.width = fields.width.map(|w| w.max(min));
        fields.height = fields.height.map(|h| h.max(min));
        if fields.is_empty() || !self.doc.apply_partial(id, &fields) {
            return Vec::new();
        }
        self.touch();
        vec![Action::ElementUpdated { id: *id, fields }, Action::RenderNeeded]
    }

    /// Click selection: plain replaces the selection, multi-select toggles `id`.
    pub fn select_element(&mut self, id: ElementId, multi: bool) -> Vec<Action> {
        if !self.doc.contains(&id) {
            return Vec::new();
        }
        let before = self.ui.selection.clone();
        if multi {
            self.ui.selection.toggle(id);
        } else {
            self.ui.selection.select_only(id);
        }
        if self.ui.selection == before {
            return Vec::new();
        }
        self.touch();
        vec![self.selection_changed(), Action::RenderNeeded]
    }

    fn selection_changed(&self) -> Action {
        Action::SelectionChanged(self.ui.selection.ids().to_vec())
    }

    // --- Viewport ---

    /// Move the camera so `world` is centred on screen.
    pub fn center_on(&mut self, world: Point) -> Vec<Action> {
        let size = self.layout().unwrap_or(self.config.fallback_viewport);
        self.camera.center_on(world, size);
        self.touch();
        vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
    }

    #[must_use]
    pub fn minimap(&self) -> MinimapProjector {
        MinimapProjector::new(self.config.minimap)
    }

    /// Minimap projection of the current state.
    #[must_use]
    pub fn minimap_view(&self) -> MinimapView {
        self.minimap().view(self.doc.elements(), &self.camera, self.layout())
    }

    /// Re-centre the camera on the world point under minimap-local `local`.
    /// Ignored until the host has reported a layout.
    pub fn navigate_minimap(&mut self, local: Point) -> Vec<Action> {
        let projector = self.minimap();
        let bounds = projector.bounds(self.doc.elements());
        let Some(next) = projector.navigate(local, &self.camera, self.layout(), &bounds) else {
            return Vec::new();
        };
        log::debug!("canvas: minimap navigate to offset ({:.1}, {:.1})", next.offset_x, next.offset_y);
        self.camera = next;
        self.touch();
        vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if let Some(layout) = self.layout()
            && let Some(local) = self.minimap().screen_to_local(screen_pt, layout)
        {
            return self.navigate_minimap(local);
        }

        let world = self.camera.screen_to_world(screen_pt);
        match hit_test(world, &self.doc, &self.ui.selection, self.config.resize_handle_size) {
            Some(Hit { element_id, part: HitPart::ResizeHandle }) => self.start_resize(element_id, screen_pt),
            Some(Hit { element_id, part: HitPart::Body }) => {
                self.start_drag(element_id, screen_pt, modifiers.is_multi_select())
            }
            None if self.ui.tool == Tool::Select => self.start_pan(screen_pt),
            None => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                self.last_pan_screen = screen_pt;
                self.touch();
                vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
            }
            InputState::DraggingElement { id, last_screen } => {
                let delta = self.gesture_delta(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                let Some(el) = self.doc.get_mut(&id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                el.x += delta.x;
                el.y += delta.y;
                let fields = PartialElement { x: Some(el.x), y: Some(el.y), ..Default::default() };
                log::trace!("canvas: drag id={id} to ({:.1}, {:.1})", el.x, el.y);
                self.input = InputState::DraggingElement { id, last_screen: screen_pt };
                self.touch();
                vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded]
            }
            InputState::ResizingElement { id, start_screen, orig_width, orig_height } => {
                let delta = self.gesture_delta(screen_pt.x - start_screen.x, screen_pt.y - start_screen.y);
                let min = self.config.min_element_size;
                let Some(el) = self.doc.get_mut(&id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                el.width = (orig_width + delta.x).max(min);
                el.height = (orig_height + delta.y).max(min);
                let fields = PartialElement { width: Some(el.width), height: Some(el.height), ..Default::default() };
                log::trace!("canvas: resize id={id} to {:.1}x{:.1}", el.width, el.height);
                self.touch();
                vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    /// The pointer left the canvas. Ends the gesture exactly as pointer-up does.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// Zoom one step toward (`dy < 0`) or away from the viewer, anchored at the cursor.
    #[allow(clippy::float_cmp)]
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let old = self.camera.scale;
        let new = stepped_scale(old, delta.dy, self.config.zoom_step, self.config.min_scale, self.config.max_scale);
        if new == old {
            return Vec::new();
        }
        self.camera.zoom_at(screen_pt, new);
        log::debug!("canvas: zoom {old:.2} -> {new:.2} at ({:.0}, {:.0})", screen_pt.x, screen_pt.y);
        self.touch();
        vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_delete() {
            return self.delete_selected();
        }
        Vec::new()
    }

    // --- Gestures ---

    fn start_pan(&mut self, screen_pt: Point) -> Vec<Action> {
        let had_selection = !self.ui.selection.is_empty();
        self.ui.selection.clear();
        self.input = InputState::Panning { last_screen: screen_pt };
        self.last_pan_screen = screen_pt;
        self.touch();
        let mut actions = Vec::new();
        if had_selection {
            actions.push(self.selection_changed());
            actions.push(Action::RenderNeeded);
        }
        actions.push(Action::SetCursor(CURSOR_GRABBING.into()));
        actions
    }

    fn start_drag(&mut self, id: ElementId, screen_pt: Point, multi: bool) -> Vec<Action> {
        let mut actions = self.select_element(id, multi);
        log::debug!("canvas: drag start id={id}");
        self.input = InputState::DraggingElement { id, last_screen: screen_pt };
        self.touch();
        if actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn start_resize(&mut self, id: ElementId, screen_pt: Point) -> Vec<Action> {
        let Some(el) = self.doc.get(&id) else {
            return Vec::new();
        };
        log::debug!("canvas: resize start id={id} from {:.1}x{:.1}", el.width, el.height);
        self.input = InputState::ResizingElement {
            id,
            start_screen: screen_pt,
            orig_width: el.width,
            orig_height: el.height,
        };
        self.touch();
        vec![Action::RenderNeeded]
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        let ended = std::mem::take(&mut self.input);
        match ended {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => {
                self.touch();
                vec![Action::SetCursor(CURSOR_GRAB.into())]
            }
            InputState::DraggingElement { id, .. } | InputState::ResizingElement { id, .. } => {
                log::debug!("canvas: gesture end id={id}");
                self.touch();
                vec![Action::RenderNeeded]
            }
        }
    }

    /// World-space movement for a screen-space pointer delta during drag or resize.
    fn gesture_delta(&self, dx: f64, dy: f64) -> Point {
        if self.config.scale_corrected_gestures {
            self.camera.screen_delta_to_world(dx, dy)
        } else {
            Point::new(dx, dy)
        }
    }

    // --- Queries ---

    /// The currently selected element ids.
    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        self.ui.selection.ids()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.doc.get(id)
    }

    /// Interaction state of one element, or `None` if it doesn't exist.
    #[must_use]
    pub fn element_state(&self, id: &ElementId) -> Option<ElementState> {
        if !self.doc.contains(id) {
            return None;
        }
        let state = match &self.input {
            InputState::DraggingElement { id: target, .. } if target == id => ElementState::Dragging,
            InputState::ResizingElement { id: target, .. } if target == id => ElementState::Resizing,
            _ if self.ui.selection.contains(id) => ElementState::Selected,
            _ => ElementState::Unselected,
        };
        Some(state)
    }

    /// Counter bumped on every state change; compare to skip redundant work.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot of the full session state.
    #[must_use]
    pub fn state(&self) -> CanvasState {
        CanvasState {
            elements: self.doc.elements().to_vec(),
            selected_ids: self.ui.selection.ids().to_vec(),
            scale: self.camera.scale,
            offset_x: self.camera.offset_x,
            offset_y: self.camera.offset_y,
            is_dragging: self.input.is_panning(),
            last_mouse_x: self.last_pan_screen.x,
            last_mouse_y: self.last_pan_screen.y,
            tool: self.ui.tool,
            revision: self.revision,
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self::with_config(canvas, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: EngineConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * self.core.dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * self.core.dpr).round().max(0.0) as u32);
        actions
    }

    /// Size the viewport to the browser window. No-op outside a window context.
    pub fn sync_viewport_from_window(&mut self) -> Vec<Action> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let width = window.inner_width().map(|v| v.as_f64());
        let height = window.inner_height().map(|v| v.as_f64());
        let (Ok(Some(width)), Ok(Some(height))) = (width, height) else {
            log::warn!("canvas: window size unavailable");
            return Vec::new();
        };
        let dpr = window.device_pixel_ratio().max(1.0);
        self.set_viewport(width, height, dpr)
    }

    // --- Delegated toolbar ---

    pub fn select_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.select_tool(tool)
    }

    pub fn add_element(&mut self, kind: ElementKind) -> Vec<Action> {
        self.core.add_element(kind)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    /// Select a tool by its host name (`"select"`, `"pen"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownTool`] if `name` is not a tool.
    pub fn select_tool_named(&mut self, name: &str) -> Result<Vec<Action>, CanvasError> {
        Ok(self.core.select_tool(name.parse()?))
    }

    /// Add an element by its kind name (`"sticky"`, `"circle"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElementKind`] if `name` is not an element kind.
    pub fn add_element_named(&mut self, name: &str) -> Result<Vec<Action>, CanvasError> {
        Ok(self.core.add_element(name.parse()?))
    }

    /// Replace the text of the element with the given id string.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidElementId`] if `id` is not a UUID.
    pub fn set_content(&mut self, id: &str, content: String) -> Result<Vec<Action>, CanvasError> {
        let id = ElementId::parse_str(id)?;
        Ok(self.core.set_content(&id, content))
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let raw: Option<js_sys::Object> = self.canvas.get_context("2d")?;
        let ctx = raw
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.core.element(id)
    }

    #[must_use]
    pub fn state(&self) -> CanvasState {
        self.core.state()
    }

    /// The state snapshot as JSON, for hosts that mirror it into their own UI.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::StateEncode`] if serialization fails.
    pub fn state_json(&self) -> Result<String, CanvasError> {
        Ok(serde_json::to_string(&self.core.state())?)
    }
}
