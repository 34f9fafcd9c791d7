use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::camera::{Camera, Point};
use crate::config::{SceneConfig, is_positive};
use crate::consts::{MAX_FONT_SIZE, MAX_ROTATION, MIN_FONT_SIZE, MIN_ROTATION, QUICK_TEXTS};
use crate::doc::{Ball, Element, ElementId, ElementStore, FontFamily, Letter, PartialElement, SceneError, is_hex_color};
use crate::hit::hit_test;
use crate::input::{Button, DragPolicy, InputState, PointerTarget, Selection, WheelDelta};
use crate::render::{SceneSnapshot, snapshot};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementsCreated(Vec<ElementId>),
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementDeleted { id: ElementId },
    SelectionChanged(Option<Selection>),
    PanChanged(Point),
    Cleared,
    RenderNeeded,
}

impl Action {
    /// Announce newly created elements, or nothing when none were made.
    fn created(ids: Vec<ElementId>) -> Vec<Action> {
        if ids.is_empty() {
            return Vec::new();
        }
        vec![Action::ElementsCreated(ids), Action::RenderNeeded]
    }
}

/// A single control on the letter property panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LetterProperty {
    FontSize(f64),
    Rotation(f64),
    Color(String),
    FontFamily(FontFamily),
}

impl LetterProperty {
    /// Clamp slider values to the ranges the panel offers.
    #[must_use]
    pub fn clamped(self) -> Self {
        match self {
            Self::FontSize(size) => Self::FontSize(size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)),
            Self::Rotation(deg) => Self::Rotation(deg.clamp(MIN_ROTATION, MAX_ROTATION)),
            other => other,
        }
    }

    #[must_use]
    pub fn into_partial(self) -> PartialElement {
        match self {
            Self::FontSize(size) => PartialElement { font_size: Some(size), ..PartialElement::default() },
            Self::Rotation(deg) => PartialElement { rotation: Some(deg), ..PartialElement::default() },
            Self::Color(color) => PartialElement { color: Some(color), ..PartialElement::default() },
            Self::FontFamily(family) => PartialElement { font_family: Some(family), ..PartialElement::default() },
        }
    }
}

/// One-click letter styles offered by the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    BoldRed,
    StylishBlue,
    PlayfulYellow,
    TechGreen,
}

impl StylePreset {
    pub const ALL: [Self; 4] = [Self::BoldRed, Self::StylishBlue, Self::PlayfulYellow, Self::TechGreen];

    /// Look a preset up by its snake_case name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold_red" => Some(Self::BoldRed),
            "stylish_blue" => Some(Self::StylishBlue),
            "playful_yellow" => Some(Self::PlayfulYellow),
            "tech_green" => Some(Self::TechGreen),
            _ => None,
        }
    }

    /// The full style this preset writes: size, color, rotation, family.
    #[must_use]
    pub fn partial(self) -> PartialElement {
        let (font_size, color, rotation, family) = match self {
            Self::BoldRed => (48.0, "#FF5E5E", 0.0, FontFamily::Arial),
            Self::StylishBlue => (36.0, "#5E9FFF", -10.0, FontFamily::Georgia),
            Self::PlayfulYellow => (42.0, "#FFDB5E", 10.0, FontFamily::Verdana),
            Self::TechGreen => (32.0, "#5EFF8F", 0.0, FontFamily::CourierNew),
        };
        PartialElement {
            font_size: Some(font_size),
            color: Some(color.to_owned()),
            rotation: Some(rotation),
            font_family: Some(family),
            ..PartialElement::default()
        }
    }
}

/// Core engine state: all logic that does not depend on the browser.
///
/// Owns the element store, the selection, the pan offset and the active
/// gesture. Every mutation goes through the methods below, which keep the
/// selection pointing at a live element and at most one drag running.
pub struct EngineCore {
    doc: ElementStore,
    camera: Camera,
    input: InputState,
    selection: Option<Selection>,
    config: SceneConfig,
    text_input: String,
    viewport_width: f64,
    viewport_height: f64,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Engine with a deterministic ball placement sequence.
    #[must_use]
    pub fn with_seed(config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SceneConfig, rng: StdRng) -> Self {
        Self {
            doc: ElementStore::new(),
            camera: Camera::default(),
            input: InputState::default(),
            selection: None,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            config,
            text_input: String::new(),
            rng,
        }
    }

    // --- Creation ---

    /// Lay out one letter per character of `text` on a new row.
    ///
    /// Blank text is ignored. The row goes at the baseline on an empty
    /// scene, otherwise one row step below the lowest element.
    pub fn add_text(&mut self, text: &str) -> Vec<ElementId> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let layout = self.config.layout;
        let y = self
            .doc
            .max_y()
            .map_or(layout.baseline_y, |max_y| max_y + layout.row_step_y);
        let style = &self.config.letter;

        let mut ids = Vec::new();
        let mut x = layout.left_margin;
        for ch in text.chars() {
            let element = Element::letter(
                x,
                y,
                Letter {
                    text: ch.to_string(),
                    font_size: style.font_size,
                    color: style.color.clone(),
                    font_family: style.font_family.clone(),
                    rotation: style.rotation,
                },
            );
            let id = element.id;
            match self.doc.push(element) {
                Ok(()) => ids.push(id),
                Err(e) => tracing::warn!(error = %e, "letter not added"),
            }
            x += layout.step_x;
        }
        self.text_input.clear();

        tracing::debug!(count = ids.len(), y, "text added");
        ids
    }

    /// Drop a ball at a random spot inside the viewport.
    ///
    /// Returns `None` when balls are disabled for this scene.
    pub fn add_ball(&mut self, size: f64, color: &str) -> Option<ElementId> {
        if !self.config.capabilities.balls {
            tracing::debug!("balls disabled; add_ball ignored");
            return None;
        }

        let size = if is_positive(size) {
            size
        } else {
            tracing::debug!(size, "unusable ball size; using default");
            self.config.ball_size
        };
        let color = if is_hex_color(color) {
            color.to_owned()
        } else {
            tracing::debug!(color, "unusable ball color; using default");
            self.config.letter.color.clone()
        };

        let x = self.sample(self.viewport_width - size);
        let y = self.sample(self.viewport_height - size);
        let element = Element::ball(x, y, Ball { size, color });
        let id = element.id;
        if let Err(e) = self.doc.push(element) {
            tracing::warn!(error = %e, "ball not added");
            return None;
        }

        tracing::debug!(%id, x, y, size, "ball added");
        Some(id)
    }

    /// Uniform sample from `[0, span)`, or 0 when the span is empty.
    fn sample(&mut self, span: f64) -> f64 {
        if span > 0.0 && span.is_finite() { self.rng.random_range(0.0..span) } else { 0.0 }
    }

    // --- Text input buffer ---

    pub fn set_input(&mut self, text: &str) {
        text.clone_into(&mut self.text_input);
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.text_input
    }

    /// Whether the submit button should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.text_input.trim().is_empty()
    }

    /// Submit the pending input buffer as text.
    pub fn submit_input(&mut self) -> Vec<ElementId> {
        let text = std::mem::take(&mut self.text_input);
        let ids = self.add_text(&text);
        if ids.is_empty() {
            self.text_input = text;
        }
        ids
    }

    /// Add one of the `QUICK_TEXTS` suggestions by index.
    pub fn add_quick_text(&mut self, index: usize) -> Vec<ElementId> {
        match QUICK_TEXTS.get(index) {
            Some(text) => self.add_text(text),
            None => Vec::new(),
        }
    }

    // --- Selection ---

    /// Select `id`. Selecting an id that is not in the scene clears the
    /// selection instead of leaving a dangling reference.
    pub fn select(&mut self, id: ElementId) {
        if !self.config.capabilities.editing {
            return;
        }
        self.selection = self.doc.get(&id).map(|element| Selection { id, tag: element.tag() });
        if self.selection.is_none() {
            tracing::debug!(%id, "select of unknown element clears selection");
        }
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    // --- Mutation ---

    /// Merge `partial` into element `id`, absorbing any rejection.
    pub fn update_element(&mut self, id: ElementId, partial: &PartialElement) {
        if let Err(e) = self.try_update_element(id, partial) {
            tracing::debug!(%id, error = %e, "element update ignored");
        }
    }

    /// Merge `partial` into element `id`, reporting why it was refused.
    pub fn try_update_element(&mut self, id: ElementId, partial: &PartialElement) -> Result<(), SceneError> {
        if !self.config.capabilities.editing {
            return Err(SceneError::ReadOnly);
        }
        self.doc.apply_partial(&id, partial)
    }

    /// Edit one property of the selected letter. Returns `false` when
    /// nothing is selected or the edit was refused.
    pub fn set_selected_property(&mut self, property: LetterProperty) -> bool {
        self.update_selected(&property.clamped().into_partial())
    }

    /// Apply a style preset to the selected letter.
    pub fn apply_preset(&mut self, preset: StylePreset) -> bool {
        self.update_selected(&preset.partial())
    }

    /// Put the selected letter back to the configured default style.
    pub fn reset_selected_style(&mut self) -> bool {
        let style = &self.config.letter;
        let partial = PartialElement {
            font_size: Some(style.font_size),
            color: Some(style.color.clone()),
            rotation: Some(style.rotation),
            font_family: Some(style.font_family.clone()),
            ..PartialElement::default()
        };
        self.update_selected(&partial)
    }

    fn update_selected(&mut self, partial: &PartialElement) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        match self.try_update_element(selection.id, partial) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(id = %selection.id, error = %e, "property edit ignored");
                false
            }
        }
    }

    // --- Deletion ---

    /// Remove the selected element and clear the selection.
    pub fn delete_selected(&mut self) -> Option<ElementId> {
        let selection = self.selection.take()?;
        if self.input.dragged_id() == Some(selection.id) {
            self.input = InputState::Idle;
        }
        let removed = self.doc.remove(&selection.id).map(|element| element.id);
        tracing::debug!(id = %selection.id, "selected element deleted");
        removed
    }

    /// Empty the scene, clear the selection and reset the pan.
    pub fn clear_all(&mut self) {
        self.doc.clear();
        self.selection = None;
        self.input = InputState::Idle;
        self.camera.reset();
        tracing::debug!("scene cleared");
    }

    // --- View ---

    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.camera.pan_by(dx, dy);
        }
    }

    /// Return the pan offset to the origin, keeping every element.
    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Record the canvas size used to place new balls.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if is_positive(width) && is_positive(height) {
            self.viewport_width = width;
            self.viewport_height = height;
        }
    }

    // --- Drag gesture ---

    /// Start dragging `id` from the pointer position `screen`.
    ///
    /// Any stale gesture is dropped first, so at most one drag exists.
    pub fn begin_drag(&mut self, id: ElementId, screen: Point) -> bool {
        if !self.config.capabilities.editing {
            return false;
        }
        let Some(element) = self.doc.get(&id) else {
            return false;
        };
        if let Some(stale) = self.input.dragged_id() {
            tracing::debug!(id = %stale, "stale drag dropped");
        }
        self.input = InputState::Dragging { id, start_screen: screen, start_world: element.position() };
        true
    }

    /// Move the dragged element to follow the pointer.
    pub fn update_drag(&mut self, screen: Point) -> Option<(ElementId, PartialElement)> {
        let (id, pos) = self.input.drag_target(screen)?;
        let fields = PartialElement::position(pos.x, pos.y);
        match self.try_update_element(id, &fields) {
            Ok(()) => Some((id, fields)),
            Err(e) => {
                tracing::debug!(%id, error = %e, "drag ended");
                self.input = InputState::Idle;
                None
            }
        }
    }

    /// Finish the active drag. Returns whether one was running.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = !self.input.is_idle();
        self.input = InputState::Idle;
        was_dragging
    }

    // --- Commands ---

    pub fn on_add_text(&mut self, text: &str) -> Vec<Action> {
        Action::created(self.add_text(text))
    }

    pub fn on_submit_input(&mut self) -> Vec<Action> {
        Action::created(self.submit_input())
    }

    pub fn on_quick_text(&mut self, index: usize) -> Vec<Action> {
        Action::created(self.add_quick_text(index))
    }

    pub fn on_add_ball(&mut self, size: f64, color: &str) -> Vec<Action> {
        Action::created(self.add_ball(size, color).into_iter().collect())
    }

    pub fn on_delete_selected(&mut self) -> Vec<Action> {
        match self.delete_selected() {
            Some(id) => vec![Action::ElementDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Clearing always re-renders: the pan resets even on an empty scene.
    pub fn on_clear_all(&mut self) -> Vec<Action> {
        self.clear_all();
        vec![Action::Cleared, Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, target: PointerTarget) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_drag();

        let PointerTarget::Element(id) = target else {
            return Vec::new();
        };
        if !self.config.capabilities.editing {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let before = self.selection;
        if before.is_none_or(|s| s.id != id) {
            self.select(id);
            if self.selection != before {
                actions.push(Action::SelectionChanged(self.selection));
                actions.push(Action::RenderNeeded);
            }
            if self.config.capabilities.drag_policy == DragPolicy::SelectFirst {
                return actions;
            }
        }
        self.begin_drag(id, screen);
        actions
    }

    /// Pointer-down for hosts that only report coordinates.
    pub fn on_pointer_down_at(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let target = self.target_at(screen);
        self.on_pointer_down(screen, button, target)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.update_drag(screen) {
            Some((id, fields)) => vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Pointer-up anywhere ends the gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_drag();
        Vec::new()
    }

    /// A click: on the canvas root it clears the selection, on an element
    /// it selects that element, anywhere else it does nothing.
    pub fn on_click(&mut self, target: PointerTarget) -> Vec<Action> {
        let before = self.selection;
        match target {
            PointerTarget::CanvasRoot => self.deselect(),
            PointerTarget::Element(id) => self.select(id),
            PointerTarget::Other => {}
        }
        if self.selection == before {
            return Vec::new();
        }
        vec![Action::SelectionChanged(self.selection), Action::RenderNeeded]
    }

    /// Click for hosts that only report coordinates.
    pub fn on_click_at(&mut self, screen: Point) -> Vec<Action> {
        let target = self.target_at(screen);
        self.on_click(target)
    }

    /// Two-finger scroll: the content follows the fingers.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        let before = self.camera;
        self.pan(-delta.dx, -delta.dy);
        if self.camera == before {
            return Vec::new();
        }
        vec![Action::PanChanged(self.camera.offset()), Action::RenderNeeded]
    }

    fn target_at(&self, screen: Point) -> PointerTarget {
        hit_test(self.camera.screen_to_world(screen), &self.doc)
            .map_or(PointerTarget::CanvasRoot, PointerTarget::Element)
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The selected element itself.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.and_then(|s| self.doc.get(&s.id))
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.doc.elements()
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        snapshot(&self.doc, &self.camera, self.selection)
    }
}

/// The engine as seen from JavaScript. Wraps `EngineCore` and speaks in
/// primitives: numbers, strings and JSON.
///
/// Methods returning `bool` report whether the host should re-render.
#[wasm_bindgen]
pub struct Engine {
    core: EngineCore,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { core: EngineCore::new() }
    }

    /// Create an engine from a JSON `SceneConfig`.
    pub fn with_config(config_json: &str) -> Result<Engine, JsError> {
        let config = SceneConfig::from_json(config_json)?;
        Ok(Self { core: EngineCore::with_config(config) })
    }

    // --- Creation ---

    pub fn set_input(&mut self, text: &str) {
        self.core.set_input(text);
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.core.can_submit()
    }

    pub fn submit_input(&mut self) -> bool {
        !self.core.on_submit_input().is_empty()
    }

    pub fn add_text(&mut self, text: &str) -> bool {
        !self.core.on_add_text(text).is_empty()
    }

    pub fn add_quick_text(&mut self, index: usize) -> bool {
        !self.core.on_quick_text(index).is_empty()
    }

    /// Returns the new ball's id.
    pub fn add_ball(&mut self, size: f64, color: &str) -> Option<String> {
        self.core.add_ball(size, color).map(|id| id.to_string())
    }

    // --- Selection and editing ---

    pub fn select(&mut self, id: &str) {
        match Uuid::parse_str(id) {
            Ok(id) => self.core.select(id),
            Err(_) => self.core.deselect(),
        }
    }

    pub fn deselect(&mut self) {
        self.core.deselect();
    }

    /// Merge a JSON `PartialElement` into element `id`.
    pub fn update_element(&mut self, id: &str, fields_json: &str) -> bool {
        let Ok(id) = Uuid::parse_str(id) else {
            return false;
        };
        match serde_json::from_str::<PartialElement>(fields_json) {
            Ok(fields) => self.core.try_update_element(id, &fields).is_ok(),
            Err(e) => {
                tracing::debug!(error = %e, "malformed element update");
                false
            }
        }
    }

    pub fn set_font_size(&mut self, size: f64) -> bool {
        self.core.set_selected_property(LetterProperty::FontSize(size))
    }

    pub fn set_rotation(&mut self, degrees: f64) -> bool {
        self.core.set_selected_property(LetterProperty::Rotation(degrees))
    }

    pub fn set_color(&mut self, color: &str) -> bool {
        self.core.set_selected_property(LetterProperty::Color(color.to_owned()))
    }

    pub fn set_font_family(&mut self, family: &str) -> bool {
        self.core.set_selected_property(LetterProperty::FontFamily(FontFamily::from(family)))
    }

    pub fn apply_preset(&mut self, name: &str) -> bool {
        StylePreset::from_name(name).is_some_and(|preset| self.core.apply_preset(preset))
    }

    pub fn reset_style(&mut self) -> bool {
        self.core.reset_selected_style()
    }

    pub fn delete_selected(&mut self) -> bool {
        !self.core.on_delete_selected().is_empty()
    }

    pub fn clear_all(&mut self) -> bool {
        !self.core.on_clear_all().is_empty()
    }

    // --- View ---

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.core.set_viewport(width, height);
    }

    pub fn reset_view(&mut self) {
        self.core.reset_view();
    }

    // --- Input events ---

    /// Pointer-down on the rendered element `id`.
    pub fn on_element_pointer_down(&mut self, id: &str, x: f64, y: f64, button: i16) -> bool {
        let Ok(id) = Uuid::parse_str(id) else {
            return false;
        };
        !self.core.on_pointer_down(Point::new(x, y), Button::from_dom(button), PointerTarget::Element(id)).is_empty()
    }

    /// Pointer-down resolved by hit testing.
    pub fn on_pointer_down_at(&mut self, x: f64, y: f64, button: i16) -> bool {
        !self.core.on_pointer_down_at(Point::new(x, y), Button::from_dom(button)).is_empty()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        !self.core.on_pointer_move(Point::new(x, y)).is_empty()
    }

    pub fn on_pointer_up(&mut self) -> bool {
        !self.core.on_pointer_up().is_empty()
    }

    /// Click whose event target is the canvas container itself.
    pub fn on_background_click(&mut self) -> bool {
        !self.core.on_click(PointerTarget::CanvasRoot).is_empty()
    }

    pub fn on_element_click(&mut self, id: &str) -> bool {
        let target = Uuid::parse_str(id).map_or(PointerTarget::Other, PointerTarget::Element);
        !self.core.on_click(target).is_empty()
    }

    pub fn on_click_at(&mut self, x: f64, y: f64) -> bool {
        !self.core.on_click_at(Point::new(x, y)).is_empty()
    }

    /// The host must call `preventDefault` on the wheel event itself.
    pub fn on_wheel(&mut self, dx: f64, dy: f64) -> bool {
        !self.core.on_wheel(WheelDelta { dx, dy }).is_empty()
    }

    // --- Render ---

    /// The current `SceneSnapshot` as JSON.
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.core.snapshot())?)
    }
}

impl Engine {
    /// Borrow the host-independent core.
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }
}
