//! Scene snapshot handed to the host after every mutation.
//!
//! The engine does not draw anything itself. The host renders each
//! `RenderElement` as an absolutely positioned node at its screen position;
//! the pan offset is already folded in so the host never needs to know the
//! stored scene coordinates.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::doc::{ElementId, ElementKind, ElementStore};
use crate::input::Selection;

/// One positioned, styled primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderElement {
    pub id: ElementId,
    /// Stored position plus the pan offset.
    pub screen: Point,
    pub selected: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    /// Elements in paint order.
    pub elements: Vec<RenderElement>,
    pub selection: Option<Selection>,
    pub pan: Point,
}

impl SceneSnapshot {
    /// The render entry for `id`, if present.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&RenderElement> {
        self.elements.iter().find(|e| e.id == *id)
    }
}

/// Build a snapshot of the current scene.
#[must_use]
pub fn snapshot(doc: &ElementStore, camera: &Camera, selection: Option<Selection>) -> SceneSnapshot {
    let selected_id = selection.map(|s| s.id);
    let elements = doc
        .elements()
        .iter()
        .map(|element| RenderElement {
            id: element.id,
            screen: camera.world_to_screen(element.position()),
            selected: selected_id == Some(element.id),
            kind: element.kind.clone(),
        })
        .collect();
    SceneSnapshot { elements, selection, pan: camera.offset() }
}
